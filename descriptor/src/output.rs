use crate::document::Document;
use crate::error::DescriptorError;
use std::path::Path;
use tracing::debug;

/// Prefix artifacts an element-tree serializer leaves behind for a default
/// namespace (`<ns0:project xmlns:ns0=...>`).
const NAMESPACE_ARTIFACTS: [&str; 2] = ["ns0:", ":ns0"];

pub fn strip_namespace_artifacts(xml: &str) -> String {
    NAMESPACE_ARTIFACTS
        .iter()
        .fold(xml.to_owned(), |xml, artifact| xml.replace(artifact, ""))
}

/// The text written to the output descriptor.
pub fn render_descriptor(document: &Document) -> Result<String, DescriptorError> {
    Ok(strip_namespace_artifacts(&document.to_xml_string()?))
}

/// Overwrites `path`. The parent directory must already exist.
pub async fn write_descriptor(document: &Document, path: &Path) -> Result<(), DescriptorError> {
    let rendered = render_descriptor(document)?;
    tokio::fs::write(path, rendered.as_bytes()).await?;
    debug!("Wrote {} bytes to {}", rendered.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_prefixes_and_declarations() {
        assert_eq!(
            strip_namespace_artifacts(r#"<ns0:a xmlns:ns0="urn:x"><ns0:b/></ns0:a>"#),
            r#"<a xmlns="urn:x"><b/></a>"#
        );
    }

    #[test]
    fn strip_leaves_other_prefixes() {
        let xml = r#"<a xmlns:xsi="urn:xsi" xsi:schemaLocation="urn:x"/>"#;
        assert_eq!(strip_namespace_artifacts(xml), xml);
    }
}
