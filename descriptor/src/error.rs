use crate::path::{NodePath, PathStep};

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("std::io::Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML parse error at byte {position}: {source}")]
    ParseError {
        position: u64,
        source: quick_xml::Error,
    },

    #[error("Descriptor is not valid UTF-8: {0}")]
    EncodingError(#[from] std::str::Utf8Error),

    #[error("Could not unescape text: {0}")]
    EscapeError(#[from] quick_xml::escape::EscapeError),

    #[error("Descriptor has no root element")]
    NoRootElement,

    #[error("Descriptor has a second root element: {0}")]
    MultipleRootElements(String),

    #[error("Element {0} is never closed")]
    UnclosedElement(String),

    #[error("Closing tag {0} has no matching opening tag")]
    UnexpectedClosingTag(String),

    #[error("Descriptor has no element at {path}: step {step} not found")]
    MissingNode { path: NodePath, step: PathStep },
}
