mod utils;

use anyhow::Result;
use nightly_descriptor::{render_descriptor, write_descriptor, DescriptorError};
use utils::{load_fixture, positional_rewrite};

#[tokio::test]
async fn prefixed_output_is_stripped() -> Result<()> {
    let mut document = load_fixture("prefixed.xml").await?;
    positional_rewrite("abc1234").apply(&mut document)?;
    let rendered = render_descriptor(&document)?;

    assert!(!rendered.contains("ns0:"));
    assert!(!rendered.contains(":ns0"));
    assert!(rendered.starts_with(r#"<project xmlns="http://maven.apache.org/POM/4.0.0">"#));
    assert!(rendered.contains("<version>v1.4.3-nightly_abc1234</version>"));
    assert!(rendered.contains("<url>https://repo.nuka.works/repository/nightly-builds/</url>"));
    Ok(())
}

#[tokio::test]
async fn write_overwrites_existing_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("nightly-pom.xml");
    std::fs::write(&output, "stale")?;

    let mut document = load_fixture("dict.xml").await?;
    positional_rewrite("abc1234").apply(&mut document)?;
    write_descriptor(&document, &output).await?;

    assert_eq!(std::fs::read_to_string(&output)?, render_descriptor(&document)?);
    Ok(())
}

#[tokio::test]
async fn write_does_not_create_directories() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join(".github").join("nightly-pom.xml");

    let document = load_fixture("dict.xml").await?;
    let result = write_descriptor(&document, &output).await;

    assert!(matches!(result, Err(DescriptorError::IoError(_))));
    assert!(!output.exists());
    Ok(())
}
