mod utils;

use anyhow::Result;
use nightly_descriptor::{DescriptorError, NodePath, PathStep};
use utils::load_fixture;

#[tokio::test]
async fn positional_and_named_paths_agree() -> Result<()> {
    let document = load_fixture("dict.xml").await?;
    let root = document.root();

    let by_position = root.resolve(&"3".parse()?)?;
    let by_name = root.resolve(&"version".parse()?)?;
    assert_eq!(by_position, by_name);
    assert_eq!(by_position.text()?.as_deref(), Some("v1.4.3"));

    let by_position = root.resolve(&"8/0/1".parse()?)?;
    let by_name = root.resolve(&"distributionManagement/repository/url".parse()?)?;
    assert_eq!(by_position, by_name);
    assert_eq!(
        by_position.text()?.as_deref(),
        Some("https://repo.nuka.works/repository/stable-builds/")
    );
    Ok(())
}

#[tokio::test]
async fn named_steps_ignore_prefixes() -> Result<()> {
    let document = load_fixture("prefixed.xml").await?;
    let url = document
        .root()
        .resolve(&"distributionManagement/repository/url".parse()?)?;
    assert_eq!(url.name(), "ns0:url");
    Ok(())
}

#[tokio::test]
async fn missing_step_is_reported() -> Result<()> {
    let document = load_fixture("no-distribution.xml").await?;
    let path: NodePath = "8/0/1".parse()?;
    match document.root().resolve(&path) {
        Err(DescriptorError::MissingNode { path: missing, step }) => {
            assert_eq!(missing, path);
            assert_eq!(step, PathStep::Index(8));
        }
        other => panic!("Expected a missing node, got {other:?}"),
    }
    Ok(())
}
