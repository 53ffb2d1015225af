#![allow(dead_code)]

use anyhow::Result;
use nightly_descriptor::{ChannelSwitch, Document, NightlyRewrite};
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("Missing test fixture")
}

pub async fn load_fixture(name: &str) -> Result<Document> {
    Ok(Document::from_path(&fixture_path(name)).await?)
}

pub fn positional_rewrite(short_hash: &str) -> NightlyRewrite {
    NightlyRewrite {
        version_path: "3".parse().unwrap(),
        version_label: format!("v1.4.3-nightly_{short_hash}"),
        channel_path: "8/0/1".parse().unwrap(),
        channel: ChannelSwitch::new("stable-builds", "nightly-builds"),
    }
}
