mod commit;
mod config;
mod github;
mod logging;
mod pipeline;

use crate::config::Config;
use anyhow::Result;
use clap::Parser;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config)?;

    let commits = config.commit_source()?;
    info!("Rewriting nightly descriptor from {}", commits.describe());

    pipeline::run(&config.job(), commits.as_ref()).await
}
