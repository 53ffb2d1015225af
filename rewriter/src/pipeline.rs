use crate::commit::{short_hash, CommitSource};
use anyhow::{Context, Result};
use nightly_descriptor::{
    nightly_version, render_descriptor, write_descriptor, ChannelSwitch, Document, NightlyRewrite,
    NodePath,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Clone, Debug)]
pub struct RewriteJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub short_hash_len: usize,
    pub version_template: String,
    pub version_path: NodePath,
    pub channel_path: NodePath,
    pub channel: ChannelSwitch,
    pub dry_run: bool,
}

/// Load, resolve the commit, patch. Nothing is written.
async fn rewritten_document(job: &RewriteJob, commits: &dyn CommitSource) -> Result<Document> {
    let mut document = Document::from_path(&job.input)
        .await
        .with_context(|| format!("Could not load descriptor {}", job.input.display()))?;

    let sha = commits
        .head_commit()
        .await
        .with_context(|| format!("Could not resolve the head commit of {}", commits.describe()))?;
    let short_hash = short_hash(&sha, job.short_hash_len)?;

    NightlyRewrite {
        version_path: job.version_path.clone(),
        version_label: nightly_version(&job.version_template, short_hash),
        channel_path: job.channel_path.clone(),
        channel: job.channel.clone(),
    }
    .apply(&mut document)
    .with_context(|| format!("Could not rewrite descriptor {}", job.input.display()))?;

    Ok(document)
}

pub async fn run(job: &RewriteJob, commits: &dyn CommitSource) -> Result<()> {
    let document = rewritten_document(job, commits).await?;

    if job.dry_run {
        info!("Dry run, not writing {}", job.output.display());
        print!("{}", render_descriptor(&document)?);
        return Ok(());
    }

    write_descriptor(&document, &job.output)
        .await
        .with_context(|| format!("Could not write {}", job.output.display()))?;
    info!("Wrote nightly descriptor to {}", job.output.display());
    Ok(())
}
