use crate::commit::{CommitSource, FixedCommit, ResolveError};
use crate::github::GithubBranch;
use crate::pipeline::RewriteJob;
use clap::Parser;
use nightly_descriptor::{ChannelSwitch, NodePath};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use url::Url;

/// Rewrites the build descriptor into its nightly flavour: a version label
/// carrying the short commit hash and the nightly distribution channel.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Turn debug logs on
    #[clap(long)]
    debug: bool,

    /// Turn debug logs for all crates (not recommended)
    #[clap(long)]
    all_debug: bool,

    #[clap(long, env = "NIGHTLY_INPUT", default_value = "dict.xml")]
    input: PathBuf,

    #[clap(long, env = "NIGHTLY_OUTPUT", default_value = ".github/nightly-pom.xml")]
    output: PathBuf,

    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    #[clap(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api_url: Url,

    #[clap(long, env = "NIGHTLY_REPOSITORY_ID", default_value_t = 385764384)]
    repository_id: u64,

    #[clap(long, env = "NIGHTLY_BRANCH", default_value = "main")]
    branch: String,

    /// Use this commit instead of asking GitHub for the head of the branch
    #[clap(long, env = "NIGHTLY_COMMIT_SHA")]
    commit_sha: Option<String>,

    #[clap(long, default_value_t = 7)]
    short_hash_len: usize,

    /// `{hash}` is replaced by the short commit hash
    #[clap(long, default_value = "v1.4.3-nightly_{hash}")]
    version_template: String,

    /// Element holding the version label, as `/`-separated indexes or tag names
    #[clap(long, default_value = "3")]
    version_path: NodePath,

    /// Element holding the distribution channel URL
    #[clap(long, default_value = "8/0/1")]
    channel_path: NodePath,

    #[clap(long, default_value = "stable-builds")]
    stable_channel: String,

    #[clap(long, default_value = "nightly-builds")]
    nightly_channel: String,

    /// Print the rewritten descriptor instead of writing it
    #[clap(long)]
    dry_run: bool,
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        match self.debug || self.all_debug {
            true => LevelFilter::DEBUG,
            false => LevelFilter::INFO,
        }
    }

    pub fn all_log_level(&self) -> LevelFilter {
        match self.all_debug {
            true => LevelFilter::DEBUG,
            false => LevelFilter::INFO,
        }
    }

    pub fn commit_source(&self) -> Result<Box<dyn CommitSource>, ResolveError> {
        if let Some(sha) = self.commit_sha.as_ref() {
            return Ok(Box::new(FixedCommit(sha.to_owned())));
        }
        let token = self
            .github_token
            .as_ref()
            .filter(|token| !token.is_empty())
            .ok_or(ResolveError::MissingToken)?;
        Ok(Box::new(GithubBranch::new(
            self.github_api_url.clone(),
            token.to_owned(),
            self.repository_id,
            self.branch.clone(),
        )?))
    }

    pub fn job(&self) -> RewriteJob {
        RewriteJob {
            input: self.input.clone(),
            output: self.output.clone(),
            short_hash_len: self.short_hash_len,
            version_template: self.version_template.clone(),
            version_path: self.version_path.clone(),
            channel_path: self.channel_path.clone(),
            channel: ChannelSwitch::new(&self.stable_channel, &self.nightly_channel),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightly_descriptor::PathStep;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("nightly-rewriter").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_match_the_release_pipeline() {
        let config = parse(&["--github-token", "t"]);
        let job = config.job();
        assert_eq!(job.input, PathBuf::from("dict.xml"));
        assert_eq!(job.output, PathBuf::from(".github/nightly-pom.xml"));
        assert_eq!(job.short_hash_len, 7);
        assert_eq!(job.version_template, "v1.4.3-nightly_{hash}");
        assert_eq!(job.version_path.steps(), &[PathStep::Index(3)]);
        assert_eq!(job.channel_path.to_string(), "8/0/1");
        assert_eq!(job.channel, ChannelSwitch::new("stable-builds", "nightly-builds"));
        assert!(!job.dry_run);
        assert_eq!(config.repository_id, 385764384);
        assert_eq!(config.branch, "main");
        assert_eq!(config.log_level(), LevelFilter::INFO);
    }

    #[test]
    fn named_paths_are_accepted() {
        let config = parse(&[
            "--commit-sha",
            "abc1234567",
            "--version-path",
            "version",
            "--channel-path",
            "distributionManagement/repository/url",
        ]);
        assert_eq!(
            config.job().version_path.steps(),
            &[PathStep::Name("version".to_owned())]
        );
    }

    #[test]
    fn commit_sha_skips_github() {
        let config = parse(&["--commit-sha", "abc1234567"]);
        let source = config.commit_source().unwrap();
        assert_eq!(source.describe(), "fixed commit abc1234567");
    }

    #[test]
    fn github_needs_a_token() {
        let config = parse(&["--github-token", ""]);
        assert!(matches!(
            config.commit_source(),
            Err(ResolveError::MissingToken)
        ));
    }

    #[test]
    fn debug_flags_raise_log_levels() {
        let config = parse(&["--commit-sha", "abc1234567", "--debug"]);
        assert_eq!(config.log_level(), LevelFilter::DEBUG);
        assert_eq!(config.all_log_level(), LevelFilter::INFO);
    }
}
