use crate::document::Document;
use crate::error::DescriptorError;
use crate::path::NodePath;
use tracing::{debug, info};

/// Placeholder replaced by the short commit hash in a version template.
pub const HASH_PLACEHOLDER: &str = "{hash}";

pub fn nightly_version(template: &str, short_hash: &str) -> String {
    template.replace(HASH_PLACEHOLDER, short_hash)
}

/// Replaces one distribution channel token with another, e.g.
/// `stable-builds` with `nightly-builds`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelSwitch {
    pub from: String,
    pub to: String,
}

impl ChannelSwitch {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// `None` when the token doesn't occur and the text must stay as is.
    pub fn apply(&self, text: &str) -> Option<String> {
        if self.from.is_empty() || !text.contains(&self.from) {
            return None;
        }
        Some(text.replace(&self.from, &self.to))
    }
}

#[derive(Clone, Debug)]
pub struct NightlyRewrite {
    pub version_path: NodePath,
    pub version_label: String,
    pub channel_path: NodePath,
    pub channel: ChannelSwitch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub previous_version: Option<String>,
    pub channel_switched: bool,
}

impl NightlyRewrite {
    /// Patches the version label, then the distribution channel. Any missing
    /// node aborts with [`DescriptorError::MissingNode`].
    pub fn apply(&self, document: &mut Document) -> Result<RewriteOutcome, DescriptorError> {
        let version = document.root_mut().resolve_mut(&self.version_path)?;
        let previous_version = version.text()?;
        version.set_text(&self.version_label);
        info!(
            "Set {} ({}) from {:?} to {}",
            version.local_name(),
            self.version_path,
            previous_version.as_deref().unwrap_or_default(),
            self.version_label
        );

        let channel = document.root_mut().resolve_mut(&self.channel_path)?;
        let switched = match channel.text()? {
            Some(text) => self.channel.apply(&text),
            None => None,
        };
        let channel_switched = switched.is_some();
        match switched {
            Some(text) => {
                info!(
                    "Switched {} ({}) to {}",
                    channel.local_name(),
                    self.channel_path,
                    text
                );
                channel.set_text(&text);
            }
            None => debug!(
                "{} ({}) doesn't mention {}, leaving it as is",
                channel.local_name(),
                self.channel_path,
                self.channel.from
            ),
        }

        Ok(RewriteOutcome {
            previous_version,
            channel_switched,
        })
    }
}
