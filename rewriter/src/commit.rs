use async_trait::async_trait;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("GitHub API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("GitHub rejected the credential ({0})")]
    AuthenticationError(reqwest::StatusCode),

    #[error("Not found on GitHub: {0}")]
    NotFound(String),

    #[error("GitHub API URL {0} cannot take a path")]
    ApiUrlNotABase(url::Url),

    #[error("No GitHub token was provided (set GITHUB_TOKEN or pass --commit-sha)")]
    MissingToken,

    #[error("Commit hash {0:?} is shorter than {1} characters")]
    HashTooShort(String, usize),

    #[error("Commit hash {0:?} is not hexadecimal")]
    HashNotHex(String),
}

/// Where the head commit of the nightly build comes from.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Full hash of the commit to build.
    async fn head_commit(&self) -> Result<String, ResolveError>;

    fn describe(&self) -> String;
}

/// A commit hash handed over by the CI environment.
pub struct FixedCommit(pub String);

#[async_trait]
impl CommitSource for FixedCommit {
    async fn head_commit(&self) -> Result<String, ResolveError> {
        info!("Using commit {} given on the command line", self.0);
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("fixed commit {}", self.0)
    }
}

pub fn short_hash(sha: &str, len: usize) -> Result<&str, ResolveError> {
    let sha = sha.trim();
    if !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ResolveError::HashNotHex(sha.to_owned()));
    }
    if sha.len() < len {
        return Err(ResolveError::HashTooShort(sha.to_owned(), len));
    }
    Ok(&sha[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hash_takes_prefix() {
        assert_eq!(short_hash("abc1234567", 7).unwrap(), "abc1234");
        assert_eq!(
            short_hash("9fceb02d0ae598e95dc970b74767f19372d61af8", 7).unwrap(),
            "9fceb02"
        );
    }

    #[test]
    fn short_hash_rejects_bad_input() {
        assert!(matches!(
            short_hash("abc12", 7),
            Err(ResolveError::HashTooShort(_, 7))
        ));
        assert!(matches!(
            short_hash("not-a-hash", 7),
            Err(ResolveError::HashNotHex(_))
        ));
    }

    #[tokio::test]
    async fn fixed_commit_returns_its_hash() {
        let source = FixedCommit("abc1234567".to_owned());
        assert_eq!(source.head_commit().await.unwrap(), "abc1234567");
    }
}
