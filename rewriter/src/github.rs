use crate::commit::{CommitSource, ResolveError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Head of a branch in a repository addressed by its numeric GitHub id.
pub struct GithubBranch {
    client: reqwest::Client,
    api_url: Url,
    token: String,
    repository_id: u64,
    branch: String,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct Branch {
    name: String,
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: String,
}

impl GithubBranch {
    pub fn new(
        api_url: Url,
        token: String,
        repository_id: u64,
        branch: String,
    ) -> Result<Self, ResolveError> {
        Ok(Self {
            client: reqwest::Client::builder().user_agent(USER_AGENT).build()?,
            api_url,
            token,
            repository_id,
            branch,
        })
    }

    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, ResolveError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ResolveError::ApiUrlNotABase(self.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn repository_url(&self) -> Result<Url, ResolveError> {
        self.endpoint(["repositories", self.repository_id.to_string().as_str()])
    }

    /// `full_name` is `owner/repo`; the branch is a single escaped segment.
    fn branch_url(&self, full_name: &str) -> Result<Url, ResolveError> {
        self.endpoint(
            ["repos"]
                .into_iter()
                .chain(full_name.split('/'))
                .chain(["branches", self.branch.as_str()]),
        )
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, what: String) -> Result<T, ResolveError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        match response.status() {
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                Err(ResolveError::AuthenticationError(status))
            }
            StatusCode::NOT_FOUND => Err(ResolveError::NotFound(what)),
            _ => Ok(response.error_for_status()?.json().await?),
        }
    }
}

#[async_trait]
impl CommitSource for GithubBranch {
    async fn head_commit(&self) -> Result<String, ResolveError> {
        let repository: Repository = self
            .get(
                self.repository_url()?,
                format!("repository {}", self.repository_id),
            )
            .await?;
        debug!(
            "Repository {} is {}",
            self.repository_id, repository.full_name
        );

        let branch: Branch = self
            .get(
                self.branch_url(&repository.full_name)?,
                format!("branch {} of {}", self.branch, repository.full_name),
            )
            .await?;
        info!(
            "Head of {}/{} is {}",
            repository.full_name, branch.name, branch.commit.sha
        );
        Ok(branch.commit.sha)
    }

    fn describe(&self) -> String {
        format!(
            "branch {} of repository {} on {}",
            self.branch, self.repository_id, self.api_url
        )
    }
}
