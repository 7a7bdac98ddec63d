use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use serde::de::DeserializeOwned;
use shared::{
    github::{CommitRecord, RepoCommit, UserProfile},
    TrackedRepository, WeekWindow,
};
use tracing::{debug, instrument};

use crate::{
    consts::COMMITS_PER_PAGE,
    error::{Endpoint, FetchError},
};

#[cfg(test)]
pub mod mock;

/// Read side of the GitHub REST API used by the widgets.
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// First page of commits authored inside `window`, in the order GitHub returns them.
    async fn list_commits(
        &self,
        repository: &TrackedRepository,
        window: &WeekWindow,
    ) -> Result<Vec<CommitRecord>, FetchError>;

    async fn user_profile(&self, owner: &str) -> Result<UserProfile, FetchError>;
}

/// Window bounds only contain `[0-9:.TZ-]`, so the query needs no escaping.
fn commits_route(repository: &TrackedRepository, window: &WeekWindow) -> String {
    format!(
        "/repos/{}/{}/commits?since={}&until={}&per_page={COMMITS_PER_PAGE}",
        repository.owner,
        repository.repo,
        window.since(),
        window.until()
    )
}

/// Unauthenticated client; every request counts against the anonymous rate limit,
/// so failed requests are never retried.
#[derive(Clone, Debug)]
pub struct GithubClient {
    octocrab: octocrab::Octocrab,
}

impl GithubClient {
    pub fn new(api_base_url: &str) -> anyhow::Result<Self> {
        let octocrab = octocrab::Octocrab::builder()
            .base_uri(api_base_url)?
            .add_retry_config(RetryConfig::None)
            .build()?;

        Ok(Self { octocrab })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        route: String,
    ) -> Result<T, FetchError> {
        let response = self
            .octocrab
            ._get(route)
            .await
            .map_err(|e| FetchError::from_octocrab(endpoint, e))?;
        let status = response.status();
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| FetchError::from_octocrab(endpoint, e))?;

        if !status.is_success() {
            return Err(FetchError::from_status(endpoint, status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|e| FetchError::decode(endpoint, e))
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    #[instrument(skip(self, repository, window), fields(repo = %repository.full_id()))]
    async fn list_commits(
        &self,
        repository: &TrackedRepository,
        window: &WeekWindow,
    ) -> Result<Vec<CommitRecord>, FetchError> {
        let commits: Vec<RepoCommit> = self
            .get_json(Endpoint::Commits, commits_route(repository, window))
            .await?;
        debug!("Received {} commits", commits.len());

        Ok(commits.into_iter().map(CommitRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn user_profile(&self, owner: &str) -> Result<UserProfile, FetchError> {
        self.get_json(Endpoint::Profile, format!("/users/{owner}"))
            .await
    }
}
