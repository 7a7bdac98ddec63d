use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use shared::{
    github::{CommitRecord, UserProfile},
    TrackedRepository, WeekWindow,
};
use tokio::sync::Notify;

use super::GithubApi;
use crate::error::{Endpoint, FetchError};

/// In-memory GitHub keyed by `owner/repo` (commits) and owner (profiles).
/// Anything not registered answers like a 404.
#[derive(Default)]
pub struct MockGithub {
    commits: Mutex<HashMap<String, Result<Vec<CommitRecord>, FetchError>>>,
    profiles: Mutex<HashMap<String, Result<UserProfile, FetchError>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    commit_requests: AtomicUsize,
}

impl MockGithub {
    pub fn set_commits(
        &self,
        repository: &TrackedRepository,
        result: Result<Vec<CommitRecord>, FetchError>,
    ) {
        self.commits
            .lock()
            .unwrap()
            .insert(repository.full_id(), result);
    }

    pub fn set_profile(&self, owner: &str, result: Result<UserProfile, FetchError>) {
        self.profiles
            .lock()
            .unwrap()
            .insert(owner.to_string(), result);
    }

    /// Holds back the commit response of `repository` until the returned handle is notified.
    pub fn gate(&self, repository: &TrackedRepository) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(repository.full_id())
            .or_default()
            .clone()
    }

    pub fn commit_requests(&self) -> usize {
        self.commit_requests.load(Ordering::SeqCst)
    }
}

fn not_found(endpoint: Endpoint) -> FetchError {
    FetchError::Status {
        endpoint,
        message: "Not Found".to_string(),
    }
}

#[async_trait]
impl GithubApi for MockGithub {
    async fn list_commits(
        &self,
        repository: &TrackedRepository,
        _window: &WeekWindow,
    ) -> Result<Vec<CommitRecord>, FetchError> {
        self.commit_requests.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().get(&repository.full_id()).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.commits
            .lock()
            .unwrap()
            .get(&repository.full_id())
            .cloned()
            .unwrap_or_else(|| Err(not_found(Endpoint::Commits)))
    }

    async fn user_profile(&self, owner: &str) -> Result<UserProfile, FetchError> {
        self.profiles
            .lock()
            .unwrap()
            .get(owner)
            .cloned()
            .unwrap_or_else(|| Err(not_found(Endpoint::Profile)))
    }
}

/// Week of Wednesday, 6 March 2024 (UTC).
pub fn fixed_window() -> WeekWindow {
    WeekWindow::containing(&Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap())
}

pub fn commit(message: &str, author_date: DateTime<Utc>) -> CommitRecord {
    CommitRecord {
        sha: format!("{:040x}", author_date.timestamp_millis()),
        html_url: format!(
            "https://github.com/annyoon/ps/commit/{}",
            author_date.timestamp_millis()
        ),
        author_name: "annyoon".to_string(),
        author_email: "annyoon@example.com".to_string(),
        author_date,
        message: message.to_string(),
    }
}
