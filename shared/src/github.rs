//! Payloads of the GitHub REST endpoints the dashboard reads, and the records derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Element of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoCommit {
    pub sha: String,
    pub html_url: String,
    pub commit: GitCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    pub author: GitSignature,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitSignature {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

/// Subset of `GET /users/{owner}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub sha: String,
    pub html_url: String,
    pub author_name: String,
    pub author_email: String,
    pub author_date: DateTime<Utc>,
    pub message: String,
}

impl From<RepoCommit> for CommitRecord {
    fn from(commit: RepoCommit) -> Self {
        let GitCommit { author, message } = commit.commit;
        Self {
            sha: commit.sha,
            html_url: commit.html_url,
            author_name: author.name,
            author_email: author.email,
            author_date: author.date,
            message,
        }
    }
}
