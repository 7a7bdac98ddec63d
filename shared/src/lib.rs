use serde::{Deserialize, Serialize};

pub mod github;
mod message;
mod progress;
mod timeperiod;

pub use message::*;
pub use progress::*;
pub use timeperiod::*;

pub type GithubHandle = String;

pub const DEFAULT_MIN_COUNT: u32 = 3;

fn default_min_count() -> u32 {
    DEFAULT_MIN_COUNT
}

/// Repository whose weekly progress is shown by one dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedRepository {
    pub owner: GithubHandle,
    pub repo: String,
    #[serde(default = "default_min_count")]
    pub min_count: u32,
}

impl TrackedRepository {
    pub fn new(owner: impl Into<GithubHandle>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            min_count: DEFAULT_MIN_COUNT,
        }
    }

    pub fn with_min_count(mut self, min_count: u32) -> Self {
        self.min_count = min_count;
        self
    }

    pub fn full_id(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
