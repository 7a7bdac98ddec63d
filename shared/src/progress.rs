use crate::{github::CommitRecord, WeekWindow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyProgress {
    pub count: u32,
    pub below_threshold: bool,
}

impl WeeklyProgress {
    pub fn evaluate(
        commits: &[CommitRecord],
        window: &WeekWindow,
        marker: &str,
        min_count: u32,
    ) -> Self {
        let count = count_matching(commits, window, marker);
        Self {
            count,
            below_threshold: count < min_count,
        }
    }
}

/// Commits carrying `marker` (case-sensitive, anywhere in the message) and authored inside `window`.
pub fn count_matching(commits: &[CommitRecord], window: &WeekWindow, marker: &str) -> u32 {
    commits
        .iter()
        .filter(|commit| commit.message.contains(marker))
        .filter(|commit| window.contains(&commit.author_date))
        .count() as u32
}
