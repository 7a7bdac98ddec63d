use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use shared::CommitSummary;
use strum::{Display, EnumString};

use crate::{
    consts::{below_threshold_warning, LOCAL_DATE_FORMAT, SOLVED_DATE_LABEL, WEEKLY_COUNT_LABEL},
    widget::WidgetSnapshot,
};

mod html;
mod text;

pub use html::render_html;
pub use text::render_text;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

impl OutputFormat {
    pub fn render(&self, page: &Page) -> anyhow::Result<String> {
        match self {
            OutputFormat::Text => Ok(render_text(page)),
            OutputFormat::Html => render_html(page),
        }
    }
}

/// Render-ready view of the whole dashboard. Widgets that have not succeeded yet
/// show their last good (possibly empty) state.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub heading: String,
    pub week: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub owner: String,
    pub avatar_url: String,
    pub count_badge: String,
    pub warning: Option<String>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub title: String,
    pub level: Option<String>,
    pub date: String,
    pub url: String,
}

impl Page {
    /// Dates are shown in `tz`, normally the local time zone.
    pub fn new<Tz>(heading: &str, week: String, snapshots: &[WidgetSnapshot], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            heading: heading.to_string(),
            week,
            cards: snapshots
                .iter()
                .map(|snapshot| Card::new(snapshot, tz))
                .collect(),
        }
    }
}

impl Card {
    pub fn new<Tz>(snapshot: &WidgetSnapshot, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let view = &snapshot.view;
        let repository = &snapshot.repository;
        Self {
            owner: repository.owner.clone(),
            avatar_url: view.avatar_url.clone(),
            count_badge: format!("{WEEKLY_COUNT_LABEL}: {}", view.weekly_match_count),
            warning: view
                .below_threshold
                .then(|| below_threshold_warning(repository.min_count)),
            entries: view
                .commits
                .iter()
                .map(|commit| {
                    let summary = CommitSummary::parse(&commit.message);
                    let date = commit.author_date.with_timezone(tz);
                    Entry {
                        title: summary.title,
                        level: summary.level,
                        date: format!("{SOLVED_DATE_LABEL}: {}", date.format(LOCAL_DATE_FORMAT)),
                        url: commit.html_url.clone(),
                    }
                })
                .collect(),
        }
    }
}
