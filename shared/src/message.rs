//! Commit subjects produced by the problem-tracking integration look like
//! `[Level 1] Title: Two Sum, Time: 0.1 ms, Memory: 33.4 MB -BaekjoonHub`.
//!
//! Two rules are applied to the first comma-delimited segment of the subject:
//!
//! - tag rule: `[level N]` (any letter case, optional whitespace before the
//!   digits) yields the lower-cased bracket content;
//! - title rule: the text after `Title:` is the title.
//!
//! When the title rule does not match, the whole segment is displayed instead.

const LEVEL_KEYWORD: &str = "level";
const TITLE_PREFIX: &str = "Title:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub title: String,
    pub level: Option<String>,
}

impl CommitSummary {
    pub fn parse(message: &str) -> Self {
        let segment = working_segment(message);
        Self {
            title: extract_title(segment).unwrap_or(segment).to_string(),
            level: extract_level(segment),
        }
    }
}

/// First comma-delimited segment of the subject line.
pub fn working_segment(message: &str) -> &str {
    let subject = message.lines().next().unwrap_or_default();
    subject.split(',').next().unwrap_or_default()
}

pub fn extract_level(text: &str) -> Option<String> {
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        rest = &rest[open + 1..];
        if let Some(level) = level_in_bracket(rest) {
            return Some(level.to_lowercase());
        }
    }
    None
}

// `text` starts right after `[`; returns the bracket content when it is a level tag.
fn level_in_bracket(text: &str) -> Option<&str> {
    let keyword = text.get(..LEVEL_KEYWORD.len())?;
    if !keyword.eq_ignore_ascii_case(LEVEL_KEYWORD) {
        return None;
    }

    let after_keyword = &text[LEVEL_KEYWORD.len()..];
    let after_space = after_keyword.trim_start();
    let digits = after_space.len()
        - after_space
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .len();
    if digits == 0 {
        return None;
    }

    let content_len = text.len() - after_space.len() + digits;
    text[content_len..]
        .starts_with(']')
        .then(|| &text[..content_len])
}

/// Text after `Title:`, trimmed. A prefix followed by nothing but whitespace is not a title.
pub fn extract_title(text: &str) -> Option<&str> {
    let start = text.find(TITLE_PREFIX)? + TITLE_PREFIX.len();
    let title = text[start..].trim();
    (!title.is_empty()).then_some(title)
}
