//! Story records as fetched, cached and ranked.
//!
//! The serialized field names (`hn_url`, `title_text`) are the cache file
//! format and must stay stable across releases.


use serde::{Deserialize, Serialize};

use crate::constants::{DISCUSSION_BASE_URL, PLACEHOLDER_TITLE};

/// Upstream story identifier.
pub type StoryId = u64;

/// A single top story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Display title.
    pub title: String,

    /// Discussion page link.
    #[serde(rename = "hn_url")]
    pub url: String,

    /// Body text, empty for link-only stories.
    pub text: String,

    /// Scoring input: `title` plus `text` when present.
    #[serde(rename = "title_text")]
    pub combined_text: String,
}

impl Story {
    /// Builds a story from raw upstream fields, applying the title placeholder
    /// and deriving `url` and `combined_text`.
    pub fn from_parts(id: StoryId, title: Option<String>, text: Option<String>) -> Self {
        let title = title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());
        let text = text.unwrap_or_default();
        let combined_text = combine_text(&title, &text);

        Self {
            title,
            url: discussion_url(id),
            text,
            combined_text,
        }
    }

    /// Returns the `[title](url)` markdown link used by the shell.
    pub fn markdown_link(&self) -> String {
        format!("[{}]({})", self.title, self.url)
    }
}

/// Discussion URL for a story id.
pub fn discussion_url(id: StoryId) -> String {
    format!("{}/item?id={}", DISCUSSION_BASE_URL, id)
}

/// Joins title and body with a newline, or returns the title alone.
pub fn combine_text(title: &str, text: &str) -> String {
    if text.is_empty() {
        title.to_string()
    } else {
        format!("{}\n{}", title, text)
    }
}

/// Renders a numbered listing, one `"{rank}. [title](url)"` line per story.
pub fn render_listing(stories: &[Story]) -> String {
    stories
        .iter()
        .enumerate()
        .map(|(i, story)| format!("{}. {}\n", i + 1, story.markdown_link()))
        .collect()
}
