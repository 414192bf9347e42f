use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identity of a review within a collection run: one author can post at most
/// one review per creation timestamp, so this pair is unique per review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewKey {
    pub author: String,
    pub timestamp: i64,
}

impl ReviewKey {
    pub fn new(author: impl Into<String>, timestamp: i64) -> Self {
        Self { author: author.into(), timestamp }
    }
}

/// A review after it has passed identity and filter checks. Lives for the
/// rest of the run inside the admitted set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedReview {
    pub author: String,
    /// Original creation timestamp (epoch seconds) — identity, not display.
    pub timestamp: i64,
    /// Creation time in the local timezone, used for date filtering and export.
    pub posted_at: NaiveDateTime,
    pub language: String,
    pub voted_up: bool,
    pub votes_up: u32,
    pub playtime_hours: f64,
    pub steam_purchase: bool,
    /// Review body with newlines collapsed and surrounding whitespace trimmed.
    pub body: String,
}

impl NormalizedReview {
    pub fn key(&self) -> ReviewKey {
        ReviewKey::new(self.author.clone(), self.timestamp)
    }

    pub fn posted_date(&self) -> NaiveDate {
        self.posted_at.date()
    }

    /// "YYYY-MM-DD HH:MM:SS", the export representation of `posted_at`.
    pub fn posted_at_str(&self) -> String {
        self.posted_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Collapse newlines to spaces and trim, the normal form of a review body.
/// A CRLF pair counts as one break, not two.
pub fn normalize_body(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}
