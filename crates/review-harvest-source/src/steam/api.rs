use crate::error::SourceError;
use chrono::{Local, TimeZone};
use review_harvest_models::{review::normalize_body, NormalizedReview, ReviewKey};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const STORE_BASE_URL: &str = "https://store.steampowered.com";

/// Reviews requested per page. The endpoint caps this at 100.
pub const PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewAuthor {
    pub steamid: String,
    /// Minutes on record when the review was written. Absent for some
    /// non-purchase reviews.
    #[serde(default)]
    pub playtime_at_review: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    pub author: ReviewAuthor,
    pub timestamp_created: i64,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub review: String,
    pub voted_up: bool,
    #[serde(default)]
    pub votes_up: u32,
    #[serde(default)]
    pub steam_purchase: bool,
}

impl RawReview {
    pub fn key(&self) -> ReviewKey {
        ReviewKey::new(self.author.steamid.clone(), self.timestamp_created)
    }

    /// Build the internal working record: playtime in hours, local posted-at,
    /// body in normal form. The original epoch timestamp is kept for identity.
    pub fn normalize(&self) -> NormalizedReview {
        let posted_at = Local
            .timestamp_opt(self.timestamp_created, 0)
            .single()
            .map(|dt| dt.naive_local())
            .unwrap_or_default();

        NormalizedReview {
            author: self.author.steamid.clone(),
            timestamp: self.timestamp_created,
            posted_at,
            language: self.language.clone(),
            voted_up: self.voted_up,
            votes_up: self.votes_up,
            playtime_hours: self.author.playtime_at_review as f64 / 60.0,
            steam_purchase: self.steam_purchase,
            body: normalize_body(&self.review),
        }
    }
}

/// One page of the paginated appreviews response.
#[derive(Debug, Clone, Default)]
pub struct ReviewPage {
    pub reviews: Vec<RawReview>,
    pub cursor: Option<String>,
}

impl ReviewPage {
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    reviews: Option<Vec<RawReview>>,
    cursor: Option<String>,
}

/// Issue one `GET /appreviews/{app_id}` request and parse the page.
pub async fn fetch_reviews_page(
    client: &Client,
    app_id: &str,
    language: &str,
    cursor: Option<&str>,
) -> Result<ReviewPage, SourceError> {
    let url = format!("{}/appreviews/{}", STORE_BASE_URL, app_id);

    let mut query: Vec<(&str, String)> = vec![
        ("json", "1".to_string()),
        ("language", language.to_string()),
        ("filter", "recent".to_string()),
        ("num_per_page", PAGE_SIZE.to_string()),
        ("purchase_type", "all".to_string()),
    ];
    if let Some(cursor) = cursor {
        query.push(("cursor", cursor.to_string()));
    }

    let response = client.get(&url).query(&query).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status { status, body });
    }

    let body = response.text().await?;
    let parsed: ReviewsResponse = serde_json::from_str(&body)
        .map_err(|e| SourceError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let reviews = parsed
        .reviews
        .ok_or_else(|| SourceError::MalformedResponse("missing `reviews` key".to_string()))?;

    debug!(app_id, count = reviews.len(), cursor = ?parsed.cursor, "Fetched review page");

    Ok(ReviewPage { reviews, cursor: parsed.cursor })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "author": { "steamid": "76561198000000001", "playtime_at_review": 120 },
        "timestamp_created": 1741000000,
        "language": "english",
        "review": "Line one\nline two\n",
        "voted_up": true,
        "votes_up": 10,
        "steam_purchase": true
    }"#;

    #[test]
    fn test_raw_review_parses() {
        let raw: RawReview = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(raw.author.steamid, "76561198000000001");
        assert_eq!(raw.votes_up, 10);
        assert!(raw.steam_purchase);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        // votes_up, steam_purchase, playtime and review body are all optional
        let raw: RawReview = serde_json::from_str(
            r#"{
                "author": { "steamid": "7656" },
                "timestamp_created": 100,
                "language": "english",
                "voted_up": false
            }"#,
        )
        .unwrap();
        assert_eq!(raw.votes_up, 0);
        assert!(!raw.steam_purchase);
        assert_eq!(raw.author.playtime_at_review, 0);
        assert_eq!(raw.review, "");
    }

    #[test]
    fn test_normalize_converts_playtime_and_body() {
        let raw: RawReview = serde_json::from_str(SAMPLE).unwrap();
        let normalized = raw.normalize();
        assert!((normalized.playtime_hours - 2.0).abs() < f64::EPSILON);
        assert_eq!(normalized.body, "Line one line two");
        assert_eq!(normalized.key(), raw.key());
    }

    #[test]
    fn test_response_missing_reviews_key_is_malformed() {
        let parsed: ReviewsResponse = serde_json::from_str(r#"{ "cursor": "abc" }"#).unwrap();
        assert!(parsed.reviews.is_none());
    }
}
