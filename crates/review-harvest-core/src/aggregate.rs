use chrono::NaiveDate;
use review_harvest_models::{NormalizedReview, RatingGrade};
use serde::Serialize;
use std::collections::BTreeMap;

pub const TOP_HIGHLIGHTS: usize = 3;

/// Highlighted review bodies are cut to this many whitespace tokens.
const EXCERPT_MAX_WORDS: usize = 30;

#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub votes_up: u32,
    pub author: String,
    pub excerpt: String,
}

/// Summary statistics over the admitted set, computed once after collection.
/// An empty set produces zero-valued statistics and no grade.
#[derive(Debug, Serialize)]
pub struct ReviewSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub purchased: usize,
    pub purchased_pct: f64,
    pub grade: Option<RatingGrade>,
    /// Language code → count, in order of first occurrence.
    pub languages: Vec<(String, usize)>,
    pub average_playtime_hours: f64,
    pub under_one_hour: usize,
    pub under_one_hour_pct: f64,
    /// Reviews per calendar date, ascending.
    pub reviews_per_day: Vec<(NaiveDate, usize)>,
    pub top_positive: Vec<Highlight>,
    pub top_negative: Vec<Highlight>,
}

impl ReviewSummary {
    pub fn compute(reviews: &[NormalizedReview]) -> Self {
        let total = reviews.len();
        let positive = reviews.iter().filter(|r| r.voted_up).count();
        let negative = total - positive;
        let purchased = reviews.iter().filter(|r| r.steam_purchase).count();

        let mut languages: Vec<(String, usize)> = Vec::new();
        for review in reviews {
            match languages.iter_mut().find(|(lang, _)| *lang == review.language) {
                Some((_, count)) => *count += 1,
                None => languages.push((review.language.clone(), 1)),
            }
        }

        let playtime_sum: f64 = reviews.iter().map(|r| r.playtime_hours).sum();
        let average_playtime_hours = if total > 0 { playtime_sum / total as f64 } else { 0.0 };
        let under_one_hour = reviews.iter().filter(|r| r.playtime_hours < 1.0).count();

        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for review in reviews {
            *per_day.entry(review.posted_date()).or_insert(0) += 1;
        }

        let top_positive = top_by_votes(reviews.iter().filter(|r| r.voted_up));
        let top_negative = top_by_votes(reviews.iter().filter(|r| !r.voted_up));

        Self {
            total,
            positive,
            negative,
            purchased,
            purchased_pct: percentage(purchased, total),
            grade: RatingGrade::classify(positive, total),
            languages,
            average_playtime_hours,
            under_one_hour,
            under_one_hour_pct: percentage(under_one_hour, total),
            reviews_per_day: per_day.into_iter().collect(),
            top_positive,
            top_negative,
        }
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Top highlights by helpful votes. The sort is stable and descending, so
/// ties keep their admission order.
fn top_by_votes<'a>(reviews: impl Iterator<Item = &'a NormalizedReview>) -> Vec<Highlight> {
    let mut subset: Vec<&NormalizedReview> = reviews.collect();
    subset.sort_by(|a, b| b.votes_up.cmp(&a.votes_up));
    subset
        .into_iter()
        .take(TOP_HIGHLIGHTS)
        .map(|r| Highlight {
            votes_up: r.votes_up,
            author: r.author.clone(),
            excerpt: excerpt(&r.body),
        })
        .collect()
}

/// First `EXCERPT_MAX_WORDS` whitespace-delimited tokens, with a trailing
/// ellipsis when anything was cut.
fn excerpt(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= EXCERPT_MAX_WORDS {
        words.join(" ")
    } else {
        format!("{}...", words[..EXCERPT_MAX_WORDS].join(" "))
    }
}
