use chrono::NaiveDate;
use review_harvest_config::RunConfig;
use review_harvest_models::{NormalizedReview, SentimentFilter};

/// Minimum playtime admitted when the playtime toggle is on.
const MIN_PLAYTIME_HOURS: f64 = 1.0;

/// The filter chain: an ordered conjunction of independent predicates over a
/// candidate review. All predicates are side-effect free and commutative, so
/// evaluation order never changes the admitted set. Deduplication is not a
/// filter concern and runs before any of these.
#[derive(Debug, Clone)]
pub struct ReviewFilters {
    start_date: NaiveDate,
    end_date: NaiveDate,
    sentiment: SentimentFilter,
    min_playtime: bool,
    purchase_required: bool,
    min_votes_up: u32,
}

impl ReviewFilters {
    pub fn from_run(config: &RunConfig) -> Self {
        Self {
            start_date: config.start_date,
            end_date: config.end_date,
            sentiment: config.sentiment,
            min_playtime: config.min_playtime,
            purchase_required: config.purchase_required,
            min_votes_up: config.min_votes_up,
        }
    }

    pub fn admits(&self, review: &NormalizedReview) -> bool {
        self.date_in_range(review)
            && self.sentiment_admits(review)
            && self.playtime_admits(review)
            && self.purchase_admits(review)
            && self.votes_admit(review)
    }

    fn date_in_range(&self, review: &NormalizedReview) -> bool {
        let date = review.posted_date();
        self.start_date <= date && date <= self.end_date
    }

    fn sentiment_admits(&self, review: &NormalizedReview) -> bool {
        self.sentiment.admits(review.voted_up)
    }

    fn playtime_admits(&self, review: &NormalizedReview) -> bool {
        !self.min_playtime || review.playtime_hours >= MIN_PLAYTIME_HOURS
    }

    fn purchase_admits(&self, review: &NormalizedReview) -> bool {
        !self.purchase_required || review.steam_purchase
    }

    // Lower bound only. Votes above the displayed slider maximum are still
    // admitted ("100+ included").
    fn votes_admit(&self, review: &NormalizedReview) -> bool {
        review.votes_up >= self.min_votes_up
    }
}
