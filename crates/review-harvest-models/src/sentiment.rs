use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recommendation filter: admit everything, only recommended reviews, or
/// only not-recommended reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentFilter {
    #[default]
    All,
    PositiveOnly,
    NegativeOnly,
}

impl SentimentFilter {
    pub fn admits(&self, voted_up: bool) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::PositiveOnly => voted_up,
            SentimentFilter::NegativeOnly => !voted_up,
        }
    }
}

impl fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentFilter::All => write!(f, "all"),
            SentimentFilter::PositiveOnly => write!(f, "positive"),
            SentimentFilter::NegativeOnly => write!(f, "negative"),
        }
    }
}

impl FromStr for SentimentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SentimentFilter::All),
            "positive" | "positive-only" => Ok(SentimentFilter::PositiveOnly),
            "negative" | "negative-only" => Ok(SentimentFilter::NegativeOnly),
            _ => Err(format!(
                "Invalid sentiment filter: {}. Use 'all', 'positive', or 'negative'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits() {
        assert!(SentimentFilter::All.admits(true));
        assert!(SentimentFilter::All.admits(false));
        assert!(SentimentFilter::PositiveOnly.admits(true));
        assert!(!SentimentFilter::PositiveOnly.admits(false));
        assert!(!SentimentFilter::NegativeOnly.admits(true));
        assert!(SentimentFilter::NegativeOnly.admits(false));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("all".parse::<SentimentFilter>().unwrap(), SentimentFilter::All);
        assert_eq!("Positive".parse::<SentimentFilter>().unwrap(), SentimentFilter::PositiveOnly);
        assert!("maybe".parse::<SentimentFilter>().is_err());
    }
}
