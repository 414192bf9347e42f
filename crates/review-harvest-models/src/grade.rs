use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative rating label in the style of the Steam store page, derived
/// from the positive ratio and the size of the admitted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingGrade {
    NotEnoughData,
    OverwhelminglyPositive,
    VeryPositive,
    MostlyPositive,
    Mixed,
    MostlyNegative,
    VeryNegative,
    OverwhelminglyNegative,
}

impl RatingGrade {
    /// Classify a review population. Checks run in order, first match wins.
    /// Returns `None` for an empty population — there is nothing to grade.
    pub fn classify(positives: usize, total: usize) -> Option<RatingGrade> {
        if total == 0 {
            return None;
        }
        let ratio = positives as f64 / total as f64;

        let grade = if total < 50 {
            RatingGrade::NotEnoughData
        } else if total >= 500 && ratio >= 0.95 {
            RatingGrade::OverwhelminglyPositive
        } else if total >= 500 && ratio <= 0.05 {
            RatingGrade::OverwhelminglyNegative
        } else if ratio >= 0.80 {
            RatingGrade::VeryPositive
        } else if ratio >= 0.70 {
            RatingGrade::MostlyPositive
        } else if ratio >= 0.40 {
            RatingGrade::Mixed
        } else if ratio >= 0.20 {
            RatingGrade::MostlyNegative
        } else if ratio >= 0.05 {
            RatingGrade::VeryNegative
        } else {
            RatingGrade::OverwhelminglyNegative
        };
        Some(grade)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingGrade::NotEnoughData => "Not enough data",
            RatingGrade::OverwhelminglyPositive => "Overwhelmingly Positive",
            RatingGrade::VeryPositive => "Very Positive",
            RatingGrade::MostlyPositive => "Mostly Positive",
            RatingGrade::Mixed => "Mixed",
            RatingGrade::MostlyNegative => "Mostly Negative",
            RatingGrade::VeryNegative => "Very Negative",
            RatingGrade::OverwhelminglyNegative => "Overwhelmingly Negative",
        }
    }
}

impl fmt::Display for RatingGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_population_has_no_grade() {
        assert_eq!(RatingGrade::classify(0, 0), None);
    }

    #[test]
    fn test_small_population_is_not_graded() {
        // Below 50 reviews the ratio is irrelevant
        assert_eq!(RatingGrade::classify(49, 49), Some(RatingGrade::NotEnoughData));
        assert_eq!(RatingGrade::classify(0, 49), Some(RatingGrade::NotEnoughData));
    }

    #[test]
    fn test_overwhelming_requires_large_population() {
        assert_eq!(
            RatingGrade::classify(475, 500),
            Some(RatingGrade::OverwhelminglyPositive)
        );
        // Same ratio, below the 500 threshold: falls through to Very Positive
        assert_eq!(RatingGrade::classify(95, 100), Some(RatingGrade::VeryPositive));
        assert_eq!(
            RatingGrade::classify(25, 500),
            Some(RatingGrade::OverwhelminglyNegative)
        );
    }

    #[test]
    fn test_ratio_boundaries() {
        assert_eq!(RatingGrade::classify(80, 100), Some(RatingGrade::VeryPositive));
        assert_eq!(RatingGrade::classify(79, 100), Some(RatingGrade::MostlyPositive));
        assert_eq!(RatingGrade::classify(70, 100), Some(RatingGrade::MostlyPositive));
        assert_eq!(RatingGrade::classify(40, 100), Some(RatingGrade::Mixed));
        assert_eq!(RatingGrade::classify(20, 100), Some(RatingGrade::MostlyNegative));
        assert_eq!(RatingGrade::classify(5, 100), Some(RatingGrade::VeryNegative));
        assert_eq!(
            RatingGrade::classify(4, 100),
            Some(RatingGrade::OverwhelminglyNegative)
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(RatingGrade::VeryPositive.to_string(), "Very Positive");
        assert_eq!(RatingGrade::NotEnoughData.to_string(), "Not enough data");
    }
}
