pub mod grade;
pub mod review;
pub mod sentiment;

pub use grade::RatingGrade;
pub use review::{NormalizedReview, ReviewKey};
pub use sentiment::SentimentFilter;
