pub mod error;
pub mod steam;
pub mod traits;

pub use error::SourceError;
pub use steam::api::{RawReview, ReviewAuthor, ReviewPage};
pub use steam::SteamClient;
pub use traits::ReviewSource;
