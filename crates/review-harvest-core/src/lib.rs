pub mod aggregate;
pub mod collect;
pub mod dedup;
pub mod export;
pub mod filter;

pub use aggregate::ReviewSummary;
pub use collect::{CancelFlag, CollectOutcome, Collector, PageProgress};
pub use dedup::Deduper;
pub use filter::ReviewFilters;
