use review_harvest_models::ReviewKey;
use std::collections::HashSet;

/// Per-run identity guard. Every review seen across all pages is recorded
/// here, whether or not the filter chain later admits it, so a review that
/// reappears on a later page is never re-evaluated.
#[derive(Debug, Default)]
pub struct Deduper {
    seen: HashSet<ReviewKey>,
}

impl Deduper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per identity key.
    pub fn admit(&mut self, key: ReviewKey) -> bool {
        self.seen.insert(key)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
