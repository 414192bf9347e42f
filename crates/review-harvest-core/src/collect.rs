use crate::dedup::Deduper;
use crate::filter::ReviewFilters;
use review_harvest_config::RunConfig;
use review_harvest_models::NormalizedReview;
use review_harvest_source::{ReviewSource, SourceError};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cooperative cancellation for a running collection. Checked before each
/// page request; setting it keeps the results accumulated so far.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Snapshot handed to the progress callback after each processed page.
#[derive(Debug, Clone, Copy)]
pub struct PageProgress {
    pub pages_fetched: usize,
    pub reviews_seen: usize,
    pub admitted: usize,
}

#[derive(Debug, Serialize)]
pub struct CollectOutcome {
    /// Admitted set, in admission order.
    pub reviews: Vec<NormalizedReview>,
    pub pages_fetched: usize,
    pub reviews_seen: usize,
    pub duplicates: usize,
    pub filtered_out: usize,
    pub cancelled: bool,
    #[serde(skip)]
    pub duration: Duration,
}

/// One collection run: fetch pages until the endpoint returns an empty page,
/// dedup first, then pass candidates through the filter chain.
///
/// Dedup runs before the filters, so a review rejected by a filter is still
/// recorded and will not be re-evaluated if a later page repeats it.
pub struct Collector {
    filters: ReviewFilters,
    page_delay: Duration,
    cancel: CancelFlag,
}

impl Collector {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            filters: ReviewFilters::from_run(config),
            page_delay: config.page_delay,
            cancel: CancelFlag::new(),
        }
    }

    /// Handle for aborting the run from another task (e.g. a ctrl-c handler).
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub async fn run(
        &self,
        source: &dyn ReviewSource,
        mut on_page: impl FnMut(PageProgress),
    ) -> Result<CollectOutcome, SourceError> {
        let started = Instant::now();
        let mut dedup = Deduper::new();
        let mut reviews: Vec<NormalizedReview> = Vec::new();
        let mut pages_fetched = 0;
        let mut reviews_seen = 0;
        let mut duplicates = 0;
        let mut filtered_out = 0;
        let mut cancelled = false;

        info!(source = source.source_name(), "Starting review collection");

        // Opaque token echoed back to the endpoint; "*" requests the first page.
        let mut cursor: Option<String> = Some("*".to_string());

        loop {
            if self.cancel.is_cancelled() {
                info!("Collection cancelled, keeping {} admitted reviews", reviews.len());
                cancelled = true;
                break;
            }

            let page = source.fetch_page(cursor.as_deref()).await?;
            if page.is_empty() {
                // The only termination condition: a page with zero reviews.
                break;
            }
            pages_fetched += 1;

            for raw in &page.reviews {
                reviews_seen += 1;
                if !dedup.admit(raw.key()) {
                    duplicates += 1;
                    continue;
                }
                let candidate = raw.normalize();
                if self.filters.admits(&candidate) {
                    reviews.push(candidate);
                } else {
                    filtered_out += 1;
                }
            }

            debug!(
                page = pages_fetched,
                page_reviews = page.reviews.len(),
                admitted = reviews.len(),
                "Processed review page"
            );
            on_page(PageProgress {
                pages_fetched,
                reviews_seen,
                admitted: reviews.len(),
            });

            // Next cursor is taken verbatim from the response; when absent the
            // next request goes out without one and is expected to terminate.
            cursor = page.cursor;

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        let duration = started.elapsed();
        info!(
            admitted = reviews.len(),
            seen = reviews_seen,
            duplicates,
            filtered_out,
            pages = pages_fetched,
            elapsed_secs = duration.as_secs_f64(),
            "Review collection finished"
        );

        Ok(CollectOutcome {
            reviews,
            pages_fetched,
            reviews_seen,
            duplicates,
            filtered_out,
            cancelled,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use review_harvest_models::SentimentFilter;
    use review_harvest_source::{RawReview, ReviewAuthor, ReviewPage};
    use std::sync::Mutex;

    struct PagedSource {
        pages: Vec<ReviewPage>,
        cursors_seen: Mutex<Vec<Option<String>>>,
    }

    impl PagedSource {
        fn new(pages: Vec<ReviewPage>) -> Self {
            Self { pages, cursors_seen: Mutex::new(Vec::new()) }
        }

        fn fetch_count(&self) -> usize {
            self.cursors_seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ReviewSource for PagedSource {
        fn source_name(&self) -> &str {
            "paged-test"
        }

        async fn fetch_page(&self, cursor: Option<&str>) -> Result<ReviewPage, SourceError> {
            let mut seen = self.cursors_seen.lock().unwrap();
            seen.push(cursor.map(|c| c.to_string()));
            let index = seen.len() - 1;
            Ok(self.pages.get(index).cloned().unwrap_or_default())
        }
    }

    fn raw(author: &str, ts: i64, voted_up: bool, votes_up: u32, playtime_min: u64) -> RawReview {
        RawReview {
            author: ReviewAuthor {
                steamid: author.to_string(),
                playtime_at_review: playtime_min,
            },
            timestamp_created: ts,
            language: "english".to_string(),
            review: "body".to_string(),
            voted_up,
            votes_up,
            steam_purchase: true,
        }
    }

    fn page(reviews: Vec<RawReview>, cursor: Option<&str>) -> ReviewPage {
        ReviewPage { reviews, cursor: cursor.map(|c| c.to_string()) }
    }

    fn run_config() -> RunConfig {
        RunConfig {
            app_id: "42".to_string(),
            game_name: None,
            language: "all".to_string(),
            // Wide range around the 2023 fixture timestamps so the date
            // filter admits them regardless of the local timezone
            start_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2100, 1, 1).unwrap(),
            sentiment: SentimentFilter::All,
            min_playtime: false,
            purchase_required: false,
            min_votes_up: 0,
            page_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_terminates_on_empty_page() {
        let source = PagedSource::new(vec![
            page(vec![raw("1", 1_700_000_100, true, 1, 60)], Some("c1")),
            page(vec![raw("2", 1_700_000_200, true, 1, 60)], Some("c2")),
            page(vec![], Some("c3")),
        ]);
        let collector = Collector::new(&run_config());

        let outcome = collector.run(&source, |_| {}).await.unwrap();

        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.reviews.len(), 2);
        // Exactly three fetches: two full pages plus the terminating empty one
        assert_eq!(source.fetch_count(), 3);
        let cursors = source.cursors_seen.lock().unwrap().clone();
        assert_eq!(
            cursors,
            vec![
                Some("*".to_string()),
                Some("c1".to_string()),
                Some("c2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_cursor_requests_without_one() {
        let source = PagedSource::new(vec![
            page(vec![raw("1", 1_700_000_100, true, 1, 60)], None),
            page(vec![], None),
        ]);
        let collector = Collector::new(&run_config());

        collector.run(&source, |_| {}).await.unwrap();

        let cursors = source.cursors_seen.lock().unwrap().clone();
        assert_eq!(cursors, vec![Some("*".to_string()), None]);
    }

    #[tokio::test]
    async fn test_duplicate_across_pages_admitted_once() {
        let source = PagedSource::new(vec![
            page(vec![raw("1", 1_700_000_100, true, 10, 120), raw("1", 1_700_000_100, true, 10, 120)], Some("c1")),
            page(vec![raw("1", 1_700_000_100, true, 10, 120), raw("2", 1_700_000_200, false, 2, 30)], Some("c2")),
            page(vec![], None),
        ]);
        let collector = Collector::new(&run_config());

        let outcome = collector.run(&source, |_| {}).await.unwrap();

        assert_eq!(outcome.reviews.len(), 2);
        assert_eq!(outcome.duplicates, 2);
        assert_eq!(outcome.reviews_seen, 4);
    }

    // Dedup runs before the filters, so a review rejected by a filter is
    // never reconsidered when a later page repeats it.
    #[tokio::test]
    async fn test_filter_rejected_review_is_not_reevaluated() {
        let source = PagedSource::new(vec![
            page(vec![raw("1", 1_700_000_100, true, 1, 60)], Some("c1")),
            page(vec![raw("1", 1_700_000_100, true, 1, 60)], Some("c2")),
            page(vec![], None),
        ]);
        let mut config = run_config();
        config.min_votes_up = 5;
        let collector = Collector::new(&config);

        let outcome = collector.run(&source, |_| {}).await.unwrap();

        assert!(outcome.reviews.is_empty());
        assert_eq!(outcome.filtered_out, 1);
        assert_eq!(outcome.duplicates, 1);
    }

    #[tokio::test]
    async fn test_empty_first_page_yields_empty_outcome() {
        let source = PagedSource::new(vec![page(vec![], None)]);
        let collector = Collector::new(&run_config());

        let outcome = collector.run(&source, |_| {}).await.unwrap();

        assert!(outcome.reviews.is_empty());
        assert_eq!(outcome.pages_fetched, 0);
        assert_eq!(outcome.reviews_seen, 0);
        assert!(!outcome.cancelled);
    }

    #[tokio::test]
    async fn test_cancellation_keeps_partial_results() {
        let source = PagedSource::new(vec![
            page(vec![raw("1", 1_700_000_100, true, 1, 60)], Some("c1")),
            page(vec![raw("2", 1_700_000_200, true, 1, 60)], Some("c2")),
            page(vec![], None),
        ]);
        let collector = Collector::new(&run_config());
        let cancel = collector.cancel_flag();

        let outcome = collector
            .run(&source, move |progress| {
                if progress.pages_fetched == 1 {
                    cancel.cancel();
                }
            })
            .await
            .unwrap();

        assert!(outcome.cancelled);
        assert_eq!(outcome.reviews.len(), 1);
        assert_eq!(outcome.pages_fetched, 1);
    }

    #[tokio::test]
    async fn test_collection_scenario_counts() {
        // Two distinct reviews plus one duplicate of the first
        let source = PagedSource::new(vec![
            page(
                vec![
                    raw("1", 1_700_000_100, true, 10, 120),
                    raw("1", 1_700_000_100, true, 10, 120),
                    raw("2", 1_700_000_200, false, 2, 30),
                ],
                Some("c1"),
            ),
            page(vec![], None),
        ]);
        let collector = Collector::new(&run_config());

        let outcome = collector.run(&source, |_| {}).await.unwrap();
        assert_eq!(outcome.reviews.len(), 2);

        let summary = crate::aggregate::ReviewSummary::compute(&outcome.reviews);
        assert_eq!(summary.positive, 1);
        assert_eq!(summary.negative, 1);
        assert!((summary.average_playtime_hours - 1.25).abs() < 1e-9);
    }
}
