use crate::error::SourceError;
use crate::steam::api::ReviewPage;
use async_trait::async_trait;

/// A paginated review endpoint. The collector only ever sees this seam, so
/// tests can drive it with an in-memory page sequence.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch one page of raw reviews. `cursor` is the opaque token from the
    /// previous page, or `None` when the previous response carried no cursor.
    /// Pagination ends when the returned page contains zero reviews.
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<ReviewPage, SourceError>;
}
