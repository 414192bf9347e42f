use crate::error::SourceError;
use crate::steam::api;
use crate::steam::api::ReviewPage;
use crate::traits::ReviewSource;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Client for the Steam store appreviews endpoint, bound to one app and one
/// language selection for the lifetime of a run.
#[derive(Clone)]
pub struct SteamClient {
    client: Arc<Client>,
    app_id: String,
    language: String,
}

impl SteamClient {
    pub fn new(app_id: impl Into<String>, language: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("steamscope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            app_id: app_id.into(),
            language: language.into(),
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

#[async_trait]
impl ReviewSource for SteamClient {
    fn source_name(&self) -> &str {
        "steam"
    }

    /// Fetch one page, retrying transient transport failures with doubling
    /// backoff. Malformed responses and client errors propagate immediately.
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<ReviewPage, SourceError> {
        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 1;

        loop {
            match api::fetch_reviews_page(&self.client, &self.app_id, &self.language, cursor).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && attempt < MAX_ATTEMPTS => {
                    warn!(
                        attempt,
                        max_attempts = MAX_ATTEMPTS,
                        error = %e,
                        "Review page fetch failed, retrying after {:?}",
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
