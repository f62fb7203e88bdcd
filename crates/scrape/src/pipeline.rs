//! Fetch, extract, persist: the scrape pipeline and its batch driver.
//!
//! Fetch and parse problems never escape this module as errors; they are
//! folded into the bookmark's failure counter so the refresh job can keep
//! moving. Only database errors propagate.

use chrono::Utc;
use linkvault_core::hashing::url_hash;
use linkvault_db::models::bookmark::{Bookmark, UpsertBookmark};
use linkvault_db::repositories::BookmarkRepo;
use linkvault_db::DbPool;

use crate::config::ScrapeConfig;
use crate::extract::extract_page;
use crate::fetch::{FetchError, PageFetcher};

/// Counters summarizing one refresh run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Bookmarks fetched and upserted with fresh metadata.
    pub scraped: usize,
    /// Bookmarks whose fetch or persistence failed this run.
    pub failed: usize,
}

/// Drives fetch, classification, extraction, and persistence for one URL or
/// one batch at a time.
pub struct ScrapePipeline {
    fetcher: PageFetcher,
    config: ScrapeConfig,
}

impl ScrapePipeline {
    /// Create a pipeline with a fresh HTTP client.
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            fetcher: PageFetcher::new(),
            config,
        }
    }

    /// Fetch one URL and persist the outcome.
    ///
    /// A 200 response is classified, extracted, and upserted with the
    /// failure counter reset to zero; the upserted row is returned. Fetch
    /// failures are recorded on the bookmark instead and yield `Ok(None)`.
    pub async fn scrape_url(
        &self,
        pool: &DbPool,
        url: &str,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        match self.fetcher.fetch(url).await {
            Ok(page) => {
                let (source, meta) = extract_page(url, &page.content_type, &page.body);
                let input = UpsertBookmark {
                    url: url.to_string(),
                    url_hash: url_hash(url),
                    title: meta.title,
                    source: Some(source.as_str().to_string()),
                    author: meta.author,
                    description: meta.description,
                    image_url: Some(
                        meta.image_url
                            .unwrap_or_else(|| self.config.placeholder_image_url()),
                    ),
                    last_fetch_at: Some(Utc::now()),
                    is_active: true,
                    failed_attempts: 0,
                    is_read: false,
                };
                let bookmark = BookmarkRepo::upsert(pool, &input).await?;
                Ok(Some(bookmark))
            }
            Err(FetchError::Gone) => {
                tracing::info!(url, "Content removed upstream (HTTP 410)");
                self.record_fetch_failure(pool, url).await?;
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Page fetch failed");
                self.record_fetch_failure(pool, url).await?;
                Ok(None)
            }
        }
    }

    /// Record a failed fetch attempt against the URL's bookmark.
    ///
    /// Creates the bookmark on a first-ever failure. Once the counter
    /// reaches the configured ceiling the bookmark is deactivated and drops
    /// out of future refresh batches.
    pub async fn record_fetch_failure(
        &self,
        pool: &DbPool,
        url: &str,
    ) -> Result<Bookmark, sqlx::Error> {
        BookmarkRepo::record_failure(
            pool,
            url,
            &url_hash(url),
            &self.config.placeholder_image_url(),
            self.config.max_failed_fetches,
        )
        .await
    }

    /// Run one refresh pass: select due bookmarks and scrape them in order.
    ///
    /// Strictly sequential. A persistence error on one row is converted into
    /// a fetch-failure record and the loop moves on; only the candidate
    /// query itself can abort the run.
    pub async fn run_batch(&self, pool: &DbPool) -> Result<BatchOutcome, sqlx::Error> {
        let cutoff = Utc::now() - chrono::Duration::days(self.config.refresh_older_than_days);
        let candidates =
            BookmarkRepo::list_refresh_candidates(pool, cutoff, self.config.batch_size).await?;

        let mut outcome = BatchOutcome::default();
        for bookmark in &candidates {
            tracing::info!(url = %bookmark.url, "Scraping");
            match self.scrape_url(pool, &bookmark.url).await {
                Ok(Some(_)) => outcome.scraped += 1,
                Ok(None) => outcome.failed += 1,
                Err(e) => {
                    tracing::error!(url = %bookmark.url, error = %e, "Failed to persist scrape result");
                    if let Err(record_err) = self.record_fetch_failure(pool, &bookmark.url).await {
                        tracing::error!(
                            url = %bookmark.url,
                            error = %record_err,
                            "Failed to record fetch failure"
                        );
                    }
                    outcome.failed += 1;
                }
            }
        }

        tracing::info!(
            scraped = outcome.scraped,
            failed = outcome.failed,
            "Refresh batch finished"
        );
        Ok(outcome)
    }
}
