//! Periodic bookmark refresh job.
//!
//! Spawns the fetch/extract pipeline against a batch of stale or pending
//! bookmarks on a fixed interval. The first run fires right at startup, so
//! a freshly imported collection starts filling in without waiting a full
//! interval.

use std::time::Duration;

use linkvault_scrape::config::ScrapeConfig;
use linkvault_scrape::pipeline::ScrapePipeline;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the bookmark refresh loop.
///
/// Each tick processes at most one batch, strictly sequentially. Runs until
/// `cancel` is triggered; a run in progress finishes before the task stops.
pub async fn run(pool: PgPool, config: ScrapeConfig, cancel: CancellationToken) {
    let pipeline = ScrapePipeline::new(config.clone());

    tracing::info!(
        batch_size = config.batch_size,
        older_than_days = config.refresh_older_than_days,
        interval_secs = config.refresh_interval_secs,
        "Bookmark refresh job started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.refresh_interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Bookmark refresh job stopping");
                break;
            }
            _ = interval.tick() => {
                match pipeline.run_batch(&pool).await {
                    Ok(outcome) => {
                        if outcome.scraped > 0 || outcome.failed > 0 {
                            tracing::info!(
                                scraped = outcome.scraped,
                                failed = outcome.failed,
                                "Bookmark refresh: batch finished"
                            );
                        } else {
                            tracing::debug!("Bookmark refresh: nothing to do");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Bookmark refresh: batch failed");
                    }
                }
            }
        }
    }
}
