//! Periodic cleanup of stale session rows.
//!
//! Sessions are never updated in place: logout deletes them and refresh
//! creates replacements, so rows past the refresh window only ever go away
//! through this sweep (or the `prune-sessions` CLI command).

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use linkvault_db::repositories::SessionRepo;

/// How often the cleanup job runs.
const PRUNE_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the session pruning loop.
///
/// Deletes sessions created more than `retention_days` ago. Runs until
/// `cancel` is triggered.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = PRUNE_INTERVAL.as_secs(),
        "Session pruning job started"
    );

    let mut interval = tokio::time::interval(PRUNE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session pruning job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match SessionRepo::delete_created_before(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Session pruning: removed stale sessions");
                        } else {
                            tracing::debug!("Session pruning: no stale sessions");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session pruning: sweep failed");
                    }
                }
            }
        }
    }
}
