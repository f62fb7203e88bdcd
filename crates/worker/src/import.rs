//! Browser bookmark export import.
//!
//! Reads the JSON tree browsers export ("children" for folders, "uri" on
//! leaf entries), collects every fetchable URL and registers it as an
//! unfetched bookmark. Entries the URL validator refuses (bookmarklets,
//! `place:` URIs and the like) are counted and skipped.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use linkvault_core::hashing::url_hash;
use linkvault_core::validate::validate_url;
use linkvault_db::repositories::BookmarkRepo;
use linkvault_db::DbPool;
use linkvault_scrape::config::ScrapeConfig;

/// Counts reported after an import run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Read `path` and register every bookmark URL found in it.
///
/// Registration is idempotent, so URLs already in the collection count as
/// imported and their existing rows are left alone. Re-running the import
/// after a partial failure converges on the same result.
pub async fn import_browser_export(
    pool: &DbPool,
    config: &ScrapeConfig,
    path: &Path,
) -> Result<ImportReport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let root: Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))?;

    let mut urls = Vec::new();
    collect_urls(&root, &mut urls);
    tracing::info!(entries = urls.len(), "Parsed browser export");

    let placeholder = config.placeholder_image_url();
    let mut report = ImportReport::default();

    for url in &urls {
        if validate_url(url).is_err() {
            tracing::debug!(url = %url, "Skipping non-fetchable entry");
            report.skipped += 1;
            continue;
        }
        BookmarkRepo::create_unfetched(pool, url, &url_hash(url), &placeholder)
            .await
            .with_context(|| format!("Failed to store {url}"))?;
        report.imported += 1;
    }

    Ok(report)
}

/// Walk one node of the export tree, descending into folders and collecting
/// leaf URIs.
fn collect_urls(node: &Value, urls: &mut Vec<String>) {
    let Some(children) = node.get("children").and_then(Value::as_array) else {
        return;
    };

    for entry in children {
        if entry.get("children").is_some() {
            collect_urls(entry, urls);
        } else if let Some(uri) = entry.get("uri").and_then(Value::as_str) {
            urls.push(uri.to_string());
        }
    }
}
