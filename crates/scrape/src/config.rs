//! Configuration for the fetch/extract pipeline and the refresh job.

/// Default public base URL, used to build the placeholder image link.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Default number of consecutive fetch failures before deactivation.
const DEFAULT_MAX_FAILED_FETCHES: i32 = 5;
/// Default number of bookmarks processed per refresh run.
const DEFAULT_BATCH_SIZE: i64 = 20;
/// Default staleness threshold in days before a bookmark is re-fetched.
const DEFAULT_REFRESH_OLDER_THAN_DAYS: i64 = 20;
/// Default interval in seconds between background refresh runs.
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 86_400;

/// Settings consumed by [`crate::pipeline::ScrapePipeline`] and by the
/// background task that schedules it.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Public base URL of this deployment (no trailing slash required).
    pub base_url: String,
    /// Consecutive fetch failures after which a bookmark is deactivated.
    pub max_failed_fetches: i32,
    /// Maximum number of bookmarks processed in one refresh run.
    pub batch_size: i64,
    /// Re-fetch bookmarks whose last fetch is at least this many days old.
    pub refresh_older_than_days: i64,
    /// Seconds between background refresh runs.
    pub refresh_interval_secs: u64,
}

impl ScrapeConfig {
    /// Load scrape configuration from environment variables.
    ///
    /// | Env Var                              | Required | Default                 |
    /// |--------------------------------------|----------|-------------------------|
    /// | `BASE_URL`                           | no       | `http://localhost:3000` |
    /// | `MAX_FAILED_URL_EXTRACTIONS`         | no       | `5`                     |
    /// | `BATCH_URL_EXTRACTIONS`              | no       | `20`                    |
    /// | `REFRESH_URLS_OLDER_THAN_DAYS`       | no       | `20`                    |
    /// | `RUN_REFRESH_URL_TASK_EVERY_SECONDS` | no       | `86400`                 |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but does not parse as the expected
    /// integer type.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let max_failed_fetches: i32 = std::env::var("MAX_FAILED_URL_EXTRACTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_FAILED_FETCHES.to_string())
            .parse()
            .expect("MAX_FAILED_URL_EXTRACTIONS must be a valid i32");

        let batch_size: i64 = std::env::var("BATCH_URL_EXTRACTIONS")
            .unwrap_or_else(|_| DEFAULT_BATCH_SIZE.to_string())
            .parse()
            .expect("BATCH_URL_EXTRACTIONS must be a valid i64");

        let refresh_older_than_days: i64 = std::env::var("REFRESH_URLS_OLDER_THAN_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_OLDER_THAN_DAYS.to_string())
            .parse()
            .expect("REFRESH_URLS_OLDER_THAN_DAYS must be a valid i64");

        let refresh_interval_secs: u64 = std::env::var("RUN_REFRESH_URL_TASK_EVERY_SECONDS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_INTERVAL_SECS.to_string())
            .parse()
            .expect("RUN_REFRESH_URL_TASK_EVERY_SECONDS must be a valid u64");

        Self {
            base_url,
            max_failed_fetches,
            batch_size,
            refresh_older_than_days,
            refresh_interval_secs,
        }
    }

    /// URL of the placeholder image assigned to bookmarks without one.
    pub fn placeholder_image_url(&self) -> String {
        format!(
            "{}/static/placeholder.jpg",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_image_lives_under_static() {
        let config = ScrapeConfig {
            base_url: "https://bookmarks.example.com".to_string(),
            max_failed_fetches: 5,
            batch_size: 20,
            refresh_older_than_days: 20,
            refresh_interval_secs: 86_400,
        };
        assert_eq!(
            config.placeholder_image_url(),
            "https://bookmarks.example.com/static/placeholder.jpg"
        );
    }

    #[test]
    fn placeholder_image_tolerates_trailing_slash() {
        let config = ScrapeConfig {
            base_url: "https://bookmarks.example.com/".to_string(),
            max_failed_fetches: 5,
            batch_size: 20,
            refresh_older_than_days: 20,
            refresh_interval_secs: 86_400,
        };
        assert_eq!(
            config.placeholder_image_url(),
            "https://bookmarks.example.com/static/placeholder.jpg"
        );
    }
}
