//! Content-source classification for fetched pages.

use linkvault_core::source::Source;
use scraper::Html;

use crate::extract::meta_property;

/// Classify a fetched page from its content type and parsed markup.
///
/// Image content types win outright; otherwise the page's declared
/// `og:site_name` is matched case-insensitively against the source
/// taxonomy. Pages that declare no site name at all are `Undefined`,
/// declared but unrecognized names are `Other`.
pub fn classify(content_type: &str, page: &Html) -> Source {
    if content_type.contains("image") {
        return Source::Image;
    }

    match meta_property(page, "og:site_name") {
        None => Source::Undefined,
        Some(name) => Source::from_site_name(&name),
    }
}
