//! Per-source metadata extraction strategies.
//!
//! Every strategy shares the same contract: given the parsed page and the
//! submitted URL, produce a [`PageMeta`]. A strategy that cannot locate a
//! tag leaves the field unset instead of failing; only the fetch itself can
//! hard-fail.

use linkvault_core::source::Source;
use scraper::{Html, Selector};

use crate::classify::classify;

/// Longest description kept; `og:description` on some sites carries whole
/// article bodies.
const MAX_DESCRIPTION_CHARS: usize = 500;

/// Fixed artwork for GitHub repositories, which publish no usable preview
/// image of their own.
const GITHUB_IMAGE_URL: &str = "https://clickhelp.com/images/feeds/blog/2018.06/hero_github.png";

/// Script marker preceding the JSON payload on YouTube video pages.
const YOUTUBE_VIDEO_MARKER: &str = "var ytInitialPlayerResponse";
/// Script marker preceding the JSON payload on YouTube channel pages.
const YOUTUBE_CHANNEL_MARKER: &str = "var ytInitialData";

// ---------------------------------------------------------------------------
// PageMeta
// ---------------------------------------------------------------------------

/// Metadata fields recovered from a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Classify and extract a fetched page in one pass.
///
/// Parsing happens entirely inside this function so callers never hold the
/// DOM across an await point ([`Html`] is not `Send`).
pub fn extract_page(url: &str, content_type: &str, body: &str) -> (Source, PageMeta) {
    let page = Html::parse_document(body);
    let source = classify(content_type, &page);
    let meta = extract(source, &page, url);
    (source, meta)
}

/// Run the extraction strategy for an already-classified page.
pub fn extract(source: Source, page: &Html, url: &str) -> PageMeta {
    match source {
        Source::Image => image_meta(url),
        Source::Github => github_meta(page),
        Source::Youtube => youtube_meta(page),
        Source::Medium | Source::GoogleBooks | Source::Other | Source::Undefined => {
            social_preview_meta(page)
        }
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Default strategy: standard social-preview tags, with the author read from
/// the `author` meta tag and falling back to the `twitter:creator` handle.
fn social_preview_meta(page: &Html) -> PageMeta {
    PageMeta {
        title: meta_property(page, "og:title"),
        description: meta_property(page, "og:description")
            .map(|d| truncate_chars(d, MAX_DESCRIPTION_CHARS)),
        image_url: meta_property(page, "og:image"),
        author: meta_name(page, "author").or_else(|| meta_name(page, "twitter:creator")),
    }
}

/// An image URL is its own artwork; there is no page worth parsing.
fn image_meta(url: &str) -> PageMeta {
    PageMeta {
        image_url: Some(url.to_string()),
        ..PageMeta::default()
    }
}

/// GitHub repository pages title themselves `owner/name`, so both the
/// author and the title come from splitting `og:title` on the slash.
fn github_meta(page: &Html) -> PageMeta {
    let og_title = meta_property(page, "og:title");
    let (author, title) = match og_title.as_deref().and_then(|t| t.split_once('/')) {
        Some((owner, name)) => (Some(owner.to_string()), Some(name.to_string())),
        None => (None, None),
    };

    PageMeta {
        title,
        description: meta_property(page, "og:description")
            .map(|d| truncate_chars(d, MAX_DESCRIPTION_CHARS)),
        image_url: Some(GITHUB_IMAGE_URL.to_string()),
        author,
    }
}

/// YouTube keeps its metadata in inline script JSON rather than meta tags.
///
/// Video pages embed a `ytInitialPlayerResponse` assignment, channel pages a
/// `ytInitialData` one; the first script carrying either marker wins. Pages
/// with neither marker (or an unparseable payload) yield empty metadata.
fn youtube_meta(page: &Html) -> PageMeta {
    for script in page.select(&selector("script")) {
        let text: String = script.text().collect();

        if text.contains(YOUTUBE_VIDEO_MARKER) {
            if let Some(payload) = script_json(&text) {
                return video_payload_meta(&payload);
            }
            break;
        }
        if text.contains(YOUTUBE_CHANNEL_MARKER) {
            if let Some(payload) = script_json(&text) {
                return channel_payload_meta(&payload);
            }
            break;
        }
    }

    PageMeta::default()
}

/// Metadata from the `ytInitialPlayerResponse` payload (video pages).
///
/// The first thumbnail is the smallest; its URL carries sizing query
/// parameters that are stripped off.
fn video_payload_meta(payload: &serde_json::Value) -> PageMeta {
    let details = &payload["videoDetails"];
    let image_url = payload
        .pointer("/videoDetails/thumbnail/thumbnails/0/url")
        .and_then(|value| value.as_str())
        .map(strip_query);

    PageMeta {
        title: details["title"].as_str().map(str::to_string),
        description: details["shortDescription"].as_str().map(str::to_string),
        image_url,
        author: details["author"].as_str().map(str::to_string),
    }
}

/// Metadata from the `ytInitialData` payload (channel pages).
///
/// The avatar list is ordered small-to-large, so the last entry is the best
/// resolution. Channel payloads carry no separate author; the title is
/// already the channel name.
fn channel_payload_meta(payload: &serde_json::Value) -> PageMeta {
    let channel = &payload["metadata"]["channelMetadataRenderer"];
    let image_url = channel
        .pointer("/avatar/thumbnails")
        .and_then(|value| value.as_array())
        .and_then(|thumbnails| thumbnails.last())
        .and_then(|thumbnail| thumbnail["url"].as_str())
        .map(str::to_string);

    PageMeta {
        title: channel["title"].as_str().map(str::to_string),
        description: channel["description"].as_str().map(str::to_string),
        image_url,
        author: None,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read the `content` attribute of a `<meta property="...">` tag.
pub(crate) fn meta_property(page: &Html, property: &str) -> Option<String> {
    let css = format!(r#"meta[property="{property}"]"#);
    page.select(&selector(&css))
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Read the `content` attribute of a `<meta name="...">` tag.
pub(crate) fn meta_name(page: &Html, name: &str) -> Option<String> {
    let css = format!(r#"meta[name="{name}"]"#);
    page.select(&selector(&css))
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Parse a CSS selector known to be valid.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Failed to parse CSS selector")
}

/// Slice the object literal out of a `var x = {...};` script assignment.
///
/// Everything between the first `{` and the last `}` is the payload.
fn script_json(text: &str) -> Option<serde_json::Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Drop the query string from a URL.
fn strip_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => url.to_string(),
    }
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate_chars(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
