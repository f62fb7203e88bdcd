//! Content-source taxonomy for bookmarks.
//!
//! A bookmark's source decides which metadata-extraction strategy runs
//! against its page. The set is closed: anything the classifier does not
//! recognize lands on `Other` (site named itself but we have no dedicated
//! strategy) or `Undefined` (site did not name itself at all).

use serde::{Deserialize, Serialize};

pub const SOURCE_GITHUB: &str = "github";
pub const SOURCE_MEDIUM: &str = "medium";
pub const SOURCE_YOUTUBE: &str = "youtube";
pub const SOURCE_GOOGLE_BOOKS: &str = "google books";
pub const SOURCE_IMAGE: &str = "image";
pub const SOURCE_OTHER: &str = "other";
pub const SOURCE_UNDEFINED: &str = "undefined";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Github,
    Medium,
    Youtube,
    #[serde(rename = "google books")]
    GoogleBooks,
    Image,
    Other,
    Undefined,
}

impl Source {
    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => SOURCE_GITHUB,
            Self::Medium => SOURCE_MEDIUM,
            Self::Youtube => SOURCE_YOUTUBE,
            Self::GoogleBooks => SOURCE_GOOGLE_BOOKS,
            Self::Image => SOURCE_IMAGE,
            Self::Other => SOURCE_OTHER,
            Self::Undefined => SOURCE_UNDEFINED,
        }
    }

    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SOURCE_GITHUB => Ok(Self::Github),
            SOURCE_MEDIUM => Ok(Self::Medium),
            SOURCE_YOUTUBE => Ok(Self::Youtube),
            SOURCE_GOOGLE_BOOKS => Ok(Self::GoogleBooks),
            SOURCE_IMAGE => Ok(Self::Image),
            SOURCE_OTHER => Ok(Self::Other),
            SOURCE_UNDEFINED => Ok(Self::Undefined),
            _ => Err(format!("Unknown bookmark source '{s}'")),
        }
    }

    /// Classify a page by its declared `og:site_name` content.
    ///
    /// The match is case-insensitive; site names outside the taxonomy map to
    /// [`Source::Other`].
    pub fn from_site_name(name: &str) -> Self {
        Self::from_str_value(name.to_lowercase().trim()).unwrap_or(Self::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_strings_round_trip() {
        for source in [
            Source::Github,
            Source::Medium,
            Source::Youtube,
            Source::GoogleBooks,
            Source::Image,
            Source::Other,
            Source::Undefined,
        ] {
            assert_eq!(
                Source::from_str_value(source.as_str()),
                Ok(source),
                "round trip failed for {source:?}"
            );
        }
    }

    #[test]
    fn site_name_match_is_case_insensitive() {
        assert_eq!(Source::from_site_name("GitHub"), Source::Github);
        assert_eq!(Source::from_site_name("YouTube"), Source::Youtube);
        assert_eq!(Source::from_site_name("Google Books"), Source::GoogleBooks);
        assert_eq!(Source::from_site_name("medium"), Source::Medium);
    }

    #[test]
    fn unrecognized_site_name_maps_to_other() {
        assert_eq!(Source::from_site_name("Stack Overflow"), Source::Other);
        assert_eq!(Source::from_site_name(""), Source::Other);
    }

    #[test]
    fn unknown_database_value_is_rejected() {
        let err = Source::from_str_value("vimeo").expect_err("should be rejected");
        assert!(err.contains("vimeo"));
    }

    #[test]
    fn google_books_serializes_with_space() {
        let json = serde_json::to_string(&Source::GoogleBooks).expect("serialize should succeed");
        assert_eq!(json, "\"google books\"");
    }
}
