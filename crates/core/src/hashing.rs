//! Shared SHA-256 hex digest utility.
//!
//! Bookmark identity is the digest of the URL string, so the same URL always
//! lands on the same row no matter how it arrives (API submission, browser
//! import, or a batch refresh).

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Digest used as the bookmark uniqueness/lookup key.
///
/// The URL is hashed exactly as submitted; no normalization is applied, so
/// `http://a` and `http://a/` are distinct bookmarks.
pub fn url_hash(url: &str) -> String {
    sha256_hex(url.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_known_hash() {
        let hash = sha256_hex(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn consistent_output() {
        let data = b"hello world";
        assert_eq!(sha256_hex(data), sha256_hex(data));
        assert_eq!(sha256_hex(data).len(), 64);
    }

    #[test]
    fn url_hash_is_deterministic() {
        let url = "https://github.com/octocat/Hello-World";
        assert_eq!(url_hash(url), url_hash(url));
        assert_eq!(url_hash(url).len(), 64);
    }

    #[test]
    fn distinct_urls_produce_distinct_hashes() {
        assert_ne!(url_hash("http://a"), url_hash("http://a/"));
    }
}
