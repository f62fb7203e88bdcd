//! Validation of externally submitted values.
//!
//! Deliberately small: the goal is rejecting obviously unusable input
//! before it reaches the database, not RFC-grade parsing.

use crate::error::{CoreError, CoreResult};

/// Validate that a submitted bookmark URL is fetchable over HTTP.
///
/// Requires an `http://` or `https://` scheme followed by a non-empty host.
pub fn validate_url(url: &str) -> CoreResult<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Not a fetchable http(s) URL: '{url}'"
        ))),
    }
}

/// Validate the shape of an email address.
///
/// One `@`, non-empty local part, and a dotted domain. Anything stricter
/// belongs to the mail system, not to us.
pub fn validate_email(email: &str) -> CoreResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Not a valid email address: '{email}'"
        )))
    }
}
