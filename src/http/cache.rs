//! HTTP cache control module
//!
//! `ETag` generation and conditional request handling for rendered records.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Rendered records may change on redeploy, so clients always revalidate
pub const CACHE_CONTROL: &str = "max-age=0, private, must-revalidate";

/// Generate an `ETag` over the representation
///
/// The content type takes part in the hash so each format gets its own tag.
pub fn generate_etag(content_type: &str, body: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content_type.hash(&mut hasher);
    body.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single tag, a comma separated list, the `*` wildcard and
/// weak tags (`W/"..."`, compared weakly as GET allows).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').map(str::trim).any(|e| {
            e == "*" || e.strip_prefix("W/").unwrap_or(e) == etag
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag("application/json", b"{}");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
        assert_eq!(etag, generate_etag("application/json", b"{}"));
    }

    #[test]
    fn test_etag_per_format() {
        assert_ne!(
            generate_etag("application/json", b"same"),
            generate_etag("application/xml", b"same")
        );
        assert_ne!(
            generate_etag("application/json", b"a"),
            generate_etag("application/json", b"b")
        );
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("W/\"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }
}
