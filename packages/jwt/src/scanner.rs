//! Finding compact JWTs in free text

use crate::api::algorithms::base64_url_decode;
use crate::api::compact::Segments;
use once_cell::sync::Lazy;
use regex::Regex;

// Header and payload are JSON objects, so both segments start with `eyJ` (`{"`).
#[allow(clippy::expect_used)]
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"eyJ[A-Za-z0-9_-]*\.eyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]*")
        .expect("Invalid JWT regex pattern")
});

/// Every token-shaped substring of `text`, in order of appearance
#[must_use]
pub fn extract_tokens(text: &str) -> Vec<&str> {
    TOKEN_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether `text` has three segments whose header and payload are base64url
///
/// A cheap shape check; use [`decode`](crate::decode) to know whether it really parses.
#[must_use]
pub fn is_jwt(text: &str) -> bool {
    Segments::split(text).is_ok_and(|segments| {
        base64_url_decode(segments.header).is_ok() && base64_url_decode(segments.payload).is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0.c2ln";

    #[test]
    fn extracts_tokens_from_surrounding_text() {
        let text = format!("Authorization: Bearer {TOKEN}\nretry with {TOKEN}, then stop.");
        assert_eq!(extract_tokens(&text), vec![TOKEN, TOKEN]);
        assert!(extract_tokens("no tokens here").is_empty());
    }

    #[test]
    fn shape_check() {
        assert!(is_jwt(TOKEN));
        assert!(is_jwt("e30.e30."));
        assert!(!is_jwt("abc"));
        assert!(!is_jwt("a.b.c.d"));
        assert!(!is_jwt("***.e30.x"));
    }
}
