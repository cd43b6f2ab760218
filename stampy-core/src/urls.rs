//! Hyperlink extraction from raw (pre-strip) article text.
//!
//! Links are pulled from the original HTML-bearing text, not the stripped
//! body, because the site-internal link syntax keeps its `&amp;` escape and
//! would be mangled by entity decoding.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Permissive absolute-URL matcher. The character set is deliberately
/// approximate rather than RFC 3986: a match runs until the first character
/// outside the set, so a closing parenthesis, straight quote, or whitespace
/// ends the URL.
const STANDARD_URL: &str = r"http[s]?://(?:[A-Za-z0-9]|[$\-_@.&+!*(,/]|%[0-9a-fA-F]{2})+";

/// Site-internal pseudo-links of the exact shape
/// `/?state=XXXX&amp;question=<rest>` — four alphanumerics, then the literal
/// HTML-escaped ampersand, then any run of non-quote characters.
const STATE_URL: &str = r#"/\?state=[A-Za-z0-9]{4}&amp;question=[^"]+"#;

fn standard_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(STANDARD_URL).expect("standard URL pattern compiles"))
}

fn state_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(STATE_URL).expect("state URL pattern compiles"))
}

/// Scan `text` for embedded hyperlinks.
///
/// Standard-URL matches come first, then internal pseudo-URL matches, each
/// group in scan order. No deduplication is performed.
///
/// ```
/// use stampy_core::extract_urls;
///
/// assert_eq!(
///     extract_urls(r#"see http://x.io/a and "/?state=AB12&amp;question=foo""#),
///     vec!["http://x.io/a", "/?state=AB12&amp;question=foo"]
/// );
/// ```
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut out: Vec<String> = standard_url_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    out.extend(state_url_re().find_iter(text).map(|m| m.as_str().to_string()));
    out
}

/// [`extract_urls`] over a loosely-typed JSON value.
///
/// Non-string values are coerced to their JSON text before scanning; if the
/// coercion itself fails the failure is logged and an empty list returned —
/// a bad `text` field never propagates out of extraction.
pub fn extract_urls_value(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => extract_urls(s),
        other => match serde_json::to_string(other) {
            Ok(coerced) => extract_urls(&coerced),
            Err(e) => {
                tracing::warn!(error = %e, "failed to coerce text field to string");
                Vec::new()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls("no links here").is_empty());
    }

    #[test]
    fn match_stops_at_first_disallowed_character() {
        assert_eq!(extract_urls("See http://x.io/a,b) more"), vec!["http://x.io/a,b"]);
        assert_eq!(extract_urls(r#"<a href="https://x.io/p%20q">"#), vec!["https://x.io/p%20q"]);
        assert_eq!(extract_urls("go to https://a.io/x then stop"), vec!["https://a.io/x"]);
    }

    #[test]
    fn path_segments_are_part_of_the_match() {
        assert_eq!(
            extract_urls("read https://a.io/deep/path/file.html today"),
            vec!["https://a.io/deep/path/file.html"]
        );
    }

    #[test]
    fn state_link_requires_escaped_ampersand() {
        assert_eq!(
            extract_urls(r#"/?state=AB12&amp;question=foo""#),
            vec!["/?state=AB12&amp;question=foo"]
        );
        // Raw, un-escaped `&` is not the internal link syntax.
        assert!(extract_urls("/?state=AB12&question=foo").is_empty());
        // The state token is exactly four alphanumerics.
        assert!(extract_urls(r#"/?state=AB1&amp;question=foo""#).is_empty());
    }

    #[test]
    fn standard_matches_precede_state_matches() {
        let text = r#"/?state=QQ99&amp;question=why" and http://x.io/a"#;
        assert_eq!(
            extract_urls(text),
            vec!["http://x.io/a", "/?state=QQ99&amp;question=why"]
        );
    }

    #[test]
    fn duplicates_are_kept_in_scan_order() {
        assert_eq!(
            extract_urls("http://a.io http://b.io http://a.io"),
            vec!["http://a.io", "http://b.io", "http://a.io"]
        );
    }

    #[test]
    fn value_coercion() {
        assert!(extract_urls_value(&Value::Null).is_empty());
        assert_eq!(
            extract_urls_value(&json!("see http://x.io/a")),
            vec!["http://x.io/a"]
        );
        // Non-string values are scanned through their JSON rendering.
        assert_eq!(
            extract_urls_value(&json!({ "link": "http://x.io/a" })),
            vec!["http://x.io/a"]
        );
        assert!(extract_urls_value(&json!(42)).is_empty());
    }
}
