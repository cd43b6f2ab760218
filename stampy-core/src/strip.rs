//! HTML-to-text stripping.

use scraper::Html;

/// Convert HTML-bearing text into plain text.
///
/// Tags are discarded, character references are decoded, and the relative
/// order and whitespace of text nodes is preserved as encountered. The
/// html5ever tokenizer underneath recovers from malformed or unclosed
/// markup, so this never fails; `None` yields an empty string.
///
/// ```
/// use stampy_core::strip_tags;
///
/// assert_eq!(strip_tags(Some("<p>a &amp; b</p>")), "a & b");
/// assert_eq!(strip_tags(None), "");
/// ```
pub fn strip_tags(html: Option<&str>) -> String {
    let Some(html) = html else {
        return String::new();
    };
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_input_is_empty() {
        assert_eq!(strip_tags(None), "");
        assert_eq!(strip_tags(Some("")), "");
    }

    #[test]
    fn removes_tags_and_decodes_entities() {
        assert_eq!(
            strip_tags(Some("<p>Hello &amp; <b>goodbye</b>&nbsp;!</p>")),
            "Hello & goodbye\u{a0}!"
        );
        assert_eq!(strip_tags(Some("&lt;not a tag&gt;")), "<not a tag>");
    }

    #[test]
    fn preserves_text_order_across_nested_markup() {
        assert_eq!(
            strip_tags(Some("<div>one <span>two</span> three</div>")),
            "one two three"
        );
    }

    #[test]
    fn tolerates_unclosed_markup() {
        assert_eq!(strip_tags(Some("<div><p>dangling")), "dangling");
        assert_eq!(strip_tags(Some("broken < markup")), "broken < markup");
    }

    #[test]
    fn output_never_contains_tags() {
        for html in [
            "<p>See http://x.io/a,b) more</p>",
            "<ul><li>a</li><li>b</li></ul>",
            "<a href=\"http://example.com\">link</a>",
        ] {
            let text = strip_tags(Some(html));
            assert!(!text.contains('<') && !text.contains('>'), "tags left in {text:?}");
        }
    }
}
