//! Literal / whole-word search across normalized entries.

use regex::RegexBuilder;

use crate::entry::Entry;

/// One hit inside an entry, tagged by where it was found.
#[derive(Debug, Clone, PartialEq)]
pub enum Match {
    /// First hit in the title; byte offset retained.
    Title { at: usize, matched: String },
    /// Hit in the body, reported with the full trimmed line it occurred in.
    /// A line with several hits produces one record per hit.
    Line { matched: String, line: String },
    /// Hit in one of the entry's extracted URLs.
    Url { matched: String, url: String },
}

/// Per-entry aggregation of search hits.
///
/// Match order is fixed: the title match (if any), then body lines in line
/// order (left-to-right within a line), then URLs in extraction order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub title: String,
    pub status: String,
    pub matches: Vec<Match>,
}

/// Search titles, body lines, and URLs for a literal pattern.
///
/// The term is escaped wholesale, so regex metacharacters in user input are
/// inert; `whole_word` wraps it in word-boundary anchors and matching is
/// case-insensitive unless `case_sensitive` is set. Entries appear in the
/// output, in input order, iff at least one of the three locations hit.
///
/// ```
/// use stampy_core::{search, Entry, Match};
/// # use chrono::NaiveDateTime;
/// # let entry = Entry {
/// #     title: "AI safety basics".into(), page_id: String::new(),
/// #     text: String::new(), answer_edit_link: String::new(),
/// #     tags: vec![], banners: vec![], related_questions: vec![],
/// #     status: "live".into(), alternate_phrasings: String::new(),
/// #     subtitle: String::new(), parents: vec![],
/// #     updated_at: NaiveDateTime::MIN, order: 0, urls: vec![],
/// # };
/// let results = search(&[entry], "Safety", false, false);
/// assert!(matches!(results[0].matches[0], Match::Title { at: 3, .. }));
/// ```
pub fn search(
    entries: &[Entry],
    term: &str,
    case_sensitive: bool,
    whole_word: bool,
) -> Vec<MatchResult> {
    let escaped = regex::escape(term);
    let pattern = if whole_word {
        format!(r"\b{escaped}\b")
    } else {
        escaped
    };
    // An escaped literal always compiles.
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .expect("escaped search pattern compiles");

    let mut results = Vec::new();
    for entry in entries {
        let mut matches = Vec::new();

        if let Some(m) = re.find(&entry.title) {
            matches.push(Match::Title {
                at: m.start(),
                matched: m.as_str().to_string(),
            });
        }

        for line in entry.text.lines() {
            for m in re.find_iter(line) {
                matches.push(Match::Line {
                    matched: m.as_str().to_string(),
                    line: line.trim().to_string(),
                });
            }
        }

        for url in &entry.urls {
            if let Some(m) = re.find(url) {
                matches.push(Match::Url {
                    matched: m.as_str().to_string(),
                    url: url.clone(),
                });
            }
        }

        if !matches.is_empty() {
            results.push(MatchResult {
                title: entry.title.clone(),
                status: entry.status.clone(),
                matches,
            });
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn entry(title: &str, text: &str, urls: &[&str]) -> Entry {
        Entry {
            title: title.to_string(),
            page_id: String::new(),
            text: text.to_string(),
            answer_edit_link: String::new(),
            tags: Vec::new(),
            banners: Vec::new(),
            related_questions: Vec::new(),
            status: "live".to_string(),
            alternate_phrasings: String::new(),
            subtitle: String::new(),
            parents: Vec::new(),
            updated_at: NaiveDateTime::MIN,
            order: 0,
            urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }

    #[test]
    fn case_insensitive_by_default() {
        let entries = vec![entry("AI safety basics", "", &[])];
        let results = search(&entries, "Safety", false, false);
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].matches,
            vec![Match::Title {
                at: 3,
                matched: "safety".to_string()
            }]
        );
        assert!(search(&entries, "Safety", true, false).is_empty());
    }

    #[test]
    fn whole_word_does_not_match_inside_words() {
        let entries = vec![entry("", "the CHAIN of thought", &[])];
        assert!(search(&entries, "AI", false, true).is_empty());
        assert_eq!(search(&entries, "AI", false, false).len(), 1);
    }

    #[test]
    fn metacharacters_in_the_term_are_literal() {
        let entries = vec![entry("", "cost is $5 (roughly)", &[])];
        let results = search(&entries, "$5 (roughly)", false, false);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn every_hit_on_a_line_is_reported_with_the_trimmed_line() {
        let entries = vec![entry("", "  ai here, ai there\nnothing\nai again", &[])];
        let results = search(&entries, "ai", false, false);
        let lines: Vec<_> = results[0]
            .matches
            .iter()
            .map(|m| match m {
                Match::Line { line, .. } => line.as_str(),
                other => panic!("unexpected match {other:?}"),
            })
            .collect();
        // "again" carries a second hit: the search is substring-based here.
        assert_eq!(
            lines,
            vec!["ai here, ai there", "ai here, ai there", "ai again", "ai again"]
        );
    }

    #[test]
    fn match_order_is_title_then_lines_then_urls() {
        let entries = vec![entry(
            "ai title",
            "ai line one\nai line two",
            &["http://ai.example/one", "http://other.example", "http://ai.example/two"],
        )];
        let results = search(&entries, "ai", false, false);
        let kinds: Vec<_> = results[0]
            .matches
            .iter()
            .map(|m| match m {
                Match::Title { .. } => "title",
                Match::Line { .. } => "line",
                Match::Url { .. } => "url",
            })
            .collect();
        assert_eq!(kinds, vec!["title", "line", "line", "url", "url"]);
        assert!(matches!(
            &results[0].matches[3],
            Match::Url { url, .. } if url == "http://ai.example/one"
        ));
    }

    #[test]
    fn url_only_hits_still_produce_a_result() {
        let entries = vec![entry("Q1", "no hits in the body", &["http://x.io/a,b"])];
        let results = search(&entries, "x.io", false, false);
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0].matches[0], Match::Url { .. }));
    }

    #[test]
    fn output_preserves_entry_order() {
        let entries = vec![
            entry("b has ai", "", &[]),
            entry("nothing", "", &[]),
            entry("a has ai", "", &[]),
        ];
        let results = search(&entries, "ai", false, false);
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b has ai", "a has ai"]);
    }
}
