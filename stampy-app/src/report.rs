//! Plain-text rendering of search results.

use std::fmt::Write;

use stampy_core::{Match, MatchResult};

/// Render search results the way the CLI prints them: a title/status header
/// per matching entry, then `...line...` context for every non-title hit.
pub fn render(results: &[MatchResult]) -> String {
    if results.is_empty() {
        return "No matches found.\n".to_string();
    }

    let mut out = String::new();
    for result in results {
        out.push('\n');
        let _ = writeln!(out, "Title: {}", result.title);
        let _ = writeln!(out, "Status: {}", result.status);
        for m in &result.matches {
            match m {
                // The header already shows the title; no extra context line.
                Match::Title { .. } => {}
                Match::Line { line, .. } => {
                    let _ = writeln!(out, "  ...{line}...");
                }
                Match::Url { url, .. } => {
                    let _ = writeln!(out, "  ...{url}...");
                }
            }
        }
    }
    out
}
