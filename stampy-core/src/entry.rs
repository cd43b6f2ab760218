//! Canonical entry records and the raw-JSON normalization pass.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::strip::strip_tags;
use crate::urls::extract_urls_value;

/// One normalized knowledge-base question/answer record.
///
/// Constructed once per normalization pass and never mutated afterwards.
/// `text` is plain text (HTML already stripped); `urls` was extracted from
/// the *pre-strip* raw text, so the two are deliberately not re-derivable
/// from each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub page_id: String,
    pub text: String,
    pub answer_edit_link: String,
    pub tags: Vec<String>,
    pub banners: Vec<String>,
    pub related_questions: Vec<String>,
    /// Open string set ("live", "inProgress", "Marked for deletion", ...).
    /// The source system may introduce new values, so this is not an enum.
    pub status: String,
    pub alternate_phrasings: String,
    pub subtitle: String,
    pub parents: Vec<String>,
    /// `NaiveDateTime::MIN` when the source had no parseable update time.
    pub updated_at: NaiveDateTime,
    /// Passthrough ordering metadata; the core never sorts by it.
    pub order: i64,
    pub urls: Vec<String>,
}

/// Why a raw record did not become an [`Entry`].
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Status was in the caller-supplied exclusion set.
    ExcludedStatus(String),
    /// `updatedAt` survived the trailing-`Z` trim but still failed to parse.
    InvalidTimestamp { raw: String, message: String },
}

/// Per-record skip report, so callers can inspect what was dropped and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    /// Index of the record in the input sequence.
    pub index: usize,
    pub title: String,
    pub reason: SkipReason,
}

/// Normalize a batch of loosely-typed raw records.
///
/// Missing fields default (strings to `""`, sequences to empty, `order` to
/// 0). Records whose `status` is in `excluded` are omitted from the kept
/// sequence, and a record with an unparseable `updatedAt` is skipped — both
/// with a [`Skip`] report rather than silently. One bad record never aborts
/// the batch, and kept entries preserve input order.
pub fn normalize(records: &[Value], excluded: &HashSet<String>) -> (Vec<Entry>, Vec<Skip>) {
    let mut entries = Vec::with_capacity(records.len());
    let mut skips = Vec::new();

    for (index, item) in records.iter().enumerate() {
        let title = str_field(item, "title");
        let status = str_field(item, "status");

        if excluded.contains(&status) {
            tracing::debug!(index, %title, %status, "skipping excluded status");
            skips.push(Skip {
                index,
                title,
                reason: SkipReason::ExcludedStatus(status),
            });
            continue;
        }

        let updated_at = match parse_updated_at(item.get("updatedAt")) {
            Ok(ts) => ts,
            Err((raw, message)) => {
                tracing::warn!(index, %title, %raw, %message, "skipping record with bad updatedAt");
                skips.push(Skip {
                    index,
                    title,
                    reason: SkipReason::InvalidTimestamp { raw, message },
                });
                continue;
            }
        };

        // URLs come from the raw text *before* stripping: the internal link
        // syntax is HTML-encoded and would not survive entity decoding.
        let raw_text = item.get("text");
        let urls = raw_text.map(extract_urls_value).unwrap_or_default();
        let text = strip_tags(raw_text.and_then(Value::as_str));

        entries.push(Entry {
            title,
            page_id: str_field(item, "pageid"),
            text,
            answer_edit_link: str_field(item, "answerEditLink"),
            tags: seq_field(item, "tags"),
            banners: seq_field(item, "banners"),
            related_questions: seq_field(item, "relatedQuestions"),
            status,
            alternate_phrasings: str_field(item, "alternatePhrasings"),
            subtitle: str_field(item, "subtitle"),
            parents: seq_field(item, "parents"),
            updated_at,
            order: item.get("order").and_then(Value::as_i64).unwrap_or(0),
            urls,
        });
    }

    (entries, skips)
}

fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn seq_field(item: &Value, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Empty or absent maps to the sentinel minimum; otherwise strip one
/// trailing `Z` and parse as ISO-8601.
fn parse_updated_at(value: Option<&Value>) -> Result<NaiveDateTime, (String, String)> {
    let raw = value.and_then(Value::as_str).unwrap_or("");
    if raw.is_empty() {
        return Ok(NaiveDateTime::MIN);
    }
    let trimmed = raw.strip_suffix('Z').unwrap_or(raw);
    trimmed
        .parse::<NaiveDateTime>()
        .map_err(|e| (raw.to_string(), e.to_string()))
}
