//! Normalization and search core for the aisafety.info question export.
//!
//! Everything in this crate is pure and synchronous: raw JSON records go in,
//! canonical [`Entry`] values and [`MatchResult`]s come out. I/O (the HTTP
//! fetch, the local cache, the per-entry file dump) lives in `stampy-http`
//! and the `stampy` binary so the core stays trivially testable.
//!
//! Pipeline:
//!
//! ```text
//! raw records ──▶ normalize (strip_tags + extract_urls) ──▶ Vec<Entry> ──▶ search
//! ```

pub mod entry;
pub mod search;
pub mod strip;
pub mod urls;

pub use entry::{normalize, Entry, Skip, SkipReason};
pub use search::{search, Match, MatchResult};
pub use strip::strip_tags;
pub use urls::extract_urls;
