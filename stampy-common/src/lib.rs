//! Shared plumbing for the stampy-extractor workspace.
//!
//! This crate is intentionally lightweight so every other crate can depend on
//! it without pulling in heavy transitive costs. Today it only hosts the
//! centralised [`observability`] setup; anything domain-shaped lives in
//! `stampy-core` and anything transport-shaped in `stampy-http`.

pub mod observability;
