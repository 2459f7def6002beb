//! # Asset Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` turns a free-text prompt into one entry of an asset [`Catalog`]. It sits on
//! top of the catalog (`catalog`) and the embedding layer (`semantic`).
//!
//! ## Strategy
//!
//! - **Semantic**: the prompt and every catalog entry are embedded by an
//!   [`EmbeddingProvider`]; the entry with the highest cosine similarity wins, the
//!   earlier entry on ties.
//! - **Keyword**: [`match_by_keyword`] checks tags, then description words, against the
//!   prompt and otherwise returns the first entry. It never fails.
//!
//! A [`MatchEngine`] built with a provider tries the semantic path and falls back to
//! keywords on any failure; one built without a provider is keyword-only. Either way
//! [`MatchEngine::find_best_match`] always returns a [`MatchResult`], and its
//! [`MatchMethod`] tells callers whether they got the degraded path.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use catalog::Catalog;
//! use matcher::{MatchEngine, MatchMethod};
//! use semantic::StubProvider;
//!
//! let engine = MatchEngine::new(
//!     Arc::new(Catalog::reference()),
//!     Some(Arc::new(StubProvider::new(384))),
//! );
//! let result = engine.find_best_match("a modern vase with flowers");
//! assert_eq!(result.method, MatchMethod::Semantic);
//! assert_eq!(result.asset.id, "vase");
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record the
//! method and latency of every match. Decisions and fallbacks are also emitted as
//! `tracing` events.
//!
//! [`Catalog`]: catalog::Catalog
//! [`EmbeddingProvider`]: semantic::EmbeddingProvider

pub mod engine;
pub mod keyword;
pub mod metrics;
pub mod types;

pub use crate::engine::MatchEngine;
pub use crate::keyword::{explain_keyword_match, match_by_keyword, KeywordMatch, KeywordReason};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{MatchConfig, MatchMethod, MatchResult, MatchStrategy, ScoredAsset};
