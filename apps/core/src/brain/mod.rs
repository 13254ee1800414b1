//! # Brain Module
//!
//! Rule-based, deterministic classification of user queries.
//! No ML model, no state: every classifier is a pure function over the query.
//!
//! ## Components
//! - `patterns`: keyword sets and compiled regexes (pattern library)
//! - `intent`: intent classification with first-match-wins precedence
//! - `funnel`: funnel stage decision table
//! - `brands`: brand lexicon with longest-match extraction
//! - `support`: support request flag
//! - `record`: output data structure
//! - `analyzer`: runs all classifiers on one query

pub mod analyzer;
pub mod brands;
pub mod funnel;
pub mod intent;
pub mod patterns;
pub mod record;
pub mod support;

pub use analyzer::analyze;
pub use brands::{extract_brand, Brand, BrandLexicon, BRAND_CATALOG, NO_BRAND};
pub use funnel::{classify_funnel, FunnelStage};
pub use intent::{classify_intent, classify_intent_detailed, Intent, IntentClassifier, IntentResult};
pub use record::ClassificationRecord;
pub use support::classify_support;
