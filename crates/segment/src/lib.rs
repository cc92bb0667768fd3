//! Outreach Segmentation Rules
//!
//! The audience-segmentation rule model: filter conditions over customer
//! attributes, joined by positional AND/OR connectors.
//!
//! # Overview
//!
//! This crate owns two things:
//!
//! - **The model**: `SegmentRules`, an ordered list of `Condition`s with one
//!   connector per gap between adjacent conditions.
//! - **The normalizer**: `normalize_rules`, a total function that coerces any
//!   JSON candidate (user edits, AI-generated suggestions, persisted drafts)
//!   into a well-formed rule set. It never fails - malformed input degrades
//!   to safe defaults instead of errors.
//!
//! # Usage
//!
//! ```
//! use outreach_segment::{normalize_rules, SegmentRules};
//!
//! let candidate = serde_json::json!({
//!     "logic": "OR",
//!     "conditions": [{ "field": "visitCount", "operator": ">", "value": 3 }],
//! });
//! let rules: SegmentRules = normalize_rules(&candidate);
//! assert_eq!(rules.conditions.len(), 1);
//! ```

pub mod error;
pub mod normalize;
pub mod rules;

#[cfg(test)]
mod normalize_test;

// Re-exports for convenience
pub use error::{Result, SegmentError};
pub use normalize::normalize_rules;
pub use rules::{Condition, ConditionValue, Field, Logic, Operator, SegmentRules};
