//! Rulestore Filter Translator
//!
//! This crate turns a filter description into a parameterized SQL predicate
//! over the policy-rule table (`ptype`, `v0`..`v5`). It knows nothing about
//! any particular database driver; the store layer binds the resulting
//! named parameters itself.
//!
//! # Filter shapes
//!
//! Three shapes are recognized:
//!
//! ```rust
//! use rulestore_filter::{FilterSpec, StructuredFilter};
//!
//! // Raw single-equality text (legacy; do not build from untrusted input)
//! let raw = FilterSpec::raw("v0 = 'alice'");
//!
//! // Structured per-ptype match values: position i matches column v{i}
//! let structured = FilterSpec::Structured(
//!     StructuredFilter::new().section("p", ["", "", "read"]),
//! );
//!
//! // Caller-supplied predicate builder
//! let built = FilterSpec::builder(|acc| acc.push_str("v1 = data2"));
//! ```
//!
//! # Translation
//!
//! ```rust
//! use rulestore_filter::{translate, FilterSpec};
//!
//! let pred = translate(&FilterSpec::raw("v0 = 'alice'")).unwrap();
//! assert_eq!(pred.clause, "v0 = :v0");
//! assert_eq!(pred.bindings, vec![("v0".to_string(), "alice".to_string())]);
//! ```

pub mod error;
pub mod spec;
pub mod translate;

pub use error::FilterError;
pub use spec::{FilterSpec, PredicateBuilder, StructuredFilter};
pub use translate::{exact_match, translate, window, Predicate, MAX_FIELDS};
