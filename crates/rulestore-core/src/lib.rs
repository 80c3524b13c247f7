//! Rulestore Core - Relational persistence for policy rules.
//!
//! This crate stores access-control policy rules (subject/object/action
//! tuples and role-grouping tuples) in a relational table and answers two
//! questions for a policy-enforcement engine: "what rules currently exist"
//! (optionally filtered) and "apply this incremental change to the rule set,
//! atomically".
//!
//! The table layout is the conventional `casbin_rule` shape: a `ptype`
//! discriminator plus six nullable value columns `v0`..`v5`. Rules are
//! treated as opaque ordered string tuples; policy evaluation, connection
//! pooling, and schema provisioning stay with the caller.
//!
//! # Usage
//!
//! ```no_run
//! use rulestore_core::{DatabaseAdapter, StoreConfig};
//!
//! let mut adapter = DatabaseAdapter::new(&StoreConfig::new("policies.db")).unwrap();
//! adapter
//!     .add_policy("p", &["alice".into(), "data1".into(), "read".into()])
//!     .unwrap();
//! let rules = adapter.load_policy().unwrap();
//! ```

pub mod adapter;
pub mod codec;
pub mod config;
pub mod error;
pub mod rule;
pub mod store;

pub use adapter::DatabaseAdapter;
pub use config::{StoreConfig, DEFAULT_TABLE};
pub use error::Error;
pub use rule::{PolicyRule, RuleSet};
pub use store::RuleStore;

/// Re-export filter types.
pub use rulestore_filter as filter;
pub use rulestore_filter::{FilterSpec, Predicate, StructuredFilter, MAX_FIELDS};
