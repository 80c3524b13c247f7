//! Rule types exchanged with the enforcement engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codec;

/// One stored policy or grouping rule in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Policy-type discriminator, conventionally `"p"` or `"g"`.
    pub ptype: String,
    /// Ordered value tuple with no trailing empty entries.
    pub values: Vec<String>,
}

impl PolicyRule {
    /// Create a rule, canonicalizing the value tuple.
    pub fn new<I, V>(ptype: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        Self {
            ptype: ptype.into(),
            values: codec::canonicalize(&values),
        }
    }

    /// Render the rule as a `ptype, v0, v1, ...` line.
    pub fn to_line(&self) -> String {
        codec::to_line(&self.ptype, &self.values)
    }
}

/// The full rule set, grouped by ptype.
///
/// Insertion order is preserved within each ptype bucket; ordering across
/// ptypes carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    buckets: BTreeMap<String, Vec<Vec<String>>>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from already-canonical rules, preserving order.
    pub fn from_rules(rules: Vec<PolicyRule>) -> Self {
        let mut set = Self::new();
        for rule in rules {
            set.buckets.entry(rule.ptype).or_default().push(rule.values);
        }
        set
    }

    /// Append a rule, canonicalizing the value tuple.
    pub fn add<I, V>(&mut self, ptype: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.buckets
            .entry(ptype.into())
            .or_default()
            .push(codec::canonicalize(&values));
    }

    /// Rules stored under a ptype, in storage order.
    pub fn rules_for(&self, ptype: &str) -> &[Vec<String>] {
        self.buckets.get(ptype).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over (ptype, bucket) pairs.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[Vec<String>])> {
        self.buckets.iter().map(|(p, b)| (p.as_str(), b.as_slice()))
    }

    /// Total number of rules across all ptypes.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render every rule as a `ptype, v0, ...` line for a line-oriented
    /// policy loader.
    pub fn to_lines(&self) -> Vec<String> {
        self.buckets()
            .flat_map(|(ptype, bucket)| {
                bucket.iter().map(move |values| codec::to_line(ptype, values))
            })
            .collect()
    }
}
