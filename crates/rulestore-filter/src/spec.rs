//! Filter descriptions accepted by the translator.

use std::fmt;

/// A filter over the rule table, one of three recognized shapes.
///
/// The enum is closed on purpose: anything that is not one of these shapes
/// is rejected at construction time rather than deep inside query building.
#[derive(Debug)]
pub enum FilterSpec {
    /// A single `column = value` equality as raw text.
    ///
    /// Legacy shape; the text is split on `=` and the right-hand side is
    /// bound as a parameter, but the column name is interpolated verbatim.
    /// Never build this from untrusted input.
    Raw(String),

    /// Per-ptype ordered match values, position `i` matching column `v{i}`.
    Structured(StructuredFilter),

    /// A caller-supplied function that appends a predicate fragment.
    Builder(PredicateBuilder),
}

impl FilterSpec {
    /// Create a raw-text filter.
    pub fn raw(text: impl Into<String>) -> Self {
        FilterSpec::Raw(text.into())
    }

    /// Create a predicate-builder filter from a closure.
    pub fn builder(f: impl Fn(&mut String) + Send + Sync + 'static) -> Self {
        FilterSpec::Builder(PredicateBuilder::new(f))
    }
}

/// Ordered ptype sections, each holding ordered match values.
///
/// Only one section is ever active per translation: the first section (in
/// insertion order) containing a non-empty value wins. Sections after the
/// first non-empty one are ignored.
#[derive(Debug, Clone, Default)]
pub struct StructuredFilter {
    sections: Vec<(String, Vec<String>)>,
}

impl StructuredFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ptype section. An empty string at position `i` means "no
    /// constraint on column `v{i}`".
    pub fn section<I, V>(mut self, ptype: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.sections
            .push((ptype.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// The active section: the first one holding any non-empty value.
    pub fn active(&self) -> Option<(&str, &[String])> {
        self.sections
            .iter()
            .find(|(_, values)| values.iter().any(|v| !v.is_empty()))
            .map(|(ptype, values)| (ptype.as_str(), values.as_slice()))
    }
}

/// A caller-supplied predicate-fragment builder.
///
/// The closure receives a mutable accumulator and appends raw predicate
/// text; the accumulated text then goes through the same stripping and
/// binding as the raw-text shape.
pub struct PredicateBuilder(Box<dyn Fn(&mut String) + Send + Sync>);

impl PredicateBuilder {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&mut String) + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Run the closure against an empty accumulator and return the result.
    pub fn build(&self) -> String {
        let mut acc = String::new();
        (self.0)(&mut acc);
        acc
    }
}

impl fmt::Debug for PredicateBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PredicateBuilder(..)")
    }
}
