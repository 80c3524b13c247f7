//! Translation from filter descriptions to parameterized predicates.

use crate::error::FilterError;
use crate::spec::{FilterSpec, StructuredFilter};

/// Number of value columns in the rule table (`v0`..`v5`).
pub const MAX_FIELDS: usize = 6;

/// A parameterized WHERE clause with named bindings.
///
/// `clause` uses `:name` placeholders; `bindings` pairs each bare name with
/// its value, in clause order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    /// The predicate text, e.g. `ptype = :ptype AND v0 = :v0`.
    pub clause: String,
    /// Bare parameter names (no leading `:`) with their bound values.
    pub bindings: Vec<(String, String)>,
}

impl Predicate {
    /// Append an equality conjunct binding `column` to `value`.
    pub fn push(&mut self, column: &str, value: &str) {
        if !self.clause.is_empty() {
            self.clause.push_str(" AND ");
        }
        self.clause.push_str(column);
        self.clause.push_str(" = :");
        self.clause.push_str(column);
        self.bindings.push((column.to_string(), value.to_string()));
    }
}

/// Translate a filter description into a predicate.
///
/// Fails with [`FilterError::InvalidFilterType`] when the filter's content
/// matches none of the recognized shapes.
pub fn translate(filter: &FilterSpec) -> Result<Predicate, FilterError> {
    match filter {
        FilterSpec::Raw(text) => translate_raw(text),
        FilterSpec::Structured(structured) => translate_structured(structured),
        FilterSpec::Builder(builder) => translate_raw(&builder.build()),
    }
}

/// Raw path: a single `column = value` equality.
fn translate_raw(text: &str) -> Result<Predicate, FilterError> {
    let (lhs, rhs) = match text.split_once('=') {
        Some(parts) if !parts.1.contains('=') => parts,
        _ => {
            return Err(FilterError::invalid(format!(
                "expected a single `column = value` equality, got {text:?}"
            )))
        }
    };
    let column = strip(lhs);
    let value = strip(rhs);
    if column.is_empty() {
        return Err(FilterError::invalid("empty column name"));
    }

    let mut pred = Predicate::default();
    pred.push(column, value);
    Ok(pred)
}

/// Structured path: `ptype = :ptype` plus one equality per non-empty value
/// position of the active section.
fn translate_structured(filter: &StructuredFilter) -> Result<Predicate, FilterError> {
    let (ptype, values) = filter
        .active()
        .ok_or_else(|| FilterError::invalid("structured filter has no non-empty section"))?;

    let mut pred = Predicate::default();
    pred.push("ptype", ptype);
    for (i, value) in values.iter().take(MAX_FIELDS).enumerate() {
        if !value.is_empty() {
            pred.push(&format!("v{i}"), value);
        }
    }
    Ok(pred)
}

/// Field-index windowing: list position `k` maps onto column
/// `v{field_index + k}`. Empty values constrain nothing; columns past `v5`
/// are ignored. The ptype conjunct is always present.
pub fn window(ptype: &str, field_index: usize, field_values: &[String]) -> Predicate {
    let mut pred = Predicate::default();
    pred.push("ptype", ptype);
    for (k, value) in field_values.iter().enumerate() {
        let column = field_index + k;
        if column >= MAX_FIELDS {
            break;
        }
        if value.is_empty() {
            continue;
        }
        pred.push(&format!("v{column}"), value);
    }
    pred
}

/// Exact-match predicate: ptype plus every supplied value position. A
/// shorter list constrains fewer columns; empty strings still bind.
pub fn exact_match(ptype: &str, values: &[String]) -> Predicate {
    let mut pred = Predicate::default();
    pred.push("ptype", ptype);
    for (i, value) in values.iter().take(MAX_FIELDS).enumerate() {
        pred.push(&format!("v{i}"), value);
    }
    pred
}

/// Trim surrounding whitespace and one layer of matching quotes.
fn strip(s: &str) -> &str {
    let s = s.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
