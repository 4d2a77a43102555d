//! Structured pattern queries and their solutions.
//!
//! A [`PatternQuery`] selects subjects by predicate/value filters and binds
//! further values from required and optional predicates, the subset of
//! SPARQL basic graph patterns the migration needs. Evaluation belongs to a
//! [`crate::graph::GraphStore`].

use std::collections::BTreeMap;
use std::fmt;

use crate::vocab::{self, TestKind};

/// A ground term bound in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// An absolute IRI.
    Iri(String),
    /// The lexical form of a literal.
    Literal(String),
}

impl Value {
    /// IRI or lexical form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Iri(iri) => iri,
            Self::Literal(lex) => lex,
        }
    }

    /// Returns the IRI, or `None` for literals.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Literal(lex) => write!(f, "{lex:?}"),
        }
    }
}

/// One result row: variable name to bound value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    bindings: BTreeMap<String, Value>,
}

impl Solution {
    /// Creates a row with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this row with `variable` bound to `value`.
    #[must_use]
    pub fn with(mut self, variable: impl Into<String>, value: Value) -> Self {
        self.bindings.insert(variable.into(), value);
        self
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&Value> {
        self.bindings.get(variable)
    }
}

/// Subjects must carry `predicate` with one of `allowed`; the matched value
/// is bound to `bind` when set.
#[derive(Debug, Clone)]
pub struct Filter {
    /// Predicate IRI.
    pub predicate: String,
    /// Accepted object values.
    pub allowed: Vec<Value>,
    /// Variable receiving the matched object.
    pub bind: Option<String>,
}

/// Binds the objects of `predicate` to `variable`.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Variable name, without `?`.
    pub variable: String,
    /// Predicate IRI.
    pub predicate: String,
}

/// A basic graph pattern rooted at one subject variable.
#[derive(Debug, Clone)]
pub struct PatternQuery {
    subject: String,
    filters: Vec<Filter>,
    required: Vec<Binding>,
    optional: Vec<Binding>,
}

impl PatternQuery {
    /// Starts a query whose subjects are bound to `subject`.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            filters: Vec::new(),
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// Adds a value filter.
    #[must_use]
    pub fn filter(
        mut self,
        predicate: impl Into<String>,
        allowed: Vec<Value>,
        bind: Option<&str>,
    ) -> Self {
        self.filters.push(Filter {
            predicate: predicate.into(),
            allowed,
            bind: bind.map(str::to_owned),
        });
        self
    }

    /// Adds a binding every solution must have.
    #[must_use]
    pub fn require(mut self, variable: impl Into<String>, predicate: impl Into<String>) -> Self {
        self.required.push(Binding {
            variable: variable.into(),
            predicate: predicate.into(),
        });
        self
    }

    /// Adds an `OPTIONAL` binding.
    #[must_use]
    pub fn optional(mut self, variable: impl Into<String>, predicate: impl Into<String>) -> Self {
        self.optional.push(Binding {
            variable: variable.into(),
            predicate: predicate.into(),
        });
        self
    }

    /// Subject variable name.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Value filters, the first of which selects candidate subjects.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Required bindings.
    #[must_use]
    pub fn required(&self) -> &[Binding] {
        &self.required
    }

    /// Optional bindings.
    #[must_use]
    pub fn optional_bindings(&self) -> &[Binding] {
        &self.optional
    }
}

/// Renders the query as SPARQL for logs.
impl fmt::Display for PatternQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.subject;
        writeln!(f, "SELECT * WHERE {{")?;
        for (i, filter) in self.filters.iter().enumerate() {
            let var = filter
                .bind
                .clone()
                .unwrap_or_else(|| format!("_f{i}"));
            let values: Vec<String> = filter.allowed.iter().map(Value::to_string).collect();
            writeln!(f, "  VALUES ?{var} {{ {} }}", values.join(" "))?;
            writeln!(f, "  ?{s} <{}> ?{var} .", filter.predicate)?;
        }
        for binding in &self.required {
            writeln!(f, "  ?{s} <{}> ?{} .", binding.predicate, binding.variable)?;
        }
        for binding in &self.optional {
            writeln!(
                f,
                "  OPTIONAL {{ ?{s} <{}> ?{} }}",
                binding.predicate, binding.variable
            )?;
        }
        write!(f, "}}")
    }
}

/// Variable names bound by [`legacy_tests`].
pub mod var {
    /// The test subject.
    pub const TEST: &str = "test";
    /// Its legacy `rdf:type`.
    pub const TYPE: &str = "type";
    /// Free-text description.
    pub const DESCRIPTION: &str = "description";
    /// Input document.
    pub const ACTION: &str = "action";
    /// Expected output document.
    pub const RESULT: &str = "result";
}

/// Selects every approved positive or negative parser test of the 2004
/// suite with its type, description, input and output documents.
#[must_use]
pub fn legacy_tests() -> PatternQuery {
    let kinds = [TestKind::Positive, TestKind::Negative]
        .into_iter()
        .map(|kind| Value::Iri(vocab::legacy(kind.legacy_name())))
        .collect();
    PatternQuery::new(var::TEST)
        .filter(
            vocab::legacy("status"),
            vec![Value::Literal(vocab::APPROVED.to_owned())],
            None,
        )
        .filter(vocab::rdf_type(), kinds, Some(var::TYPE))
        .optional(var::DESCRIPTION, vocab::legacy("description"))
        .require(var::ACTION, vocab::legacy("inputDocument"))
        .optional(var::RESULT, vocab::legacy("outputDocument"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_query_filters_status_first() {
        let query = legacy_tests();
        assert_eq!(query.subject(), "test");
        assert_eq!(query.filters()[0].predicate, vocab::legacy("status"));
        assert_eq!(query.filters()[1].bind.as_deref(), Some("type"));
        assert_eq!(query.required().len(), 1);
        assert_eq!(query.optional_bindings().len(), 2);
    }

    #[test]
    fn display_renders_optional_groups() {
        let text = legacy_tests().to_string();
        assert!(text.starts_with("SELECT * WHERE {"));
        assert!(text.contains("VALUES ?_f0 { \"APPROVED\" }"));
        assert!(text.contains(&format!(
            "OPTIONAL {{ ?test <{}> ?description }}",
            vocab::legacy("description")
        )));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn solution_bindings_overwrite() {
        let row = Solution::new()
            .with("x", Value::Literal("a".to_owned()))
            .with("x", Value::Literal("b".to_owned()));
        assert_eq!(row.get("x").map(Value::as_str), Some("b"));
        assert!(row.get("y").is_none());
    }
}
