//! Graph loading and pattern-query evaluation.
//!
//! The converter only talks to a [`GraphStore`]; [`SophiaStore`] is the
//! default implementation, backed by sophia's in-memory graphs and parsers.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexSet;
use sophia_api::graph::Graph;
use sophia_api::parser::TripleParser;
use sophia_api::source::TripleSource;
use sophia_api::term::matcher::Any;
use sophia_api::term::{Term, TermKind};
use sophia_api::triple::Triple;
use sophia_inmem::graph::LightGraph;
use sophia_iri::{Iri, IriRef};
use sophia_turtle::parser::nt::NTriplesParser;
use sophia_turtle::parser::turtle::TurtleParser;
use sophia_xml::parser::RdfXmlParser;

use crate::error::{MigrateError, Result};
use crate::query::{Binding, Filter, PatternQuery, Solution, Value};

/// A loadable, queryable graph facility.
pub trait GraphStore {
    /// In-memory graph produced by [`GraphStore::load`].
    type Graph;

    /// Parses the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<Self::Graph>;

    /// Evaluates `query`, returning solutions in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails while matching triples.
    fn query(&self, graph: &Self::Graph, query: &PatternQuery) -> Result<Vec<Solution>>;
}

/// Serialization of a source document, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// RDF/XML, the default.
    RdfXml,
    /// Turtle (`.ttl`).
    Turtle,
    /// N-Triples (`.nt`).
    NTriples,
}

impl SourceFormat {
    /// Chooses a parser from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ttl") => Self::Turtle,
            Some("nt") => Self::NTriples,
            _ => Self::RdfXml,
        }
    }
}

/// [`GraphStore`] over sophia's [`LightGraph`].
#[derive(Debug, Clone, Default)]
pub struct SophiaStore {
    base: Option<Iri<String>>,
}

impl SophiaStore {
    /// Creates a store that resolves relative IRIs against each document's
    /// own `file://` location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that resolves relative IRIs against `base`.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::InvalidBase`] if `base` is not an absolute IRI.
    pub fn with_base(base: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base: Some(parse_base(base.into())?),
        })
    }

    fn base_for(&self, path: &Path) -> Result<Iri<String>> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        let absolute = fs::canonicalize(path).map_err(|e| MigrateError::io(path, e))?;
        let location = absolute.display().to_string().replace(' ', "%20");
        parse_base(format!("file://{location}"))
    }
}

fn parse_base(base: String) -> Result<Iri<String>> {
    Iri::new(base.clone()).map_err(|e| MigrateError::InvalidBase {
        base,
        message: e.to_string(),
    })
}

impl GraphStore for SophiaStore {
    type Graph = LightGraph;

    fn load(&self, path: &Path) -> Result<LightGraph> {
        let file = File::open(path).map_err(|e| MigrateError::io(path, e))?;
        let reader = BufReader::new(file);
        let base = Some(self.base_for(path)?);
        let format = SourceFormat::from_path(path);
        tracing::debug!(path = %path.display(), ?format, "loading graph");
        match format {
            SourceFormat::RdfXml => collect(RdfXmlParser { base }.parse(reader), path),
            SourceFormat::Turtle => collect(TurtleParser { base }.parse(reader), path),
            SourceFormat::NTriples => collect(NTriplesParser {}.parse(reader), path),
        }
    }

    fn query(&self, graph: &LightGraph, query: &PatternQuery) -> Result<Vec<Solution>> {
        evaluate(graph, query)
    }
}

fn collect<S: TripleSource>(source: S, path: &Path) -> Result<LightGraph> {
    source.collect_triples().map_err(|e| MigrateError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Evaluates `query` against any sophia graph.
///
/// Candidate subjects come from the first filter, in the graph's iteration
/// order. Each further pattern joins with the rows built so far, so a
/// multi-valued predicate yields one row per value.
///
/// # Errors
///
/// Returns [`MigrateError::Query`] if the query has no filter or the graph
/// reports an error.
pub fn evaluate<G: Graph>(graph: &G, query: &PatternQuery) -> Result<Vec<Solution>> {
    let Some(first) = query.filters().first() else {
        return Err(MigrateError::Query {
            message: "a pattern query needs at least one filter".to_owned(),
        });
    };

    let mut solutions = Vec::new();
    for subject in candidates(graph, first)? {
        let mut rows = vec![Solution::new().with(query.subject(), Value::Iri(subject.clone()))];

        for filter in query.filters() {
            let values: Vec<Value> = objects(graph, &subject, &filter.predicate)?
                .into_iter()
                .filter(|value| filter.allowed.contains(value))
                .collect();
            rows = match &filter.bind {
                Some(variable) => join(rows, variable, &values),
                None if values.is_empty() => Vec::new(),
                None => rows,
            };
        }
        for Binding {
            variable,
            predicate,
        } in query.required()
        {
            let values = objects(graph, &subject, predicate)?;
            rows = join(rows, variable, &values);
        }
        for Binding {
            variable,
            predicate,
        } in query.optional_bindings()
        {
            let values = objects(graph, &subject, predicate)?;
            if !values.is_empty() {
                rows = join(rows, variable, &values);
            }
        }

        solutions.extend(rows);
    }
    Ok(solutions)
}

fn candidates<G: Graph>(graph: &G, filter: &Filter) -> Result<IndexSet<String>> {
    let mut subjects = IndexSet::new();
    let predicate = IriRef::new_unchecked(filter.predicate.as_str());
    for triple in graph.triples_matching(Any, [predicate], Any) {
        let triple = triple.map_err(query_error)?;
        let Some(Value::Iri(subject)) = to_value(triple.s()) else {
            continue;
        };
        if to_value(triple.o()).is_some_and(|object| filter.allowed.contains(&object)) {
            subjects.insert(subject);
        }
    }
    Ok(subjects)
}

fn objects<G: Graph>(graph: &G, subject: &str, predicate: &str) -> Result<Vec<Value>> {
    let s = IriRef::new_unchecked(subject);
    let p = IriRef::new_unchecked(predicate);
    let mut values = Vec::new();
    for triple in graph.triples_matching([s], [p], Any) {
        let triple = triple.map_err(query_error)?;
        if let Some(value) = to_value(triple.o()) {
            values.push(value);
        }
    }
    Ok(values)
}

fn join(rows: Vec<Solution>, variable: &str, values: &[Value]) -> Vec<Solution> {
    rows.into_iter()
        .flat_map(|row| {
            values
                .iter()
                .map(move |value| row.clone().with(variable, value.clone()))
        })
        .collect()
}

fn to_value<T: Term>(term: T) -> Option<Value> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Value::Iri(iri.as_str().to_owned())),
        TermKind::Literal => term
            .lexical_form()
            .map(|lex| Value::Literal(lex.to_string())),
        _ => None,
    }
}

fn query_error<E: std::error::Error>(e: E) -> MigrateError {
    MigrateError::Query {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{legacy_tests, var};
    use crate::vocab;

    const MANIFEST: &str = r#"@prefix test: <http://www.w3.org/2000/10/rdf-tests/rdfcore/testSchema#> .

<http://example/suite/foo/Manifest.rdf#pos> a test:PositiveParserTest ;
  test:status "APPROVED" ;
  test:description "positive" ;
  test:inputDocument <http://example/suite/foo/test001.rdf> ;
  test:outputDocument <http://example/suite/foo/test001.nt> .

<http://example/suite/foo/Manifest.rdf#neg> a test:NegativeParserTest ;
  test:status "APPROVED" ;
  test:inputDocument <http://example/suite/foo/error001.rdf> .

<http://example/suite/foo/Manifest.rdf#pending> a test:PositiveParserTest ;
  test:status "PENDING" ;
  test:description "not approved" ;
  test:inputDocument <http://example/suite/foo/test002.rdf> .

<http://example/suite/foo/Manifest.rdf#misc> a test:MiscellaneousTest ;
  test:status "APPROVED" ;
  test:inputDocument <http://example/suite/foo/test003.rdf> .

<http://example/suite/foo/Manifest.rdf#noinput> a test:NegativeParserTest ;
  test:status "APPROVED" .

<http://example/suite/foo/Manifest.rdf#twice> a test:PositiveParserTest ;
  test:status "APPROVED" ;
  test:description "first", "second" ;
  test:inputDocument <http://example/suite/foo/test004.rdf> .
"#;

    fn load_turtle(text: &str) -> LightGraph {
        match sophia_turtle::parser::turtle::parse_str(text).collect_triples() {
            Ok(graph) => graph,
            Err(e) => panic!("fixture does not parse: {e}"),
        }
    }

    fn subject_of(row: &Solution) -> &str {
        row.get(var::TEST).map(Value::as_str).unwrap_or_default()
    }

    fn solutions() -> Vec<Solution> {
        evaluate(&load_turtle(MANIFEST), &legacy_tests()).unwrap()
    }

    #[test]
    fn selects_only_approved_parser_tests() {
        let mut subjects: Vec<&str> = Vec::new();
        let rows = solutions();
        for row in &rows {
            if !subjects.contains(&subject_of(row)) {
                subjects.push(subject_of(row));
            }
        }
        subjects.sort_unstable();
        assert_eq!(
            subjects,
            [
                "http://example/suite/foo/Manifest.rdf#neg",
                "http://example/suite/foo/Manifest.rdf#pos",
                "http://example/suite/foo/Manifest.rdf#twice",
            ]
        );
    }

    #[test]
    fn binds_type_and_optional_values() {
        let rows = solutions();
        let pos = rows
            .iter()
            .find(|row| subject_of(row).ends_with("#pos"))
            .unwrap();
        assert_eq!(
            pos.get(var::TYPE),
            Some(&Value::Iri(vocab::legacy("PositiveParserTest")))
        );
        assert_eq!(
            pos.get(var::DESCRIPTION),
            Some(&Value::Literal("positive".to_owned()))
        );
        assert_eq!(
            pos.get(var::RESULT).map(Value::as_str),
            Some("http://example/suite/foo/test001.nt")
        );

        let neg = rows
            .iter()
            .find(|row| subject_of(row).ends_with("#neg"))
            .unwrap();
        assert!(neg.get(var::DESCRIPTION).is_none());
        assert!(neg.get(var::RESULT).is_none());
        assert_eq!(
            neg.get(var::ACTION).map(Value::as_str),
            Some("http://example/suite/foo/error001.rdf")
        );
    }

    #[test]
    fn multi_valued_predicates_yield_one_row_per_value() {
        let rows = solutions();
        let mut descriptions: Vec<&str> = rows
            .iter()
            .filter(|row| subject_of(row).ends_with("#twice"))
            .filter_map(|row| row.get(var::DESCRIPTION).map(Value::as_str))
            .collect();
        descriptions.sort_unstable();
        assert_eq!(descriptions, ["first", "second"]);
    }

    #[test]
    fn query_without_filters_is_rejected() {
        let graph = load_turtle(MANIFEST);
        let query = PatternQuery::new("s").require("o", vocab::legacy("status"));
        assert!(matches!(
            evaluate(&graph, &query),
            Err(MigrateError::Query { .. })
        ));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a/Manifest.rdf")), SourceFormat::RdfXml);
        assert_eq!(SourceFormat::from_path(Path::new("manifest.ttl")), SourceFormat::Turtle);
        assert_eq!(SourceFormat::from_path(Path::new("x.nt")), SourceFormat::NTriples);
        assert_eq!(SourceFormat::from_path(Path::new("Manifest")), SourceFormat::RdfXml);
    }

    #[test]
    fn invalid_base_is_rejected_up_front() {
        match SophiaStore::with_base("not a base iri") {
            Err(MigrateError::InvalidBase { base, .. }) => assert_eq!(base, "not a base iri"),
            Err(other) => panic!("expected an invalid base, got {other}"),
            Ok(_) => panic!("a relative base was accepted"),
        }
    }

    #[test]
    fn relative_subjects_resolve_against_the_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Manifest.ttl");
        fs::write(
            &path,
            "@prefix test: <http://www.w3.org/2000/10/rdf-tests/rdfcore/testSchema#> .\n\
             <foo/Manifest.rdf#t1> test:status \"APPROVED\" .\n",
        )
        .unwrap();

        let store = SophiaStore::with_base("http://example/suite/").unwrap();
        let graph = store.load(&path).unwrap();
        let rows = objects(
            &graph,
            "http://example/suite/foo/Manifest.rdf#t1",
            &vocab::legacy("status"),
        )
        .unwrap();
        assert_eq!(rows, [Value::Literal("APPROVED".to_owned())]);
    }

    #[test]
    fn default_base_is_the_file_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("with space").join("Manifest.ttl");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<t1> <p> \"v\" .\n").unwrap();

        let store = SophiaStore::new();
        let base = store.base_for(&path).unwrap();
        assert!(base.as_str().starts_with("file://"));
        assert!(base.as_str().ends_with("with%20space/Manifest.ttl"));
        assert!(store.load(&path).is_ok());
    }

    #[test]
    fn missing_document_is_an_io_error() {
        let store = SophiaStore::new();
        match store.load(Path::new("does-not-exist/Manifest.rdf")) {
            Err(MigrateError::Io { path, .. }) => {
                assert!(path.ends_with("Manifest.rdf"));
            }
            Err(other) => panic!("expected an I/O error, got {other}"),
            Ok(_) => panic!("loading a missing file succeeded"),
        }
    }
}
