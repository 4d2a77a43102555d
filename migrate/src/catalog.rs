//! Test records derived from query solutions, keyed by fragment identifier.

use indexmap::IndexMap;

use crate::error::{MigrateError, Result};
use crate::query::{var, Solution, Value};
use crate::vocab::TestKind;

/// Path of an IRI without scheme, authority, query and fragment.
fn iri_path(iri: &str) -> &str {
    let without_fragment = iri.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => without_query.split_once(':').map_or(without_query, |(_, path)| path),
    }
}

/// Non-empty path segments of an IRI.
fn path_segments(iri: &str) -> Vec<&str> {
    iri_path(iri)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Derives `#<directory>-<fragment>` from a legacy test subject such as
/// `http://www.w3.org/2000/10/rdf-tests/rdfcore/amp-in-url/Manifest.rdf#test001`,
/// where the directory is the second-to-last path segment. Segments are
/// counted as written, so `.../foo/#x` names directory `foo`.
///
/// # Errors
///
/// Returns [`MigrateError::InvalidSubject`] if the IRI has no fragment, or
/// its second-to-last path segment is missing or empty.
pub fn fragment_id(subject: &str) -> Result<String> {
    let invalid = || MigrateError::InvalidSubject {
        subject: subject.to_owned(),
    };
    let (_, fragment) = subject.split_once('#').ok_or_else(invalid)?;
    if fragment.is_empty() {
        return Err(invalid());
    }
    let mut segments = iri_path(subject).rsplit('/');
    let directory = segments
        .nth(1)
        .filter(|directory| !directory.is_empty())
        .ok_or_else(invalid)?;
    Ok(format!("#{directory}-{fragment}"))
}

/// A fixture file named by its parent directory and file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureRef {
    /// Parent directory name.
    pub directory: String,
    /// File name.
    pub file: String,
}

impl FixtureRef {
    /// Takes the last two path segments of a fixture IRI.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::InvalidFixture`] if the IRI has fewer than two
    /// path segments.
    pub fn from_iri(iri: &str) -> Result<Self> {
        match path_segments(iri).as_slice() {
            [.., directory, file] => Ok(Self {
                directory: (*directory).to_owned(),
                file: (*file).to_owned(),
            }),
            _ => Err(MigrateError::InvalidFixture {
                iri: iri.to_owned(),
            }),
        }
    }

    /// `directory/file`, as written in `mf:action` and `mf:result`.
    #[must_use]
    pub fn relative(&self) -> String {
        format!("{}/{}", self.directory, self.file)
    }
}

/// An approved legacy test, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    /// `#<directory>-<fragment>`.
    pub fragment: String,
    /// Positive or negative parser test.
    pub kind: TestKind,
    /// Free-text description, checked at emission.
    pub description: Option<String>,
    /// Input document.
    pub action: FixtureRef,
    /// Expected output document.
    pub result: Option<FixtureRef>,
}

impl TestRecord {
    /// Builds a record from one solution of [`crate::query::legacy_tests`].
    ///
    /// # Errors
    ///
    /// Returns an error if the subject or a fixture IRI is malformed, or
    /// the solution has no input document.
    pub fn from_solution(solution: &Solution) -> Result<Self> {
        let subject = solution.get(var::TEST).map(Value::as_str).unwrap_or_default();
        let fragment = fragment_id(subject)?;
        let kind = solution
            .get(var::TYPE)
            .and_then(Value::as_iri)
            .map_or(TestKind::Negative, TestKind::from_iri);
        let action = match solution.get(var::ACTION) {
            Some(value) => FixtureRef::from_iri(value.as_str())?,
            None => return Err(MigrateError::MissingAction { fragment }),
        };
        let result = solution
            .get(var::RESULT)
            .map(|value| FixtureRef::from_iri(value.as_str()))
            .transpose()?;
        Ok(Self {
            fragment,
            kind,
            description: solution
                .get(var::DESCRIPTION)
                .map(|value| value.as_str().to_owned()),
            action,
            result,
        })
    }

    /// Fragment without its leading `#`, used as `mf:name`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.fragment.trim_start_matches('#')
    }
}

/// Test records in discovery order. The first record bound to a fragment
/// wins; later ones are counted as duplicates.
#[derive(Debug, Default)]
pub struct TestCatalog {
    records: IndexMap<String, TestRecord>,
    duplicates: Vec<String>,
}

impl TestCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from query solutions.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`TestRecord::from_solution`].
    pub fn from_solutions<'a>(solutions: impl IntoIterator<Item = &'a Solution>) -> Result<Self> {
        let mut catalog = Self::new();
        for solution in solutions {
            catalog.insert(TestRecord::from_solution(solution)?);
        }
        Ok(catalog)
    }

    /// Adds `record` unless its fragment is already bound. Returns whether
    /// it was added.
    pub fn insert(&mut self, record: TestRecord) -> bool {
        if self.records.contains_key(&record.fragment) {
            tracing::warn!(fragment = %record.fragment, "duplicate test entry, keeping the first");
            self.duplicates.push(record.fragment);
            return false;
        }
        self.records.insert(record.fragment.clone(), record);
        true
    }

    /// Fragment identifiers in discovery order.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records in discovery order.
    pub fn records(&self) -> impl Iterator<Item = &TestRecord> {
        self.records.values()
    }

    /// Fragments seen more than once, one entry per rejected record.
    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Number of distinct tests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no test was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
