//! IRIs of the legacy and target vocabularies.
//!
//! Only the terms the converter reads or writes are listed.

/// `rdf:` namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// `rdfs:` namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// `mf:` namespace of the test manifest vocabulary.
pub const MF: &str = "http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#";
/// `rdft:` namespace of the RDF test vocabulary.
pub const RDFT: &str = "http://www.w3.org/ns/rdftest#";
/// Namespace of the 2004 RDF Core test schema.
pub const LEGACY: &str = "http://www.w3.org/2000/10/rdf-tests/rdfcore/testSchema#";

/// Status literal of tests that made it into the approved suite.
pub const APPROVED: &str = "APPROVED";

/// Builds `rdf:type`.
#[must_use]
pub fn rdf_type() -> String {
    format!("{RDF}type")
}

/// Builds the IRI of a term in the legacy test schema.
#[must_use]
pub fn legacy(local: &str) -> String {
    format!("{LEGACY}{local}")
}

/// Kind of a legacy parser test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    /// `testSchema:PositiveParserTest`.
    Positive,
    /// `testSchema:NegativeParserTest`.
    Negative,
}

impl TestKind {
    /// Classifies a legacy type IRI. Anything but `PositiveParserTest`
    /// is treated as negative.
    #[must_use]
    pub fn from_iri(iri: &str) -> Self {
        match iri.strip_prefix(LEGACY) {
            Some("PositiveParserTest") => Self::Positive,
            _ => Self::Negative,
        }
    }

    /// Local name in the legacy test schema.
    #[must_use]
    pub const fn legacy_name(self) -> &'static str {
        match self {
            Self::Positive => "PositiveParserTest",
            Self::Negative => "NegativeParserTest",
        }
    }

    /// Local name of the matching class in `rdft:`.
    #[must_use]
    pub const fn target_name(self) -> &'static str {
        match self {
            Self::Positive => "TestXMLEval",
            Self::Negative => "TestXMLNegativeSyntax",
        }
    }
}
