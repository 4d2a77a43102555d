//! Error type shared by every stage of the migration.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A fatal condition that aborts a conversion or sort run.
///
/// Duplicate fragment identifiers are not errors; they are logged and
/// reported through [`crate::ConversionSummary`].
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The manifest text has no line closing the `mf:entries` list.
    #[error("no `) .` line closing the entry list was found")]
    MissingTerminator,

    /// An approved test has no description.
    #[error("test {fragment} has no description")]
    MissingDescription {
        /// Fragment identifier of the offending test, e.g. `#foo-baz`.
        fragment: String,
    },

    /// A query solution carried no input document.
    #[error("test {fragment} has no input document")]
    MissingAction {
        /// Fragment identifier of the offending test.
        fragment: String,
    },

    /// A test subject IRI has no fragment or too few path segments.
    #[error("cannot derive a fragment identifier from <{subject}>")]
    InvalidSubject {
        /// The subject IRI as found in the source graph.
        subject: String,
    },

    /// A fixture IRI has fewer than two path segments.
    #[error("cannot derive a fixture path from <{iri}>")]
    InvalidFixture {
        /// The fixture IRI as found in the source graph.
        iri: String,
    },

    /// A base IRI for resolving relative references is not absolute.
    #[error("invalid base IRI <{base}>: {message}")]
    InvalidBase {
        /// The rejected base.
        base: String,
        /// IRI parser diagnostic.
        message: String,
    },

    /// A built-in text pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The source document could not be parsed.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// Document that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The graph store failed while evaluating a query.
    #[error("query failed: {message}")]
    Query {
        /// Store diagnostic.
        message: String,
    },

    /// A filesystem operation failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// File or directory the operation touched.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl MigrateError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = MigrateError> = std::result::Result<T, E>;
