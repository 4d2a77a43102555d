//! Copies fixture files from the legacy suite into the new layout.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::FixtureRef;
use crate::error::{MigrateError, Result};

/// What [`FixtureCopier::copy`] did with a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The destination was written.
    Copied,
    /// The destination already held identical content.
    Unchanged,
    /// The fixture was handled earlier in this run.
    AlreadyCopied,
}

/// Copies `suite_dir/<dir>/<file>` to `out_dir/<dir>/<file>`, once per
/// destination.
#[derive(Debug)]
pub struct FixtureCopier {
    suite_dir: PathBuf,
    out_dir: PathBuf,
    directories: HashSet<PathBuf>,
    handled: HashSet<PathBuf>,
    copied: usize,
    unchanged: usize,
}

impl FixtureCopier {
    /// Creates a copier between the two trees.
    #[must_use]
    pub fn new(suite_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            suite_dir: suite_dir.into(),
            out_dir: out_dir.into(),
            directories: HashSet::new(),
            handled: HashSet::new(),
            copied: 0,
            unchanged: 0,
        }
    }

    /// Source path of `fixture` in the legacy suite.
    #[must_use]
    pub fn source(&self, fixture: &FixtureRef) -> PathBuf {
        self.suite_dir.join(&fixture.directory).join(&fixture.file)
    }

    /// Destination path of `fixture`.
    #[must_use]
    pub fn destination(&self, fixture: &FixtureRef) -> PathBuf {
        self.out_dir.join(&fixture.directory).join(&fixture.file)
    }

    /// Copies `fixture`, creating its destination directory on first use.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Io`] if the source is missing or the
    /// destination cannot be created or written.
    pub fn copy(&mut self, fixture: &FixtureRef) -> Result<CopyOutcome> {
        let destination = self.destination(fixture);
        if self.handled.contains(&destination) {
            return Ok(CopyOutcome::AlreadyCopied);
        }

        let directory = self.out_dir.join(&fixture.directory);
        if !self.directories.contains(&directory) {
            ensure_dir(&directory)?;
            self.directories.insert(directory);
        }

        let source = self.source(fixture);
        let content = fs::read(&source).map_err(|e| MigrateError::io(&source, e))?;
        let outcome = if fs::read(&destination).is_ok_and(|existing| existing == content) {
            self.unchanged += 1;
            CopyOutcome::Unchanged
        } else {
            fs::write(&destination, &content).map_err(|e| MigrateError::io(&destination, e))?;
            self.copied += 1;
            CopyOutcome::Copied
        };
        tracing::debug!(
            source = %source.display(),
            destination = %destination.display(),
            ?outcome,
            "fixture"
        );

        self.handled.insert(destination);
        Ok(outcome)
    }

    /// Number of fixtures written.
    #[must_use]
    pub fn copied(&self) -> usize {
        self.copied
    }

    /// Number of fixtures whose destination was already up to date.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.unchanged
    }
}

/// Creates `dir` unless it already exists.
///
/// # Errors
///
/// Returns [`MigrateError::Io`] if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|e| MigrateError::io(dir, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(directory: &str, file: &str) -> FixtureRef {
        FixtureRef {
            directory: directory.to_owned(),
            file: file.to_owned(),
        }
    }

    fn suite() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("suite/foo")).unwrap();
        fs::write(dir.path().join("suite/foo/test01.rdf"), "<rdf:RDF/>").unwrap();
        dir
    }

    #[test]
    fn copies_into_new_directory() {
        let dir = suite();
        let mut copier = FixtureCopier::new(dir.path().join("suite"), dir.path().join("out"));
        let outcome = copier.copy(&fixture("foo", "test01.rdf")).unwrap();
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(
            fs::read_to_string(dir.path().join("out/foo/test01.rdf")).unwrap(),
            "<rdf:RDF/>"
        );
        assert_eq!(copier.copied(), 1);
    }

    #[test]
    fn second_copy_in_a_run_is_skipped() {
        let dir = suite();
        let mut copier = FixtureCopier::new(dir.path().join("suite"), dir.path());
        copier.copy(&fixture("foo", "test01.rdf")).unwrap();
        let outcome = copier.copy(&fixture("foo", "test01.rdf")).unwrap();
        assert_eq!(outcome, CopyOutcome::AlreadyCopied);
        assert_eq!(copier.copied(), 1);
    }

    #[test]
    fn identical_destination_is_left_alone() {
        let dir = suite();
        fs::create_dir_all(dir.path().join("foo")).unwrap();
        fs::write(dir.path().join("foo/test01.rdf"), "<rdf:RDF/>").unwrap();
        let mut copier = FixtureCopier::new(dir.path().join("suite"), dir.path());
        let outcome = copier.copy(&fixture("foo", "test01.rdf")).unwrap();
        assert_eq!(outcome, CopyOutcome::Unchanged);
        assert_eq!(copier.unchanged(), 1);
    }

    #[test]
    fn stale_destination_is_overwritten() {
        let dir = suite();
        fs::create_dir_all(dir.path().join("foo")).unwrap();
        fs::write(dir.path().join("foo/test01.rdf"), "stale").unwrap();
        let mut copier = FixtureCopier::new(dir.path().join("suite"), dir.path());
        assert_eq!(
            copier.copy(&fixture("foo", "test01.rdf")).unwrap(),
            CopyOutcome::Copied
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("foo/test01.rdf")).unwrap(),
            "<rdf:RDF/>"
        );
    }

    #[test]
    fn missing_source_names_the_path() {
        let dir = suite();
        let mut copier = FixtureCopier::new(dir.path().join("suite"), dir.path());
        match copier.copy(&fixture("foo", "missing.rdf")) {
            Err(MigrateError::Io { path, .. }) => assert!(path.ends_with("foo/missing.rdf")),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
