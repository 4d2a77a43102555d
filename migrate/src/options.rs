//! Conversion settings.

use std::path::{Path, PathBuf};

use crate::reflow::{DEFAULT_INDENT, DEFAULT_WIDTH};

/// Directory holding the 2004 suite, relative to the working directory.
pub const DEFAULT_SUITE_DIR: &str = "2004-test-suite";

/// File name of the legacy manifest inside the suite directory.
pub const DEFAULT_MANIFEST: &str = "Manifest.rdf";

/// File name of the generated manifest.
pub const DEFAULT_OUTPUT: &str = "manifest.ttl";

/// Paths and layout settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Legacy manifest to load.
    pub source_manifest: PathBuf,
    /// Directory the legacy fixture files are copied from.
    pub suite_dir: PathBuf,
    /// Directory receiving `manifest.ttl` and the copied fixtures.
    pub out_dir: PathBuf,
    /// File name of the generated manifest inside `out_dir`.
    pub output_name: String,
    /// Column budget of wrapped descriptions.
    pub wrap_width: usize,
    /// Indentation of wrapped description lines.
    pub comment_indent: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::rooted_at(".")
    }
}

impl ConvertOptions {
    /// Default layout resolved against `root`: the suite in
    /// `root/2004-test-suite`, output written to `root`.
    #[must_use]
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let suite_dir = root.join(DEFAULT_SUITE_DIR);
        Self {
            source_manifest: suite_dir.join(DEFAULT_MANIFEST),
            suite_dir,
            out_dir: root.to_path_buf(),
            output_name: DEFAULT_OUTPUT.to_owned(),
            wrap_width: DEFAULT_WIDTH,
            comment_indent: DEFAULT_INDENT,
        }
    }

    /// Full path of the generated manifest.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(&self.output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_layout() {
        let options = ConvertOptions::default();
        assert_eq!(
            options.source_manifest,
            Path::new(".").join("2004-test-suite").join("Manifest.rdf")
        );
        assert_eq!(options.output_path(), Path::new(".").join("manifest.ttl"));
        assert_eq!(options.wrap_width, 60);
        assert_eq!(options.comment_indent, 8);
    }

    #[test]
    fn rooted_layout() {
        let options = ConvertOptions::rooted_at("/work");
        assert_eq!(options.suite_dir, Path::new("/work/2004-test-suite"));
        assert_eq!(options.out_dir, Path::new("/work"));
    }
}
