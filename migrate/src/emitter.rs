//! Writes the converted `manifest.ttl` and copies the fixtures it names.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::catalog::{TestCatalog, TestRecord};
use crate::error::{MigrateError, Result};
use crate::fixtures::{self, FixtureCopier};
use crate::graph::GraphStore;
use crate::options::ConvertOptions;
use crate::query;
use crate::reflow;
use crate::vocab::{MF, RDF, RDFS, RDFT};

/// Title of the generated manifest.
pub const TITLE: &str = "RDF/XML Syntax tests";

const LICENSE: &str = "\
# This manifest was generated from the RDF Core Working Group's 2004
# parser test suite (2004-test-suite/Manifest.rdf). Regenerate it rather
# than editing it by hand.
#
# Distributed under both the W3C Test Suite License [1] and the W3C
# 3-clause BSD License [2]. To contribute to a W3C Test Suite, see the
# policies and contribution forms [3].
#
# [1] http://www.w3.org/Consortium/Legal/2008/04-testsuite-license
# [2] http://www.w3.org/Consortium/Legal/2008/03-bsd-license
# [3] http://www.w3.org/2004/10/27-testcases
";

/// Counts reported after a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Path of the generated manifest.
    pub output: PathBuf,
    /// Number of tests written.
    pub entries: usize,
    /// Fragments rejected as duplicates, in discovery order.
    pub duplicates: Vec<String>,
    /// Fixture files written.
    pub fixtures_copied: usize,
    /// Fixture files already up to date.
    pub fixtures_unchanged: usize,
}

/// Renders the license comment, prefixes and the `mf:entries` list.
#[must_use]
pub fn render_header<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("# ");
    out.push_str(TITLE);
    out.push_str("\n#\n");
    out.push_str(LICENSE);
    out.push('\n');

    let _ = writeln!(out, "@prefix rdf:  <{RDF}> .");
    let _ = writeln!(out, "@prefix rdfs: <{RDFS}> .");
    let _ = writeln!(out, "@prefix mf:   <{MF}> .");
    let _ = writeln!(out, "@prefix rdft: <{RDFT}> .");
    out.push('\n');

    out.push_str("<> rdf:type mf:Manifest ;\n");
    let _ = writeln!(out, "  rdfs:comment \"{TITLE}\" ;");
    out.push_str("  mf:entries\n  (\n");
    for fragment in fragments {
        let _ = writeln!(out, "    <{fragment}>");
    }
    out.push_str("  ) .\n\n");
    out
}

/// Renders one test block.
///
/// # Errors
///
/// Returns [`MigrateError::MissingDescription`] if the record has no
/// description or only whitespace.
pub fn render_record(record: &TestRecord, width: usize, indent: usize) -> Result<String> {
    let description = record
        .description
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| MigrateError::MissingDescription {
            fragment: record.fragment.clone(),
        })?;
    let comment = escape_long_string(&reflow::reflow(description, width, indent));

    let mut out = String::with_capacity(256 + comment.len());
    let _ = writeln!(
        out,
        "<{}> rdf:type rdft:{} ;",
        record.fragment,
        record.kind.target_name()
    );
    let _ = writeln!(out, "  mf:name \"{}\" ;", record.name());
    let _ = writeln!(
        out,
        "  rdfs:comment \"\"\"\n{}{comment}\n  \"\"\" ;",
        " ".repeat(indent)
    );
    out.push_str("  rdfs:approval rdft:Approved ;\n");
    let _ = writeln!(out, "  mf:action <{}> ;", record.action.relative());
    if let Some(result) = &record.result {
        let _ = writeln!(out, "  mf:result <{}> ;", result.relative());
    }
    out.push_str("  .\n\n");
    Ok(out)
}

fn escape_long_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Converts the legacy manifest named by `options`.
///
/// Loads and queries the source graph, writes the header and entry list,
/// then one block per test while copying its fixtures. A fatal error stops
/// the run and leaves the blocks written so far in the output file.
///
/// # Errors
///
/// Returns an error if the source cannot be loaded or queried, a subject or
/// fixture IRI is malformed, a test has no description, or a file cannot be
/// read, copied or written.
pub fn convert<S: GraphStore>(store: &S, options: &ConvertOptions) -> Result<ConversionSummary> {
    let graph = store.load(&options.source_manifest)?;
    let query = query::legacy_tests();
    tracing::debug!(%query, "querying {}", options.source_manifest.display());
    let solutions = store.query(&graph, &query)?;
    let catalog = TestCatalog::from_solutions(&solutions)?;
    tracing::info!(
        solutions = solutions.len(),
        tests = catalog.len(),
        duplicates = catalog.duplicates().len(),
        "collected approved tests"
    );

    fixtures::ensure_dir(&options.out_dir)?;
    let output = options.output_path();
    let io_error = |e| MigrateError::io(&output, e);
    let mut out = BufWriter::new(File::create(&output).map_err(io_error)?);
    let mut copier = FixtureCopier::new(&options.suite_dir, &options.out_dir);

    out.write_all(render_header(catalog.fragments()).as_bytes())
        .map_err(io_error)?;
    for record in catalog.records() {
        let block = render_record(record, options.wrap_width, options.comment_indent)?;
        copier.copy(&record.action)?;
        if let Some(result) = &record.result {
            copier.copy(result)?;
        }
        out.write_all(block.as_bytes()).map_err(io_error)?;
    }
    out.flush().map_err(io_error)?;

    Ok(ConversionSummary {
        output: output.clone(),
        entries: catalog.len(),
        duplicates: catalog.duplicates().to_vec(),
        fixtures_copied: copier.copied(),
        fixtures_unchanged: copier.unchanged(),
    })
}
