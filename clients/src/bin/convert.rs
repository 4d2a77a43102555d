//! `rdfcore-convert` — Converts the 2004 RDF Core parser test manifest into
//! the RDF test manifest vocabulary and copies the referenced fixtures.
//!
//! **Outputs:**
//! - `<out>/manifest.ttl` — Turtle manifest of every approved parser test
//! - `<out>/<dir>/<file>` — copies of the input and output documents
//!
//! **Usage:**
//! ```
//! rdfcore-convert [--suite <path>] [--manifest <path>] [--out <path>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rdfcore_migrate::options::{DEFAULT_MANIFEST, DEFAULT_OUTPUT, DEFAULT_SUITE_DIR};
use rdfcore_migrate::reflow::{DEFAULT_INDENT, DEFAULT_WIDTH};
use rdfcore_migrate::{convert, logging, ConvertOptions, SophiaStore};

/// Convert the 2004 RDF Core parser test manifest.
#[derive(Parser)]
#[command(
    name = "rdfcore-convert",
    about = "Convert the 2004 RDF Core parser test manifest to manifest.ttl"
)]
struct Args {
    /// Directory of the legacy suite; fixtures are copied from here.
    #[arg(long, default_value = DEFAULT_SUITE_DIR)]
    suite: PathBuf,

    /// Legacy manifest (default: <suite>/Manifest.rdf).
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Directory receiving the manifest and the copied fixtures.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// File name of the generated manifest.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output_name: String,

    /// Base IRI for relative references in the legacy manifest.
    #[arg(long)]
    base: Option<String>,

    /// Column budget of wrapped descriptions.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
}

fn main() -> Result<()> {
    logging::init("info");
    let args = Args::parse();

    let options = ConvertOptions {
        source_manifest: args
            .manifest
            .unwrap_or_else(|| args.suite.join(DEFAULT_MANIFEST)),
        suite_dir: args.suite,
        out_dir: args.out,
        output_name: args.output_name,
        wrap_width: args.width,
        comment_indent: DEFAULT_INDENT,
    };
    let store = match args.base {
        Some(base) => SophiaStore::with_base(base).context("Invalid --base")?,
        None => SophiaStore::new(),
    };

    let summary = convert(&store, &options)
        .with_context(|| format!("Failed to convert {}", options.source_manifest.display()))?;

    tracing::info!(
        entries = summary.entries,
        duplicates = summary.duplicates.len(),
        copied = summary.fixtures_copied,
        unchanged = summary.fixtures_unchanged,
        "written {}",
        summary.output.display()
    );
    Ok(())
}
