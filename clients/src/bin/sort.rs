//! `rdfcore-sort` — Prints a manifest with its per-test blocks in lexical
//! order. The input file is left untouched.
//!
//! **Usage:**
//! ```
//! rdfcore-sort <manifest.ttl> > sorted.ttl
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rdfcore_migrate::{logging, sorter};

/// Sort the entry blocks of a test manifest.
#[derive(Parser)]
#[command(name = "rdfcore-sort", about = "Sort the entry blocks of a test manifest")]
struct Args {
    /// Manifest to sort.
    manifest: PathBuf,
}

fn main() -> Result<()> {
    logging::init("warn");
    let args = Args::parse();

    let text = fs::read_to_string(&args.manifest)
        .with_context(|| format!("Failed to read {}", args.manifest.display()))?;
    let sorted = sorter::sort_entries(&text)
        .with_context(|| format!("Failed to sort {}", args.manifest.display()))?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(sorted.as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush().context("Failed to write to stdout")?;
    Ok(())
}
