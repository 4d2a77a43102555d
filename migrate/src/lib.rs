//! Migration of the 2004 RDF Core parser test suite.
//!
//! Reads the legacy `2004-test-suite/Manifest.rdf`, selects the approved
//! positive and negative parser tests, and writes `manifest.ttl` in the RDF
//! test manifest vocabulary (`mf:`, `rdft:`) while copying every referenced
//! fixture into a `<directory>/<file>` layout. A companion sorter reorders
//! the per-test blocks of such a manifest.
//!
//! # Entry Points
//!
//! ```no_run
//! use rdfcore_migrate::{convert, ConvertOptions, SophiaStore};
//!
//! let summary = convert(&SophiaStore::new(), &ConvertOptions::default())
//!     .expect("conversion failed");
//! println!("{} tests written to {}", summary.entries, summary.output.display());
//! ```
//!
//! ```
//! let sorted = rdfcore_migrate::sorter::sort_entries(
//!     "<> mf:entries (\n  <#b>\n  <#a>\n  ) .\n\n<#b> a x .\n\n<#a> a x .\n",
//! )
//! .unwrap();
//! assert!(sorted.ends_with("  ) .\n\n<#a> a x .\n\n<#b> a x .\n"));
//! ```
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Load the legacy graph | [`graph`] |
//! | Select approved tests | [`query`] |
//! | Key by fragment, first wins | [`catalog`] |
//! | Wrap descriptions | [`reflow`] |
//! | Write blocks, copy fixtures | [`emitter`], [`fixtures`] |

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod catalog;
pub mod emitter;
pub mod error;
pub mod fixtures;
pub mod graph;
pub mod logging;
pub mod options;
pub mod query;
pub mod reflow;
pub mod sorter;
pub mod vocab;

pub use catalog::{FixtureRef, TestCatalog, TestRecord};
pub use emitter::{convert, ConversionSummary};
pub use error::{MigrateError, Result};
pub use graph::{GraphStore, SophiaStore};
pub use options::ConvertOptions;
pub use query::{PatternQuery, Solution, Value};
