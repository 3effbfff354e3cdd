//! # motif-scan
//!
//! A library for annotating protein sequences with PROSITE pattern motifs.
//!
//! PROSITE distributes its motifs as two text stores: `prosite.dat`, holding one
//! pattern definition per entry, and `prosite.doc`, holding free-text
//! documentation keyed by `PDOC` accession. `motif-scan` loads both, compiles
//! every pattern once, scans sequences for all matches, and writes a report per
//! sequence plus one consolidated table.
//!
//! ## Features
//!
//! - **Pattern compilation**: Translates PROSITE syntax (`N-{P}-[ST]-{P}.`) into
//!   an executable matcher, reporting unsupported syntax as a typed error
//! - **Documentation cross-references**: Resolves each hit's documentation via
//!   the pattern's `DO` reference, its accession, or the documentation's
//!   pattern reference lines
//! - **Deterministic output**: Table rows follow sequence, catalog and match
//!   order whatever the thread count
//! - **Staged publication**: The table only appears once every file is written
//! - **BLAST grouping**: Annotates BLAST subject sequences grouped by query
//!
//! ## Example
//!
//! ```rust,no_run
//! use motif_scan::{DomainCatalog, ScanEngine, SequenceRecord};
//! use std::path::Path;
//!
//! let catalog = DomainCatalog::load(
//!     Path::new("prosite_files/prosite.dat"),
//!     Path::new("prosite_files/prosite.doc"),
//! )
//! .unwrap();
//!
//! let engine = ScanEngine::new(&catalog);
//! let hits = engine.scan(&SequenceRecord::new("query", "MKNGSTKRGDAA"));
//!
//! for hit in hits {
//!     println!("{} {}-{} ({:.1})", hit.pattern_name, hit.start, hit.end, hit.midpoint);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`annotation`]: Multi-sequence runs, reports, and staged output
//! - [`catalog`]: Motif catalog storage and documentation lookup
//! - [`core`]: Core data types for definitions, sequences, and hits
//! - [`matching`]: Pattern compiler and scan engine
//! - [`parsing`]: Parsers for PROSITE stores, FASTA, and BLAST tables
//! - [`cli`]: Command-line interface implementation

pub mod annotation;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use annotation::{AnnotateConfig, AnnotationRun, Annotator};
pub use catalog::store::DomainCatalog;
pub use crate::core::definition::{DocumentationRecord, PatternDefinition};
pub use crate::core::hit::{AnnotationTable, DomainHit};
pub use crate::core::sequence::SequenceRecord;
pub use crate::core::types::*;
pub use matching::engine::ScanEngine;
