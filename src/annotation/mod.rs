//! Annotation runs: scanning many sequences and publishing the results.
//!
//! - [`aggregator`]: [`Annotator`] scans sequences in parallel and assembles the table
//! - [`report`]: Renders the per-sequence plain-text report
//! - [`output`]: Stages files and publishes them, table last
//!
//! ## Output Layout
//!
//! ```text
//! <output_dir>/
//!   <sequence id>_dominfo.txt   one per input sequence
//!   _domains.tsv                all hits, one row each
//! ```
//!
//! Table rows are ordered by input sequence, then catalog order, then match
//! position, regardless of how many worker threads were used.
//!
//! ## Example
//!
//! ```rust,no_run
//! use motif_scan::annotation::{AnnotateConfig, Annotator};
//! use motif_scan::catalog::store::DomainCatalog;
//! use motif_scan::parsing::fasta::parse_fasta_file;
//! use std::path::Path;
//!
//! let catalog = DomainCatalog::load(
//!     Path::new("prosite_files/prosite.dat"),
//!     Path::new("prosite_files/prosite.doc"),
//! )
//! .unwrap();
//! let sequences = parse_fasta_file(Path::new("proteins.fasta")).unwrap();
//!
//! let config = AnnotateConfig { threads: 4, ..AnnotateConfig::default() };
//! let run = Annotator::with_config(&catalog, config)
//!     .annotate(&sequences, Path::new("out"))
//!     .unwrap();
//! println!("{} hits written to {}", run.hits, run.table_path.display());
//! ```

pub mod aggregator;
pub mod output;
pub mod report;

pub use aggregator::{AnnotateConfig, AnnotationError, AnnotationRun, Annotator};
pub use report::{render_report, SequenceReport};
