//! Command-line interface for motif-scan.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Scan the sequences of a FASTA file against the motif catalog
//! - **blast**: Group BLAST hits by query and annotate each group's subjects
//! - **catalog**: List, show, or export the loaded motif catalog
//! - **compile**: Translate a single pattern and show the resulting expression
//!
//! ## Usage
//!
//! ```text
//! # Annotate a FASTA file with the default PROSITE stores
//! motif-scan annotate proteins.fasta -o out/
//!
//! # Use a specific release and four worker threads
//! motif-scan annotate proteins.fasta --patterns prosite.dat --docs prosite.doc -o out/ -t 4
//!
//! # Annotate BLAST subjects, one directory per query
//! motif-scan blast hits.tsv -o out/
//!
//! # Patterns that fail to compile
//! motif-scan catalog list --failed-only
//!
//! # JSON output for scripting
//! motif-scan compile 'N-{P}-[ST]-{P}.' --format json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::store::DomainCatalog;

pub mod annotate;
pub mod blast;
pub mod catalog;
pub mod compile;

/// Default location of the pattern store
pub const DEFAULT_PATTERN_STORE: &str = "prosite_files/prosite.dat";

/// Default location of the documentation store
pub const DEFAULT_DOC_STORE: &str = "prosite_files/prosite.doc";

#[derive(Parser)]
#[command(name = "motif-scan")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate protein sequences with PROSITE motifs")]
#[command(
    long_about = "motif-scan finds PROSITE pattern motifs in protein sequences.\n\nIt loads the pattern and documentation stores of a PROSITE release, compiles every pattern once, and for each input sequence writes:\n- A plain-text report listing each hit with its documentation\n- One row per hit in a consolidated tab-delimited table"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate the sequences of a FASTA file
    Annotate(annotate::AnnotateArgs),

    /// Annotate BLAST subject sequences grouped by query
    Blast(blast::BlastArgs),

    /// Inspect the motif catalog
    Catalog(catalog::CatalogArgs),

    /// Translate a single pattern
    Compile(compile::CompileArgs),
}

/// Locations of the catalog stores, shared by every command that loads the catalog
#[derive(Args, Clone, Debug)]
pub struct StoreArgs {
    /// PROSITE pattern store (prosite.dat, optionally gzipped)
    #[arg(long, default_value = DEFAULT_PATTERN_STORE)]
    pub patterns: PathBuf,

    /// PROSITE documentation store (prosite.doc, optionally gzipped)
    #[arg(long, default_value = DEFAULT_DOC_STORE)]
    pub docs: PathBuf,
}

impl StoreArgs {
    /// Load the catalog from both stores
    ///
    /// # Errors
    ///
    /// Returns an error if either store cannot be read or parsed.
    pub fn load(&self, verbose: bool) -> anyhow::Result<DomainCatalog> {
        let catalog = DomainCatalog::load(&self.patterns, &self.docs)?;
        if verbose {
            eprintln!(
                "Loaded {} patterns ({} usable) and {} documentation records",
                catalog.len(),
                catalog.usable_count(),
                catalog.doc_count()
            );
        }
        Ok(catalog)
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Resolve the worker count, treating 0 as "use available parallelism"
pub(crate) fn annotate_config(threads: usize) -> crate::annotation::AnnotateConfig {
    let mut config = crate::annotation::AnnotateConfig::default();
    if threads > 0 {
        config.threads = threads;
    }
    config
}
