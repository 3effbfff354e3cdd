//! Parsers for catalog stores and sequence inputs.
//!
//! This module provides parsers for:
//!
//! - **PROSITE pattern store** (`prosite.dat`): motif definitions
//! - **PROSITE documentation store** (`prosite.doc`): free-text documentation
//! - **FASTA files**: protein sequences to annotate
//! - **BLAST tabular output**: subject sequences grouped by query
//!
//! Every file-based parser accepts gzip-compressed input when the path ends in
//! `.gz` or `.bgz`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use motif_scan::parsing::{fasta, prosite};
//! use std::path::Path;
//!
//! let definitions = prosite::parse_pattern_file(Path::new("prosite_files/prosite.dat")).unwrap();
//! let sequences = fasta::parse_fasta_file(Path::new("subjects.fasta")).unwrap();
//! ```
//!
//! ## Pattern Store Fields
//!
//! | Code | Description | Required |
//! |------|-------------|----------|
//! | ID   | Entry name and type | Yes |
//! | AC   | Pattern accession | Yes |
//! | DE   | Description | No |
//! | PA   | Pattern (may span several lines) | No |
//! | DO   | Documentation accession | No |

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

pub mod blast;
pub mod fasta;
pub mod prodoc;
pub mod prosite;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many records: {0} exceeds maximum allowed (1000000)")]
    TooManyRecords(usize),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a file for buffered reading, decompressing gzip input
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened.
pub fn open_reader(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read a whole text file, decompressing gzip input
///
/// # Errors
///
/// Returns an IO error if the file cannot be read or is not valid UTF-8.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let mut text = String::new();
    open_reader(path)?.read_to_string(&mut text)?;
    Ok(text)
}
