//! Reading and writing protein FASTA files using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed input.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.faa` (uncompressed)
//! - any of the above with `.gz` or `.bgz` (compressed)

use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::Path;

use noodles::fasta;

use crate::core::sequence::SequenceRecord;
use crate::parsing::{is_gzipped, open_reader, ParseError};
use crate::utils::validation::check_record_limit;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    let trimmed = if is_gzipped(path) {
        path_str
            .trim_end_matches(".gz")
            .trim_end_matches(".bgz")
            .to_string()
    } else {
        path_str
    };

    matches!(
        Path::new(&trimmed)
            .extension()
            .and_then(OsStr::to_str),
        Some("fa" | "fasta" | "faa" | "fas")
    )
}

/// Parse a FASTA file into sequence records, in file order.
///
/// The record id is the first word of the definition line.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no sequences are found, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<SequenceRecord>, ParseError> {
    let reader = open_reader(path)?;
    let mut fasta_reader = fasta::io::Reader::new(reader);
    let records = parse_fasta_reader(&mut fasta_reader)?;

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}

/// Parse from a noodles FASTA reader
fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        // Check record limit for DOS protection
        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let id = String::from_utf8_lossy(record.name()).to_string();
        let residues = String::from_utf8_lossy(record.sequence().as_ref());
        records.push(SequenceRecord::new(id, residues));
    }

    Ok(records)
}

/// Parse FASTA text held in memory
///
/// # Errors
///
/// Returns `ParseError::Noodles` if the text is not valid FASTA.
pub fn parse_fasta_text(text: &str) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut reader = fasta::io::Reader::new(text.as_bytes());
    parse_fasta_reader(&mut reader)
}

/// Write sequence records as FASTA
///
/// # Errors
///
/// Returns `ParseError::Io` if writing fails.
pub fn write_fasta<W: Write>(writer: W, records: &[SequenceRecord]) -> Result<(), ParseError> {
    let mut writer = fasta::io::Writer::new(writer);

    for record in records {
        let definition = fasta::record::Definition::new(record.id.as_str(), None);
        let sequence = fasta::record::Sequence::from(record.residues.as_bytes().to_vec());
        writer.write_record(&fasta::Record::new(definition, sequence))?;
    }

    Ok(())
}
