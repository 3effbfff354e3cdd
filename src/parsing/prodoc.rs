//! Parser for the PROSITE documentation store (`prosite.doc`).
//!
//! ```text
//! {PDOC00001}
//! {PS00001; ASN_GLYCOSYLATION}
//! {BEGIN}
//! free text ...
//! {END}
//! ```
//!
//! Text outside `{PDOCnnnnn}` ... `{END}` blocks (release notes at the top of
//! the file) is ignored.

use std::path::Path;

use tracing::debug;

use crate::core::definition::DocumentationRecord;
use crate::parsing::{read_text, ParseError};
use crate::utils::validation::check_record_limit;

/// Parse a documentation store file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_doc_file(path: &Path) -> Result<Vec<DocumentationRecord>, ParseError> {
    let content = read_text(path)?;
    parse_doc_text(&content)
}

enum State {
    Outside,
    References(DocumentationRecord),
    Body(DocumentationRecord, Vec<String>),
}

/// Return the content of a `{...}` marker line
fn marker(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
}

/// Parse documentation store text, preserving record order
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` on an unterminated record or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_doc_text(text: &str) -> Result<Vec<DocumentationRecord>, ParseError> {
    let mut records = Vec::new();
    let mut state = State::Outside;

    for (i, line) in text.lines().enumerate() {
        let line_num = i + 1;
        let line = line.trim_end();

        state = match state {
            State::Outside => match marker(line) {
                Some(accession) if accession.starts_with("PDOC") => {
                    State::References(DocumentationRecord::new(accession, ""))
                }
                _ => State::Outside,
            },
            State::References(mut record) => match marker(line) {
                Some("BEGIN") => State::Body(record, Vec::new()),
                Some(reference) => {
                    let accession = reference.split(';').next().unwrap_or_default().trim();
                    if !accession.is_empty() {
                        record.pattern_refs.push(accession.to_string());
                    }
                    State::References(record)
                }
                None if line.trim().is_empty() => State::References(record),
                None => {
                    return Err(ParseError::InvalidFormat(format!(
                        "Expected {{BEGIN}} for {} on line {line_num}",
                        record.accession
                    )))
                }
            },
            State::Body(mut record, mut body) => {
                if marker(line) == Some("END") {
                    if check_record_limit(records.len()).is_some() {
                        return Err(ParseError::TooManyRecords(records.len()));
                    }
                    record.text = body.join("\n").trim_end().to_string();
                    records.push(record);
                    State::Outside
                } else {
                    body.push(line.to_string());
                    State::Body(record, body)
                }
            }
        };
    }

    match state {
        State::Outside => {}
        State::References(record) | State::Body(record, _) => {
            return Err(ParseError::InvalidFormat(format!(
                "Documentation record {} is not terminated by {{END}}",
                record.accession
            )));
        }
    }

    debug!(records = records.len(), "Parsed documentation store");
    Ok(records)
}
