//! Grouping of BLAST tabular hits by query.
//!
//! Input is tab-delimited BLAST output with a header row naming its columns.
//! Only `qseqid`, `sseqid` and `sseq` are required; other columns are ignored.
//! Lines starting with `#` (comment lines of `-outfmt 7`) are skipped.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;

use crate::core::sequence::SequenceRecord;
use crate::parsing::{read_text, ParseError};
use crate::utils::validation::check_record_limit;

/// Columns that must be present in the header row
pub const REQUIRED_COLUMNS: [&str; 3] = ["qseqid", "sseqid", "sseq"];

/// All subject sequences aligned to one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryGroup {
    pub query_id: String,
    pub subjects: Vec<SequenceRecord>,
}

/// Parse a BLAST tabular file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_blast_file(path: &Path) -> Result<Vec<QueryGroup>, ParseError> {
    let content = read_text(path)?;
    parse_blast_text(&content)
}

/// Parse BLAST tabular text into per-query subject sets.
///
/// Queries keep their first-appearance order. Within a query, subjects keep
/// row order, alignment gaps are removed from `sseq`, and a repeated `sseqid`
/// keeps its first row.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header lacks a required column
/// or a row is short, or `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_blast_text(text: &str) -> Result<Vec<QueryGroup>, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'));

    let Some((_, header)) = lines.next() else {
        return Err(ParseError::InvalidFormat(
            "BLAST output is empty".to_string(),
        ));
    };
    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let index_of = |name: &str| {
        columns.iter().position(|c| *c == name).ok_or_else(|| {
            ParseError::InvalidFormat(format!("BLAST header is missing column '{name}'"))
        })
    };
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = index_of(name)?;
    }
    let [q_col, s_col, seq_col] = indices;
    let min_fields = q_col.max(s_col).max(seq_col) + 1;

    let mut groups: Vec<QueryGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut seen: HashMap<usize, HashSet<String>> = HashMap::new();
    let mut rows = 0usize;

    for (i, line) in lines {
        let line_num = i + 1;
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < min_fields {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected at least {min_fields}",
                fields.len()
            )));
        }

        if check_record_limit(rows).is_some() {
            return Err(ParseError::TooManyRecords(rows));
        }
        rows += 1;

        let query_id = fields[q_col].trim();
        let subject_id = fields[s_col].trim();
        let residues: String = fields[seq_col].chars().filter(|c| *c != '-').collect();

        let idx = *group_index.entry(query_id.to_string()).or_insert_with(|| {
            groups.push(QueryGroup {
                query_id: query_id.to_string(),
                subjects: Vec::new(),
            });
            groups.len() - 1
        });

        if !seen.entry(idx).or_default().insert(subject_id.to_string()) {
            continue;
        }
        groups[idx]
            .subjects
            .push(SequenceRecord::new(subject_id, residues));
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLAST: &str = "\
qseqid\tsseqid\tpident\tevalue\tsseq
Q2\tS1\t98.0\t1e-50\tMKN-GSTK
Q1\tS3\t90.0\t1e-40\tRGD
Q2\tS2\t80.0\t1e-20\tAAAA
Q2\tS1\t70.0\t1e-10\tXXXX
";

    #[test]
    fn test_groups_in_first_appearance_order() {
        let groups = parse_blast_text(BLAST).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].query_id, "Q2");
        assert_eq!(groups[1].query_id, "Q1");

        let ids: Vec<&str> = groups[0].subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
    }

    #[test]
    fn test_gaps_removed_and_first_row_kept() {
        let groups = parse_blast_text(BLAST).unwrap();
        assert_eq!(groups[0].subjects[0].residues, "MKNGSTK");
    }

    #[test]
    fn test_comment_lines_skipped() {
        let text = "# BLASTP 2.15.0+\nqseqid\tsseqid\tsseq\n# 1 hits found\nQ\tS\tNGS\n";
        let groups = parse_blast_text(text).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].subjects[0].residues, "NGS");
    }

    #[test]
    fn test_missing_column() {
        let text = "qseqid\tsseqid\tevalue\nQ\tS\t1e-5\n";
        let result = parse_blast_text(text);
        assert!(matches!(result, Err(ParseError::InvalidFormat(msg)) if msg.contains("sseq")));
    }

    #[test]
    fn test_short_row() {
        let text = "qseqid\tsseqid\tsseq\nQ\tS\n";
        assert!(parse_blast_text(text).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_blast_text("").is_err());
        assert!(parse_blast_text("qseqid\tsseqid\tsseq\n").unwrap().is_empty());
    }
}
