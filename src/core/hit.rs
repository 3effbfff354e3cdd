use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::definition::PatternDefinition;

/// Column names of the consolidated table, in output order
pub const TABLE_COLUMNS: [&str; 8] = [
    "id",
    "name",
    "accession",
    "description",
    "pattern",
    "start",
    "end",
    "midpoint",
];

/// One located occurrence of a pattern in a sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainHit {
    pub sequence_id: String,
    pub pattern_name: String,
    pub pattern_accession: String,
    pub description: String,
    pub raw_pattern: String,

    /// 0-based offset of the first matched residue
    pub start: usize,

    /// 0-based offset one past the last matched residue
    pub end: usize,

    /// Center of the span, `start + (end - start) / 2`
    pub midpoint: f64,
}

impl DomainHit {
    pub fn new(
        sequence_id: impl Into<String>,
        definition: &PatternDefinition,
        start: usize,
        end: usize,
    ) -> Self {
        debug_assert!(start < end, "hit span must be non-empty");
        Self {
            sequence_id: sequence_id.into(),
            pattern_name: definition.name.clone(),
            pattern_accession: definition.accession.clone(),
            description: definition.description.clone(),
            raw_pattern: definition.raw_pattern.clone(),
            start,
            end,
            midpoint: midpoint(start, end),
        }
    }

    /// Number of residues covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false; hits never have an empty span
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Arithmetic center of a `[start, end)` span
#[allow(clippy::cast_precision_loss)] // Residue offsets are far below 2^52
#[must_use]
pub fn midpoint(start: usize, end: usize) -> f64 {
    start as f64 + (end - start) as f64 / 2.0
}

/// Ordered hit rows: sequence order, then catalog order, then match order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationTable {
    pub rows: Vec<DomainHit>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the hits of one sequence, preserving their order
    pub fn extend_sequence(&mut self, hits: impl IntoIterator<Item = DomainHit>) {
        self.rows.extend(hits);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DomainHit> {
        self.rows.iter()
    }

    /// Serialize as tab-delimited text with a header row
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "{}", TABLE_COLUMNS.join("\t"))?;
        for hit in &self.rows {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.1}",
                tsv_field(&hit.sequence_id),
                tsv_field(&hit.pattern_name),
                tsv_field(&hit.pattern_accession),
                tsv_field(&hit.description),
                tsv_field(&hit.raw_pattern),
                hit.start,
                hit.end,
                hit.midpoint,
            )?;
        }
        writer.flush()
    }

    /// Render the table as a string
    pub fn to_tsv_string(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_tsv(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl<'a> IntoIterator for &'a AnnotationTable {
    type Item = &'a DomainHit;
    type IntoIter = std::slice::Iter<'a, DomainHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Keep a field on one line and inside one column
fn tsv_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains(['\t', '\n', '\r']) {
        value.replace(['\t', '\n', '\r'], " ").into()
    } else {
        value.into()
    }
}
