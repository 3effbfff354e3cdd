use serde::{Deserialize, Serialize};

/// A protein sequence supplied for scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: String,
    pub residues: String,
}

impl SequenceRecord {
    /// Create a record, normalizing residues to uppercase without whitespace.
    ///
    /// A single trailing `*` (translation stop) is dropped.
    pub fn new(id: impl Into<String>, residues: impl AsRef<str>) -> Self {
        let mut residues: String = residues
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if residues.ends_with('*') {
            residues.pop();
        }

        Self {
            id: id.into(),
            residues,
        }
    }

    /// Number of residues
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Check if the sequence has no residues
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Find the first character that is not a residue code.
    ///
    /// Residue codes are ASCII letters; `*` is tolerated only as a trailing stop
    /// and has already been removed by [`SequenceRecord::new`].
    pub fn first_invalid_residue(&self) -> Option<(usize, char)> {
        self.residues
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphabetic())
    }
}
