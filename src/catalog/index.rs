use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::core::definition::{DocumentationRecord, PatternDefinition};

/// Outcome of a documentation lookup that found nothing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocLookupError {
    #[error("documentation not found for {accession} (tried: {})", .tried.join(", "))]
    NotFound {
        /// Pattern accession the lookup started from
        accession: String,
        /// Documentation keys that were tried, in order
        tried: Vec<String>,
    },
}

/// Documentation records indexed by their accession
#[derive(Debug, Default)]
pub struct DocIndex {
    by_accession: HashMap<String, DocumentationRecord>,

    /// Index: pattern accession listed in a record's `{PS...}` lines -> record accession
    by_pattern_ref: HashMap<String, String>,
}

impl DocIndex {
    /// Build the index; on duplicate accessions the first record wins
    pub fn new(records: impl IntoIterator<Item = DocumentationRecord>) -> Self {
        let mut by_accession = HashMap::new();
        let mut by_pattern_ref = HashMap::new();
        for record in records {
            if by_accession.contains_key(&record.accession) {
                warn!(
                    accession = %record.accession,
                    "Duplicate documentation record, keeping the first"
                );
                continue;
            }
            for pattern in &record.pattern_refs {
                by_pattern_ref
                    .entry(pattern.clone())
                    .or_insert_with(|| record.accession.clone());
            }
            by_accession.insert(record.accession.clone(), record);
        }
        Self {
            by_accession,
            by_pattern_ref,
        }
    }

    /// Get a record by its documentation accession
    pub fn get(&self, accession: &str) -> Option<&DocumentationRecord> {
        self.by_accession.get(accession)
    }

    /// Resolve the documentation for a pattern.
    ///
    /// Keys from [`PatternDefinition::doc_keys`] are tried in order, then the
    /// record whose reference lines list the pattern's accession.
    ///
    /// # Errors
    ///
    /// Returns `DocLookupError::NotFound` if no key resolves.
    pub fn resolve(
        &self,
        definition: &PatternDefinition,
    ) -> Result<&DocumentationRecord, DocLookupError> {
        let keys = definition.doc_keys();
        let found = keys.iter().find_map(|key| self.get(key)).or_else(|| {
            self.by_pattern_ref
                .get(&definition.accession)
                .and_then(|accession| self.get(accession))
        });
        found.ok_or_else(|| DocLookupError::NotFound {
            accession: definition.accession.clone(),
            tried: keys,
        })
    }

    pub fn len(&self) -> usize {
        self.by_accession.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_accession.is_empty()
    }
}
