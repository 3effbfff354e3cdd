use tracing::trace;

use crate::catalog::store::DomainCatalog;
use crate::core::definition::PatternDefinition;
use crate::core::hit::DomainHit;
use crate::core::sequence::SequenceRecord;
use crate::matching::compiler::CompiledMatcher;

/// Hits of one catalog pattern in one sequence
#[derive(Debug, Clone, PartialEq)]
pub struct PatternHits<'a> {
    pub definition: &'a PatternDefinition,
    pub hits: Vec<DomainHit>,
}

/// Applies every usable catalog pattern to a sequence
pub struct ScanEngine<'a> {
    catalog: &'a DomainCatalog,
}

impl<'a> ScanEngine<'a> {
    pub fn new(catalog: &'a DomainCatalog) -> Self {
        Self { catalog }
    }

    /// Find all hits in a sequence.
    ///
    /// Hits are ordered by catalog position of their pattern, then left to
    /// right. Patterns that failed to compile are skipped. Offsets count
    /// residues; a sequence that is empty or holds anything other than ASCII
    /// letters yields no hits.
    pub fn scan(&self, sequence: &SequenceRecord) -> Vec<DomainHit> {
        self.scan_by_pattern(sequence)
            .into_iter()
            .flat_map(|group| group.hits)
            .collect()
    }

    /// Find all hits in a sequence, grouped by the pattern that produced them.
    ///
    /// Groups follow catalog order and patterns without hits are omitted.
    pub fn scan_by_pattern(&self, sequence: &SequenceRecord) -> Vec<PatternHits<'a>> {
        if sequence.is_empty() || sequence.first_invalid_residue().is_some() {
            return Vec::new();
        }

        self.catalog
            .usable_entries()
            .filter_map(|(definition, matcher)| {
                let hits = scan_pattern(definition, matcher, sequence);
                (!hits.is_empty()).then_some(PatternHits { definition, hits })
            })
            .collect()
    }
}

/// Find all hits of a single pattern in a sequence
pub fn scan_pattern(
    definition: &PatternDefinition,
    matcher: &CompiledMatcher,
    sequence: &SequenceRecord,
) -> Vec<DomainHit> {
    let hits: Vec<DomainHit> = matcher
        .find_spans(&sequence.residues)
        .map(|(start, end)| DomainHit::new(sequence.id.as_str(), definition, start, end))
        .collect();

    if !hits.is_empty() {
        trace!(
            sequence = %sequence.id,
            pattern = %definition.accession,
            hits = hits.len(),
            "Pattern matched"
        );
    }
    hits
}
