use std::fmt::Write;

use crate::catalog::index::DocLookupError;
use crate::catalog::store::DomainCatalog;
use crate::matching::engine::PatternHits;

/// Marker written in place of documentation that could not be resolved
pub const DOC_NOT_FOUND_MARKER: &str = "documentation not found";

/// A rendered per-sequence report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceReport {
    pub text: String,

    /// Lookups that found no documentation, one per distinct accession
    pub missing_docs: Vec<DocLookupError>,
}

/// Render the plain-text report for one sequence's hits, grouped by pattern.
///
/// ```text
/// 2 domains found.
///
///
/// RGD
/// PS00016
/// Cell attachment sequence.
/// R-G-D.
/// location: 4-7 (midpoint 5.5)
///
/// <documentation text>
/// ```
pub fn render_report(catalog: &DomainCatalog, groups: &[PatternHits<'_>]) -> SequenceReport {
    let mut text = String::new();
    let mut missing_docs: Vec<DocLookupError> = Vec::new();
    let total: usize = groups.iter().map(|g| g.hits.len()).sum();

    // Writing into a String cannot fail
    let _ = write!(text, "{total} domains found.\n\n\n");

    for group in groups {
        let doc = catalog.lookup_doc(group.definition);
        if let Err(err @ DocLookupError::NotFound { .. }) = &doc {
            if !missing_docs.contains(err) {
                missing_docs.push(err.clone());
            }
        }

        for hit in &group.hits {
            let _ = writeln!(text, "{}", hit.pattern_name);
            let _ = writeln!(text, "{}", hit.pattern_accession);
            let _ = writeln!(text, "{}", hit.description);
            let _ = writeln!(text, "{}", hit.raw_pattern);
            let _ = writeln!(
                text,
                "location: {}-{} (midpoint {:.1})",
                hit.start, hit.end, hit.midpoint
            );
            text.push('\n');

            match &doc {
                Ok(record) => {
                    let _ = writeln!(text, "{}", record.text);
                }
                Err(DocLookupError::NotFound { accession, .. }) => {
                    let _ = writeln!(text, "{DOC_NOT_FOUND_MARKER} for {accession}");
                }
            }
            text.push('\n');
        }
    }

    SequenceReport { text, missing_docs }
}
