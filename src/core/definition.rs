use serde::{Deserialize, Serialize};

/// Accession prefix used by pattern records (e.g. `PS00001`)
pub const PATTERN_ACCESSION_PREFIX: &str = "PS";

/// Accession prefix used by documentation records (e.g. `PDOC00001`)
pub const DOC_ACCESSION_PREFIX: &str = "PDOC";

/// A single motif definition from the pattern store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Motif name (e.g. `ASN_GLYCOSYLATION`)
    pub name: String,

    /// Pattern accession (e.g. `PS00001`)
    pub accession: String,

    /// One-line description
    pub description: String,

    /// Pattern in catalog grammar, terminator included (e.g. `N-{P}-[ST]-{P}.`)
    pub raw_pattern: String,

    /// Explicit documentation accession carried by the record, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_reference: Option<String>,
}

impl PatternDefinition {
    pub fn new(
        name: impl Into<String>,
        accession: impl Into<String>,
        description: impl Into<String>,
        raw_pattern: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            accession: accession.into(),
            description: description.into(),
            raw_pattern: raw_pattern.into(),
            doc_reference: None,
        }
    }

    /// Builder-style setter for the explicit documentation reference
    #[must_use]
    pub fn with_doc_reference(mut self, doc_reference: impl Into<String>) -> Self {
        self.doc_reference = Some(doc_reference.into());
        self
    }

    /// Documentation-store keys to try, most specific first.
    ///
    /// The explicit reference comes first, then the accession with its
    /// pattern prefix swapped for the documentation prefix.
    #[must_use]
    pub fn doc_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(2);
        if let Some(reference) = &self.doc_reference {
            keys.push(reference.clone());
        }
        if let Some(derived) = derive_doc_accession(&self.accession) {
            if !keys.contains(&derived) {
                keys.push(derived);
            }
        }
        keys
    }
}

/// Map a pattern accession to its documentation accession by prefix substitution.
///
/// Returns `None` when the accession does not carry the pattern prefix.
///
/// # Examples
///
/// ```
/// use motif_scan::core::definition::derive_doc_accession;
///
/// assert_eq!(derive_doc_accession("PS00001").as_deref(), Some("PDOC00001"));
/// assert_eq!(derive_doc_accession("PDOC00001"), None);
/// ```
#[must_use]
pub fn derive_doc_accession(accession: &str) -> Option<String> {
    if accession.starts_with(DOC_ACCESSION_PREFIX) {
        return None;
    }
    accession
        .strip_prefix(PATTERN_ACCESSION_PREFIX)
        .map(|rest| format!("{DOC_ACCESSION_PREFIX}{rest}"))
}

/// Free-text documentation for one or more patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationRecord {
    /// Documentation accession (e.g. `PDOC00001`)
    pub accession: String,

    /// Pattern accessions this record declares it documents
    #[serde(default)]
    pub pattern_refs: Vec<String>,

    /// Documentation body
    pub text: String,
}

impl DocumentationRecord {
    pub fn new(accession: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            pattern_refs: Vec::new(),
            text: text.into(),
        }
    }
}
