use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::index::{DocIndex, DocLookupError};
use crate::core::definition::{DocumentationRecord, PatternDefinition};
use crate::core::types::{AnnotationIssue, IssueKind};
use crate::matching::compiler::{compile, CompileError, CompiledMatcher};
use crate::parsing::{prodoc, prosite, read_text, ParseError};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {store} store {}: {source}", .path.display())]
    ReadError {
        store: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {store} store: {source}")]
    ParseError {
        store: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("Failed to serialize catalog: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Catalog export format version
pub const CATALOG_VERSION: &str = "1.0.0";

/// A pattern definition together with the result of compiling it
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub definition: PatternDefinition,
    compiled: Result<CompiledMatcher, CompileError>,
}

impl CatalogEntry {
    /// Compile a definition; failures are kept on the entry
    pub fn new(definition: PatternDefinition) -> Self {
        let compiled = compile(&definition.raw_pattern);
        Self {
            definition,
            compiled,
        }
    }

    /// The matcher, if the pattern compiled
    pub fn matcher(&self) -> Option<&CompiledMatcher> {
        self.compiled.as_ref().ok()
    }

    /// The compile failure, if any
    pub fn compile_error(&self) -> Option<&CompileError> {
        self.compiled.as_ref().err()
    }
}

/// Serializable view of one entry, used for export
#[derive(Debug, Serialize)]
struct ExportedEntry<'a> {
    #[serde(flatten)]
    definition: &'a PatternDefinition,
    expression: Option<&'a str>,
    compile_error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CatalogExport<'a> {
    version: &'static str,
    created_at: String,
    documentation_records: usize,
    patterns: Vec<ExportedEntry<'a>>,
}

/// The loaded motif catalog: ordered, compiled pattern definitions plus documentation.
///
/// Immutable after construction; share it by reference across scans.
#[derive(Debug, Default)]
pub struct DomainCatalog {
    /// Entries in store order
    entries: Vec<CatalogEntry>,

    /// Documentation records by accession
    docs: DocIndex,

    /// Index: pattern name or accession -> index in entries vec
    key_to_index: HashMap<String, usize>,
}

impl DomainCatalog {
    /// Load the catalog from a pattern store and a documentation store.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if either store cannot be read or parsed. A pattern
    /// that fails to compile is not an error; see [`DomainCatalog::compile_issues`].
    pub fn load(pattern_store: &Path, doc_store: &Path) -> Result<Self, CatalogError> {
        let pattern_text = read_text(pattern_store).map_err(|source| CatalogError::ReadError {
            store: "pattern",
            path: pattern_store.to_path_buf(),
            source,
        })?;
        let doc_text = read_text(doc_store).map_err(|source| CatalogError::ReadError {
            store: "documentation",
            path: doc_store.to_path_buf(),
            source,
        })?;

        Self::from_texts(&pattern_text, &doc_text)
    }

    /// Build the catalog from in-memory store contents
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if either text is malformed.
    pub fn from_texts(pattern_text: &str, doc_text: &str) -> Result<Self, CatalogError> {
        let definitions = prosite::parse_pattern_text(pattern_text).map_err(|source| {
            CatalogError::ParseError {
                store: "pattern",
                source,
            }
        })?;
        let docs = prodoc::parse_doc_text(doc_text).map_err(|source| CatalogError::ParseError {
            store: "documentation",
            source,
        })?;

        Ok(Self::from_parts(definitions, docs))
    }

    /// Build the catalog from parsed records, compiling every definition
    pub fn from_parts(
        definitions: impl IntoIterator<Item = PatternDefinition>,
        docs: impl IntoIterator<Item = DocumentationRecord>,
    ) -> Self {
        let mut catalog = Self {
            docs: DocIndex::new(docs),
            ..Self::default()
        };
        for definition in definitions {
            catalog.add_definition(definition);
        }

        info!(
            patterns = catalog.len(),
            usable = catalog.usable_count(),
            documentation = catalog.docs.len(),
            "Loaded motif catalog"
        );
        catalog
    }

    fn add_definition(&mut self, definition: PatternDefinition) {
        let index = self.entries.len();
        let entry = CatalogEntry::new(definition);

        if let Some(err) = entry.compile_error() {
            warn!(
                accession = %entry.definition.accession,
                name = %entry.definition.name,
                "Pattern skipped: {err}"
            );
        }

        // First entry wins for lookups by name or accession
        for key in [&entry.definition.name, &entry.definition.accession] {
            self.key_to_index.entry(key.clone()).or_insert(index);
        }

        self.entries.push(entry);
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries with a usable matcher, in catalog order
    pub fn usable_entries(&self) -> impl Iterator<Item = (&PatternDefinition, &CompiledMatcher)> {
        self.entries
            .iter()
            .filter_map(|e| e.matcher().map(|m| (&e.definition, m)))
    }

    /// Get an entry by pattern name or accession
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.key_to_index.get(key).map(|&idx| &self.entries[idx])
    }

    /// Resolve the documentation record for a pattern
    ///
    /// # Errors
    ///
    /// Returns `DocLookupError::NotFound` if no documentation resolves.
    pub fn lookup_doc(
        &self,
        definition: &PatternDefinition,
    ) -> Result<&DocumentationRecord, DocLookupError> {
        self.docs.resolve(definition)
    }

    /// Recoverable compile failures, in catalog order
    pub fn compile_issues(&self) -> Vec<AnnotationIssue> {
        self.entries
            .iter()
            .filter_map(|e| {
                e.compile_error().map(|err| {
                    AnnotationIssue::new(
                        e.definition.accession.clone(),
                        IssueKind::PatternCompile,
                        err.to_string(),
                    )
                })
            })
            .collect()
    }

    /// Number of entries with a usable matcher
    pub fn usable_count(&self) -> usize {
        self.entries.iter().filter(|e| e.matcher().is_some()).count()
    }

    /// Number of documentation records
    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Number of entries in catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the catalog, including translated expressions, to JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SerializeError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogExport {
            version: CATALOG_VERSION,
            created_at: chrono::Utc::now().to_rfc3339(),
            documentation_records: self.docs.len(),
            patterns: self
                .entries
                .iter()
                .map(|e| ExportedEntry {
                    definition: &e.definition,
                    expression: e.matcher().map(CompiledMatcher::expression),
                    compile_error: e.compile_error().map(ToString::to_string),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}
