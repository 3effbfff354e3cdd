//! Core data types for motif annotation.
//!
//! - [`PatternDefinition`]: One catalog motif (name, accession, description, pattern)
//! - [`DocumentationRecord`]: Free-text documentation keyed by a `PDOC` accession
//! - [`SequenceRecord`]: An input protein sequence
//! - [`DomainHit`], [`AnnotationTable`]: Located motif occurrences and their ordered table
//! - [`AnnotationIssue`]: Recoverable problems recorded during a run
//!
//! ## Accessions
//!
//! Pattern and documentation records use related but distinct prefixes:
//!
//! | Store | Example |
//! |-------|---------|
//! | Pattern (`prosite.dat`) | PS00001 |
//! | Documentation (`prosite.doc`) | PDOC00001 |

pub mod definition;
pub mod hit;
pub mod sequence;
pub mod types;

pub use definition::{DocumentationRecord, PatternDefinition};
pub use hit::{AnnotationTable, DomainHit};
pub use sequence::SequenceRecord;
pub use types::{AnnotationIssue, IssueKind};
