//! Pattern compilation and sequence scanning.
//!
//! - [`compiler`]: Translates catalog pattern strings into [`CompiledMatcher`]s
//! - [`engine`]: [`ScanEngine`] applies the catalog's matchers to a sequence,
//!   flat or grouped by pattern ([`PatternHits`])
//!
//! ## Pattern Grammar
//!
//! | Syntax | Meaning | Translated |
//! |--------|---------|------------|
//! | `A`    | residue | `A` |
//! | `[ST]` | any of the listed residues | `[ST]` |
//! | `{P}`  | any residue except those listed | `[^P]` |
//! | `x`    | any residue | `.` |
//! | `x(2)` | exactly two repeats | `.{2}` |
//! | `x(2,4)` | two to four repeats | `.{2,4}` |
//! | `<` / `>` | N- / C-terminus | `^` / `$` |
//! | `-`    | element separator | removed |
//! | `.`    | pattern terminator | removed |
//!
//! ## Matching
//!
//! Matches are non-overlapping and leftmost-first: after a hit, the search
//! resumes at its end.
//!
//! ## Example
//!
//! ```rust
//! use motif_scan::catalog::store::DomainCatalog;
//! use motif_scan::core::{DocumentationRecord, PatternDefinition, SequenceRecord};
//! use motif_scan::matching::ScanEngine;
//!
//! let definitions = vec![PatternDefinition::new("NGS", "PS90001", "demo", "N-[GA]-S.")];
//! let catalog = DomainCatalog::from_parts(definitions, Vec::<DocumentationRecord>::new());
//!
//! let engine = ScanEngine::new(&catalog);
//! let hits = engine.scan(&SequenceRecord::new("s1", "NGSTK"));
//! assert_eq!((hits[0].start, hits[0].end), (0, 3));
//! ```

pub mod compiler;
pub mod engine;

pub use compiler::{compile, CompileError, CompiledMatcher};
pub use engine::{PatternHits, ScanEngine};
