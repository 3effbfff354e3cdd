//! Motif catalog storage and documentation cross-referencing.
//!
//! The catalog holds the pattern definitions of a PROSITE release, each compiled
//! once at load, together with the documentation records that describe them.
//! It is loaded once per run and then only read.
//!
//! ## Stores
//!
//! - **Pattern store** (`prosite.dat`): ordered motif definitions. The store
//!   order is kept, since it fixes the order of rows in the output table.
//! - **Documentation store** (`prosite.doc`): free text keyed by `PDOC` accession.
//!
//! Failing to read either store aborts the load. A pattern that fails to compile
//! stays in the catalog without a matcher and is skipped by scans.
//!
//! ## Example
//!
//! ```rust,no_run
//! use motif_scan::catalog::store::DomainCatalog;
//! use std::path::Path;
//!
//! let catalog = DomainCatalog::load(
//!     Path::new("prosite_files/prosite.dat"),
//!     Path::new("prosite_files/prosite.doc"),
//! )
//! .unwrap();
//!
//! for entry in catalog.entries() {
//!     match catalog.lookup_doc(&entry.definition) {
//!         Ok(doc) => println!("{}: {}", entry.definition.name, doc.accession),
//!         Err(e) => println!("{}: {e}", entry.definition.name),
//!     }
//! }
//! ```

pub mod index;
pub mod store;

pub use index::DocLookupError;
pub use store::{CatalogEntry, CatalogError, DomainCatalog};
