//! Shelldoc - documentation lookup and inspection registry for shell tooling.
//!
//! Given a construct found while editing a shell script (a builtin such as
//! `echo`, an external command such as `grep`), shelldoc produces its
//! documentation from a bundled documentation pack. It never goes to the
//! network and never fails the caller: a missing or broken page simply means
//! "no documentation".
//!
//! # Architecture
//!
//! - `resource`: resource stores and the text loader (`<prefix>/<key>.html`)
//! - `docs`: documentation sources, their policies and the source chain
//! - `construct`: the construct occurrences sources are asked about
//! - `inspections`: the fixed registry of inspection identities
//! - `diagnostics`: the sink that receives best-effort failures
//! - `config`: YAML configuration
//! - `report`: output formatting (pretty, JSON)
//!
//! # Adding a Documentation Source
//!
//! Implement `DocPolicy` and wrap it in a `BundledDocSource`, or implement
//! `DocumentationSource` directly, then add it to a `DocumentationChain`.

pub mod cli;
pub mod config;
pub mod construct;
pub mod diagnostics;
pub mod docs;
pub mod inspections;
pub mod report;
pub mod resource;

pub use config::Config;
pub use construct::{Construct, ConstructKind, Span};
pub use diagnostics::{DiagnosticsSink, RecordingSink, TracingSink};
pub use docs::{BundledDocSource, DocPolicy, DocumentationChain, DocumentationSource, FnPolicy};
pub use inspections::{enabled_inspections, Inspection, InspectionContext, InspectionProvider};
pub use resource::{DirectoryStore, EmbeddedStore, ReadError, ResourceStore, TextLoader};

use std::sync::Arc;

/// The standard chain over the built-in documentation pack.
///
/// Diagnostics go to `tracing`.
pub fn builtin_chain() -> DocumentationChain {
    let loader = TextLoader::new(Arc::new(EmbeddedStore::builtin()), diagnostics::default_sink());
    DocumentationChain::standard(loader)
}
