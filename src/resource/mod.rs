//! Bundled resource access.
//!
//! Documentation pages live in a resource space laid out as
//! `<prefix>/<key>.html`. This module provides:
//! - [`ResourceStore`] implementations that answer "does this path exist, and
//!   if so give me a reader" ([`DirectoryStore`], [`EmbeddedStore`])
//! - [`TextLoader`], which builds the full path, reads and decodes the page,
//!   and degrades every failure to "no text"

mod bundle;
mod loader;
mod store;

pub use bundle::{BUILTIN_PACK, EXTERNAL_PREFIX, INTERNAL_PREFIX};
pub use loader::{resource_path, TextLoader, RESOURCE_EXTENSION};
pub use store::{normalize_path, DirectoryStore, EmbeddedStore, ResourceStore};

use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Failure reading a resource that is known to exist.
///
/// A missing resource is not an error; see [`TextLoader::try_load`].
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: FromUtf8Error,
    },
}

impl ReadError {
    /// Logical path of the resource that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ReadError::Io { path, .. } | ReadError::Decode { path, .. } => path,
        }
    }
}
