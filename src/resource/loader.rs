//! Text loading on top of a resource store.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use super::{ReadError, ResourceStore};
use crate::diagnostics::{self, DiagnosticsSink};

/// Suffix of every documentation page.
pub const RESOURCE_EXTENSION: &str = ".html";

/// Build the logical path of the page for `key` under `base`.
///
/// Returns `None` if either part is empty.
pub fn resource_path(base: &str, key: &str) -> Option<String> {
    if base.is_empty() || key.is_empty() {
        return None;
    }
    Some(format!("{}/{}{}", base, key, RESOURCE_EXTENSION))
}

/// Loads and decodes documentation pages.
///
/// Lookups are best effort: [`load`](Self::load) never fails, it reports
/// read problems to the diagnostics sink and returns `None`.
#[derive(Clone)]
pub struct TextLoader {
    store: Arc<dyn ResourceStore>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl TextLoader {
    pub fn new(store: Arc<dyn ResourceStore>, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self { store, diagnostics }
    }

    /// Loader over `store` that reports through `tracing`.
    pub fn with_store(store: Arc<dyn ResourceStore>) -> Self {
        Self::new(store, diagnostics::default_sink())
    }

    pub fn store(&self) -> &dyn ResourceStore {
        self.store.as_ref()
    }

    /// Load the page `<base>/<key>.html`.
    ///
    /// Returns `None` when either argument is empty, when the page does not
    /// exist, or when it exists but cannot be read as UTF-8.
    pub fn load(&self, base: &str, key: &str) -> Option<String> {
        match self.try_load(base, key) {
            Ok(text) => text,
            Err(e) => {
                self.diagnostics
                    .debug("resource", format!("Failed to read documentation: {}", e));
                None
            }
        }
    }

    /// Like [`load`](Self::load) but surfaces read failures.
    ///
    /// `Ok(None)` means nothing exists at the path; an error is only returned
    /// for a resource that exists.
    pub fn try_load(&self, base: &str, key: &str) -> Result<Option<String>, ReadError> {
        let Some(path) = resource_path(base, key) else {
            return Ok(None);
        };

        let io_error = |source| ReadError::Io {
            path: PathBuf::from(&path),
            source,
        };

        let Some(mut reader) = self.store.open(&path).map_err(io_error)? else {
            return Ok(None);
        };

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(io_error)?;

        String::from_utf8(bytes).map(Some).map_err(|source| ReadError::Decode {
            path: PathBuf::from(&path),
            source,
        })
    }
}

impl std::fmt::Debug for TextLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLoader").finish_non_exhaustive()
    }
}
