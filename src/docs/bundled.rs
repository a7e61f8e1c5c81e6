//! Documentation source backed by bundled per-construct pages.

use super::{DocPolicy, DocumentationSource};
use crate::construct::Construct;
use crate::resource::TextLoader;

/// Resolves documentation from `<prefix>/<key>.html` in a resource store.
///
/// The [`DocPolicy`] decides applicability and the key; the source itself only
/// wires the two steps to the loader.
pub struct BundledDocSource {
    name: String,
    prefix: String,
    policy: Box<dyn DocPolicy>,
    loader: TextLoader,
}

impl BundledDocSource {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        policy: impl DocPolicy + 'static,
        loader: TextLoader,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            policy: Box::new(policy),
            loader,
        }
    }

    /// Keys of all pages available under this source's prefix.
    pub fn available_keys(&self) -> Vec<String> {
        self.loader.store().keys(&self.prefix)
    }
}

impl DocumentationSource for BundledDocSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn documentation(&self, element: &Construct, original: Option<&Construct>) -> Option<String> {
        if !self.policy.is_applicable(element, original) {
            return None;
        }

        let key = self.policy.resource_key(element).filter(|k| !k.is_empty())?;
        self.loader.load(&self.prefix, &key)
    }
}

impl std::fmt::Debug for BundledDocSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundledDocSource")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
