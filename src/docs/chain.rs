//! Ordered lookup across documentation sources.

use std::collections::HashSet;
use std::sync::Arc;

use super::{BuiltinCommandPolicy, BundledDocSource, DocumentationSource, ExternalCommandPolicy};
use crate::construct::Construct;
use crate::resource::{TextLoader, EXTERNAL_PREFIX, INTERNAL_PREFIX};

/// Queries sources in priority order; the first one with text wins.
#[derive(Clone, Default)]
pub struct DocumentationChain {
    sources: Vec<Arc<dyn DocumentationSource>>,
}

impl DocumentationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builtin pages first, then external command pages.
    pub fn standard(loader: TextLoader) -> Self {
        Self::new()
            .with_source(BundledDocSource::new(
                "builtin",
                INTERNAL_PREFIX,
                BuiltinCommandPolicy,
                loader.clone(),
            ))
            .with_source(BundledDocSource::new(
                "external",
                EXTERNAL_PREFIX,
                ExternalCommandPolicy,
                loader,
            ))
    }

    /// Append a source with the lowest priority so far.
    pub fn with_source(mut self, source: impl DocumentationSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Append an already shared source.
    pub fn push(&mut self, source: Arc<dyn DocumentationSource>) {
        self.sources.push(source);
    }

    pub fn sources(&self) -> &[Arc<dyn DocumentationSource>] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Documentation from the first source that has some.
    pub fn resolve(&self, element: &Construct, original: Option<&Construct>) -> Option<String> {
        self.resolve_with_source(element, original).map(|(_, text)| text)
    }

    /// Like [`resolve`](Self::resolve), also naming the source that answered.
    pub fn resolve_with_source(
        &self,
        element: &Construct,
        original: Option<&Construct>,
    ) -> Option<(&str, String)> {
        self.sources.iter().find_map(|source| {
            source
                .documentation(element, original)
                .map(|text| (source.name(), text))
        })
    }

    /// Names shared by more than one source, in first-seen order.
    ///
    /// The chain does not reject duplicates; callers that care can check here.
    pub fn duplicate_source_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for source in &self.sources {
            let name = source.name();
            if !seen.insert(name) && !duplicates.iter().any(|d: &String| d == name) {
                duplicates.push(name.to_string());
            }
        }
        duplicates
    }
}

impl DocumentationSource for DocumentationChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn documentation(&self, element: &Construct, original: Option<&Construct>) -> Option<String> {
        self.resolve(element, original)
    }
}

impl std::fmt::Debug for DocumentationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|s| s.name()))
            .finish()
    }
}
