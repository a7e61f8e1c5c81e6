//! Documentation sources and the chain that queries them.
//!
//! A [`DocumentationSource`] may produce documentation text for a construct
//! occurrence or decline. Sources never fail outward: "no documentation" is
//! the answer to every internal problem.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐     ┌───────────────────┐     ┌────────────┐
//! │ DocumentationChain │────▶│ BundledDocSource  │────▶│ TextLoader │
//! │ (priority order)   │     │ (DocPolicy: check │     │ <prefix>/  │
//! └────────────────────┘     │  + key derivation)│     │ <key>.html │
//!                            └───────────────────┘     └────────────┘
//! ```
//!
//! # Adding a New Source
//!
//! Either implement [`DocPolicy`] and wrap it in a [`BundledDocSource`], or
//! implement [`DocumentationSource`] directly, then add it to the chain.

mod bundled;
mod chain;
mod commands;

pub use bundled::BundledDocSource;
pub use chain::DocumentationChain;
pub use commands::{is_builtin_command, is_valid_key, BuiltinCommandPolicy, ExternalCommandPolicy};

use crate::construct::Construct;

/// Something that may produce documentation for a construct.
pub trait DocumentationSource: Send + Sync {
    /// Name used in reports and for collision checks.
    fn name(&self) -> &str;

    /// Documentation for `element`, or `None` if this source has none.
    ///
    /// `original` is the occurrence as written before any resolution (for
    /// example the alias that expanded to `element`), when there is one.
    fn documentation(&self, element: &Construct, original: Option<&Construct>) -> Option<String>;
}

/// Decides which constructs a bundled source covers and where their pages live.
pub trait DocPolicy: Send + Sync {
    /// Whether the source should answer for this occurrence at all.
    fn is_applicable(&self, element: &Construct, original: Option<&Construct>) -> bool;

    /// Resource key (file stem) of the page for `element`.
    fn resource_key(&self, element: &Construct) -> Option<String>;
}

/// A [`DocPolicy`] built from two closures.
pub struct FnPolicy<A, K> {
    applicable: A,
    key: K,
}

impl<A, K> FnPolicy<A, K>
where
    A: Fn(&Construct, Option<&Construct>) -> bool + Send + Sync,
    K: Fn(&Construct) -> Option<String> + Send + Sync,
{
    pub fn new(applicable: A, key: K) -> Self {
        Self { applicable, key }
    }
}

impl<A, K> DocPolicy for FnPolicy<A, K>
where
    A: Fn(&Construct, Option<&Construct>) -> bool + Send + Sync,
    K: Fn(&Construct) -> Option<String> + Send + Sync,
{
    fn is_applicable(&self, element: &Construct, original: Option<&Construct>) -> bool {
        (self.applicable)(element, original)
    }

    fn resource_key(&self, element: &Construct) -> Option<String> {
        (self.key)(element)
    }
}
