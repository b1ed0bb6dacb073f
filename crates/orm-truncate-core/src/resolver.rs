//! Short-name to fully-qualified entity resolution

use tracing::debug;

use crate::metadata::TypeResolver;
use crate::names;

/// Resolves entity references against an ordered namespace list
pub struct EntityResolver<'a> {
    namespaces: &'a [String],
    types: &'a dyn TypeResolver,
}

impl<'a> EntityResolver<'a> {
    pub fn new(namespaces: &'a [String], types: &'a dyn TypeResolver) -> Self {
        Self { namespaces, types }
    }

    /// Resolve `reference` to a fully-qualified type name
    ///
    /// A reference naming an existing type is returned as is. Otherwise the
    /// namespaces are tried from last to first and the first existing
    /// `namespace\reference` wins.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        if self.namespaces.is_empty() {
            return None;
        }

        let reference = names::normalize(reference);
        if reference.is_empty() {
            return None;
        }

        if self.types.exists(&reference) {
            return Some(reference);
        }

        let found = self
            .namespaces
            .iter()
            .rev()
            .map(|ns| names::join(ns, &reference))
            .find(|candidate| self.types.exists(candidate));

        match found {
            Some(ref name) => debug!("Resolved {} to {}", reference, name),
            None => debug!("Could not resolve {}", reference),
        }

        found
    }
}
