//! ORM metadata collaborators
//!
//! The executor never inspects types or mappings itself. It asks three
//! narrow collaborators:
//!
//! - `TypeResolver` answers whether a fully-qualified type name exists
//! - `MetadataProvider` maps an entity to its physical table
//! - `EntityDiscovery` lists the types living in a namespace
//!
//! `EntityRegistry` implements all three from a static mapping file.

mod registry;

pub use registry::{EntityKind, EntityRegistry, RegisteredType};

use crate::error::Result;

/// Existence checks for type names
pub trait TypeResolver {
    /// Whether `name` is a known, loadable type (entity or not)
    fn exists(&self, name: &str) -> bool;

    /// Whether `name` is a mapped entity
    fn is_entity(&self, name: &str) -> bool;
}

/// Entity to table mapping
pub trait MetadataProvider {
    /// Physical table for a fully-qualified entity name
    ///
    /// Fails with `Error::NotAnEntity` when `name` is not a mapped entity.
    fn table_name(&self, name: &str) -> Result<String>;
}

/// Namespace scanning
pub trait EntityDiscovery {
    /// Fully-qualified names of the types inside `namespace`
    ///
    /// With `recursive` the scan includes nested namespaces.
    fn list_entities(&self, namespace: &str, recursive: bool) -> Result<Vec<String>>;
}
