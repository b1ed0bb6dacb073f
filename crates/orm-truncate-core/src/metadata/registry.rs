//! Static entity registry loaded from a TOML mapping file
//!
//! ```toml
//! [[entity]]
//! class = "App\\Entity\\Product"
//! table = "product"
//!
//! [[entity]]
//! class = "App\\Entity\\ProductInterface"
//! kind = "interface"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{EntityDiscovery, MetadataProvider, TypeResolver};
use crate::error::{Error, Result};
use crate::names;

/// What a registered type is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Mapped to a table
    #[default]
    Entity,
    /// Exists but has no table
    Interface,
    /// Shares mapping with subclasses but has no table of its own
    MappedSuperclass,
}

/// A type declared in the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredType {
    pub class: String,
    pub kind: EntityKind,
    /// Table name, only for entities
    pub table: Option<String>,
}

/// Ordered registry of known types
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    types: Vec<RegisteredType>,
    index: HashMap<String, usize>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity; `table` defaults to the snake_case short name
    pub fn entity(self, class: &str, table: Option<&str>) -> Result<Self> {
        self.register(class, EntityKind::Entity, table)
    }

    /// Register a non-entity type (interface, mapped superclass)
    pub fn non_entity(self, class: &str, kind: EntityKind) -> Result<Self> {
        self.register(class, kind, None)
    }

    fn register(mut self, class: &str, kind: EntityKind, table: Option<&str>) -> Result<Self> {
        let class = names::normalize(class);
        if class.is_empty() {
            return Err(Error::Config("Entity class name must not be empty".to_string()));
        }
        if self.index.contains_key(&class) {
            return Err(Error::Config(format!("Duplicate entity mapping: {}", class)));
        }

        let table = match kind {
            EntityKind::Entity => Some(
                table
                    .map(str::to_string)
                    .unwrap_or_else(|| names::to_snake_case(names::short_name(&class))),
            ),
            _ => {
                if table.is_some() {
                    return Err(Error::Config(format!(
                        "{} is not an entity and cannot declare a table",
                        class
                    )));
                }
                None
            }
        };

        self.index.insert(class.clone(), self.types.len());
        self.types.push(RegisteredType { class, kind, table });
        Ok(self)
    }

    /// Parse a TOML mapping document
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawMapping = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid mapping TOML: {}", e)))?;

        raw.entity.into_iter().try_fold(Self::new(), |registry, entry| {
            registry.register(&entry.class, entry.kind, entry.table.as_deref())
        })
    }

    /// Read and parse a TOML mapping file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read mapping {}: {}", path.display(), e))
        })?;
        let registry = Self::from_toml(&content)?;
        debug!(
            "Loaded {} mapped types from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn get(&self, class: &str) -> Option<&RegisteredType> {
        self.index.get(class).map(|&i| &self.types[i])
    }

    /// All registered types in declaration order
    pub fn types(&self) -> &[RegisteredType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for EntityRegistry {
    fn exists(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn is_entity(&self, name: &str) -> bool {
        self.get(name).is_some_and(|t| t.kind == EntityKind::Entity)
    }
}

impl MetadataProvider for EntityRegistry {
    fn table_name(&self, name: &str) -> Result<String> {
        self.get(name)
            .and_then(|t| t.table.clone())
            .ok_or_else(|| Error::NotAnEntity(name.to_string()))
    }
}

impl EntityDiscovery for EntityRegistry {
    fn list_entities(&self, namespace: &str, recursive: bool) -> Result<Vec<String>> {
        let namespace = names::normalize(namespace);
        Ok(self
            .types
            .iter()
            .filter(|t| names::is_within(&t.class, &namespace, recursive))
            .map(|t| t.class.clone())
            .collect())
    }
}

/// Raw mapping structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMapping {
    #[serde(default)]
    entity: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntity {
    class: String,
    #[serde(default)]
    kind: EntityKind,
    table: Option<String>,
}
