//! In-memory schema sources and loaders.
//!
//! Used wherever schema documents are already materialized: preloaded
//! files, embedded catalogs, and test fixtures.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::SchemaError;
use crate::partial::PartialPackage;
use crate::registry::{reference_key, PackageReference};
use crate::schema::{PackageSchema, ResourceSchema, TypeSchema};
use crate::source::{SchemaLoader, SchemaSource};

/// A [`SchemaSource`] over one materialized schema document.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    schema: PackageSchema,
}

impl InMemorySource {
    pub fn new(schema: PackageSchema) -> Self {
        Self { schema }
    }
}

impl SchemaSource for InMemorySource {
    fn name(&self) -> &str {
        &self.schema.name
    }

    fn version(&self) -> Option<&str> {
        self.schema.version.as_deref()
    }

    fn resource(&self, token: &str) -> Result<Option<ResourceSchema>, SchemaError> {
        Ok(self.schema.resources.get(token).cloned())
    }

    fn named_type(&self, token: &str) -> Result<Option<TypeSchema>, SchemaError> {
        Ok(self.schema.types.get(token).cloned())
    }

    fn definition(&self) -> Result<PackageSchema, SchemaError> {
        Ok(self.schema.clone())
    }
}

/// A [`SchemaLoader`] over a fixed set of schema documents.
///
/// Packages registered with [`with_partial_package`](Self::with_partial_package)
/// are served as partial references and prune to used members; the rest
/// are served full.
#[derive(Debug, Default)]
pub struct InMemoryLoader {
    packages: BTreeMap<String, PackageSchema>,
    partial: BTreeSet<String>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package served as a full reference.
    pub fn with_package(mut self, schema: PackageSchema) -> Self {
        let key = reference_key(&schema.name, schema.version.as_deref());
        self.packages.insert(key, schema);
        self
    }

    /// Register a package served as a partial (pruning) reference.
    pub fn with_partial_package(mut self, schema: PackageSchema) -> Self {
        let key = reference_key(&schema.name, schema.version.as_deref());
        self.partial.insert(key.clone());
        self.packages.insert(key, schema);
        self
    }
}

impl SchemaLoader for InMemoryLoader {
    fn load(&self, name: &str, version: Option<&str>) -> Result<PackageReference, SchemaError> {
        let key = reference_key(name, version);
        let schema = self
            .packages
            .get(&key)
            .ok_or_else(|| SchemaError::UnknownPackage {
                name: key.clone(),
            })?;
        let source = Box::new(InMemorySource::new(schema.clone()));
        if self.partial.contains(&key) {
            Ok(PackageReference::Partial(PartialPackage::new(source)))
        } else {
            Ok(PackageReference::Full(source))
        }
    }
}
