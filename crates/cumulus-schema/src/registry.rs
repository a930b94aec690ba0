//! Package reference registry.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::partial::PartialPackage;
use crate::schema::{PackageSchema, ResourceSchema};
use crate::source::{SchemaLoader, SchemaSource};

/// Registry key for a package identifier: `name` or `name@version`.
pub fn reference_key(name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{name}@{version}"),
        None => name.to_string(),
    }
}

/// A resolved reference to a package: the full catalog, or a partial
/// reference that prunes to what was actually used.
pub enum PackageReference {
    Full(Box<dyn SchemaSource>),
    Partial(PartialPackage),
}

impl PackageReference {
    /// Package name.
    pub fn name(&self) -> &str {
        match self {
            PackageReference::Full(source) => source.name(),
            PackageReference::Partial(partial) => partial.name(),
        }
    }

    /// Package version, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            PackageReference::Full(source) => source.version(),
            PackageReference::Partial(partial) => partial.version(),
        }
    }

    /// Registry key for this reference.
    pub fn key(&self) -> String {
        reference_key(self.name(), self.version())
    }

    /// Whether this reference prunes to used members.
    pub fn is_partial(&self) -> bool {
        matches!(self, PackageReference::Partial(_))
    }

    /// The full schema document, whichever kind of reference this is.
    pub fn definition(&self) -> Result<PackageSchema, SchemaError> {
        match self {
            PackageReference::Full(source) => source.definition(),
            PackageReference::Partial(partial) => partial.definition(),
        }
    }

    /// The schema to hand downstream: pruned for partial references, the
    /// full definition otherwise.
    pub fn snapshot(&self) -> Result<PackageSchema, SchemaError> {
        match self {
            PackageReference::Full(source) => source.definition(),
            PackageReference::Partial(partial) => partial.snapshot(),
        }
    }
}

impl std::fmt::Debug for PackageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageReference::Full(source) => f
                .debug_tuple("Full")
                .field(&reference_key(source.name(), source.version()))
                .finish(),
            PackageReference::Partial(partial) => {
                f.debug_tuple("Partial").field(partial).finish()
            }
        }
    }
}

/// Reference key → resolved package reference, built incrementally as a
/// program binds.
///
/// Backed by a `BTreeMap` so every externally observable iteration is in
/// ascending lexicographic key order, independent of discovery order.
pub struct PackageRegistry {
    loader: Arc<dyn SchemaLoader>,
    references: BTreeMap<String, PackageReference>,
}

impl PackageRegistry {
    /// Create an empty registry over a loader.
    pub fn new(loader: Arc<dyn SchemaLoader>) -> Self {
        Self {
            loader,
            references: BTreeMap::new(),
        }
    }

    /// The loader this registry resolves through.
    pub fn loader(&self) -> Arc<dyn SchemaLoader> {
        Arc::clone(&self.loader)
    }

    /// Resolve a package identifier, loading it at most once per key.
    pub fn resolve(
        &mut self,
        name: &str,
        version: Option<&str>,
    ) -> Result<&PackageReference, SchemaError> {
        Ok(self.resolve_mut(name, version)?)
    }

    /// Dereference a resource member through its package, recording the
    /// member on partial references.
    pub fn resource_schema(
        &mut self,
        name: &str,
        version: Option<&str>,
        token: &str,
    ) -> Result<ResourceSchema, SchemaError> {
        let reference = self.resolve_mut(name, version)?;
        match reference {
            PackageReference::Full(source) => {
                source
                    .resource(token)?
                    .ok_or_else(|| SchemaError::MissingMember {
                        package: name.to_string(),
                        token: token.to_string(),
                    })
            }
            PackageReference::Partial(partial) => Ok(partial.resource(token)?.clone()),
        }
    }

    /// All references, in ascending key order.
    pub fn references(&self) -> impl Iterator<Item = &PackageReference> {
        self.references.values()
    }

    /// Number of distinct references resolved so far.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether no package has been referenced yet.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    fn resolve_mut(
        &mut self,
        name: &str,
        version: Option<&str>,
    ) -> Result<&mut PackageReference, SchemaError> {
        match self.references.entry(reference_key(name, version)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let reference = self.loader.load(name, version)?;
                Ok(entry.insert(reference))
            }
        }
    }
}

impl std::fmt::Debug for PackageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageRegistry")
            .field("references", &self.references)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLoader;
    use crate::schema::{Property, SchemaType, TypeSchema};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn schema(name: &str, version: Option<&str>) -> PackageSchema {
        PackageSchema::new(name, version.map(str::to_string)).with_resource(ResourceSchema {
            token: format!("{name}:core:Thing"),
            inputs: vec![],
            outputs: vec![Property::new("id", SchemaType::String)],
        })
    }

    /// Loader that counts how many times it is asked for each package.
    struct CountingLoader {
        inner: InMemoryLoader,
        loads: AtomicUsize,
    }

    impl SchemaLoader for CountingLoader {
        fn load(
            &self,
            name: &str,
            version: Option<&str>,
        ) -> Result<PackageReference, SchemaError> {
            self.loads.fetch_add(1, Ordering::Relaxed);
            self.inner.load(name, version)
        }
    }

    #[test]
    fn test_resolve_loads_once_per_key() {
        let loader = Arc::new(CountingLoader {
            inner: InMemoryLoader::new()
                .with_package(schema("aws", None))
                .with_package(schema("gcp", None)),
            loads: AtomicUsize::new(0),
        });
        let mut registry = PackageRegistry::new(loader.clone());

        registry.resolve("aws", None).unwrap();
        registry.resolve("aws", None).unwrap();
        registry.resolve("gcp", None).unwrap();

        assert_eq!(loader.loads.load(Ordering::Relaxed), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_references_are_key_sorted() {
        let loader = Arc::new(
            InMemoryLoader::new()
                .with_package(schema("zeta", None))
                .with_package(schema("alpha", None))
                .with_package(schema("mid", Some("1.0"))),
        );
        let mut registry = PackageRegistry::new(loader);

        // Discover out of order.
        registry.resolve("zeta", None).unwrap();
        registry.resolve("mid", Some("1.0")).unwrap();
        registry.resolve("alpha", None).unwrap();

        let keys: Vec<_> = registry.references().map(PackageReference::key).collect();
        assert_eq!(keys, ["alpha", "mid@1.0", "zeta"]);
    }

    #[test]
    fn test_unknown_package_errors() {
        let loader = Arc::new(InMemoryLoader::new());
        let mut registry = PackageRegistry::new(loader);
        let err = registry.resolve("aws", None).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownPackage { .. }));
    }

    #[test]
    fn test_resource_schema_records_on_partial() {
        let loader = Arc::new(InMemoryLoader::new().with_partial_package(
            schema("aws", None).with_type(TypeSchema {
                token: "aws:core:Unused".to_string(),
                properties: vec![],
            }),
        ));
        let mut registry = PackageRegistry::new(loader);

        let resource = registry
            .resource_schema("aws", None, "aws:core:Thing")
            .unwrap();
        assert_eq!(resource.token, "aws:core:Thing");

        let reference = registry.resolve("aws", None).unwrap();
        assert!(reference.is_partial());
        let snap = reference.snapshot().unwrap();
        assert_eq!(snap.resources.keys().collect::<Vec<_>>(), ["aws:core:Thing"]);
        assert!(snap.types.is_empty());
    }

    #[test]
    fn test_full_reference_snapshot_is_definition() {
        let loader = Arc::new(InMemoryLoader::new().with_package(schema("aws", None)));
        let mut registry = PackageRegistry::new(loader);
        registry
            .resource_schema("aws", None, "aws:core:Thing")
            .unwrap();

        let reference = registry.resolve("aws", None).unwrap();
        assert!(!reference.is_partial());
        assert_eq!(reference.snapshot().unwrap(), reference.definition().unwrap());
    }
}
