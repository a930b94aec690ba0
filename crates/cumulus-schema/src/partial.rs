//! Lazily-pruned package references.

use std::collections::BTreeMap;

use crate::error::SchemaError;
use crate::schema::{PackageSchema, ResourceSchema, TypeSchema};
use crate::source::SchemaSource;

/// A package reference that records only the members actually used.
///
/// Dereferencing a resource loads it through the source and remembers it;
/// [`snapshot`](PartialPackage::snapshot) then produces a schema holding
/// exactly the remembered resources plus the transitive closure of named
/// types their properties reference. Members the program never touched do
/// not appear, no matter how large the underlying catalog is.
///
/// Dereferencing takes `&mut self`; once the binding pass releases the
/// registry, the recorded set is frozen.
pub struct PartialPackage {
    source: Box<dyn SchemaSource>,
    resources: BTreeMap<String, ResourceSchema>,
}

impl PartialPackage {
    /// Create an empty partial reference over a source.
    pub fn new(source: Box<dyn SchemaSource>) -> Self {
        Self {
            source,
            resources: BTreeMap::new(),
        }
    }

    /// Package name.
    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Package version, if any.
    pub fn version(&self) -> Option<&str> {
        self.source.version()
    }

    /// Dereference a resource, loading and recording it on first use.
    pub fn resource(&mut self, token: &str) -> Result<&ResourceSchema, SchemaError> {
        if !self.resources.contains_key(token) {
            let schema =
                self.source
                    .resource(token)?
                    .ok_or_else(|| SchemaError::MissingMember {
                        package: self.source.name().to_string(),
                        token: token.to_string(),
                    })?;
            self.resources.insert(token.to_string(), schema);
        }
        Ok(&self.resources[token])
    }

    /// Tokens dereferenced so far, token-sorted.
    pub fn used_resources(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Build the pruned schema: recorded resources plus the named types
    /// they transitively reference.
    pub fn snapshot(&self) -> Result<PackageSchema, SchemaError> {
        let mut types: BTreeMap<String, TypeSchema> = BTreeMap::new();
        let mut pending: Vec<String> = Vec::new();

        for resource in self.resources.values() {
            let mut refs = Vec::new();
            for property in resource.inputs.iter().chain(&resource.outputs) {
                property.ty.type_refs(&mut refs);
            }
            pending.extend(refs.into_iter().map(str::to_string));
        }

        while let Some(token) = pending.pop() {
            if types.contains_key(&token) {
                continue;
            }
            let ty = self
                .source
                .named_type(&token)?
                .ok_or_else(|| SchemaError::MissingMember {
                    package: self.source.name().to_string(),
                    token: token.clone(),
                })?;
            let mut refs = Vec::new();
            for property in &ty.properties {
                property.ty.type_refs(&mut refs);
            }
            pending.extend(refs.into_iter().map(str::to_string));
            types.insert(token, ty);
        }

        Ok(PackageSchema {
            name: self.source.name().to_string(),
            version: self.source.version().map(str::to_string),
            resources: self.resources.clone(),
            types,
        })
    }

    /// Load the full, unpruned schema document.
    pub fn definition(&self) -> Result<PackageSchema, SchemaError> {
        self.source.definition()
    }
}

impl std::fmt::Debug for PartialPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialPackage")
            .field("name", &self.source.name())
            .field("version", &self.source.version())
            .field("used", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySource;
    use crate::schema::{Property, SchemaType};

    fn aws_schema() -> PackageSchema {
        PackageSchema::new("aws", Some("6.0.0".to_string()))
            .with_resource(ResourceSchema {
                token: "aws:s3:Bucket".to_string(),
                inputs: vec![Property::new(
                    "versioning",
                    SchemaType::Ref("aws:s3:BucketVersioning".to_string()),
                )],
                outputs: vec![Property::new("arn", SchemaType::String)],
            })
            .with_resource(ResourceSchema {
                token: "aws:sns:Topic".to_string(),
                inputs: vec![],
                outputs: vec![Property::new("arn", SchemaType::String)],
            })
            .with_type(TypeSchema {
                token: "aws:s3:BucketVersioning".to_string(),
                properties: vec![Property::new(
                    "rules",
                    SchemaType::List(Box::new(SchemaType::Ref(
                        "aws:s3:BucketVersioningRule".to_string(),
                    ))),
                )],
            })
            .with_type(TypeSchema {
                token: "aws:s3:BucketVersioningRule".to_string(),
                properties: vec![Property::new("enabled", SchemaType::Bool)],
            })
            .with_type(TypeSchema {
                token: "aws:sns:TopicPolicy".to_string(),
                properties: vec![],
            })
    }

    fn partial() -> PartialPackage {
        PartialPackage::new(Box::new(InMemorySource::new(aws_schema())))
    }

    #[test]
    fn test_resource_records_member() {
        let mut pkg = partial();
        let bucket = pkg.resource("aws:s3:Bucket").unwrap();
        assert_eq!(bucket.token, "aws:s3:Bucket");
        assert_eq!(pkg.used_resources().collect::<Vec<_>>(), ["aws:s3:Bucket"]);
    }

    #[test]
    fn test_missing_member_errors() {
        let mut pkg = partial();
        let err = pkg.resource("aws:s3:Nope").unwrap_err();
        assert!(matches!(err, SchemaError::MissingMember { .. }));
        assert!(err.to_string().contains("aws:s3:Nope"));
    }

    #[test]
    fn test_snapshot_prunes_to_transitive_closure() {
        let mut pkg = partial();
        pkg.resource("aws:s3:Bucket").unwrap();

        let snap = pkg.snapshot().unwrap();
        assert_eq!(snap.name, "aws");
        assert_eq!(
            snap.resources.keys().collect::<Vec<_>>(),
            ["aws:s3:Bucket"]
        );
        // Bucket pulls in BucketVersioning, which pulls in its rule type;
        // the untouched Topic resource and TopicPolicy type stay out.
        assert_eq!(
            snap.types.keys().collect::<Vec<_>>(),
            ["aws:s3:BucketVersioning", "aws:s3:BucketVersioningRule"]
        );
    }

    #[test]
    fn test_empty_snapshot_is_empty() {
        let pkg = partial();
        let snap = pkg.snapshot().unwrap();
        assert!(snap.resources.is_empty());
        assert!(snap.types.is_empty());
    }

    #[test]
    fn test_definition_is_full() {
        let pkg = partial();
        let def = pkg.definition().unwrap();
        assert_eq!(def.resources.len(), 2);
        assert_eq!(def.types.len(), 3);
    }
}
