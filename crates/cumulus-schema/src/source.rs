//! Collaborator traits for schema loading.
//!
//! This crate orchestrates *when* schemas are loaded and how results are
//! merged and pruned; the actual transport lives behind these traits.
//! Implementations are assumed idempotent. They are not required to be
//! thread-safe for concurrent calls against the same package; the binding
//! pass is single-threaded and this crate adds no locking.

use crate::error::SchemaError;
use crate::registry::PackageReference;
use crate::schema::{PackageSchema, ResourceSchema, TypeSchema};

/// Per-member access to one package's schema.
///
/// `resource` and `named_type` distinguish "member absent" (`Ok(None)`)
/// from loader failure (`Err`): an absent member is a binding error in the
/// program, a failed load is the loader's fault.
pub trait SchemaSource {
    /// Package name.
    fn name(&self) -> &str;

    /// Package version, if any.
    fn version(&self) -> Option<&str>;

    /// Look up one resource by token.
    fn resource(&self, token: &str) -> Result<Option<ResourceSchema>, SchemaError>;

    /// Look up one named type by token.
    fn named_type(&self, token: &str) -> Result<Option<TypeSchema>, SchemaError>;

    /// Load the full schema document.
    fn definition(&self) -> Result<PackageSchema, SchemaError>;
}

/// Resolves package identifiers to references.
///
/// The loader decides whether a package is served full or partial; the
/// registry caches whatever it returns, one load per distinct reference.
pub trait SchemaLoader {
    fn load(&self, name: &str, version: Option<&str>) -> Result<PackageReference, SchemaError>;
}
