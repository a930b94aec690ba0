//! Schema resolution errors.

use thiserror::Error;

/// Errors raised while resolving packages or assembling snapshots.
///
/// Transient loader failures are not retried here; retry policy belongs to
/// the loader itself.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The loader has no package under the requested name.
    #[error("unknown package '{name}'")]
    UnknownPackage { name: String },

    /// A referenced member does not exist in the package schema.
    #[error("package '{package}' has no member '{token}'")]
    MissingMember { package: String, token: String },

    /// The loader failed to produce a schema.
    #[error("loading schema for package '{package}': {reason}")]
    Load { package: String, reason: String },

    /// A schema document failed to parse.
    #[error("invalid schema document: {0}")]
    Parse(#[from] serde_json::Error),
}
