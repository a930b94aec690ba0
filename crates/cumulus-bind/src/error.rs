//! Binding errors.

use cumulus_ast::Span;
use cumulus_schema::SchemaError;
use thiserror::Error;

/// Binding result type.
pub type Result<T> = std::result::Result<T, BindError>;

/// Errors that abort a binding pass or an aggregation call.
///
/// Every variant is fatal to the operation that raised it: a failed bind
/// yields no program, a failed snapshot call yields no snapshot list.
#[derive(Debug, Error)]
pub enum BindError {
    /// A declaration was reached again while still being bound.
    ///
    /// The chain lists node names from the re-entered declaration back to
    /// itself; a self-reference is a chain of length two (`a → a`).
    #[error("circular reference detected: {}", .chain.join(" → "))]
    CircularReference { chain: Vec<String>, span: Span },

    /// A body referenced a name with no declaration in scope.
    #[error("undefined reference '{name}'")]
    UnresolvedReference { name: String, span: Span },

    /// Two declarations share one name in the program's namespace.
    #[error("'{name}' is declared multiple times")]
    DuplicateDeclaration { name: String, span: Span },

    /// A resource token did not have the `<package>:<module>:<member>` shape.
    #[error("invalid resource token '{token}', expected '<package>:<module>:<member>'")]
    InvalidResourceToken { token: String, span: Span },

    /// A component's source directory cannot be used to namespace its files.
    #[error("invalid component path '{path}': {reason}")]
    ComponentPath {
        path: String,
        reason: String,
        span: Span,
    },

    /// Package resolution or snapshotting failed, tagged with the package.
    #[error("defining package '{package}': {source}")]
    Schema {
        package: String,
        #[source]
        source: SchemaError,
    },
}
