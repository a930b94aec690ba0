//! Parser-output declarations.
//!
//! One `Declaration` per top-level block in a source file. The parser
//! produces these in file order; the binder turns them into bound nodes
//! without ever looking back at the source text.
//!
//! Component declarations carry the parsed files and declarations of the
//! directory they instantiate: the parser loads nested directories, and
//! the binder binds them recursively.

use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::foundation::{SourceFile, Span};
use crate::types::Type;

/// A single top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    Config(ConfigDecl),
    Local(LocalDecl),
    Resource(ResourceDecl),
    Component(ComponentDecl),
    Output(OutputDecl),
}

impl Declaration {
    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Config(d) => &d.name,
            Declaration::Local(d) => &d.name,
            Declaration::Resource(d) => &d.name,
            Declaration::Component(d) => &d.name,
            Declaration::Output(d) => &d.name,
        }
    }

    /// Source location of the declaration header.
    pub fn span(&self) -> Span {
        match self {
            Declaration::Config(d) => d.span,
            Declaration::Local(d) => d.span,
            Declaration::Resource(d) => d.span,
            Declaration::Component(d) => d.span,
            Declaration::Output(d) => d.span,
        }
    }
}

/// `config <name> [: <type>] [= <default>]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDecl {
    pub name: String,
    /// Declared type, if the source spelled one out
    pub ty: Option<Type>,
    /// Default value expression
    pub default: Option<Expr>,
    pub span: Span,
}

/// `local <name> = <value>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalDecl {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

/// `resource <name> "<package>:<module>:<Member>" { <inputs> }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDecl {
    pub name: String,
    /// Schema token, `<package>:<module>:<Member>`
    pub token: String,
    /// Requested package version, if pinned in source
    pub version: Option<String>,
    /// Named input expressions, in written order
    pub inputs: Vec<(String, Expr)>,
    pub span: Span,
}

/// `component <name> "<dir>" { <inputs> }`
///
/// Owns the parsed contents of the instantiated directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDecl {
    pub name: String,
    /// Directory the component was loaded from, relative to the program
    pub source_dir: String,
    /// Named input expressions, in written order
    pub inputs: Vec<(String, Expr)>,
    /// Parsed files of the nested program
    pub files: Vec<SourceFile>,
    /// Parsed declarations of the nested program
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

/// `output <name> = <value>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDecl {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_accessors() {
        let span = Span::zero(0);
        let decl = Declaration::Local(LocalDecl {
            name: "prefix".to_string(),
            value: Expr::str("app-", span),
            span,
        });

        assert_eq!(decl.name(), "prefix");
        assert_eq!(decl.span(), span);
    }
}
