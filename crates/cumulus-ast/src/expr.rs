//! Untyped expressions from the parser.
//!
//! The binder treats expression bodies as opaque beyond being walkable: it
//! needs to find the sibling references (`Var`) inside a declaration, and
//! nothing else. Expression-level typing and evaluation live outside this
//! workspace.
//!
//! # Traversal
//!
//! A single [`walk_expr`] function provides pre-order traversal with a
//! closure visitor. A visitor trait would be over-engineered here: every
//! caller needs the same traversal structure, and a closure owns its own
//! state.

use serde::{Deserialize, Serialize};

use crate::foundation::Span;

/// An untyped expression with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Expression kind
    pub kind: ExprKind,
    /// Source location for error messages
    pub span: Span,
}

/// Expression kinds as parsed from source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Absent value
    Null,
    /// Boolean literal
    Bool(bool),
    /// Numeric literal
    Number(f64),
    /// String literal
    Str(String),
    /// Reference to a sibling declaration in program scope
    Var(String),
    /// Attribute access on another expression (`bucket.arn`)
    GetAttr {
        object: Box<Expr>,
        attr: String,
    },
    /// Intrinsic function invocation
    Call {
        func: String,
        args: Vec<Expr>,
    },
    /// List constructor
    List(Vec<Expr>),
    /// Object constructor, field order as written
    Object(Vec<(String, Expr)>),
}

impl Expr {
    /// Create a new expression.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create a variable reference.
    pub fn var(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Var(name.into()), span)
    }

    /// Create a string literal.
    pub fn str(value: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Str(value.into()), span)
    }

    /// Create a numeric literal.
    pub fn number(value: f64, span: Span) -> Self {
        Self::new(ExprKind::Number(value), span)
    }

    /// Create an attribute access.
    pub fn get_attr(object: Expr, attr: impl Into<String>, span: Span) -> Self {
        Self::new(
            ExprKind::GetAttr {
                object: Box::new(object),
                attr: attr.into(),
            },
            span,
        )
    }
}

/// Recursively walk an expression tree in pre-order, calling the visitor
/// for each node.
///
/// The visitor is called for the root before its children, children
/// left-to-right. Object fields are visited in written order.
pub fn walk_expr<V>(expr: &Expr, visitor: &mut V)
where
    V: FnMut(&Expr),
{
    visitor(expr);

    match &expr.kind {
        ExprKind::Null | ExprKind::Bool(_) | ExprKind::Number(_) | ExprKind::Str(_)
        | ExprKind::Var(_) => {}
        ExprKind::GetAttr { object, .. } => walk_expr(object, visitor),
        ExprKind::Call { args, .. } => {
            for arg in args {
                walk_expr(arg, visitor);
            }
        }
        ExprKind::List(elements) => {
            for elem in elements {
                walk_expr(elem, visitor);
            }
        }
        ExprKind::Object(fields) => {
            for (_, value) in fields {
                walk_expr(value, visitor);
            }
        }
    }
}
