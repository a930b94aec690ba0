// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for the Cumulus infrastructure language
//!
//! This crate contains the declaration and expression types produced by the
//! parser, plus the foundation types (spans, source files, semantic types)
//! shared by the binder and every downstream consumer.
//!
//! Parsing itself lives outside this workspace; everything here is consumed
//! as delivered, never re-parsed.

pub mod decl;
pub mod expr;
pub mod foundation;
pub mod types;

pub use decl::{
    ComponentDecl, ConfigDecl, Declaration, LocalDecl, OutputDecl, ResourceDecl,
};
pub use expr::{walk_expr, Expr, ExprKind};
pub use foundation::{SourceFile, Span};
pub use types::Type;
