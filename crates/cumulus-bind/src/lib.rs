// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Binding and aggregation for Cumulus programs.
//!
//! This crate is where execution order is established: it takes the
//! declarations parsed from a program directory and binds them into an
//! acyclic graph of typed nodes, resolving the package schemas they
//! reference along the way. Programs compose recursively through
//! component nodes that own nested programs; the aggregation operations
//! walk that tree to collect components, schema snapshots, and an
//! exportable source-file tree.
//!
//! Binding is a single synchronous pass. It either produces a fully bound
//! [`Program`] or fails with a [`BindError`]; there is no partial result
//! and no way to re-bind a program that already exists.

pub mod aggregate;
pub mod binder;
pub mod error;
pub mod node;
pub mod program;

pub use aggregate::{ProgramDirectory, ProgramEntry};
pub use binder::{bind_program, ProgramSource};
pub use error::{BindError, Result};
pub use node::{BindState, Component, Node, NodeId, NodeKind};
pub use program::Program;
