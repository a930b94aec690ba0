// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Package schema registry for the Cumulus infrastructure language.
//!
//! Programs reference external type catalogs ("packages") that can run to
//! thousands of members. This crate resolves package identifiers to schema
//! definitions and supports *partial* references that record only the
//! members a program actually dereferences, so that snapshots handed to
//! downstream consumers stay minimal.
//!
//! Actual schema transport (files, HTTP, plugins) is the loader's problem:
//! the [`SchemaSource`] and [`SchemaLoader`] traits are the seam, and
//! [`memory`] provides the in-memory implementation used for preloaded
//! documents and tests.

pub mod error;
pub mod memory;
pub mod partial;
pub mod registry;
pub mod schema;
pub mod source;

pub use error::SchemaError;
pub use memory::{InMemoryLoader, InMemorySource};
pub use partial::PartialPackage;
pub use registry::{reference_key, PackageReference, PackageRegistry};
pub use schema::{PackageSchema, Property, ResourceSchema, SchemaType, TypeSchema};
pub use source::{SchemaLoader, SchemaSource};
