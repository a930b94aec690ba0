//! Bound programs.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use cumulus_ast::{Expr, SourceFile};
use cumulus_schema::{PackageReference, PackageRegistry, PackageSchema};

use crate::binder::collect_expr_references;
use crate::error::{BindError, Result};
use crate::node::{Node, NodeId};

/// A bound program: the ordered node graph, the source files that
/// produced it, and the packages it references.
///
/// Programs are produced by [`bind_program`](crate::bind_program) and are
/// read-only from then on. Declaration order is preserved everywhere it is
/// observable; package listings are always in ascending reference-key
/// order, whatever order binding discovered them in.
#[derive(Debug)]
pub struct Program {
    nodes: Vec<Node>,
    files: Vec<SourceFile>,
    scope: IndexMap<String, NodeId>,
    registry: PackageRegistry,
}

impl Program {
    pub(crate) fn new(
        nodes: Vec<Node>,
        files: Vec<SourceFile>,
        scope: IndexMap<String, NodeId>,
        registry: PackageRegistry,
    ) -> Self {
        Self {
            nodes,
            files,
            scope,
            registry,
        }
    }

    /// All nodes, in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Resolve a node id to its node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Look up a node by name in the program's top-level scope.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.scope.get(name).copied()
    }

    /// The source files this program was parsed from.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// A node's dependencies, resolved to nodes, in first-reference order.
    pub fn dependencies_of(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.node(id).dependencies().iter().map(|dep| self.node(*dep))
    }

    /// Config variable nodes, preserving declaration order.
    pub fn config_variables(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.is_config()).collect()
    }

    /// Output variable nodes, preserving declaration order.
    pub fn output_variables(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.is_output()).collect()
    }

    /// Packages referenced by this program, deduplicated, in ascending
    /// reference-key order.
    pub fn package_references(&self) -> Vec<&PackageReference> {
        self.registry.references().collect()
    }

    /// Full schema definitions for every referenced package, in reference
    /// order. Fail-fast: the first load error aborts the call, tagged with
    /// the offending package's name.
    pub fn packages(&self) -> Result<Vec<PackageSchema>> {
        self.registry
            .references()
            .map(|reference| {
                reference.definition().map_err(|source| BindError::Schema {
                    package: reference.name().to_string(),
                    source,
                })
            })
            .collect()
    }

    /// Schemas to hand downstream, in reference order: the full definition
    /// for full references, the pruned snapshot for partial ones.
    /// Fail-fast; no partial list is returned on error.
    pub fn package_snapshots(&self) -> Result<Vec<PackageSchema>> {
        self.registry
            .references()
            .map(|reference| {
                reference.snapshot().map_err(|source| BindError::Schema {
                    package: reference.name().to_string(),
                    source,
                })
            })
            .collect()
    }

    /// Bind one expression in the program's top-level scope.
    ///
    /// Returns the referenced nodes in first-reference order; a name with
    /// no declaration in scope is an error. This is the narrow entry point
    /// the expression binder works through; expression semantics stay
    /// outside this crate.
    pub fn bind_expression(&self, expr: &Expr) -> Result<Vec<NodeId>> {
        let mut references = Vec::new();
        collect_expr_references(expr, &mut references);

        references
            .into_iter()
            .map(|(name, span)| {
                self.scope
                    .get(&name)
                    .copied()
                    .ok_or(BindError::UnresolvedReference { name, span })
            })
            .collect()
    }

    /// File name → contents, for consumers that want the raw sources.
    pub fn source(&self) -> BTreeMap<String, String> {
        self.files
            .iter()
            .map(|file| (file.name.clone(), file.contents_lossy()))
            .collect()
    }
}
