//! The binding pass.
//!
//! One linear pass turns parsed declarations into a bound [`Program`]:
//!
//! 1. **Intern** - every declaration becomes an unbound node; duplicate
//!    names are rejected, resource tokens are validated, and component
//!    declarations recursively bind their nested programs.
//! 2. **Bind** - nodes are bound depth-first. Binding a node marks it
//!    `Binding`, walks its body for sibling references in first-reference
//!    order, binds unbound dependencies transitively, and fails on any
//!    reference to a node still on the active binding stack (a cycle).
//!    Resource nodes resolve their package member through the registry,
//!    recording it on partial packages.
//!
//! The pass is single-shot by construction: it consumes its input, and a
//! bound program exposes no way to run it again.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use cumulus_ast::{walk_expr, Declaration, Expr, ExprKind, SourceFile, Span, Type};
use cumulus_schema::{PackageRegistry, SchemaLoader};

use crate::error::{BindError, Result};
use crate::node::{Component, Node, NodeId, NodeKind};
use crate::program::Program;

/// The parsed input of one program directory.
#[derive(Debug, Clone)]
pub struct ProgramSource {
    /// Parsed files, in parse order
    pub files: Vec<SourceFile>,
    /// Parsed declarations across those files, in declaration order
    pub declarations: Vec<Declaration>,
}

/// Bind a parsed program into a validated, acyclic node graph.
///
/// Fails atomically: any error yields no program. Component declarations
/// are bound recursively with the same loader.
pub fn bind_program(source: ProgramSource, loader: Arc<dyn SchemaLoader>) -> Result<Program> {
    let ProgramSource {
        files,
        declarations,
    } = source;
    debug!(
        files = files.len(),
        declarations = declarations.len(),
        "binding program"
    );

    let mut binder = Binder {
        registry: PackageRegistry::new(Arc::clone(&loader)),
        loader,
        nodes: Vec::new(),
        scope: IndexMap::new(),
        stack: Vec::new(),
    };

    binder.intern(declarations)?;
    for index in 0..binder.nodes.len() {
        binder.bind_node(NodeId(index))?;
    }

    debug!(
        nodes = binder.nodes.len(),
        packages = binder.registry.len(),
        "program bound"
    );
    Ok(Program::new(
        binder.nodes,
        files,
        binder.scope,
        binder.registry,
    ))
}

struct Binder {
    registry: PackageRegistry,
    loader: Arc<dyn SchemaLoader>,
    nodes: Vec<Node>,
    scope: IndexMap<String, NodeId>,
    /// Names of nodes currently on the binding stack, outermost first.
    stack: Vec<String>,
}

impl Binder {
    fn intern(&mut self, declarations: Vec<Declaration>) -> Result<()> {
        for decl in declarations {
            let name = decl.name().to_string();
            let span = decl.span();
            if self.scope.contains_key(&name) {
                return Err(BindError::DuplicateDeclaration { name, span });
            }

            let node = match decl {
                Declaration::Config(d) => Node::new(
                    d.name,
                    span,
                    NodeKind::ConfigVariable { declared: d.ty },
                    d.default
                        .map(|default| vec![("default".to_string(), default)])
                        .unwrap_or_default(),
                ),
                Declaration::Local(d) => Node::new(
                    d.name,
                    span,
                    NodeKind::LocalVariable,
                    vec![("value".to_string(), d.value)],
                ),
                Declaration::Resource(d) => {
                    let package = token_package(&d.token, span)?;
                    Node::new(
                        d.name,
                        span,
                        NodeKind::Resource {
                            token: d.token,
                            package,
                            version: d.version,
                        },
                        d.inputs,
                    )
                }
                Declaration::Component(d) => {
                    validate_component_dir(&d.source_dir, span)?;
                    debug!(component = %d.name, dir = %d.source_dir, "binding component program");
                    let nested = bind_program(
                        ProgramSource {
                            files: d.files,
                            declarations: d.declarations,
                        },
                        Arc::clone(&self.loader),
                    )?;
                    Node::new(
                        d.name,
                        span,
                        NodeKind::Component(Component {
                            source_dir: d.source_dir,
                            program: nested,
                        }),
                        d.inputs,
                    )
                }
                Declaration::Output(d) => Node::new(
                    d.name,
                    span,
                    NodeKind::OutputVariable,
                    vec![("value".to_string(), d.value)],
                ),
            };

            let id = NodeId(self.nodes.len());
            self.scope.insert(node.name.clone(), id);
            self.nodes.push(node);
        }
        Ok(())
    }

    fn bind_node(&mut self, id: NodeId) -> Result<()> {
        if self.nodes[id.0].is_bound() {
            return Ok(());
        }
        self.nodes[id.0].mark_binding();
        self.stack.push(self.nodes[id.0].name.clone());

        let mut deps = Vec::new();
        for (name, span) in collect_body_references(&self.nodes[id.0].body) {
            let Some(&dep) = self.scope.get(&name) else {
                return Err(BindError::UnresolvedReference { name, span });
            };
            if self.nodes[dep.0].is_binding() {
                // The chain runs from the re-entered node back to itself;
                // for a self-reference the stack position is the top.
                let start = self.stack.iter().position(|n| *n == name).unwrap_or(0);
                let mut chain = self.stack[start..].to_vec();
                chain.push(name);
                return Err(BindError::CircularReference { chain, span });
            }
            if !self.nodes[dep.0].is_bound() {
                self.bind_node(dep)?;
            }
            deps.push(dep);
        }

        let ty = self.resolve_type(id)?;
        let node = &mut self.nodes[id.0];
        node.ty = ty;
        node.mark_bound();
        node.set_dependencies(deps);
        self.stack.pop();
        Ok(())
    }

    fn resolve_type(&mut self, id: NodeId) -> Result<Option<Type>> {
        match &self.nodes[id.0].kind {
            NodeKind::ConfigVariable { declared } => Ok(declared.clone().or_else(|| {
                self.nodes[id.0]
                    .body
                    .iter()
                    .find(|(name, _)| name == "default")
                    .and_then(|(_, default)| infer_literal_type(default))
            })),
            NodeKind::LocalVariable | NodeKind::OutputVariable => Ok(self.nodes[id.0]
                .body
                .first()
                .and_then(|(_, value)| infer_literal_type(value))),
            NodeKind::Resource {
                token,
                package,
                version,
            } => {
                let token = token.clone();
                let package = package.clone();
                let version = version.clone();
                self.registry
                    .resource_schema(&package, version.as_deref(), &token)
                    .map_err(|source| BindError::Schema {
                        package: package.clone(),
                        source,
                    })?;
                debug!(package = %package, token = %token, "resolved resource schema");
                Ok(Some(Type::Resource(token)))
            }
            NodeKind::Component(component) => {
                Ok(Some(Type::Component(component.source_dir.clone())))
            }
        }
    }
}

/// Sibling references in a node body, deduplicated, in the order each name
/// is first reached by a pre-order walk over the body expressions.
fn collect_body_references(body: &[(String, Expr)]) -> Vec<(String, Span)> {
    let mut references = Vec::new();
    for (_, expr) in body {
        collect_expr_references(expr, &mut references);
    }
    references
}

/// Append the references of one expression, preserving first-reference
/// order across calls.
pub(crate) fn collect_expr_references(expr: &Expr, references: &mut Vec<(String, Span)>) {
    walk_expr(expr, &mut |node| {
        if let ExprKind::Var(name) = &node.kind {
            if !references.iter().any(|(seen, _)| seen == name) {
                references.push((name.clone(), node.span));
            }
        }
    });
}

/// Literal-only type inference for declarations without a spelled-out
/// type. Anything non-literal stays untyped; full inference is the
/// expression binder's job, not this pass's.
fn infer_literal_type(expr: &Expr) -> Option<Type> {
    match &expr.kind {
        ExprKind::Bool(_) => Some(Type::Bool),
        ExprKind::Number(_) => Some(Type::Number),
        ExprKind::Str(_) => Some(Type::String),
        _ => None,
    }
}

/// Validate a resource token and return its package segment.
fn token_package(token: &str, span: Span) -> Result<String> {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
        return Err(BindError::InvalidResourceToken {
            token: token.to_string(),
            span,
        });
    }
    Ok(parts[0].to_string())
}

/// A component directory must stay inside its parent program's directory.
fn validate_component_dir(dir: &str, span: Span) -> Result<()> {
    let reason = if dir.is_empty() {
        Some("path is empty")
    } else if dir.starts_with('/') {
        Some("absolute paths are not allowed")
    } else if dir.split('/').any(|segment| segment == "..") {
        Some("path escapes the program directory")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(BindError::ComponentPath {
            path: dir.to_string(),
            reason: reason.to_string(),
            span,
        }),
        None => Ok(()),
    }
}
