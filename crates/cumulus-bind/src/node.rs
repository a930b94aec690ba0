//! Bound declaration nodes.
//!
//! A [`Node`] is one declaration in a program: config, local, resource,
//! component, or output. Nodes carry a binding state machine that the
//! binder drives while resolving bodies, and dependency edges recorded as
//! indices into the owning program's node sequence. Nodes never point at
//! each other directly, so the graph stays a plain `Vec` with index edges.

use cumulus_ast::{Expr, Span, Type};

use crate::program::Program;

/// Index of a node within its owning program's declaration sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Binding lifecycle of a node.
///
/// Transitions are monotonic: `Unbound → Binding → Bound`, never backward.
/// `Binding` marks the node as being on the active binding stack; reaching
/// a node in that state again is the circular-reference signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    Unbound,
    Binding,
    Bound,
}

/// What a node declares.
#[derive(Debug)]
pub enum NodeKind {
    /// `config` — a value supplied by the caller at deploy time
    ConfigVariable {
        /// Declared type, if the source spelled one out
        declared: Option<Type>,
    },
    /// `local` — a named intermediate value
    LocalVariable,
    /// `resource` — a provisioned resource from a package schema
    Resource {
        /// Schema token, `<package>:<module>:<Member>`
        token: String,
        /// Package name, the first token segment
        package: String,
        /// Pinned package version, if any
        version: Option<String>,
    },
    /// `component` — an embedded sub-program
    Component(Component),
    /// `output` — a value exported to the caller
    OutputVariable,
}

/// A component node's payload: the directory it was instantiated from and
/// the nested program it owns.
///
/// Programs compose as a strict tree: each component exclusively owns its
/// nested program, and nothing points back up.
#[derive(Debug)]
pub struct Component {
    /// Directory the component was loaded from, relative to its parent
    /// program. Also the deduplication key for repeated inclusions.
    pub source_dir: String,
    /// The bound nested program.
    pub program: Program,
}

/// A single bound declaration.
#[derive(Debug)]
pub struct Node {
    /// Lexical name, unique within the declaring program
    pub name: String,
    /// Source location of the declaration header
    pub span: Span,
    /// Declaration variant
    pub kind: NodeKind,
    /// Resolved type; `None` until the node is bound (and possibly after,
    /// when nothing constrains it)
    pub ty: Option<Type>,
    /// The declaration's named body expressions, in written order
    pub body: Vec<(String, Expr)>,
    state: BindState,
    deps: Option<Vec<NodeId>>,
}

impl Node {
    pub(crate) fn new(name: String, span: Span, kind: NodeKind, body: Vec<(String, Expr)>) -> Self {
        Self {
            name,
            span,
            kind,
            ty: None,
            body,
            state: BindState::Unbound,
            deps: None,
        }
    }

    /// Whether the node is on the active binding stack.
    pub fn is_binding(&self) -> bool {
        self.state == BindState::Binding
    }

    /// Whether binding completed for this node. Permanent once true.
    pub fn is_bound(&self) -> bool {
        self.state == BindState::Bound
    }

    pub(crate) fn mark_binding(&mut self) {
        assert_eq!(
            self.state,
            BindState::Unbound,
            "node '{}' marked binding twice",
            self.name
        );
        self.state = BindState::Binding;
    }

    pub(crate) fn mark_bound(&mut self) {
        assert_eq!(
            self.state,
            BindState::Binding,
            "node '{}' bound without entering binding state",
            self.name
        );
        self.state = BindState::Bound;
    }

    /// Dependency edges in first-reference order. Empty until bound.
    pub fn dependencies(&self) -> &[NodeId] {
        self.deps.as_deref().unwrap_or(&[])
    }

    pub(crate) fn set_dependencies(&mut self, deps: Vec<NodeId>) {
        assert!(
            self.deps.is_none(),
            "dependencies of '{}' set twice",
            self.name
        );
        self.deps = Some(deps);
    }

    /// The component payload, for component nodes.
    pub fn as_component(&self) -> Option<&Component> {
        match &self.kind {
            NodeKind::Component(component) => Some(component),
            _ => None,
        }
    }

    /// Whether this node is a config variable.
    pub fn is_config(&self) -> bool {
        matches!(self.kind, NodeKind::ConfigVariable { .. })
    }

    /// Whether this node is an output variable.
    pub fn is_output(&self) -> bool {
        matches!(self.kind, NodeKind::OutputVariable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_node(name: &str) -> Node {
        Node::new(
            name.to_string(),
            Span::zero(0),
            NodeKind::LocalVariable,
            Vec::new(),
        )
    }

    #[test]
    fn test_state_machine_forward() {
        let mut node = make_node("a");
        assert!(!node.is_binding());
        assert!(!node.is_bound());

        node.mark_binding();
        assert!(node.is_binding());
        assert!(!node.is_bound());

        node.mark_bound();
        assert!(!node.is_binding());
        assert!(node.is_bound());
    }

    #[test]
    #[should_panic(expected = "marked binding twice")]
    fn test_state_machine_rejects_rebinding() {
        let mut node = make_node("a");
        node.mark_binding();
        node.mark_bound();
        node.mark_binding();
    }

    #[test]
    #[should_panic(expected = "without entering binding state")]
    fn test_state_machine_rejects_skipping_binding() {
        let mut node = make_node("a");
        node.mark_bound();
    }

    #[test]
    #[should_panic(expected = "set twice")]
    fn test_dependencies_set_once() {
        let mut node = make_node("a");
        node.set_dependencies(vec![]);
        node.set_dependencies(vec![]);
    }

    #[test]
    fn test_dependencies_empty_until_set() {
        let mut node = make_node("a");
        assert!(node.dependencies().is_empty());

        node.set_dependencies(vec![NodeId(2), NodeId(0)]);
        assert_eq!(node.dependencies(), &[NodeId(2), NodeId(0)]);
    }
}
