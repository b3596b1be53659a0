//! The arena that owns every node of a parsed program.

use crate::node::{Node, NodeId, NodeKind};
use crate::printer::Printed;
use decaf_core::{Position, Type};

/// A finished syntax tree.
///
/// Nodes are stored in construction order, so every child precedes its
/// parent and the root comes last. Parent links are plain indices and never
/// imply ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl Ast {
    /// The root node, normally a `Program`.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    /// Panics if `id` was produced by a different builder.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.node(id).position
    }

    /// The first source line of the node, if it has a position.
    #[must_use]
    pub fn line(&self, id: NodeId) -> Option<usize> {
        self.position(id).map(|position| position.first_line())
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    /// Walks the parent links from `id` (exclusive) up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// The text of an `Identifier` node.
    #[must_use]
    pub fn identifier(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// The name a declaration introduces.
    #[must_use]
    pub fn declared_name(&self, decl: NodeId) -> Option<&str> {
        match self.kind(decl) {
            NodeKind::VarDecl { name, .. }
            | NodeKind::FnDecl { name, .. }
            | NodeKind::ClassDecl { name, .. }
            | NodeKind::InterfaceDecl { name, .. } => self.identifier(*name),
            _ => None,
        }
    }

    /// The name a `NamedType` node refers to.
    #[must_use]
    pub fn type_name(&self, type_node: NodeId) -> Option<&str> {
        match self.kind(type_node) {
            NodeKind::NamedType { name } => self.identifier(*name),
            _ => None,
        }
    }

    /// Unwraps nested `ArrayType` nodes down to the innermost element type
    /// node. Any other node is returned unchanged.
    #[must_use]
    pub fn base_type(&self, type_node: NodeId) -> NodeId {
        match self.kind(type_node) {
            NodeKind::ArrayType { element } => self.base_type(*element),
            _ => type_node,
        }
    }

    /// Converts a type node into a resolved [`Type`].
    ///
    /// Nodes that are not types resolve to [`Type::Error`].
    #[must_use]
    pub fn resolve_type(&self, type_node: NodeId) -> Type {
        match self.kind(type_node) {
            NodeKind::PrimitiveType(primitive) => primitive.to_type(),
            NodeKind::NamedType { name } => self
                .identifier(*name)
                .map_or(Type::Error, |name| Type::Named(name.to_string())),
            NodeKind::ArrayType { element } => Type::array_of(self.resolve_type(*element)),
            _ => Type::Error,
        }
    }

    /// The closest function declaration containing `id`.
    #[must_use]
    pub fn enclosing_function(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|&ancestor| matches!(self.kind(ancestor), NodeKind::FnDecl { .. }))
    }

    /// The closest class declaration containing `id`.
    #[must_use]
    pub fn enclosing_class(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|&ancestor| matches!(self.kind(ancestor), NodeKind::ClassDecl { .. }))
    }

    /// Pretty prints the subtree rooted at `id` at indentation level 0.
    #[must_use]
    pub fn display(&self, id: NodeId) -> Printed<'_> {
        Printed::new(self, id)
    }
}
