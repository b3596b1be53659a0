//! Resolved types per node, handed to code generation.

use decaf_ast::NodeId;
use decaf_core::Type;
use std::collections::{BTreeSet, HashMap};

/// Types assigned during analysis, keyed by node.
///
/// Declarations map to their declared type (the return type for functions)
/// and expressions to the type they evaluate to. Nodes in the widened set
/// hold an `int` that is used where a `double` is expected and needs a
/// conversion when code is emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeAnnotations {
    types: HashMap<NodeId, Type>,
    widened: BTreeSet<NodeId>,
}

impl TypeAnnotations {
    pub(crate) fn record(&mut self, node: NodeId, ty: Type) {
        self.types.insert(node, ty);
    }

    pub(crate) fn widen(&mut self, node: NodeId) {
        self.widened.insert(node);
    }

    /// The type recorded for `node`, if it was checked.
    #[must_use]
    pub fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.types.get(&node)
    }

    #[must_use]
    pub fn is_widened(&self, node: NodeId) -> bool {
        self.widened.contains(&node)
    }

    /// Widened nodes in construction order.
    pub fn widened(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.widened.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
