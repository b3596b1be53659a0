//! Walker state threaded through every check.

use crate::annotations::TypeAnnotations;
use crate::fork_table::ForkTable;
use decaf_ast::{Ast, NodeId};
use decaf_core::{Position, SemanticDiagnostic, SemanticError};

/// Walks a tree and checks it against the scope chain it is given.
///
/// The checker itself holds no mutable state; scopes travel in
/// [`WalkState`] and findings in [`Report`].
pub(crate) struct Checker<'a> {
    pub(crate) ast: &'a Ast,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(ast: &'a Ast) -> Self {
        Self { ast }
    }
}

/// Where the walk currently is and which names are visible from there.
pub(crate) struct WalkState<'s, 'p> {
    /// Declarations and blocks entered on the way down.
    trail: Vec<NodeId>,
    pub(crate) scope: &'s mut ForkTable<'p>,
}

impl<'s, 'p> WalkState<'s, 'p> {
    pub(crate) fn new(scope: &'s mut ForkTable<'p>) -> Self {
        Self {
            trail: Vec::new(),
            scope,
        }
    }

    /// State for walking the inside of `node` with its own scope level.
    pub(crate) fn enter<'c, 'q>(
        &self,
        node: NodeId,
        scope: &'c mut ForkTable<'q>,
    ) -> WalkState<'c, 'q> {
        let mut trail = self.trail.clone();
        trail.push(node);
        WalkState { trail, scope }
    }

    /// Snapshots the current location with `node` as the point of interest.
    pub(crate) fn checkpoint(&self, node: NodeId) -> Checkpoint {
        let mut trail = self.trail.clone();
        trail.push(node);
        Checkpoint {
            trail,
            depth: self.scope.depth(),
        }
    }
}

/// A frozen copy of the walk's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    pub(crate) trail: Vec<NodeId>,
    /// Scope depth at the time the checkpoint was taken.
    pub(crate) depth: usize,
}

impl Checkpoint {
    /// The node the checkpoint was taken for.
    pub(crate) fn node(&self) -> Option<NodeId> {
        self.trail.last().copied()
    }
}

/// A class name that was not visible when it was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingDiagnostic {
    pub(crate) checkpoint: Checkpoint,
    pub(crate) name: String,
}

/// Everything the walk produces besides the bindings themselves.
#[derive(Debug, Default)]
pub(crate) struct Report {
    /// Errors that can never go away, in the order they were found.
    pub(crate) errors: Vec<SemanticDiagnostic>,
    /// Unknown names waiting for the rest of the program to be seen.
    pub(crate) pending: Vec<PendingDiagnostic>,
    pub(crate) types: TypeAnnotations,
}

impl Report {
    pub(crate) fn error(&mut self, position: Option<Position>, error: SemanticError) {
        tracing::debug!(%error, "semantic error");
        self.errors.push(SemanticDiagnostic::new(position, error));
    }

    pub(crate) fn defer(&mut self, checkpoint: Checkpoint, name: &str) {
        tracing::debug!(name, depth = checkpoint.depth, "deferring unknown type");
        self.pending.push(PendingDiagnostic {
            checkpoint,
            name: name.to_string(),
        });
    }
}
