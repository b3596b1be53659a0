//! Settles the unknown-type checks deferred during the walk.

use crate::checker::core::{Checker, PendingDiagnostic};
use crate::fork_table::ForkTable;
use decaf_core::{SemanticDiagnostic, SemanticError};

impl Checker<'_> {
    /// Promotes every pending check whose name is still unknown once the
    /// whole program has been bound.
    ///
    /// A name counts as known when it is visible from the top-level table,
    /// which is the only level that outlives the walk. Promoted diagnostics
    /// keep the order they were deferred in.
    pub(crate) fn finalize(
        &self,
        pending: Vec<PendingDiagnostic>,
        top_level: &ForkTable<'_>,
    ) -> Vec<SemanticDiagnostic> {
        pending
            .into_iter()
            .filter_map(|pending| {
                if top_level.contains_in_chain(&pending.name) {
                    tracing::trace!(name = %pending.name, "pending type resolved");
                    return None;
                }
                let position = pending
                    .checkpoint
                    .node()
                    .and_then(|node| self.ast.position(node));
                tracing::debug!(
                    name = %pending.name,
                    depth = pending.checkpoint.depth,
                    trail = pending.checkpoint.trail.len(),
                    "promoting unknown type"
                );
                Some(SemanticDiagnostic::new(
                    position,
                    SemanticError::UnknownType { name: pending.name },
                ))
            })
            .collect()
    }
}
