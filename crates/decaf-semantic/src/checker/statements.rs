//! Statement checking.

use crate::checker::core::{Checker, Report, WalkState};
use decaf_ast::{NodeId, NodeKind};

impl Checker<'_> {
    /// Checks the declarations and then the statements of a block in the
    /// current scope. The caller decides whether the block gets a new level.
    pub(crate) fn check_block_contents(
        &self,
        block: NodeId,
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        let NodeKind::StmtBlock { decls, stmts } = self.ast.kind(block) else {
            self.check_statement(block, state, report);
            return;
        };
        self.check_declarations(decls, state, report);
        for &stmt in stmts {
            self.check_statement(stmt, state, report);
        }
    }

    /// Checks a statement in the current scope.
    pub(crate) fn check_statement(
        &self,
        stmt: NodeId,
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        match self.ast.kind(stmt) {
            NodeKind::StmtBlock { .. } => {
                let mut block_scope = state.scope.fork();
                let mut block_state = state.enter(stmt, &mut block_scope);
                self.check_block_contents(stmt, &mut block_state, report);
            }
            NodeKind::IfStmt {
                test,
                then_branch,
                else_branch,
            } => {
                self.check_expression(*test, state, report);
                self.check_statement(*then_branch, state, report);
                if let Some(else_branch) = else_branch {
                    self.check_statement(*else_branch, state, report);
                }
            }
            NodeKind::WhileStmt { test, body } => {
                self.check_expression(*test, state, report);
                self.check_statement(*body, state, report);
            }
            NodeKind::ForStmt {
                init,
                test,
                step,
                body,
            } => {
                for &expr in [init, test, step] {
                    self.check_expression(expr, state, report);
                }
                self.check_statement(*body, state, report);
            }
            NodeKind::ReturnStmt { expr } => self.check_return(stmt, *expr, state, report),
            NodeKind::PrintStmt { args } => {
                for &arg in args {
                    self.check_expression(arg, state, report);
                }
            }
            NodeKind::SwitchStmt {
                expr,
                cases,
                default,
            } => {
                self.check_expression(*expr, state, report);
                for &case in cases.iter().chain(default) {
                    self.check_statement(case, state, report);
                }
            }
            NodeKind::Case { value, stmts } => {
                self.check_expression(*value, state, report);
                for &inner in stmts {
                    self.check_statement(inner, state, report);
                }
            }
            NodeKind::Default { stmts } => {
                for &inner in stmts {
                    self.check_statement(inner, state, report);
                }
            }
            NodeKind::BreakStmt => {}
            kind if kind.is_declaration() => self.check_declaration(stmt, state, report),
            kind if kind.is_expression() => {
                self.check_expression(stmt, state, report);
            }
            _ => {}
        }
    }

    /// Checks a return value and marks it for widening when an int is
    /// returned from a function declared to return double.
    fn check_return(
        &self,
        stmt: NodeId,
        expr: NodeId,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) {
        let value = self.check_expression(expr, state, report);
        let expected = self
            .ast
            .enclosing_function(stmt)
            .and_then(|function| match self.ast.kind(function) {
                NodeKind::FnDecl { return_type, .. } => Some(self.ast.resolve_type(*return_type)),
                _ => None,
            });

        if let Some(expected) = expected {
            if value.widens_to(&expected) {
                report.types.widen(expr);
            }
        }
    }
}
