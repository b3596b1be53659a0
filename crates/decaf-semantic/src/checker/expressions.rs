//! Expression typing.
//!
//! Every expression gets a type; anything that does not fit the rules gets
//! [`Type::Error`]. No diagnostics are reported from here except the
//! deferred unknown-class check for `new` expressions.

use crate::checker::core::{Checker, Report, WalkState};
use crate::fork_table::BindingKind;
use decaf_ast::{NodeId, NodeKind, Operands};
use decaf_core::Type;

impl Checker<'_> {
    /// Types an expression and records the result.
    pub(crate) fn check_expression(
        &self,
        expr: NodeId,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) -> Type {
        let ty = self.type_of(expr, state, report);
        report.types.record(expr, ty.clone());
        ty
    }

    fn type_of(&self, expr: NodeId, state: &WalkState<'_, '_>, report: &mut Report) -> Type {
        match self.ast.kind(expr) {
            NodeKind::IntConstant(_) => Type::Int,
            NodeKind::DoubleConstant(_) => Type::Double,
            NodeKind::BoolConstant(_) => Type::Bool,
            NodeKind::StringConstant(_) => Type::String,
            NodeKind::NullConstant => Type::Null,
            NodeKind::ReadIntegerExpr => Type::Int,
            NodeKind::ReadLineExpr => Type::String,
            NodeKind::EmptyExpr => Type::Void,

            NodeKind::ArithmeticExpr(operands) => self.check_arithmetic(operands, state, report),
            NodeKind::RelationalExpr(operands) => self.check_relational(operands, state, report),
            NodeKind::EqualityExpr(operands) => self.check_equality(operands, state, report),
            NodeKind::LogicalExpr(operands) => self.check_logical(operands, state, report),
            NodeKind::AssignExpr(operands) => self.check_assignment(operands, state, report),
            NodeKind::PostfixExpr { operand, .. } => {
                match self.check_expression(*operand, state, report) {
                    Type::Int => Type::Int,
                    _ => Type::Error,
                }
            }

            NodeKind::FieldAccess { base, field } => match base {
                // Member lookup through an object is not resolved.
                Some(base) => {
                    self.check_expression(*base, state, report);
                    Type::Error
                }
                None => self.lookup(*field, BindingKind::Variable, state),
            },
            NodeKind::ArrayAccess { base, subscript } => {
                let array = self.check_expression(*base, state, report);
                let index = self.check_expression(*subscript, state, report);
                match (array.element_type(), index) {
                    (Some(element), Type::Int) => element.clone(),
                    _ => Type::Error,
                }
            }
            NodeKind::Call {
                base,
                field,
                actuals,
            } => {
                let receiver = base.map(|base| self.check_expression(base, state, report));
                for &actual in actuals {
                    self.check_expression(actual, state, report);
                }
                match receiver {
                    None => self.lookup(*field, BindingKind::Function, state),
                    Some(Type::Array(_))
                        if actuals.is_empty() && self.ast.identifier(*field) == Some("length") =>
                    {
                        Type::Int
                    }
                    Some(_) => Type::Error,
                }
            }

            NodeKind::NewExpr { class } => {
                self.require_class(*class, state, report);
                self.ast.resolve_type(*class)
            }
            NodeKind::NewArrayExpr { size, element } => {
                let size = self.check_expression(*size, state, report);
                let element = self.resolve_declared_type(*element, state, report);
                match size {
                    Type::Int => Type::array_of(element),
                    _ => Type::Error,
                }
            }
            NodeKind::This => self
                .ast
                .enclosing_class(expr)
                .and_then(|class| self.ast.declared_name(class))
                .map_or(Type::Error, |name| Type::Named(name.to_string())),

            _ => Type::Error,
        }
    }

    /// The type bound to an identifier, if it is bound as `kind`.
    fn lookup(&self, identifier: NodeId, kind: BindingKind, state: &WalkState<'_, '_>) -> Type {
        self.ast
            .identifier(identifier)
            .and_then(|name| state.scope.get(name))
            .filter(|annotation| annotation.kind() == kind)
            .map_or(Type::Error, |annotation| annotation.ty().clone())
    }

    /// Types both sides of a binary or prefix expression, left first.
    fn check_operands(
        &self,
        operands: &Operands,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) -> (Option<Type>, Type) {
        let left = operands
            .left
            .map(|left| self.check_expression(left, state, report));
        let right = self.check_expression(operands.right, state, report);
        (left, right)
    }

    /// Lifts two numeric operands to a common type and marks the int side
    /// for widening when they differ.
    fn lift(
        &self,
        operands: &Operands,
        left: &Type,
        right: &Type,
        report: &mut Report,
    ) -> Option<Type> {
        let lifted = left.lift(right)?;
        if let Some(left_node) = operands.left {
            if left.widens_to(&lifted) {
                report.types.widen(left_node);
            }
        }
        if right.widens_to(&lifted) {
            report.types.widen(operands.right);
        }
        Some(lifted)
    }

    fn check_arithmetic(
        &self,
        operands: &Operands,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) -> Type {
        match self.check_operands(operands, state, report) {
            (None, right) if right.is_numeric() => right,
            (Some(left), right) => self
                .lift(operands, &left, &right, report)
                .unwrap_or(Type::Error),
            _ => Type::Error,
        }
    }

    fn check_relational(
        &self,
        operands: &Operands,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) -> Type {
        let (Some(left), right) = self.check_operands(operands, state, report) else {
            return Type::Error;
        };
        match self.lift(operands, &left, &right, report) {
            Some(_) => Type::Bool,
            None => Type::Error,
        }
    }

    fn check_equality(
        &self,
        operands: &Operands,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) -> Type {
        let (Some(left), right) = self.check_operands(operands, state, report) else {
            return Type::Error;
        };
        if left.is_numeric() && right.is_numeric() {
            self.lift(operands, &left, &right, report);
            return Type::Bool;
        }
        if left.accepts(&right) || right.accepts(&left) {
            Type::Bool
        } else {
            Type::Error
        }
    }

    fn check_logical(
        &self,
        operands: &Operands,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) -> Type {
        match self.check_operands(operands, state, report) {
            (None, Type::Bool) | (Some(Type::Bool), Type::Bool) => Type::Bool,
            _ => Type::Error,
        }
    }

    /// The target decides the type; an int stored into a double is widened.
    fn check_assignment(
        &self,
        operands: &Operands,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) -> Type {
        let (Some(target), value) = self.check_operands(operands, state, report) else {
            return Type::Error;
        };
        if !target.accepts(&value) {
            return Type::Error;
        }
        if value.widens_to(&target) {
            report.types.widen(operands.right);
        }
        target
    }
}
