//! Canonical pretty printing of syntax trees.
//!
//! Each node starts on a new line with its source line right-justified in a
//! three-column field (blank when the node has no position), followed by
//! three spaces per indentation level, an optional label, and the node name.
//! Leaf values follow the name; children are printed one level deeper.

use crate::node::{NodeId, NodeKind, Operands};
use crate::tree::Ast;
use std::fmt;

const FIELD_WIDTH: usize = 3;

/// A subtree ready to be formatted, see [`Ast::display`].
#[derive(Debug, Clone, Copy)]
pub struct Printed<'a> {
    ast: &'a Ast,
    node: NodeId,
    level: usize,
    label: Option<&'a str>,
}

impl<'a> Printed<'a> {
    pub(crate) fn new(ast: &'a Ast, node: NodeId) -> Self {
        Self {
            ast,
            node,
            level: 0,
            label: None,
        }
    }

    /// Starts printing at the given indentation level.
    #[must_use]
    pub fn at_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Prefixes the top node with a label such as `(body)`.
    #[must_use]
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }
}

impl fmt::Display for Printed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Writer { ast: self.ast, f }.node(self.node, self.level, self.label)
    }
}

/// Formats a double constant so it always reads as floating point.
#[must_use]
pub fn format_double(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

struct Writer<'a, 'f, 'w> {
    ast: &'a Ast,
    f: &'f mut fmt::Formatter<'w>,
}

impl Writer<'_, '_, '_> {
    fn node(&mut self, id: NodeId, level: usize, label: Option<&str>) -> fmt::Result {
        writeln!(self.f)?;
        match self.ast.line(id) {
            Some(line) => write!(self.f, "{line:>width$}", width = FIELD_WIDTH)?,
            None => write!(self.f, "{:width$}", "", width = FIELD_WIDTH)?,
        }
        write!(self.f, "{:indent$}", "", indent = level * FIELD_WIDTH)?;
        if let Some(label) = label {
            write!(self.f, "{label} ")?;
        }

        let kind = self.ast.kind(id);
        write!(self.f, "{}: ", kind.name())?;
        self.contents(kind, level + 1)
    }

    fn child(&mut self, id: NodeId, level: usize) -> fmt::Result {
        self.node(id, level, None)
    }

    fn labelled(&mut self, id: NodeId, level: usize, label: &str) -> fmt::Result {
        self.node(id, level, Some(label))
    }

    fn all(&mut self, ids: &[NodeId], level: usize, label: Option<&str>) -> fmt::Result {
        for &id in ids {
            self.node(id, level, label)?;
        }
        Ok(())
    }

    fn operands(&mut self, operands: &Operands, level: usize) -> fmt::Result {
        if let Some(left) = operands.left {
            self.child(left, level)?;
        }
        self.child(operands.op, level)?;
        self.child(operands.right, level)
    }

    fn contents(&mut self, kind: &NodeKind, level: usize) -> fmt::Result {
        match kind {
            NodeKind::Identifier(name) => write!(self.f, "{name}"),
            NodeKind::PrimitiveType(primitive) => write!(self.f, "{primitive}"),
            NodeKind::IntConstant(value) => write!(self.f, "{value}"),
            NodeKind::DoubleConstant(value) => write!(self.f, "{}", format_double(*value)),
            NodeKind::BoolConstant(value) => write!(self.f, "{value}"),
            NodeKind::StringConstant(literal) => write!(self.f, "{literal}"),
            NodeKind::Operator(op) => write!(self.f, "{op}"),

            NodeKind::Program { decls } => self.all(decls, level, None),
            NodeKind::VarDecl { name, ty } => {
                self.child(*ty, level)?;
                self.child(*name, level)
            }
            NodeKind::FnDecl {
                name,
                return_type,
                formals,
                body,
            } => {
                self.labelled(*return_type, level, "(return type)")?;
                self.child(*name, level)?;
                self.all(formals, level, Some("(formals)"))?;
                match body {
                    Some(body) => self.labelled(*body, level, "(body)"),
                    None => Ok(()),
                }
            }
            NodeKind::ClassDecl {
                name,
                extends,
                implements,
                members,
            } => {
                self.child(*name, level)?;
                if let Some(extends) = extends {
                    self.labelled(*extends, level, "(extends)")?;
                }
                self.all(implements, level, Some("(implements)"))?;
                self.all(members, level, None)
            }
            NodeKind::InterfaceDecl { name, members } => {
                self.child(*name, level)?;
                self.all(members, level, None)
            }
            NodeKind::NamedType { name } => self.child(*name, level),
            NodeKind::ArrayType { element } => self.child(*element, level),

            NodeKind::StmtBlock { decls, stmts } => {
                self.all(decls, level, None)?;
                self.all(stmts, level, None)
            }
            NodeKind::IfStmt {
                test,
                then_branch,
                else_branch,
            } => {
                self.labelled(*test, level, "(test)")?;
                self.labelled(*then_branch, level, "(then)")?;
                match else_branch {
                    Some(else_branch) => self.labelled(*else_branch, level, "(else)"),
                    None => Ok(()),
                }
            }
            NodeKind::WhileStmt { test, body } => {
                self.labelled(*test, level, "(test)")?;
                self.labelled(*body, level, "(body)")
            }
            NodeKind::ForStmt {
                init,
                test,
                step,
                body,
            } => {
                self.labelled(*init, level, "(init)")?;
                self.labelled(*test, level, "(test)")?;
                self.labelled(*step, level, "(step)")?;
                self.labelled(*body, level, "(body)")
            }
            NodeKind::ReturnStmt { expr } => self.child(*expr, level),
            NodeKind::PrintStmt { args } => self.all(args, level, Some("(args)")),
            NodeKind::SwitchStmt {
                expr,
                cases,
                default,
            } => {
                self.child(*expr, level)?;
                self.all(cases, level, None)?;
                match default {
                    Some(default) => self.child(*default, level),
                    None => Ok(()),
                }
            }
            NodeKind::Case { value, stmts } => {
                self.child(*value, level)?;
                self.all(stmts, level, None)
            }
            NodeKind::Default { stmts } => self.all(stmts, level, None),

            NodeKind::ArithmeticExpr(operands)
            | NodeKind::RelationalExpr(operands)
            | NodeKind::EqualityExpr(operands)
            | NodeKind::LogicalExpr(operands) => self.operands(operands, level),
            // Assignment lists the value before the target.
            NodeKind::AssignExpr(operands) => {
                self.child(operands.right, level)?;
                self.child(operands.op, level)?;
                match operands.left {
                    Some(left) => self.child(left, level),
                    None => Ok(()),
                }
            }
            NodeKind::PostfixExpr { operand, op } => {
                self.child(*operand, level)?;
                self.child(*op, level)
            }
            NodeKind::FieldAccess { base, field } => {
                if let Some(base) = base {
                    self.child(*base, level)?;
                }
                self.child(*field, level)
            }
            NodeKind::ArrayAccess { base, subscript } => {
                self.child(*base, level)?;
                self.child(*subscript, level)
            }
            NodeKind::Call {
                base,
                field,
                actuals,
            } => {
                if let Some(base) = base {
                    self.child(*base, level)?;
                }
                self.child(*field, level)?;
                self.all(actuals, level, Some("(actuals)"))
            }
            NodeKind::NewExpr { class } => self.child(*class, level),
            NodeKind::NewArrayExpr { size, element } => {
                self.child(*size, level)?;
                self.child(*element, level)
            }

            NodeKind::BreakStmt
            | NodeKind::NullConstant
            | NodeKind::This
            | NodeKind::ReadIntegerExpr
            | NodeKind::ReadLineExpr
            | NodeKind::EmptyExpr => Ok(()),
        }
    }
}
