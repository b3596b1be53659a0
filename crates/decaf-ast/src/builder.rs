//! Bottom-up construction of syntax trees.
//!
//! The parser (or a test) builds children first and then their parent. Every
//! push adopts the children named by the new node's kind, which is the one
//! and only time a parent link is written.

use crate::node::{Node, NodeId, NodeKind, Operands, Operator, Primitive};
use crate::tree::Ast;
use decaf_core::{Error, Position, Result};

/// Builds an [`Ast`] one node at a time.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and links each of its children back to it.
    ///
    /// # Errors
    /// Returns [`Error::MalformedTree`] if a child id is unknown, already
    /// has a parent, or is listed twice.
    pub fn try_push(
        &mut self,
        kind: NodeKind,
        position: impl Into<Option<Position>>,
    ) -> Result<NodeId> {
        let id = u32::try_from(self.nodes.len())
            .map(NodeId)
            .map_err(|_| Error::MalformedTree("too many nodes".to_string()))?;

        let children = kind.children();
        let mut distinct = children.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() != children.len() {
            return Err(Error::MalformedTree(format!(
                "{} lists the same child twice",
                kind.name()
            )));
        }

        for &child in &children {
            let node = self.nodes.get(child.index()).ok_or_else(|| {
                Error::MalformedTree(format!("{} refers to unknown node {child}", kind.name()))
            })?;
            if let Some(parent) = node.parent {
                return Err(Error::MalformedTree(format!(
                    "node {child} is already a child of {parent}"
                )));
            }
        }

        for child in children {
            self.nodes[child.index()].parent = Some(id);
        }

        self.nodes.push(Node {
            kind,
            position: position.into(),
            parent: None,
        });
        Ok(id)
    }

    /// Adds a node, see [`AstBuilder::try_push`].
    ///
    /// # Panics
    /// Panics if the node would break the tree shape.
    pub fn push(&mut self, kind: NodeKind, position: impl Into<Option<Position>>) -> NodeId {
        self.try_push(kind, position).unwrap_or_else(|error| panic!("{error}"))
    }

    /// Finishes the tree with `root` as its root node.
    ///
    /// # Errors
    /// Returns [`Error::MalformedTree`] if `root` is unknown or is itself a
    /// child of another node.
    pub fn finish(self, root: NodeId) -> Result<Ast> {
        match self.nodes.get(root.index()) {
            None => Err(Error::MalformedTree(format!("unknown root node {root}"))),
            Some(node) if node.parent.is_some() => Err(Error::MalformedTree(format!(
                "root node {root} has a parent"
            ))),
            Some(_) => Ok(Ast {
                nodes: self.nodes,
                root,
            }),
        }
    }

    // Declarations

    pub fn identifier(&mut self, position: impl Into<Option<Position>>, name: &str) -> NodeId {
        self.push(NodeKind::Identifier(name.to_string()), position)
    }

    pub fn program(&mut self, position: impl Into<Option<Position>>, decls: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::Program { decls }, position)
    }

    pub fn var_decl(
        &mut self,
        position: impl Into<Option<Position>>,
        name: &str,
        ty: NodeId,
    ) -> NodeId {
        let position = position.into();
        let name = self.identifier(position, name);
        self.push(NodeKind::VarDecl { name, ty }, position)
    }

    pub fn fn_decl(
        &mut self,
        position: impl Into<Option<Position>>,
        name: &str,
        return_type: NodeId,
        formals: Vec<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        let position = position.into();
        let name = self.identifier(position, name);
        self.push(
            NodeKind::FnDecl {
                name,
                return_type,
                formals,
                body,
            },
            position,
        )
    }

    pub fn class_decl(
        &mut self,
        position: impl Into<Option<Position>>,
        name: &str,
        extends: Option<NodeId>,
        implements: Vec<NodeId>,
        members: Vec<NodeId>,
    ) -> NodeId {
        let position = position.into();
        let name = self.identifier(position, name);
        self.push(
            NodeKind::ClassDecl {
                name,
                extends,
                implements,
                members,
            },
            position,
        )
    }

    pub fn interface_decl(
        &mut self,
        position: impl Into<Option<Position>>,
        name: &str,
        members: Vec<NodeId>,
    ) -> NodeId {
        let position = position.into();
        let name = self.identifier(position, name);
        self.push(NodeKind::InterfaceDecl { name, members }, position)
    }

    // Types

    pub fn primitive(
        &mut self,
        position: impl Into<Option<Position>>,
        primitive: Primitive,
    ) -> NodeId {
        self.push(NodeKind::PrimitiveType(primitive), position)
    }

    pub fn named_type(&mut self, position: impl Into<Option<Position>>, name: &str) -> NodeId {
        let position = position.into();
        let name = self.identifier(position, name);
        self.push(NodeKind::NamedType { name }, position)
    }

    pub fn array_type(&mut self, position: impl Into<Option<Position>>, element: NodeId) -> NodeId {
        self.push(NodeKind::ArrayType { element }, position)
    }

    // Statements

    pub fn block(
        &mut self,
        position: impl Into<Option<Position>>,
        decls: Vec<NodeId>,
        stmts: Vec<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::StmtBlock { decls, stmts }, position)
    }

    pub fn if_stmt(
        &mut self,
        position: impl Into<Option<Position>>,
        test: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    ) -> NodeId {
        self.push(
            NodeKind::IfStmt {
                test,
                then_branch,
                else_branch,
            },
            position,
        )
    }

    pub fn while_stmt(
        &mut self,
        position: impl Into<Option<Position>>,
        test: NodeId,
        body: NodeId,
    ) -> NodeId {
        self.push(NodeKind::WhileStmt { test, body }, position)
    }

    pub fn for_stmt(
        &mut self,
        position: impl Into<Option<Position>>,
        init: NodeId,
        test: NodeId,
        step: NodeId,
        body: NodeId,
    ) -> NodeId {
        self.push(
            NodeKind::ForStmt {
                init,
                test,
                step,
                body,
            },
            position,
        )
    }

    pub fn break_stmt(&mut self, position: impl Into<Option<Position>>) -> NodeId {
        self.push(NodeKind::BreakStmt, position)
    }

    pub fn return_stmt(&mut self, position: impl Into<Option<Position>>, expr: NodeId) -> NodeId {
        self.push(NodeKind::ReturnStmt { expr }, position)
    }

    pub fn print_stmt(
        &mut self,
        position: impl Into<Option<Position>>,
        args: Vec<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::PrintStmt { args }, position)
    }

    pub fn switch_stmt(
        &mut self,
        position: impl Into<Option<Position>>,
        expr: NodeId,
        cases: Vec<NodeId>,
        default: Option<NodeId>,
    ) -> NodeId {
        self.push(
            NodeKind::SwitchStmt {
                expr,
                cases,
                default,
            },
            position,
        )
    }

    pub fn case(
        &mut self,
        position: impl Into<Option<Position>>,
        value: NodeId,
        stmts: Vec<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::Case { value, stmts }, position)
    }

    pub fn default_case(
        &mut self,
        position: impl Into<Option<Position>>,
        stmts: Vec<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::Default { stmts }, position)
    }

    // Expressions

    pub fn int_constant(&mut self, position: impl Into<Option<Position>>, value: i64) -> NodeId {
        self.push(NodeKind::IntConstant(value), position)
    }

    pub fn double_constant(&mut self, position: impl Into<Option<Position>>, value: f64) -> NodeId {
        self.push(NodeKind::DoubleConstant(value), position)
    }

    pub fn bool_constant(&mut self, position: impl Into<Option<Position>>, value: bool) -> NodeId {
        self.push(NodeKind::BoolConstant(value), position)
    }

    pub fn string_constant(
        &mut self,
        position: impl Into<Option<Position>>,
        literal: &str,
    ) -> NodeId {
        self.push(NodeKind::StringConstant(literal.to_string()), position)
    }

    pub fn null_constant(&mut self, position: impl Into<Option<Position>>) -> NodeId {
        self.push(NodeKind::NullConstant, position)
    }

    /// Builds an operator expression of the family `op` belongs to.
    ///
    /// `left` is `None` for prefix `-` and `!`. The operator node shares the
    /// expression's position.
    ///
    /// # Errors
    /// Returns [`Error::MalformedTree`] for `++` and `--`, which only exist
    /// in postfix form (see [`AstBuilder::postfix`]), or if a child cannot
    /// be adopted.
    pub fn try_binary(
        &mut self,
        position: impl Into<Option<Position>>,
        left: Option<NodeId>,
        op: Operator,
        right: NodeId,
    ) -> Result<NodeId> {
        let family: fn(Operands) -> NodeKind = match op {
            Operator::Add
            | Operator::Subtract
            | Operator::Multiply
            | Operator::Divide
            | Operator::Modulo => NodeKind::ArithmeticExpr,
            Operator::Less | Operator::LessEqual | Operator::Greater | Operator::GreaterEqual => {
                NodeKind::RelationalExpr
            }
            Operator::Equal | Operator::NotEqual => NodeKind::EqualityExpr,
            Operator::And | Operator::Or | Operator::Not => NodeKind::LogicalExpr,
            Operator::Assign => NodeKind::AssignExpr,
            Operator::Increment | Operator::Decrement => {
                return Err(Error::MalformedTree(format!("`{op}` is a postfix operator")));
            }
        };

        let position = position.into();
        let op = self.try_push(NodeKind::Operator(op), position)?;
        self.try_push(family(Operands { left, op, right }), position)
    }

    /// Builds an operator expression, see [`AstBuilder::try_binary`].
    ///
    /// # Panics
    /// Panics if `op` is a postfix operator or the node would break the
    /// tree shape.
    pub fn binary(
        &mut self,
        position: impl Into<Option<Position>>,
        left: Option<NodeId>,
        op: Operator,
        right: NodeId,
    ) -> NodeId {
        self.try_binary(position, left, op, right).unwrap_or_else(|error| panic!("{error}"))
    }

    pub fn assign(
        &mut self,
        position: impl Into<Option<Position>>,
        target: NodeId,
        value: NodeId,
    ) -> NodeId {
        self.binary(position, Some(target), Operator::Assign, value)
    }

    pub fn postfix(
        &mut self,
        position: impl Into<Option<Position>>,
        operand: NodeId,
        op: Operator,
    ) -> NodeId {
        let position = position.into();
        let op = self.push(NodeKind::Operator(op), position);
        self.push(NodeKind::PostfixExpr { operand, op }, position)
    }

    /// A reference to a variable by name.
    pub fn var_ref(&mut self, position: impl Into<Option<Position>>, name: &str) -> NodeId {
        self.field_access(position, None, name)
    }

    pub fn field_access(
        &mut self,
        position: impl Into<Option<Position>>,
        base: Option<NodeId>,
        field: &str,
    ) -> NodeId {
        let position = position.into();
        let field = self.identifier(position, field);
        self.push(NodeKind::FieldAccess { base, field }, position)
    }

    pub fn array_access(
        &mut self,
        position: impl Into<Option<Position>>,
        base: NodeId,
        subscript: NodeId,
    ) -> NodeId {
        self.push(NodeKind::ArrayAccess { base, subscript }, position)
    }

    pub fn call(
        &mut self,
        position: impl Into<Option<Position>>,
        base: Option<NodeId>,
        field: &str,
        actuals: Vec<NodeId>,
    ) -> NodeId {
        let position = position.into();
        let field = self.identifier(position, field);
        self.push(
            NodeKind::Call {
                base,
                field,
                actuals,
            },
            position,
        )
    }

    pub fn new_expr(&mut self, position: impl Into<Option<Position>>, class: &str) -> NodeId {
        let position = position.into();
        let class = self.named_type(position, class);
        self.push(NodeKind::NewExpr { class }, position)
    }

    pub fn new_array(
        &mut self,
        position: impl Into<Option<Position>>,
        size: NodeId,
        element: NodeId,
    ) -> NodeId {
        self.push(NodeKind::NewArrayExpr { size, element }, position)
    }

    pub fn this(&mut self, position: impl Into<Option<Position>>) -> NodeId {
        self.push(NodeKind::This, position)
    }

    pub fn read_integer(&mut self, position: impl Into<Option<Position>>) -> NodeId {
        self.push(NodeKind::ReadIntegerExpr, position)
    }

    pub fn read_line(&mut self, position: impl Into<Option<Position>>) -> NodeId {
        self.push(NodeKind::ReadLineExpr, position)
    }

    /// The placeholder for an omitted expression; it never has a position.
    pub fn empty(&mut self) -> NodeId {
        self.push(NodeKind::EmptyExpr, None)
    }
}
