//! Node definitions for the Decaf syntax tree.

use decaf_core::{Position, Type};
use std::fmt;

/// Index of a node inside its [`Ast`](crate::Ast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tree node: its kind, its source position, and the node that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Option<Position>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// The node this one was adopted by. `None` for the root and for nodes
    /// that were never attached to a parent.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Built-in type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Double,
    Bool,
    Void,
    String,
    Null,
    Error,
}

impl Primitive {
    #[must_use]
    pub fn to_type(self) -> Type {
        match self {
            Self::Int => Type::Int,
            Self::Double => Type::Double,
            Self::Bool => Type::Bool,
            Self::Void => Type::Void,
            Self::String => Type::String,
            Self::Null => Type::Null,
            Self::Error => Type::Error,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_type().fmt(f)
    }
}

/// Operator tokens kept as their own nodes so they carry a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    // Relational
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Equality
    Equal,
    NotEqual,

    // Logical
    And,
    Or,
    Not,

    Assign,
    Increment,
    Decrement,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Not => "!",
            Self::Assign => "=",
            Self::Increment => "++",
            Self::Decrement => "--",
        };
        write!(f, "{symbol}")
    }
}

/// Children of a binary (or prefix unary) operator expression.
///
/// `left` is `None` for prefix forms such as `-x` and `!b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operands {
    pub left: Option<NodeId>,
    pub op: NodeId,
    pub right: NodeId,
}

/// Every kind of node the parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Declarations
    Program {
        decls: Vec<NodeId>,
    },
    VarDecl {
        name: NodeId,
        ty: NodeId,
    },
    FnDecl {
        name: NodeId,
        return_type: NodeId,
        formals: Vec<NodeId>,
        /// `None` for interface prototypes.
        body: Option<NodeId>,
    },
    ClassDecl {
        name: NodeId,
        extends: Option<NodeId>,
        implements: Vec<NodeId>,
        members: Vec<NodeId>,
    },
    InterfaceDecl {
        name: NodeId,
        members: Vec<NodeId>,
    },
    Identifier(String),

    // Types
    PrimitiveType(Primitive),
    NamedType {
        name: NodeId,
    },
    ArrayType {
        element: NodeId,
    },

    // Statements
    StmtBlock {
        decls: Vec<NodeId>,
        stmts: Vec<NodeId>,
    },
    IfStmt {
        test: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    WhileStmt {
        test: NodeId,
        body: NodeId,
    },
    ForStmt {
        init: NodeId,
        test: NodeId,
        step: NodeId,
        body: NodeId,
    },
    BreakStmt,
    ReturnStmt {
        expr: NodeId,
    },
    PrintStmt {
        args: Vec<NodeId>,
    },
    SwitchStmt {
        expr: NodeId,
        cases: Vec<NodeId>,
        default: Option<NodeId>,
    },
    Case {
        value: NodeId,
        stmts: Vec<NodeId>,
    },
    Default {
        stmts: Vec<NodeId>,
    },

    // Expressions
    IntConstant(i64),
    DoubleConstant(f64),
    BoolConstant(bool),
    /// The literal as written, quotes included.
    StringConstant(String),
    NullConstant,
    Operator(Operator),
    ArithmeticExpr(Operands),
    RelationalExpr(Operands),
    EqualityExpr(Operands),
    LogicalExpr(Operands),
    AssignExpr(Operands),
    PostfixExpr {
        operand: NodeId,
        op: NodeId,
    },
    /// A plain variable reference when `base` is `None`.
    FieldAccess {
        base: Option<NodeId>,
        field: NodeId,
    },
    ArrayAccess {
        base: NodeId,
        subscript: NodeId,
    },
    Call {
        base: Option<NodeId>,
        field: NodeId,
        actuals: Vec<NodeId>,
    },
    NewExpr {
        class: NodeId,
    },
    NewArrayExpr {
        size: NodeId,
        element: NodeId,
    },
    This,
    ReadIntegerExpr,
    ReadLineExpr,
    /// Stands in for an omitted expression, e.g. a bare `return;`.
    EmptyExpr,
}

impl NodeKind {
    /// The name the pretty printer shows for this kind of node.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Program { .. } => "Program",
            Self::VarDecl { .. } => "VarDecl",
            Self::FnDecl { .. } => "FnDecl",
            Self::ClassDecl { .. } => "ClassDecl",
            Self::InterfaceDecl { .. } => "InterfaceDecl",
            Self::Identifier(_) => "Identifier",
            Self::PrimitiveType(_) => "Type",
            Self::NamedType { .. } => "NamedType",
            Self::ArrayType { .. } => "ArrayType",
            Self::StmtBlock { .. } => "StmtBlock",
            Self::IfStmt { .. } => "IfStmt",
            Self::WhileStmt { .. } => "WhileStmt",
            Self::ForStmt { .. } => "ForStmt",
            Self::BreakStmt => "BreakStmt",
            Self::ReturnStmt { .. } => "ReturnStmt",
            Self::PrintStmt { .. } => "PrintStmt",
            Self::SwitchStmt { .. } => "SwitchStmt",
            Self::Case { .. } => "Case",
            Self::Default { .. } => "Default",
            Self::IntConstant(_) => "IntConstant",
            Self::DoubleConstant(_) => "DoubleConstant",
            Self::BoolConstant(_) => "BoolConstant",
            Self::StringConstant(_) => "StringConstant",
            Self::NullConstant => "NullConstant",
            Self::Operator(_) => "Operator",
            Self::ArithmeticExpr(_) => "ArithmeticExpr",
            Self::RelationalExpr(_) => "RelationalExpr",
            Self::EqualityExpr(_) => "EqualityExpr",
            Self::LogicalExpr(_) => "LogicalExpr",
            Self::AssignExpr(_) => "AssignExpr",
            Self::PostfixExpr { .. } => "PostfixExpr",
            Self::FieldAccess { .. } => "FieldAccess",
            Self::ArrayAccess { .. } => "ArrayAccess",
            Self::Call { .. } => "Call",
            Self::NewExpr { .. } => "NewExpr",
            Self::NewArrayExpr { .. } => "NewArrayExpr",
            Self::This => "This",
            Self::ReadIntegerExpr => "ReadIntegerExpr",
            Self::ReadLineExpr => "ReadLineExpr",
            Self::EmptyExpr => "Empty",
        }
    }

    /// Direct children in declared order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        let mut children = Vec::new();
        match self {
            Self::Program { decls } => children.extend(decls),
            Self::VarDecl { name, ty } => children.extend([*ty, *name]),
            Self::FnDecl {
                name,
                return_type,
                formals,
                body,
            } => {
                children.extend([*return_type, *name]);
                children.extend(formals);
                children.extend(body);
            }
            Self::ClassDecl {
                name,
                extends,
                implements,
                members,
            } => {
                children.push(*name);
                children.extend(extends);
                children.extend(implements);
                children.extend(members);
            }
            Self::InterfaceDecl { name, members } => {
                children.push(*name);
                children.extend(members);
            }
            Self::NamedType { name } => children.push(*name),
            Self::ArrayType { element } => children.push(*element),
            Self::StmtBlock { decls, stmts } => {
                children.extend(decls);
                children.extend(stmts);
            }
            Self::IfStmt {
                test,
                then_branch,
                else_branch,
            } => {
                children.extend([*test, *then_branch]);
                children.extend(else_branch);
            }
            Self::WhileStmt { test, body } => children.extend([*test, *body]),
            Self::ForStmt {
                init,
                test,
                step,
                body,
            } => children.extend([*init, *test, *step, *body]),
            Self::ReturnStmt { expr } => children.push(*expr),
            Self::PrintStmt { args } => children.extend(args),
            Self::SwitchStmt {
                expr,
                cases,
                default,
            } => {
                children.push(*expr);
                children.extend(cases);
                children.extend(default);
            }
            Self::Case { value, stmts } => {
                children.push(*value);
                children.extend(stmts);
            }
            Self::Default { stmts } => children.extend(stmts),
            Self::ArithmeticExpr(operands)
            | Self::RelationalExpr(operands)
            | Self::EqualityExpr(operands)
            | Self::LogicalExpr(operands) => {
                children.extend(operands.left);
                children.extend([operands.op, operands.right]);
            }
            Self::AssignExpr(operands) => {
                children.push(operands.right);
                children.push(operands.op);
                children.extend(operands.left);
            }
            Self::PostfixExpr { operand, op } => children.extend([*operand, *op]),
            Self::FieldAccess { base, field } => {
                children.extend(base);
                children.push(*field);
            }
            Self::ArrayAccess { base, subscript } => children.extend([*base, *subscript]),
            Self::Call {
                base,
                field,
                actuals,
            } => {
                children.extend(base);
                children.push(*field);
                children.extend(actuals);
            }
            Self::NewExpr { class } => children.push(*class),
            Self::NewArrayExpr { size, element } => children.extend([*size, *element]),
            Self::Identifier(_)
            | Self::PrimitiveType(_)
            | Self::BreakStmt
            | Self::IntConstant(_)
            | Self::DoubleConstant(_)
            | Self::BoolConstant(_)
            | Self::StringConstant(_)
            | Self::NullConstant
            | Self::Operator(_)
            | Self::This
            | Self::ReadIntegerExpr
            | Self::ReadLineExpr
            | Self::EmptyExpr => {}
        }
        children
    }

    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Self::VarDecl { .. }
                | Self::FnDecl { .. }
                | Self::ClassDecl { .. }
                | Self::InterfaceDecl { .. }
        )
    }

    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::PrimitiveType(_) | Self::NamedType { .. } | Self::ArrayType { .. }
        )
    }

    #[must_use]
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::IntConstant(_)
                | Self::DoubleConstant(_)
                | Self::BoolConstant(_)
                | Self::StringConstant(_)
                | Self::NullConstant
                | Self::ArithmeticExpr(_)
                | Self::RelationalExpr(_)
                | Self::EqualityExpr(_)
                | Self::LogicalExpr(_)
                | Self::AssignExpr(_)
                | Self::PostfixExpr { .. }
                | Self::FieldAccess { .. }
                | Self::ArrayAccess { .. }
                | Self::Call { .. }
                | Self::NewExpr { .. }
                | Self::NewArrayExpr { .. }
                | Self::This
                | Self::ReadIntegerExpr
                | Self::ReadLineExpr
                | Self::EmptyExpr
        )
    }
}
