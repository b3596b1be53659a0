//! Syntax tree model for Decaf programs.
//!
//! The tree is produced by an external parser and is read-only afterwards.
//! Nodes live in an arena ([`Ast`]) and refer to each other by [`NodeId`];
//! each node knows its parent so checks can look outward, e.g. to find the
//! class that `this` refers to.

mod builder;
mod node;
mod printer;
mod tree;

pub use builder::AstBuilder;
pub use node::{Node, NodeId, NodeKind, Operands, Operator, Primitive};
pub use printer::{Printed, format_double};
pub use tree::Ast;
