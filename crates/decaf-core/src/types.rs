//! Resolved Decaf types and the conversion rules between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A checked type, as stored in scope tables and type annotations.
///
/// `Null` is the type of the `null` literal and `Error` is the type given to
/// anything that failed to check, so one bad operand does not cascade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Int,
    Double,
    Bool,
    Void,
    String,
    Null,
    Error,
    /// A class or interface type, by name.
    Named(String),
    /// Array of the element type.
    Array(Box<Type>),
}

impl Type {
    /// Creates an array type with the given element type.
    #[must_use]
    pub fn array_of(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    /// Unwraps nested array types down to the innermost element type.
    ///
    /// A type that is not an array is its own base type.
    #[must_use]
    pub fn base_type(&self) -> &Type {
        match self {
            Type::Array(element) => element.base_type(),
            other => other,
        }
    }

    /// Returns the element type when this is an array.
    #[must_use]
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Built-in types need no declaration to be used.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        match self {
            Type::Int
            | Type::Double
            | Type::Bool
            | Type::Void
            | Type::String
            | Type::Null
            | Type::Error => true,
            Type::Named(_) | Type::Array(_) => false,
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Double)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// Result type of an arithmetic operation between two operands.
    ///
    /// Two ints stay int; an int meeting a double is lifted to double.
    #[must_use]
    pub fn lift(&self, other: &Type) -> Option<Type> {
        match (self, other) {
            (Type::Int, Type::Int) => Some(Type::Int),
            (Type::Double, Type::Double)
            | (Type::Int, Type::Double)
            | (Type::Double, Type::Int) => Some(Type::Double),
            _ => None,
        }
    }

    /// True when a value of type `self` must be widened to become `target`.
    #[must_use]
    pub fn widens_to(&self, target: &Type) -> bool {
        matches!((self, target), (Type::Int, Type::Double))
    }

    /// Checks whether a value of type `source` may be stored where `self` is
    /// expected.
    ///
    /// `Error` is compatible with everything so a single failure is not
    /// reported again by every enclosing expression.
    #[must_use]
    pub fn accepts(&self, source: &Type) -> bool {
        match (self, source) {
            (Type::Error, _) | (_, Type::Error) => true,
            (Type::Named(_), Type::Null) => true,
            (target, source) if source.widens_to(target) => true,
            (Type::Array(target), Type::Array(source)) => target == source,
            (target, source) => target == source,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Double => write!(f, "double"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::String => write!(f, "string"),
            Type::Null => write!(f, "null"),
            Type::Error => write!(f, "error"),
            Type::Named(name) => write!(f, "{name}"),
            Type::Array(element) => write!(f, "{element}[]"),
        }
    }
}
