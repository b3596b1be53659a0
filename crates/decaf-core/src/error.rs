//! Error types and result aliases for the Decaf compiler core.

use crate::Position;
use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the Decaf compiler core.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The tree handed over by the parser violates a structural invariant.
    #[error("Malformed tree: {0}")]
    #[diagnostic(code(decaf::tree))]
    MalformedTree(String),

    /// Semantic analysis finished and reported at least one error.
    ///
    /// `count` includes diagnostics left out of `diagnostics` by a
    /// `max_diagnostics` cap.
    #[error("{count} semantic error(s) found")]
    #[diagnostic(code(decaf::semantic))]
    Semantic {
        count: usize,
        #[related]
        diagnostics: Vec<SemanticDiagnostic>,
    },
}

/// Result type alias using the Decaf Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The kinds of error semantic analysis can report.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SemanticError {
    /// A name was declared twice in one scope level. Always reported as
    /// soon as it is seen.
    #[error("*** Declaration of '{name}' here conflicts with declaration on line {original_line}")]
    #[diagnostic(code(decaf::semantic::redeclaration))]
    Redeclaration { name: String, original_line: usize },

    /// A class or interface name that is never declared anywhere in the
    /// program. Only reported once the whole program has been seen.
    #[error("*** No declaration for class '{name}' found")]
    #[diagnostic(code(decaf::semantic::unknown_type))]
    UnknownType { name: String },
}

/// A semantic error together with the position it was raised at.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("{error}")]
#[diagnostic(code(decaf::semantic))]
pub struct SemanticDiagnostic {
    pub position: Option<Position>,
    pub error: SemanticError,
}

impl SemanticDiagnostic {
    #[must_use]
    pub fn new(position: Option<Position>, error: SemanticError) -> Self {
        Self { position, error }
    }

    /// The line the diagnostic points at, if the node had a position.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.position.map(|position| position.first_line())
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Formats the diagnostic as an `*** Error line N.` header followed by the
    /// message.
    #[must_use]
    pub fn report(&self) -> String {
        match self.line() {
            Some(line) => format!("*** Error line {line}.\n{}", self.error),
            None => format!("*** Error.\n{}", self.error),
        }
    }
}
