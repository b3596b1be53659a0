//! Core types and utilities for the Decaf compiler.
//!
//! This crate provides source positions, resolved types, error handling, and
//! analysis options shared by the tree model and the semantic checker.

pub mod error;
pub mod options;
pub mod position;
pub mod types;

pub use error::{Error, Result, SemanticDiagnostic, SemanticError};
pub use options::AnalysisOptions;
pub use position::{Location, Position};
pub use types::Type;
