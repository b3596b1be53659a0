//! Semantic walker implementation modules.

mod core;
mod declarations;
mod expressions;
mod resolver;
mod statements;

pub(crate) use self::core::{Checker, Report, WalkState};
