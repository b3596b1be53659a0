//! Semantic analysis for Decaf programs.
//!
//! This crate binds every declaration of a parsed tree into a chain of
//! [`ForkTable`] levels, reports redeclarations as they are found, and
//! settles references to unknown classes only once the whole program has
//! been seen. Expressions are typed along the way and the result is handed
//! back as [`TypeAnnotations`].

mod annotations;
mod checker;
mod fork_table;

pub use annotations::TypeAnnotations;
pub use fork_table::{BindingKind, ForkTable, Redeclaration, TypeAnnotation};

use checker::{Checker, Report, WalkState};
use decaf_ast::{Ast, NodeKind};
use decaf_core::{AnalysisOptions, Error, Result, SemanticDiagnostic};

/// The outcome of analyzing one program.
#[derive(Debug)]
pub struct Analysis {
    /// Everything bound at program level.
    pub top_level: ForkTable<'static>,
    /// Immediate errors in walk order, followed by unknown-type errors in
    /// the order the names were used.
    pub diagnostics: Vec<SemanticDiagnostic>,
    /// Diagnostics found but left out of `diagnostics` by `max_diagnostics`.
    pub suppressed: usize,
    pub types: TypeAnnotations,
}

impl Analysis {
    /// True when analysis found any error, reported or suppressed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors found, including suppressed ones.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.len() + self.suppressed
    }

    /// Turns a run with diagnostics into [`Error::Semantic`].
    ///
    /// # Errors
    /// Returns the reported diagnostics when at least one error was found,
    /// even if the cap left none of them in the list.
    pub fn into_result(self) -> Result<Self> {
        if self.has_errors() {
            return Err(Error::Semantic {
                count: self.error_count(),
                diagnostics: self.diagnostics,
            });
        }
        Ok(self)
    }
}

/// Performs semantic analysis on a Decaf program with default options.
///
/// Semantic errors do not make this fail; they are listed in
/// [`Analysis::diagnostics`].
///
/// # Errors
/// Returns [`Error::MalformedTree`] when the root is not a `Program` node.
///
/// # Examples
/// ```
/// use decaf_ast::AstBuilder;
/// use decaf_core::Position;
/// use decaf_semantic::analyze;
///
/// let mut builder = AstBuilder::new();
/// let ty = builder.named_type(Position::line(1), "Missing");
/// let x = builder.var_decl(Position::line(1), "x", ty);
/// let program = builder.program(Position::line(1), vec![x]);
/// let ast = builder.finish(program).unwrap();
///
/// let analysis = analyze(&ast).unwrap();
/// assert_eq!(analysis.diagnostics.len(), 1);
/// ```
pub fn analyze(ast: &Ast) -> Result<Analysis> {
    analyze_with_options(ast, &AnalysisOptions::default())
}

/// Performs semantic analysis, trimming the diagnostics to
/// `options.max_diagnostics` when set.
///
/// Trimmed diagnostics are still counted in [`Analysis::suppressed`], so a
/// cap never hides the fact that the program has errors.
///
/// # Errors
/// Returns [`Error::MalformedTree`] when the root is not a `Program` node.
pub fn analyze_with_options(ast: &Ast, options: &AnalysisOptions) -> Result<Analysis> {
    let root = ast.root();
    if !matches!(ast.kind(root), NodeKind::Program { .. }) {
        return Err(Error::MalformedTree(format!(
            "expected a Program root, found {}",
            ast.kind(root).name()
        )));
    }
    tracing::debug!(nodes = ast.len(), "starting semantic analysis");

    let checker = Checker::new(ast);
    let mut top_level = ForkTable::new();
    let mut report = Report::default();
    {
        let mut state = WalkState::new(&mut top_level);
        checker.check_program(root, &mut state, &mut report);
    }

    let Report {
        mut errors,
        pending,
        types,
    } = report;
    errors.extend(checker.finalize(pending, &top_level));
    let found = errors.len();
    if let Some(max) = options.max_diagnostics {
        errors.truncate(max);
    }
    let suppressed = found - errors.len();

    tracing::debug!(
        bindings = top_level.len(),
        diagnostics = found,
        suppressed,
        "semantic analysis finished"
    );
    Ok(Analysis {
        top_level,
        diagnostics: errors,
        suppressed,
        types,
    })
}
