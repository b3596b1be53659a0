//! Common test utilities for semantic analysis tests.

#![allow(dead_code)]

use decaf_ast::{Ast, AstBuilder, NodeId, Primitive};
use decaf_core::Position;
use decaf_semantic::{Analysis, analyze};

/// A position on `line`.
pub fn at(line: usize) -> Position {
    Position::line(line)
}

/// Routes `tracing` output to the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Finishes the tree and analyzes it.
pub fn analyze_program(builder: AstBuilder, program: NodeId) -> (Ast, Analysis) {
    init_tracing();
    let ast = builder.finish(program).expect("tree should be well formed");
    let analysis = analyze(&ast).expect("root is a program");
    (ast, analysis)
}

/// Adds `<primitive> <name>;` on `line`.
pub fn var(builder: &mut AstBuilder, line: usize, name: &str, primitive: Primitive) -> NodeId {
    let ty = builder.primitive(at(line), primitive);
    builder.var_decl(at(line), name, ty)
}

/// Adds `<class> <name>;` on `line`.
pub fn class_var(builder: &mut AstBuilder, line: usize, name: &str, class: &str) -> NodeId {
    let ty = builder.named_type(at(line), class);
    builder.var_decl(at(line), name, ty)
}

/// Every diagnostic as `line: message`, in reporting order.
pub fn summarize(analysis: &Analysis) -> Vec<String> {
    analysis
        .diagnostics
        .iter()
        .map(|diagnostic| {
            let line = diagnostic
                .line()
                .map_or_else(|| "-".to_string(), |line| line.to_string());
            format!("{line}: {}", diagnostic.message())
        })
        .collect()
}
