//! Declaration binding and diagnostic tests.

mod common;

use common::{analyze_program, at, class_var, summarize, var};
use decaf_ast::{AstBuilder, NodeKind, Primitive};
use decaf_core::{AnalysisOptions, Error, SemanticError, Type};
use decaf_semantic::{BindingKind, analyze, analyze_with_options};

#[test]
fn test_empty_program() {
    let mut builder = AstBuilder::new();
    let program = builder.program(at(1), vec![]);
    let (_, analysis) = analyze_program(builder, program);

    assert!(!analysis.has_errors());
    assert!(analysis.top_level.is_empty());
}

#[test]
fn test_class_used_before_its_declaration() {
    let mut builder = AstBuilder::new();
    let f = class_var(&mut builder, 1, "f", "Foo");
    let foo = builder.class_decl(at(2), "Foo", None, vec![], vec![]);
    let program = builder.program(at(1), vec![f, foo]);
    let (_, analysis) = analyze_program(builder, program);

    assert!(!analysis.has_errors(), "{:?}", summarize(&analysis));
    assert_eq!(
        analysis.top_level.get("f").unwrap().ty(),
        &Type::Named("Foo".to_string())
    );
    assert_eq!(
        analysis.top_level.get("Foo").unwrap().kind(),
        BindingKind::Class
    );
}

#[test]
fn test_unknown_class_is_reported_at_its_use() {
    let mut builder = AstBuilder::new();
    let x = var(&mut builder, 1, "x", Primitive::Int);
    let b = class_var(&mut builder, 3, "b", "Bar");
    let program = builder.program(at(1), vec![x, b]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(analysis.diagnostics.len(), 1);
    let diagnostic = &analysis.diagnostics[0];
    assert_eq!(diagnostic.line(), Some(3));
    assert_eq!(
        diagnostic.error,
        SemanticError::UnknownType {
            name: "Bar".to_string()
        }
    );
    assert_eq!(diagnostic.message(), "*** No declaration for class 'Bar' found");
    // The variable is still bound.
    assert!(analysis.top_level.contains_local("b"));
}

#[test]
fn test_unknown_array_element_type() {
    let mut builder = AstBuilder::new();
    let named = builder.named_type(at(2), "Ghost");
    let array = builder.array_type(at(2), named);
    let matrix = builder.array_type(at(2), array);
    let grid = builder.var_decl(at(2), "grid", matrix);
    let program = builder.program(at(1), vec![grid]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(summarize(&analysis), ["2: *** No declaration for class 'Ghost' found"]);
}

#[test]
fn test_redeclaration_cites_original_line() {
    let mut builder = AstBuilder::new();
    let first = var(&mut builder, 1, "x", Primitive::Int);
    let second = var(&mut builder, 2, "x", Primitive::Double);
    let program = builder.program(at(1), vec![first, second]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        ["2: *** Declaration of 'x' here conflicts with declaration on line 1"]
    );
    // The first binding wins.
    assert_eq!(analysis.top_level.get("x").unwrap().ty(), &Type::Int);
    assert_eq!(analysis.top_level.get("x").unwrap().node(), first);
}

#[test]
fn test_function_clashes_with_variable() {
    let mut builder = AstBuilder::new();
    let x = var(&mut builder, 1, "f", Primitive::Int);
    let ret = builder.primitive(at(4), Primitive::Void);
    let body = builder.block(at(4), vec![], vec![]);
    let f = builder.fn_decl(at(4), "f", ret, vec![], Some(body));
    let program = builder.program(at(1), vec![x, f]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        ["4: *** Declaration of 'f' here conflicts with declaration on line 1"]
    );
}

#[test]
fn test_original_without_position_reports_line_zero() {
    let mut builder = AstBuilder::new();
    let ty = builder.primitive(None, Primitive::Int);
    let first = builder.var_decl(None, "x", ty);
    let second = var(&mut builder, 5, "x", Primitive::Int);
    let program = builder.program(at(1), vec![first, second]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        ["5: *** Declaration of 'x' here conflicts with declaration on line 0"]
    );
}

#[test]
fn test_formals_and_body_are_separate_levels() {
    let mut builder = AstBuilder::new();
    let formal = var(&mut builder, 1, "n", Primitive::Int);
    let local = var(&mut builder, 2, "n", Primitive::Double);
    let body = builder.block(at(1), vec![local], vec![]);
    let ret = builder.primitive(at(1), Primitive::Void);
    let f = builder.fn_decl(at(1), "f", ret, vec![formal], Some(body));
    let program = builder.program(at(1), vec![f]);
    let (_, analysis) = analyze_program(builder, program);

    assert!(!analysis.has_errors(), "{:?}", summarize(&analysis));
}

#[test]
fn test_formal_shadows_global_and_field() {
    // int x; class Box { bool x; void set(double x) {} }
    let mut builder = AstBuilder::new();
    let global = var(&mut builder, 1, "x", Primitive::Int);
    let field = var(&mut builder, 3, "x", Primitive::Bool);
    let formal = var(&mut builder, 4, "x", Primitive::Double);
    let body = builder.block(at(4), vec![], vec![]);
    let ret = builder.primitive(at(4), Primitive::Void);
    let set = builder.fn_decl(at(4), "set", ret, vec![formal], Some(body));
    let class = builder.class_decl(at(2), "Box", None, vec![], vec![field, set]);
    let program = builder.program(at(1), vec![global, class]);
    let (_, analysis) = analyze_program(builder, program);

    assert!(!analysis.has_errors(), "{:?}", summarize(&analysis));
    assert_eq!(analysis.types.type_of(formal), Some(&Type::Double));
    assert_eq!(analysis.top_level.get("x").unwrap().ty(), &Type::Int);
}

#[test]
fn test_duplicate_formals_are_reported() {
    let mut builder = AstBuilder::new();
    let a = var(&mut builder, 1, "a", Primitive::Int);
    let again = var(&mut builder, 1, "a", Primitive::Bool);
    let ret = builder.primitive(at(1), Primitive::Void);
    let f = builder.fn_decl(at(1), "f", ret, vec![a, again], None);
    let program = builder.program(at(1), vec![f]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(analysis.diagnostics.len(), 1);
    assert!(matches!(
        &analysis.diagnostics[0].error,
        SemanticError::Redeclaration { name, original_line: 1 } if name == "a"
    ));
}

#[test]
fn test_nested_block_shadows_and_duplicates() {
    let mut builder = AstBuilder::new();
    let outer = var(&mut builder, 2, "x", Primitive::Int);
    let shadow = var(&mut builder, 4, "x", Primitive::Bool);
    let clash = var(&mut builder, 5, "x", Primitive::Double);
    let inner = builder.block(at(3), vec![shadow, clash], vec![]);
    let body = builder.block(at(1), vec![outer], vec![inner]);
    let ret = builder.primitive(at(1), Primitive::Void);
    let main = builder.fn_decl(at(1), "main", ret, vec![], Some(body));
    let program = builder.program(at(1), vec![main]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        ["5: *** Declaration of 'x' here conflicts with declaration on line 4"]
    );
    // Locals never reach the top level.
    assert!(!analysis.top_level.contains_in_chain("x"));
    assert!(analysis.top_level.contains_local("main"));
}

#[test]
fn test_pending_names_ignore_discarded_levels() {
    // void f() { Foo a; { int Foo; } }
    let mut builder = AstBuilder::new();
    let a = class_var(&mut builder, 2, "a", "Foo");
    let local = var(&mut builder, 3, "Foo", Primitive::Int);
    let inner = builder.block(at(3), vec![local], vec![]);
    let body = builder.block(at(1), vec![a], vec![inner]);
    let ret = builder.primitive(at(1), Primitive::Void);
    let f = builder.fn_decl(at(1), "f", ret, vec![], Some(body));
    let program = builder.program(at(1), vec![f]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(summarize(&analysis), ["2: *** No declaration for class 'Foo' found"]);
}

#[test]
fn test_visible_name_is_not_deferred() {
    // void f(int Foo) { Foo a; } sees the formal, so nothing is pending.
    let mut builder = AstBuilder::new();
    let formal = var(&mut builder, 1, "Foo", Primitive::Int);
    let a = class_var(&mut builder, 2, "a", "Foo");
    let body = builder.block(at(1), vec![a], vec![]);
    let ret = builder.primitive(at(1), Primitive::Void);
    let f = builder.fn_decl(at(1), "f", ret, vec![formal], Some(body));
    let program = builder.program(at(1), vec![f]);
    let (_, analysis) = analyze_program(builder, program);

    assert!(!analysis.has_errors(), "{:?}", summarize(&analysis));
}

#[test]
fn test_immediate_errors_come_before_promoted_ones() {
    let mut builder = AstBuilder::new();
    let ghost = class_var(&mut builder, 1, "g", "Ghost");
    let first = var(&mut builder, 2, "x", Primitive::Int);
    let second = var(&mut builder, 3, "x", Primitive::Int);
    let phantom = class_var(&mut builder, 4, "p", "Phantom");
    let program = builder.program(at(1), vec![ghost, first, second, phantom]);
    let (_, analysis) = analyze_program(builder, program);

    let rendered = analysis
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.report())
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r###"
    *** Error line 3.
    *** Declaration of 'x' here conflicts with declaration on line 2
    *** Error line 1.
    *** No declaration for class 'Ghost' found
    *** Error line 4.
    *** No declaration for class 'Phantom' found
    "###);
}

#[test]
fn test_each_use_of_unknown_class_is_reported() {
    let mut builder = AstBuilder::new();
    let a = class_var(&mut builder, 1, "a", "Ghost");
    let b = class_var(&mut builder, 2, "b", "Ghost");
    let program = builder.program(at(1), vec![a, b]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        [
            "1: *** No declaration for class 'Ghost' found",
            "2: *** No declaration for class 'Ghost' found",
        ]
    );
}

#[test]
fn test_extends_and_implements_are_resolved_late() {
    let mut builder = AstBuilder::new();
    let base = builder.named_type(at(1), "Base");
    let shape = builder.named_type(at(1), "Shape");
    let missing = builder.named_type(at(1), "Drawable");
    let derived = builder.class_decl(at(1), "Derived", Some(base), vec![shape, missing], vec![]);
    let base_class = builder.class_decl(at(5), "Base", None, vec![], vec![]);
    let shape_iface = builder.interface_decl(at(7), "Shape", vec![]);
    let program = builder.program(at(1), vec![derived, base_class, shape_iface]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        ["1: *** No declaration for class 'Drawable' found"]
    );
    assert_eq!(
        analysis.top_level.get("Shape").unwrap().kind(),
        BindingKind::Interface
    );
}

#[test]
fn test_class_members_get_their_own_level() {
    let mut builder = AstBuilder::new();
    let global = var(&mut builder, 1, "size", Primitive::Int);
    let field = var(&mut builder, 3, "size", Primitive::Double);
    let twin = var(&mut builder, 4, "size", Primitive::Bool);
    let class = builder.class_decl(at(2), "Box", None, vec![], vec![field, twin]);
    let program = builder.program(at(1), vec![global, class]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        ["4: *** Declaration of 'size' here conflicts with declaration on line 3"]
    );
    assert_eq!(analysis.top_level.get("size").unwrap().ty(), &Type::Int);
}

#[test]
fn test_new_of_unknown_class() {
    let mut builder = AstBuilder::new();
    let target = builder.var_ref(at(3), "o");
    let value = builder.new_expr(at(3), "Nope");
    let assign = builder.assign(at(3), target, value);
    let o = class_var(&mut builder, 2, "o", "Nope");
    let body = builder.block(at(1), vec![o], vec![assign]);
    let ret = builder.primitive(at(1), Primitive::Void);
    let main = builder.fn_decl(at(1), "main", ret, vec![], Some(body));
    let program = builder.program(at(1), vec![main]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        [
            "2: *** No declaration for class 'Nope' found",
            "3: *** No declaration for class 'Nope' found",
        ]
    );
}

#[test]
fn test_max_diagnostics_trims_the_list() {
    let mut builder = AstBuilder::new();
    let decls = (1..=4)
        .map(|line| class_var(&mut builder, line, &format!("v{line}"), "Ghost"))
        .collect();
    let program = builder.program(at(1), decls);
    let ast = builder.finish(program).unwrap();

    let analysis = analyze_with_options(&ast, &AnalysisOptions::with_max_diagnostics(2)).unwrap();
    assert_eq!(analysis.diagnostics.len(), 2);
    assert_eq!(analysis.diagnostics[1].line(), Some(2));
    assert_eq!(analysis.suppressed, 2);
    assert_eq!(analysis.error_count(), 4);
    // Every declaration is still bound.
    assert_eq!(analysis.top_level.len(), 4);
}

#[test]
fn test_zero_cap_still_fails_the_program() {
    let mut builder = AstBuilder::new();
    let a = class_var(&mut builder, 1, "a", "Ghost");
    let program = builder.program(at(1), vec![a]);
    let ast = builder.finish(program).unwrap();

    let analysis = analyze_with_options(&ast, &AnalysisOptions::with_max_diagnostics(0)).unwrap();
    assert!(analysis.diagnostics.is_empty());
    assert_eq!(analysis.suppressed, 1);
    assert!(analysis.has_errors());

    match analysis.into_result() {
        Err(Error::Semantic { count, diagnostics }) => {
            assert_eq!(count, 1);
            assert!(diagnostics.is_empty());
        }
        other => panic!("expected semantic error, got {other:?}"),
    }
}

#[test]
fn test_into_result() {
    let mut builder = AstBuilder::new();
    let a = class_var(&mut builder, 1, "a", "Ghost");
    let program = builder.program(at(1), vec![a]);
    let (_, analysis) = analyze_program(builder, program);

    match analysis.into_result() {
        Err(Error::Semantic { count, diagnostics }) => {
            assert_eq!(count, 1);
            assert_eq!(diagnostics.len(), 1);
        }
        other => panic!("expected semantic error, got {other:?}"),
    }

    let mut builder = AstBuilder::new();
    let x = var(&mut builder, 1, "x", Primitive::Int);
    let program = builder.program(at(1), vec![x]);
    let (_, analysis) = analyze_program(builder, program);
    assert!(analysis.into_result().is_ok());
}

#[test]
fn test_root_must_be_a_program() {
    let mut builder = AstBuilder::new();
    let x = var(&mut builder, 1, "x", Primitive::Int);
    let ast = builder.finish(x).unwrap();

    assert!(matches!(ast.kind(ast.root()), NodeKind::VarDecl { .. }));
    assert!(matches!(analyze(&ast), Err(Error::MalformedTree(_))));
}

#[test]
fn test_analysis_is_deterministic() {
    let mut builder = AstBuilder::new();
    let ghost = class_var(&mut builder, 1, "g", "Ghost");
    let first = var(&mut builder, 2, "x", Primitive::Int);
    let second = var(&mut builder, 3, "x", Primitive::Double);
    let formal = var(&mut builder, 4, "n", Primitive::Int);
    let twin = var(&mut builder, 4, "n", Primitive::Int);
    let local = class_var(&mut builder, 5, "p", "Phantom");
    let body = builder.block(at(4), vec![local], vec![]);
    let ret = builder.primitive(at(4), Primitive::Void);
    let f = builder.fn_decl(at(4), "f", ret, vec![formal, twin], Some(body));
    let program = builder.program(at(1), vec![ghost, first, second, f]);
    let ast = builder.finish(program).unwrap();

    let first_run = analyze(&ast).unwrap();
    let second_run = analyze(&ast).unwrap();

    assert_eq!(first_run.diagnostics.len(), 4);
    assert_eq!(first_run.diagnostics, second_run.diagnostics);
    assert_eq!(first_run.types, second_run.types);
    let names = |analysis: &decaf_semantic::Analysis| {
        analysis
            .top_level
            .iter()
            .map(|(name, _)| name.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&first_run), ["g", "x", "f"]);
    assert_eq!(names(&first_run), names(&second_run));
}

#[test]
fn test_bodies_are_walked_after_their_level_is_bound() {
    // void f(int a, int a) {} then int x; int x; at top level: the top-level
    // clash is found while binding, before the formals are walked.
    let mut builder = AstBuilder::new();
    let a = var(&mut builder, 1, "a", Primitive::Int);
    let again = var(&mut builder, 1, "a", Primitive::Int);
    let body = builder.block(at(1), vec![], vec![]);
    let ret = builder.primitive(at(1), Primitive::Void);
    let f = builder.fn_decl(at(1), "f", ret, vec![a, again], Some(body));
    let first = var(&mut builder, 2, "x", Primitive::Int);
    let second = var(&mut builder, 3, "x", Primitive::Int);
    let program = builder.program(at(1), vec![f, first, second]);
    let (_, analysis) = analyze_program(builder, program);

    assert_eq!(
        summarize(&analysis),
        [
            "3: *** Declaration of 'x' here conflicts with declaration on line 2",
            "1: *** Declaration of 'a' here conflicts with declaration on line 1",
        ]
    );
}
