//! Declaration binding: programs, variables, functions, classes, interfaces.

use crate::checker::core::{Checker, Report, WalkState};
use crate::fork_table::{BindingKind, Redeclaration, TypeAnnotation};
use decaf_ast::{NodeId, NodeKind};
use decaf_core::{SemanticError, Type};

impl Checker<'_> {
    /// Checks the root `Program` node against the top-level table.
    ///
    /// No scope is forked here, so every top-level name lands in the table
    /// the resolver later consults.
    pub(crate) fn check_program(
        &self,
        program: NodeId,
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        let NodeKind::Program { decls } = self.ast.kind(program) else {
            return;
        };
        self.check_declarations(decls, state, report);
    }

    /// Checks the declarations of one level.
    ///
    /// Every name is bound, in source order, before any function body or
    /// class member list is walked, so bodies see declarations that follow
    /// them at the same level.
    pub(crate) fn check_declarations(
        &self,
        decls: &[NodeId],
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        for &decl in decls {
            self.bind_declaration(decl, state, report);
        }
        for &decl in decls {
            self.check_declaration_body(decl, state, report);
        }
    }

    /// Checks a single declaration in the current scope. Other nodes are
    /// ignored.
    pub(crate) fn check_declaration(
        &self,
        decl: NodeId,
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        self.bind_declaration(decl, state, report);
        self.check_declaration_body(decl, state, report);
    }

    /// Binds the name a declaration introduces and checks its header.
    fn bind_declaration(&self, decl: NodeId, state: &mut WalkState<'_, '_>, report: &mut Report) {
        match self.ast.kind(decl) {
            NodeKind::VarDecl { name, ty } => {
                let ty = self.resolve_declared_type(*ty, state, report);
                self.bind_typed(decl, *name, ty, BindingKind::Variable, state, report);
            }
            NodeKind::FnDecl {
                name,
                return_type,
                ..
            } => {
                let return_type = self.resolve_declared_type(*return_type, state, report);
                self.bind_typed(decl, *name, return_type, BindingKind::Function, state, report);
            }
            NodeKind::ClassDecl {
                name,
                extends,
                implements,
                ..
            } => {
                self.bind(decl, *name, BindingKind::Class, state, report);
                for &parent in extends.iter().chain(implements) {
                    self.require_class(parent, state, report);
                }
            }
            NodeKind::InterfaceDecl { name, .. } => {
                self.bind(decl, *name, BindingKind::Interface, state, report);
            }
            _ => {}
        }
    }

    /// Walks what a declaration encloses: formals and body of a function,
    /// members of a class or interface.
    fn check_declaration_body(
        &self,
        decl: NodeId,
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        match self.ast.kind(decl) {
            NodeKind::FnDecl { formals, body, .. } => {
                self.check_fn_body(decl, formals, *body, state, report);
            }
            NodeKind::ClassDecl { members, .. } | NodeKind::InterfaceDecl { members, .. } => {
                self.check_members(decl, members, state, report);
            }
            _ => {}
        }
    }

    fn check_fn_body(
        &self,
        decl: NodeId,
        formals: &[NodeId],
        body: Option<NodeId>,
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        let mut formals_scope = state.scope.fork();
        let mut formals_state = state.enter(decl, &mut formals_scope);
        for &formal in formals {
            self.check_declaration(formal, &mut formals_state, report);
        }

        if let Some(body) = body {
            let mut body_scope = formals_scope.fork();
            let mut body_state = state.enter(decl, &mut body_scope);
            self.check_block_contents(body, &mut body_state, report);
        }
    }

    /// Binds class or interface members in a level of their own.
    ///
    /// Members are only bound by name; `obj.member` is never resolved
    /// against them.
    fn check_members(
        &self,
        decl: NodeId,
        members: &[NodeId],
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        let mut members_scope = state.scope.fork();
        let mut members_state = state.enter(decl, &mut members_scope);
        self.check_declarations(members, &mut members_state, report);
    }

    /// Resolves a declared type node.
    ///
    /// A class name that is not visible yet is not an error at this point:
    /// it is recorded as pending and settled once the whole program is
    /// known.
    pub(crate) fn resolve_declared_type(
        &self,
        type_node: NodeId,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) -> Type {
        let ty = self.ast.resolve_type(type_node);
        match ty.base_type() {
            Type::Named(_) => self.require_class(self.ast.base_type(type_node), state, report),
            Type::Int
            | Type::Double
            | Type::Bool
            | Type::Void
            | Type::String
            | Type::Null
            | Type::Error
            | Type::Array(_) => {}
        }
        ty
    }

    /// Defers an unknown-type diagnostic for a `NamedType` node whose name
    /// is not visible from the current scope.
    pub(crate) fn require_class(
        &self,
        named_type: NodeId,
        state: &WalkState<'_, '_>,
        report: &mut Report,
    ) {
        let Some(name) = self.ast.type_name(named_type) else {
            return;
        };
        if !state.scope.contains_in_chain(name) {
            report.defer(state.checkpoint(named_type), name);
        }
    }

    /// Binds a class or interface under its own name.
    fn bind(
        &self,
        decl: NodeId,
        name: NodeId,
        kind: BindingKind,
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        let ty = self
            .ast
            .identifier(name)
            .map_or(Type::Error, |name| Type::Named(name.to_string()));
        self.bind_typed(decl, name, ty, kind, state, report);
    }

    /// Records the declaration's type and binds its name in the current
    /// level, reporting a redeclaration immediately.
    fn bind_typed(
        &self,
        decl: NodeId,
        name: NodeId,
        ty: Type,
        kind: BindingKind,
        state: &mut WalkState<'_, '_>,
        report: &mut Report,
    ) {
        report.types.record(decl, ty.clone());
        let Some(name) = self.ast.identifier(name) else {
            return;
        };

        let annotation = TypeAnnotation::new(decl, ty, kind);
        if let Err(Redeclaration { name, existing }) = state.scope.put_if_absent(name, annotation)
        {
            let original_line = self.ast.line(existing.node()).unwrap_or_default();
            report.error(
                self.ast.position(decl),
                SemanticError::Redeclaration {
                    name,
                    original_line,
                },
            );
        }
    }
}
