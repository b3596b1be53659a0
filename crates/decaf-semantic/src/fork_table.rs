//! Chained symbol table for nested lexical scopes.
//!
//! Each [`ForkTable`] is one scope level. Forking creates a child level that
//! borrows its parent, so lookups walk outward without copying anything and
//! the parent cannot change while a child is alive.

use decaf_ast::NodeId;
use decaf_core::Type;
use std::collections::HashMap;
use thiserror::Error;

/// What kind of declaration a name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Variable,
    Function,
    Class,
    Interface,
}

/// The result of binding a declared name to a checked type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAnnotation {
    node: NodeId,
    ty: Type,
    kind: BindingKind,
}

impl TypeAnnotation {
    #[must_use]
    pub fn new(node: NodeId, ty: Type, kind: BindingKind) -> Self {
        Self { node, ty, kind }
    }

    /// The declaration node that introduced the binding.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The declared type; the return type for functions.
    #[must_use]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[must_use]
    pub fn kind(&self) -> BindingKind {
        self.kind
    }
}

/// Returned when a name is already bound at the same scope level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' is already declared in this scope")]
pub struct Redeclaration {
    pub name: String,
    /// The binding that was there first.
    pub existing: TypeAnnotation,
}

/// One scope level plus a link to the level it was forked from.
#[derive(Debug, Default)]
pub struct ForkTable<'p> {
    /// Bindings in insertion order.
    entries: Vec<(String, TypeAnnotation)>,
    index: HashMap<String, usize>,
    parent: Option<&'p ForkTable<'p>>,
}

impl<'p> ForkTable<'p> {
    /// Creates a root level with no parent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            parent: None,
        }
    }

    /// Creates an empty child level whose chain continues into `self`.
    #[must_use]
    pub fn fork(&self) -> ForkTable<'_> {
        tracing::trace!(depth = self.depth() + 1, "forked scope");
        ForkTable {
            entries: Vec::new(),
            index: HashMap::new(),
            parent: Some(self),
        }
    }

    /// Binds `name` at this level.
    ///
    /// # Errors
    /// Returns [`Redeclaration`] if `name` is already bound at this level.
    /// Bindings in ancestor levels are shadowed, not rejected.
    pub fn put_if_absent(
        &mut self,
        name: &str,
        annotation: TypeAnnotation,
    ) -> Result<(), Redeclaration> {
        if let Some(existing) = self.get_local(name) {
            return Err(Redeclaration {
                name: name.to_string(),
                existing: existing.clone(),
            });
        }

        tracing::trace!(name, kind = ?annotation.kind(), depth = self.depth(), "bound name");
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), annotation));
        Ok(())
    }

    /// Looks a name up in this level, then in each ancestor in turn.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeAnnotation> {
        self.get_local(name)
            .or_else(|| self.parent.and_then(|parent| parent.get(name)))
    }

    /// Looks a name up in this level only.
    #[must_use]
    pub fn get_local(&self, name: &str) -> Option<&TypeAnnotation> {
        self.index
            .get(name)
            .map(|&position| &self.entries[position].1)
    }

    #[must_use]
    pub fn contains_local(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn contains_in_chain(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of ancestors; 0 for a root level.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parent.map_or(0, |parent| parent.depth() + 1)
    }

    #[must_use]
    pub fn parent(&self) -> Option<&ForkTable<'p>> {
        self.parent
    }

    /// Bindings of this level in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeAnnotation)> + '_ {
        self.entries
            .iter()
            .map(|(name, annotation)| (name.as_str(), annotation))
    }

    /// Number of bindings at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
