//! Declaration indexing and lookup

use std::collections::HashMap;

use crate::decl::{DeclKind, Declaration, Group};
use crate::tree::DeclarationTree;

/// Sort the declarations of `tree` by kind rank, then by identifier.
///
/// The sort is stable, so declarations sharing both keys keep their
/// source order, and applying it to an indexed tree changes nothing.
/// Fields inside declarations keep their source order.
pub fn index(tree: &mut DeclarationTree) {
    tree.decls.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| a.identifier().cmp(b.identifier()))
    });
}

/// Whether the declarations of `tree` are in canonical order.
pub fn is_indexed(tree: &DeclarationTree) -> bool {
    tree.decls.windows(2).all(|pair| {
        (pair[0].kind, pair[0].identifier()) <= (pair[1].kind, pair[1].identifier())
    })
}

/// A declaration found by [`search`], with its enclosing group.
#[derive(Debug, Clone, Copy)]
pub struct Found<'a> {
    pub decl: &'a Declaration,
    pub group: Option<&'a Group>,
}

/// Find the declaration declaring `identifier`.
///
/// Every name of a multi-name declaration is searchable. The blank
/// identifier never matches.
pub fn search<'a>(tree: &'a DeclarationTree, identifier: &str) -> Option<Found<'a>> {
    if identifier == "_" {
        return None;
    }
    let decl = tree
        .decls
        .iter()
        .find(|d| d.names.iter().any(|n| n == identifier))?;
    Some(Found {
        decl,
        group: decl.group.and_then(|id| tree.group(id)),
    })
}

/// Identifier lookup table over a tree's declarations.
///
/// Positions refer to `tree.decls`; rebuild the table after re-indexing.
#[derive(Debug, Clone, Default)]
pub struct DeclIndex {
    by_name: HashMap<String, usize>,
}

impl DeclIndex {
    pub fn new(tree: &DeclarationTree) -> Self {
        let mut by_name = HashMap::with_capacity(tree.decls.len());
        for (pos, decl) in tree.decls.iter().enumerate() {
            for name in decl.names.iter().filter(|n| n.as_str() != "_") {
                by_name.entry(name.clone()).or_insert(pos);
            }
        }
        Self { by_name }
    }

    pub fn get(&self, identifier: &str) -> Option<usize> {
        self.by_name.get(identifier).copied()
    }

    /// Position of the declaration named `identifier` when it has `kind`.
    pub fn get_kind(&self, tree: &DeclarationTree, identifier: &str, kind: DeclKind) -> Lookup {
        match self.get(identifier) {
            None => Lookup::NotFound,
            Some(pos) if tree.decls[pos].kind == kind => Lookup::Found(pos),
            Some(pos) => Lookup::KindMismatch(tree.decls[pos].kind),
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Outcome of a kind-checked lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found(usize),
    NotFound,
    /// The identifier exists with a different kind
    KindMismatch(DeclKind),
}
