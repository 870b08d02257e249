//! Declaration trees

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::comment::CommentBlock;
use crate::decl::{DeclKind, Declaration, Group, GroupId};
use crate::error::Result;

/// Parsed representation of one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationTree {
    pub package: String,
    /// Package documentation
    pub doc: Option<CommentBlock>,
    /// Canonical import path declared next to the package clause
    pub import_path: Option<String>,
    /// Byte offset of the package clause
    pub package_offset: usize,
    pub decls: Vec<Declaration>,
    pub groups: Vec<Group>,
    /// Every comment of the unit in position order, attached or not
    pub comments: Vec<CommentBlock>,
    /// Set when the unit follows the bilingual layout convention, where a
    /// translated comment sits directly below its original
    pub bilingual: bool,
}

impl DeclarationTree {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    pub fn with_bilingual(mut self, bilingual: bool) -> Self {
        self.bilingual = bilingual;
        self
    }

    pub fn with_doc(mut self, doc: CommentBlock) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Append a declaration, assigning its source ordinal.
    pub fn push(&mut self, mut decl: Declaration) -> usize {
        decl.ordinal = self.decls.len();
        self.decls.push(decl);
        self.decls.len() - 1
    }

    pub fn add_group(&mut self, group: Group) -> GroupId {
        self.groups.push(group);
        GroupId(self.groups.len() - 1)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    /// Insert a comment into the flat list, keeping position order.
    /// A comment already recorded at the same offset is left in place.
    pub fn add_comment(&mut self, block: CommentBlock) {
        match self
            .comments
            .binary_search_by_key(&block.start(), CommentBlock::start)
        {
            Ok(_) => {}
            Err(at) => self.comments.insert(at, block),
        }
    }

    /// Record every attached comment (package, group, declaration and
    /// field docs plus trailing comments) in the flat list.
    pub fn collect_comments(&mut self) {
        let mut attached: Vec<CommentBlock> = Vec::new();
        attached.extend(self.doc.iter().cloned());
        for group in &self.groups {
            attached.extend(group.doc.iter().cloned());
        }
        for decl in &self.decls {
            attached.extend(decl.doc.iter().cloned());
            attached.extend(decl.trailing.iter().cloned());
            for field in &decl.fields {
                attached.extend(field.doc.iter().cloned());
                attached.extend(field.trailing.iter().cloned());
            }
        }
        for block in attached {
            self.add_comment(block);
        }
    }

    pub fn decls_of(&self, kind: DeclKind) -> impl Iterator<Item = &Declaration> {
        self.decls.iter().filter(move |d| d.kind == kind)
    }

    pub fn imports(&self) -> impl Iterator<Item = &Declaration> {
        self.decls_of(DeclKind::Import)
    }

    /// Start offsets of every same-line comment in the tree.
    pub fn trailing_starts(&self) -> HashSet<usize> {
        let mut starts = HashSet::new();
        for decl in &self.decls {
            starts.extend(decl.trailing.as_ref().map(CommentBlock::start));
            for field in &decl.fields {
                starts.extend(field.trailing.as_ref().map(CommentBlock::start));
            }
        }
        starts
    }

    /// Licence header: a comment before the package clause whose first
    /// word is "copyright".
    pub fn license(&self) -> Option<&CommentBlock> {
        self.comments
            .iter()
            .take_while(|c| c.start() < self.package_offset)
            .find(|c| {
                c.text()
                    .split_whitespace()
                    .next()
                    .is_some_and(|word| word.eq_ignore_ascii_case("copyright"))
            })
    }

    /// Imports in canonical form: sorted paths, one per line.
    pub fn imports_string(&self) -> String {
        let mut paths: Vec<&str> = self.imports().map(Declaration::identifier).collect();
        paths.sort_unstable();
        paths.dedup();
        paths.join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_ordinals() {
        let mut tree = DeclarationTree::new("heap");
        tree.push(Declaration::new(DeclKind::Func, "Pop"));
        tree.push(Declaration::new(DeclKind::Func, "Push"));
        assert_eq!(tree.decls[1].ordinal, 1);
    }

    #[test]
    fn comments_stay_ordered_and_unique() {
        let mut tree = DeclarationTree::new("p");
        tree.add_comment(CommentBlock::from_text("b", 20));
        tree.add_comment(CommentBlock::from_text("a", 0));
        tree.add_comment(CommentBlock::from_text("dup", 20));
        let starts: Vec<usize> = tree.comments.iter().map(CommentBlock::start).collect();
        assert_eq!(starts, vec![0, 20]);
        assert_eq!(tree.comments[1].text(), "b\n");
    }

    #[test]
    fn license_precedes_package_clause() {
        let mut tree = DeclarationTree::new("p");
        tree.package_offset = 100;
        tree.add_comment(CommentBlock::from_text("Copyright 2009 The Go Authors.", 0));
        tree.add_comment(CommentBlock::from_text("copyright later", 120));
        let license = tree.license().unwrap();
        assert_eq!(license.start(), 0);
    }

    #[test]
    fn no_license_after_package() {
        let mut tree = DeclarationTree::new("p");
        tree.add_comment(CommentBlock::from_text("Copyright 2009", 10));
        assert!(tree.license().is_none());
    }

    #[test]
    fn imports_string_is_sorted() {
        let mut tree = DeclarationTree::new("p");
        tree.push(Declaration::new(DeclKind::Import, "\"os\""));
        tree.push(Declaration::new(DeclKind::Import, "\"fmt\""));
        assert_eq!(tree.imports_string(), "\"fmt\"\n\"os\"");
    }
}
