//! Shared helpers for docsync-content tests

#![allow(dead_code)]

use docsync_content::{CommentBlock, Declaration, DeclarationTree, Group, GroupId, DeclKind};

/// Builds a tree whose comment offsets follow a real source layout: a
/// translated doc sits one blank line below its original, and unrelated
/// comments are far enough apart never to match.
pub struct Layout {
    tree: DeclarationTree,
    cursor: usize,
}

impl Layout {
    pub fn new(package: &str, bilingual: bool) -> Self {
        Self {
            tree: DeclarationTree::new(package).with_bilingual(bilingual),
            cursor: 0,
        }
    }

    /// Original comment, blank line, translated doc, then `decl`.
    pub fn translated(mut self, decl: Declaration, origin: &str, translation: &str) -> Self {
        let origin = CommentBlock::from_text(origin, self.cursor);
        let doc = CommentBlock::from_text(translation, origin.end() + 2);
        self.tree.add_comment(origin);
        self.place(decl, Some(doc));
        self
    }

    /// A doc with no original above it.
    pub fn documented(mut self, decl: Declaration, doc: &str) -> Self {
        let doc = CommentBlock::from_text(doc, self.cursor);
        self.place(decl, Some(doc));
        self
    }

    pub fn bare(mut self, decl: Declaration) -> Self {
        self.place(decl, None);
        self
    }

    /// Open a parenthesized group documented by `doc`.
    pub fn group(mut self, kind: DeclKind, doc: Option<&str>) -> (Self, GroupId) {
        let doc = doc.map(|text| CommentBlock::from_text(text, self.cursor));
        let start = doc.as_ref().map_or(self.cursor, |d| d.end() + 1);
        if let Some(doc) = &doc {
            self.tree.add_comment(doc.clone());
        }
        self.cursor = start + 40;
        let id = self.tree.add_group(Group {
            kind,
            doc,
            span: start..start + 10,
        });
        (self, id)
    }

    pub fn build(self) -> DeclarationTree {
        self.tree
    }

    fn place(&mut self, mut decl: Declaration, doc: Option<CommentBlock>) {
        let start = doc.as_ref().map_or(self.cursor, |d| d.end() + 1);
        if let Some(doc) = doc {
            self.tree.add_comment(doc.clone());
            decl.doc = Some(doc);
        }
        decl.span = start..start + 10;
        self.cursor = start + 40;
        self.tree.push(decl);
    }
}

pub fn doc_of<'a>(tree: &'a DeclarationTree, identifier: &str) -> &'a CommentBlock {
    docsync_content::search(tree, identifier)
        .and_then(|found| found.decl.doc.as_ref())
        .expect("declaration has a doc")
}
