//! Records of the comment mutations performed by synchronization.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::comment::CommentBlock;

/// The kind of comment mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// Another language appended below a divider.
    Merge,
    /// A verified translation propagated into an untranslated comment.
    Translate,
    /// A comment copied into a declaration that had none.
    Assign,
    /// A same-line comment rewritten.
    Trailing,
}

/// One comment mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// The kind of edit.
    pub kind: EditKind,
    /// Declaration (or `Decl.field`) owning the comment; empty for the
    /// package documentation.
    pub identifier: String,
    /// Span of the comment, unchanged by the edit.
    pub span: Range<usize>,
    /// Text before the edit.
    pub old_content: Option<String>,
    /// Text after the edit.
    pub new_content: String,
}

impl Edit {
    pub(crate) fn new(
        kind: EditKind,
        identifier: impl Into<String>,
        before: Option<&CommentBlock>,
        after: &CommentBlock,
    ) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            span: after.span.clone(),
            old_content: before.map(CommentBlock::text),
            new_content: after.text(),
        }
    }
}

/// Outcome of a merge or replace run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Edits in the order they were applied
    pub edits: Vec<Edit>,
    /// Set when the run was skipped because a tree lacks the bilingual
    /// layout tag
    pub style_mismatch: bool,
}

impl SyncReport {
    /// A run skipped for lacking the bilingual layout tag.
    pub fn skipped() -> Self {
        Self {
            edits: Vec::new(),
            style_mismatch: true,
        }
    }

    /// Number of comments mutated.
    pub fn count(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub(crate) fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }
}
