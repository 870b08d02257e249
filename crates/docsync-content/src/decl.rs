//! Declaration model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::comment::CommentBlock;

/// Kind of a top-level declaration.
///
/// The variant order is the canonical rank used for indexing and for the
/// order in which synchronization walks a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Import,
    Const,
    Var,
    Type,
    Func,
    Method,
}

impl DeclKind {
    /// Kinds visited by merge, replace and diff, in rank order.
    pub const DOCUMENTED: [DeclKind; 5] = [
        DeclKind::Const,
        DeclKind::Var,
        DeclKind::Type,
        DeclKind::Func,
        DeclKind::Method,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Label used in discrepancy reports.
    pub fn prefix(self) -> &'static str {
        match self {
            DeclKind::Import => "Import ",
            DeclKind::Const => "Const ",
            DeclKind::Var => "Var ",
            DeclKind::Type => "Type ",
            DeclKind::Func => "Func ",
            DeclKind::Method => "Method ",
        }
    }

    /// Source keyword introducing the declaration.
    pub fn keyword(self) -> &'static str {
        match self {
            DeclKind::Import => "import",
            DeclKind::Const => "const",
            DeclKind::Var => "var",
            DeclKind::Type => "type",
            DeclKind::Func | DeclKind::Method => "func",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Index of a [`Group`] inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub usize);

/// A parenthesized declaration sharing one keyword, e.g. `const ( ... )`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub kind: DeclKind,
    /// Comment above the whole group
    pub doc: Option<CommentBlock>,
    pub span: Range<usize>,
}

/// A struct field or interface member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Declared names; empty for embedded members
    pub names: Vec<String>,
    /// Declared type, or the full member text for methods and embeds
    pub type_text: String,
    pub doc: Option<CommentBlock>,
    pub trailing: Option<CommentBlock>,
    pub span: Range<usize>,
}

impl Field {
    pub fn new(names: Vec<String>, type_text: impl Into<String>) -> Self {
        Self {
            names,
            type_text: type_text.into(),
            ..Self::default()
        }
    }

    pub fn with_doc(mut self, doc: CommentBlock) -> Self {
        self.doc = Some(doc);
        self
    }

    pub fn with_trailing(mut self, trailing: CommentBlock) -> Self {
        self.trailing = Some(trailing);
        self
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Member as written inside its struct or interface body.
    pub fn literal(&self) -> String {
        match self.names.as_slice() {
            [] => self.type_text.clone(),
            names if self.type_text.starts_with('(') => {
                format!("{}{}", names.join(", "), self.type_text)
            }
            names => format!("{} {}", names.join(", "), self.type_text),
        }
    }
}

/// A named top-level declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclKind,
    /// Declared names; the first is the identifier. Methods use
    /// `Receiver.Name`.
    pub names: Vec<String>,
    /// Enclosing parenthesized group, if any
    pub group: Option<GroupId>,
    pub doc: Option<CommentBlock>,
    pub trailing: Option<CommentBlock>,
    /// Position in source order
    pub ordinal: usize,
    /// Type literal (value declarations and types) or full signature
    /// (functions and methods), comments removed
    pub signature: String,
    /// Initializer expression of value declarations
    pub value: String,
    pub fields: Vec<Field>,
    pub span: Range<usize>,
}

impl Declaration {
    pub fn new(kind: DeclKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            names: vec![identifier.into()],
            group: None,
            doc: None,
            trailing: None,
            ordinal: 0,
            signature: String::new(),
            value: String::new(),
            fields: Vec::new(),
            span: 0..0,
        }
    }

    pub fn identifier(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// The blank identifier never takes part in matching.
    pub fn is_blank(&self) -> bool {
        self.identifier() == "_"
    }

    pub fn with_doc(mut self, doc: CommentBlock) -> Self {
        self.doc = Some(doc);
        self
    }

    pub fn with_trailing(mut self, trailing: CommentBlock) -> Self {
        self.trailing = Some(trailing);
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = span;
        self
    }

    pub fn in_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    /// Declaration as it reads in a listing: `const Name Type`, or the
    /// signature for functions and methods.
    pub fn literal(&self) -> String {
        match self.kind {
            DeclKind::Func | DeclKind::Method => self.signature.clone(),
            DeclKind::Import => format!("import {}", self.identifier()),
            kind if self.signature.is_empty() => format!("{kind} {}", self.names.join(", ")),
            kind => format!("{kind} {} {}", self.names.join(", "), self.signature),
        }
    }

    /// The declaration as written inside a group: names, type and
    /// initializer, e.g. `OK Code = 0`.
    pub fn spec(&self) -> String {
        let mut spec = self.names.join(", ");
        if !self.signature.is_empty() {
            spec.push(' ');
            spec.push_str(&self.signature);
        }
        if !self.value.is_empty() {
            spec.push_str(" = ");
            spec.push_str(&self.value);
        }
        spec
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.has_name(name))
    }
}
