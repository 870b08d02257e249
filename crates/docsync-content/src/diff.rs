//! Documentation discrepancies between two declaration trees

use serde::{Deserialize, Serialize};
use similar::TextDiff;
use tracing::debug;

use crate::comment::{CommentBlock, normalize};
use crate::decl::{DeclKind, Declaration};
use crate::index::{DeclIndex, Lookup};
use crate::tree::DeclarationTree;

/// How far a comparison runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffMode {
    /// Stop at the first discrepancy
    First,
    /// Report every discrepancy
    #[default]
    Full,
}

/// What differs between the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscrepancyKind {
    /// Package names differ; nothing else is compared
    Package,
    /// Documentation text differs
    Doc,
    /// Import sets differ
    Imports,
    /// Declared in the first tree only
    Missing,
    /// Declared in the second tree only
    Extra,
    /// Type literal or function signature differs
    Signature,
}

/// One difference found by [`diff`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscrepancyRecord {
    pub kind: DiscrepancyKind,
    /// Category label such as `"Const "` or `"Method "`
    pub prefix: String,
    pub identifier: String,
    /// Rendering from the first tree; empty when absent there
    pub side_a: String,
    /// Rendering from the second tree; empty when absent there
    pub side_b: String,
}

impl DiscrepancyRecord {
    fn new(
        kind: DiscrepancyKind,
        prefix: &str,
        identifier: &str,
        side_a: impl Into<String>,
        side_b: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            prefix: prefix.to_string(),
            identifier: identifier.to_string(),
            side_a: side_a.into(),
            side_b: side_b.into(),
        }
    }

    /// Both sides exist and differ only in layout.
    pub fn is_form_only(&self) -> bool {
        !self.side_a.is_empty()
            && !self.side_b.is_empty()
            && self.side_a != self.side_b
            && normalize(&self.side_a) == normalize(&self.side_b)
    }

    /// Line diff of the two sides in unified format.
    pub fn unified(&self) -> String {
        let header_a = format!("a/{}{}", self.prefix, self.identifier);
        let header_b = format!("b/{}{}", self.prefix, self.identifier);
        TextDiff::from_lines(&self.side_a, &self.side_b)
            .unified_diff()
            .context_radius(3)
            .header(&header_a, &header_b)
            .to_string()
    }
}

/// Compare the documentation of `a` and `b`.
///
/// The package names are compared first and a mismatch ends the
/// comparison in either mode. Then the package documentation, the import
/// sets, and every documented kind in rank order: per identifier of `a`
/// a missing counterpart, a changed signature (which hides any doc
/// change), or a changed doc; then identifiers found only in `b`. Doc
/// comparison ignores layout.
pub fn diff(a: &DeclarationTree, b: &DeclarationTree, mode: DiffMode) -> Vec<DiscrepancyRecord> {
    let mut differ = Differ {
        mode,
        records: Vec::new(),
    };
    differ.trees(a, b);
    debug!(
        a = %a.package,
        b = %b.package,
        records = differ.records.len(),
        "diff finished"
    );
    differ.records
}

struct Differ {
    mode: DiffMode,
    records: Vec<DiscrepancyRecord>,
}

impl Differ {
    fn done(&self) -> bool {
        self.mode == DiffMode::First && !self.records.is_empty()
    }

    /// Record a discrepancy; returns true when the comparison must stop.
    fn push(&mut self, record: DiscrepancyRecord) -> bool {
        self.records.push(record);
        self.done()
    }

    fn trees(&mut self, a: &DeclarationTree, b: &DeclarationTree) {
        if a.package != b.package {
            self.records.push(DiscrepancyRecord::new(
                DiscrepancyKind::Package,
                "Package ",
                &a.package,
                format!("package {}", a.package),
                format!("package {}", b.package),
            ));
            return;
        }

        let (doc_a, doc_b) = (doc_text(a.doc.as_ref()), doc_text(b.doc.as_ref()));
        if normalize(&doc_a) != normalize(&doc_b)
            && self.push(DiscrepancyRecord::new(
                DiscrepancyKind::Doc,
                "Package ",
                &a.package,
                doc_a,
                doc_b,
            ))
        {
            return;
        }

        let (imports_a, imports_b) = (a.imports_string(), b.imports_string());
        if imports_a != imports_b
            && self.push(DiscrepancyRecord::new(
                DiscrepancyKind::Imports,
                "Import ",
                "",
                imports_a,
                imports_b,
            ))
        {
            return;
        }

        for kind in DeclKind::DOCUMENTED {
            if self.kind(kind, a, b) {
                return;
            }
        }
    }

    fn kind(&mut self, kind: DeclKind, a: &DeclarationTree, b: &DeclarationTree) -> bool {
        let prefix = kind.prefix();
        let index_b = DeclIndex::new(b);
        for da in sorted(a, kind) {
            let ident = da.identifier();
            let db = match index_b.get_kind(b, ident, kind) {
                Lookup::Found(pos) => &b.decls[pos],
                _ => {
                    let record = DiscrepancyRecord::new(
                        DiscrepancyKind::Missing,
                        prefix,
                        ident,
                        da.literal(),
                        "",
                    );
                    if self.push(record) {
                        return true;
                    }
                    continue;
                }
            };

            if da.signature != db.signature {
                let record = DiscrepancyRecord::new(
                    DiscrepancyKind::Signature,
                    prefix,
                    ident,
                    da.literal(),
                    db.literal(),
                );
                if self.push(record) {
                    return true;
                }
                continue;
            }

            if self.docs(prefix, da, db) {
                return true;
            }
        }

        let index_a = DeclIndex::new(a);
        for db in sorted(b, kind) {
            let ident = db.identifier();
            if matches!(index_a.get_kind(a, ident, kind), Lookup::Found(_)) {
                continue;
            }
            let record =
                DiscrepancyRecord::new(DiscrepancyKind::Extra, prefix, ident, "", db.literal());
            if self.push(record) {
                return true;
            }
        }
        false
    }

    fn docs(&mut self, prefix: &str, da: &Declaration, db: &Declaration) -> bool {
        let ident = da.identifier();
        let (doc_a, doc_b) = (doc_text(da.doc.as_ref()), doc_text(db.doc.as_ref()));
        if normalize(&doc_a) != normalize(&doc_b) {
            let record = DiscrepancyRecord::new(
                DiscrepancyKind::Doc,
                prefix,
                ident,
                format!("{}\n\n{doc_a}", da.literal()),
                format!("{}\n\n{doc_b}", db.literal()),
            );
            if self.push(record) {
                return true;
            }
        }

        for fa in &da.fields {
            let Some(name) = fa.names.first() else {
                continue;
            };
            let Some(fb) = db.field(name) else {
                continue;
            };
            let (doc_a, doc_b) = (doc_text(fa.doc.as_ref()), doc_text(fb.doc.as_ref()));
            if normalize(&doc_a) != normalize(&doc_b) {
                let path = format!("{ident}.{name}");
                let record = DiscrepancyRecord::new(DiscrepancyKind::Doc, prefix, &path, doc_a, doc_b);
                if self.push(record) {
                    return true;
                }
            }
        }
        false
    }
}

fn doc_text(doc: Option<&CommentBlock>) -> String {
    doc.map(CommentBlock::text).unwrap_or_default()
}

fn sorted(tree: &DeclarationTree, kind: DeclKind) -> Vec<&Declaration> {
    let mut decls: Vec<&Declaration> = tree.decls_of(kind).filter(|d| !d.is_blank()).collect();
    decls.sort_by(|x, y| x.identifier().cmp(y.identifier()));
    decls
}
