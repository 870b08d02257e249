//! Rendering comments, trees and discrepancy reports as text

use docsync_text::{is_wrapped, reflow, wrap};
use serde::{Deserialize, Serialize};

use crate::comment::{CommentBlock, split_divider};
use crate::decl::{DeclKind, Declaration, GroupId};
use crate::diff::DiscrepancyRecord;
use crate::error::Result;
use crate::matcher::{AdjacencyMatcher, OriginMatcher};
use crate::progress::progress_with;
use crate::tree::DeclarationTree;

const SOURCE_PREFIX: &str = "// ";
const TEXT_PREFIX: &str = "    ";

/// Width limits used by the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Limit for `// ` source comments
    pub source_width: usize,
    /// Limit for indented plain text
    pub text_width: usize,
    /// Limit for each side of a discrepancy report
    pub diff_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            source_width: 77,
            text_width: 76,
            diff_width: 80,
        }
    }
}

/// Format documentation text for output.
///
/// Bilingual text is split at the dividing line and both halves are
/// formatted separately, joined by one unprefixed blank line. A half
/// already within `limit` is only prefixed; otherwise its paragraphs are
/// joined and rewrapped.
pub fn format_comments(text: &str, prefix: &str, limit: usize) -> Result<String> {
    if let Some((original, translation)) = split_divider(text)? {
        let original = format_comments(original, prefix, limit)?;
        let translation = format_comments(translation, prefix, limit)?;
        if original.is_empty() || translation.is_empty() {
            return Ok(original + &translation);
        }
        return Ok(format!("{original}\n{translation}"));
    }
    if is_wrapped(text, limit) {
        Ok(wrap(text, prefix, usize::MAX))
    } else {
        Ok(wrap(&reflow(text), prefix, limit))
    }
}

/// Documentation text as `// ` source comments.
pub fn to_source(text: &str) -> Result<String> {
    Renderer::default().source_comment(text, "")
}

/// Documentation text as indented plain text.
pub fn to_text(text: &str) -> Result<String> {
    Renderer::default().text(text)
}

/// A tree as a Go documentation file, see [`Renderer::source`].
pub fn render_source(tree: &DeclarationTree) -> Result<String> {
    Renderer::default().source(tree)
}

/// A tree as `go doc` style text, see [`Renderer::godoc`].
pub fn render_godoc(tree: &DeclarationTree) -> Result<String> {
    Renderer::default().godoc(tree)
}

/// A tree as a Markdown page, see [`Renderer::markdown`].
pub fn render_markdown(tree: &DeclarationTree) -> Result<String> {
    Renderer::default().markdown(tree)
}

/// Discrepancy records as a report, see [`Renderer::records`].
pub fn render_records(records: &[DiscrepancyRecord]) -> String {
    Renderer::default().records(records)
}

/// Renders trees and reports with configurable widths
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
    matcher: AdjacencyMatcher,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            matcher: AdjacencyMatcher::default(),
        }
    }

    /// Matcher used to find the original written above a translated doc.
    pub fn with_matcher(mut self, matcher: AdjacencyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Source comment lines, each prefixed with `indent`.
    pub fn source_comment(&self, text: &str, indent: &str) -> Result<String> {
        let prefix = format!("{indent}{SOURCE_PREFIX}");
        format_comments(text, &prefix, self.options.source_width)
    }

    pub fn text(&self, text: &str) -> Result<String> {
        format_comments(text, TEXT_PREFIX, self.options.text_width)
    }

    /// Each record as a `TEXT:` (or `FORM:` when only the layout differs)
    /// section followed by a `DIFF:` section, absent sides shown as
    /// `none`.
    pub fn records(&self, records: &[DiscrepancyRecord]) -> String {
        let mut out = String::new();
        for record in records {
            let label = if record.is_form_only() { "FORM:" } else { "TEXT:" };
            out.push_str(label);
            out.push('\n');
            out.push_str(&self.side(&record.side_a));
            out.push_str("DIFF:\n");
            out.push_str(&self.side(&record.side_b));
            out.push('\n');
        }
        out
    }

    fn side(&self, side: &str) -> String {
        let side = if side.trim().is_empty() { "none" } else { side };
        wrap(side, TEXT_PREFIX, self.options.diff_width)
    }

    /// A documentation file in source form: licence, build constraint,
    /// package clause, imports, then every declaration with its comments.
    ///
    /// A doc whose original sits directly above it in the tree is written
    /// below that original, separated by one blank line.
    pub fn source(&self, tree: &DeclarationTree) -> Result<String> {
        let origins = Origins::of(tree, &self.matcher);
        let mut out = String::new();
        if let Some(license) = tree.license() {
            out.push_str(&self.source_comment(&license.text(), "")?);
            out.push('\n');
        }
        out.push_str("//go:build ignore\n\n");
        out.push_str(&self.doc_block(tree.doc.as_ref(), "", &origins)?);
        out.push_str("package ");
        out.push_str(&tree.package);
        if let Some(path) = &tree.import_path {
            out.push_str(&format!(" // import \"{path}\""));
        }
        out.push_str("\n\n");

        let imports: Vec<&Declaration> = tree.imports().collect();
        if !imports.is_empty() {
            out.push_str("import (\n");
            for import in imports {
                out.push_str(&format!("\t{}\n", import.identifier()));
            }
            out.push_str(")\n\n");
        }

        for unit in units(tree) {
            match unit {
                Unit::Single(decl) => {
                    out.push_str(&self.doc_block(decl.doc.as_ref(), "", &origins)?);
                    out.push_str(&self.source_decl(decl, "", &origins)?);
                }
                Unit::Grouped(gid, members) => {
                    let group_doc = tree.group(gid).and_then(|g| g.doc.as_ref());
                    out.push_str(&self.doc_block(group_doc, "", &origins)?);
                    out.push_str(&format!("{} (\n", members[0].kind));
                    for (i, decl) in members.iter().enumerate() {
                        if i > 0 && decl.doc.is_some() {
                            out.push('\n');
                        }
                        out.push_str(&self.doc_block(decl.doc.as_ref(), "\t", &origins)?);
                        out.push('\t');
                        out.push_str(&self.source_decl(decl, "\t", &origins)?);
                    }
                    out.push_str(")\n");
                }
            }
            out.push('\n');
        }

        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
        Ok(out)
    }

    fn doc_block(&self, doc: Option<&CommentBlock>, indent: &str, origins: &Origins<'_>) -> Result<String> {
        let Some(doc) = doc.filter(|d| !d.is_empty()) else {
            return Ok(String::new());
        };
        let mut out = String::new();
        if let Some(origin) = origins.find(doc) {
            out.push_str(&self.source_comment(&origin.text(), indent)?);
            out.push('\n');
        }
        out.push_str(&self.source_comment(&doc.text(), indent)?);
        Ok(out)
    }

    fn source_decl(&self, decl: &Declaration, indent: &str, origins: &Origins<'_>) -> Result<String> {
        let mut out = match decl.kind {
            DeclKind::Func | DeclKind::Method => decl.signature.clone(),
            kind if indent.is_empty() => format!("{kind} {}", self.spec_head(decl)),
            _ => self.spec_head(decl),
        };
        if !decl.fields.is_empty() {
            out.push_str(" {\n");
            let inner = format!("{indent}\t");
            for field in &decl.fields {
                out.push_str(&self.doc_block(field.doc.as_ref(), &inner, origins)?);
                out.push_str(&inner);
                out.push_str(&field.literal());
                push_trailing(&mut out, field.trailing.as_ref());
                out.push('\n');
            }
            out.push_str(indent);
            out.push('}');
        }
        push_trailing(&mut out, decl.trailing.as_ref());
        out.push('\n');
        Ok(out)
    }

    fn spec_head(&self, decl: &Declaration) -> String {
        match body_head(decl) {
            Some(head) if head.starts_with('[') => format!("{}{head}", decl.names.join(", ")),
            Some(head) => format!("{} {head}", decl.names.join(", ")),
            None => decl.spec(),
        }
    }

    /// Plain-text documentation in the layout of `go doc -all`.
    pub fn godoc(&self, tree: &DeclarationTree) -> Result<String> {
        let origins = Origins::none(&self.matcher);
        let mut out = String::from("PACKAGE DOCUMENTATION\n\n");
        out.push_str(&format!("package {}\n", tree.package));
        if let Some(path) = &tree.import_path {
            out.push_str(&format!("    import \"{path}\"\n"));
        }
        out.push('\n');
        if let Some(doc) = &tree.doc {
            out.push_str(&self.text(&doc.text())?);
            out.push('\n');
        }

        let imports = tree.imports_string();
        if !imports.is_empty() {
            out.push_str("IMPORTS\n\n");
            for path in imports.lines() {
                out.push_str(&format!("{TEXT_PREFIX}{path}\n"));
            }
            out.push('\n');
        }

        for (kind, title) in [
            (DeclKind::Const, "CONSTANTS"),
            (DeclKind::Var, "VARIABLES"),
            (DeclKind::Type, "TYPES"),
            (DeclKind::Func, "FUNCTIONS"),
            (DeclKind::Method, "METHODS"),
        ] {
            let section: Vec<Unit<'_>> = units(tree)
                .into_iter()
                .filter(|unit| unit.kind() == kind)
                .collect();
            if section.is_empty() {
                continue;
            }
            out.push_str(title);
            out.push_str("\n\n");
            for unit in section {
                match unit {
                    Unit::Single(decl) => {
                        out.push_str(&self.source_decl(decl, "", &origins)?);
                        if let Some(doc) = decl.doc.as_ref().filter(|d| !d.is_empty()) {
                            out.push_str(&self.text(&doc.text())?);
                        }
                    }
                    Unit::Grouped(gid, members) => {
                        out.push_str(&format!("{kind} (\n"));
                        for decl in &members {
                            out.push('\t');
                            out.push_str(&self.source_decl(decl, "\t", &origins)?);
                        }
                        out.push_str(")\n");
                        let group_doc = tree.group(gid).and_then(|g| g.doc.as_ref());
                        if let Some(doc) = group_doc.filter(|d| !d.is_empty()) {
                            out.push_str(&self.text(&doc.text())?);
                        }
                    }
                }
                out.push('\n');
            }
        }

        if let Some(license) = tree.license() {
            out.push_str("LICENSE\n\n");
            out.push_str(&self.text(&license.text())?);
        }

        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
        Ok(out)
    }

    /// A Markdown page: title, translation progress, canonical import,
    /// package doc, then `const`, `var`, `type` and `func` sections with
    /// each doc followed by its code in a fenced block.
    ///
    /// Methods and a `New<Type>` constructor are listed under their type.
    pub fn markdown(&self, tree: &DeclarationTree) -> Result<String> {
        let origins = Origins::none(&self.matcher);
        let title = tree
            .import_path
            .as_deref()
            .and_then(|path| path.rsplit('/').next())
            .unwrap_or(&tree.package);
        let mut out = format!("# {title}\n");
        if tree.bilingual {
            let percent = progress_with(tree, &self.matcher);
            if percent > 0 {
                out.push_str(&format!("\nTranslation Progress: {percent}\n"));
            }
        }
        if let Some(path) = &tree.import_path {
            out.push_str(&fenced(&format!("package {} // import \"{path}\"", tree.package)));
        }
        if let Some(doc) = tree.doc.as_ref().filter(|d| !d.is_empty()) {
            out.push_str(&plain(doc)?);
        }

        let units = units(tree);
        let mut placed = vec![false; units.len()];
        for (kind, title) in [(DeclKind::Const, "const"), (DeclKind::Var, "var")] {
            let section = indices_of(&units, kind);
            if !section.is_empty() {
                out.push_str(&format!("\n## {title}\n"));
            }
            for i in section {
                placed[i] = true;
                out.push_str(&self.markdown_unit(tree, &units[i], &origins)?);
            }
        }

        let types = indices_of(&units, DeclKind::Type);
        if !types.is_empty() {
            out.push_str("\n## type\n");
        }
        for i in types {
            placed[i] = true;
            let Unit::Single(decl) = &units[i] else {
                out.push_str(&self.markdown_unit(tree, &units[i], &origins)?);
                continue;
            };
            let name = decl.identifier();
            out.push_str(&format!("\n### {name}\n"));
            out.push_str(&self.markdown_unit(tree, &units[i], &origins)?);
            let constructor = units.iter().enumerate().position(|(j, unit)| {
                !placed[j] && matches!(unit, Unit::Single(f) if is_constructor(f, name))
            });
            if let Some(j) = constructor {
                placed[j] = true;
                out.push_str(&self.markdown_unit(tree, &units[j], &origins)?);
            }
            for (j, unit) in units.iter().enumerate() {
                let Unit::Single(method) = unit else {
                    continue;
                };
                if placed[j] || receiver_of(method) != Some(name) {
                    continue;
                }
                placed[j] = true;
                let method_name = method.identifier().rsplit('.').next().unwrap_or_default();
                out.push_str(&format!("\n### {name}.{method_name}\n"));
                out.push_str(&self.markdown_unit(tree, unit, &origins)?);
            }
        }

        let funcs: Vec<usize> = (0..units.len())
            .filter(|&i| !placed[i] && matches!(units[i].kind(), DeclKind::Func | DeclKind::Method))
            .collect();
        if !funcs.is_empty() {
            out.push_str("\n## func\n");
        }
        for i in funcs {
            if let Unit::Single(decl) = &units[i] {
                out.push_str(&format!("\n### {}\n", decl.identifier().trim_start_matches('*')));
            }
            out.push_str(&self.markdown_unit(tree, &units[i], &origins)?);
        }

        if let Some(license) = tree.license() {
            out.push_str("\n# License\n");
            out.push_str(&plain(license)?);
        }

        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
        Ok(out)
    }

    /// Doc as plain text followed by the code without comments.
    fn markdown_unit(&self, tree: &DeclarationTree, unit: &Unit<'_>, origins: &Origins<'_>) -> Result<String> {
        let (doc, code) = match unit {
            Unit::Single(decl) => (decl.doc.as_ref(), self.source_decl(decl, "", origins)?),
            Unit::Grouped(gid, members) => {
                let mut code = format!("{} (\n", unit.kind());
                for decl in members {
                    code.push('\t');
                    code.push_str(&self.source_decl(decl, "\t", origins)?);
                }
                code.push(')');
                (tree.group(*gid).and_then(|g| g.doc.as_ref()), code)
            }
        };
        let mut out = match doc.filter(|d| !d.is_empty()) {
            Some(doc) => plain(doc)?,
            None => String::new(),
        };
        out.push_str(&fenced(code.trim_end()));
        Ok(out)
    }
}

/// Unprefixed doc text after one blank line.
fn plain(doc: &CommentBlock) -> Result<String> {
    Ok(format!("\n{}", format_comments(&doc.text(), "", usize::MAX)?))
}

fn fenced(code: &str) -> String {
    format!("\n```go\n{code}\n```\n")
}

fn indices_of(units: &[Unit<'_>], kind: DeclKind) -> Vec<usize> {
    (0..units.len()).filter(|&i| units[i].kind() == kind).collect()
}

/// Base receiver type of a method, `T` for both `T.M` and `*T.M`.
fn receiver_of(decl: &Declaration) -> Option<&str> {
    if decl.kind != DeclKind::Method {
        return None;
    }
    let (receiver, _) = decl.identifier().split_once('.')?;
    Some(receiver.trim_start_matches('*'))
}

/// `New<T>` functions whose results name `T`.
fn is_constructor(decl: &Declaration, ty: &str) -> bool {
    if decl.kind != DeclKind::Func || decl.identifier().strip_prefix("New") != Some(ty) {
        return false;
    }
    results(&decl.signature)
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|word| word == ty)
}

/// Text after the parameter list of a function signature.
fn results(signature: &str) -> &str {
    let Some(open) = signature.find('(') else {
        return "";
    };
    let mut depth = 0usize;
    for (i, c) in signature[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &signature[open + i + 1..];
                }
            }
            _ => {}
        }
    }
    ""
}

/// Originals of translated docs, looked up among a tree's comments with
/// the licence header left out.
struct Origins<'a> {
    comments: Vec<&'a CommentBlock>,
    matcher: &'a AdjacencyMatcher,
}

impl<'a> Origins<'a> {
    fn of(tree: &'a DeclarationTree, matcher: &'a AdjacencyMatcher) -> Self {
        let license = tree.license().map(CommentBlock::start);
        let comments = tree
            .leading_comments()
            .into_iter()
            .filter(|c| Some(c.start()) != license)
            .collect();
        Self { comments, matcher }
    }

    fn none(matcher: &'a AdjacencyMatcher) -> Self {
        Self {
            comments: Vec::new(),
            matcher,
        }
    }

    fn find(&self, doc: &CommentBlock) -> Option<&'a CommentBlock> {
        self.matcher.origin_of(&self.comments, doc)
    }
}

fn push_trailing(out: &mut String, trailing: Option<&CommentBlock>) {
    if let Some(trailing) = trailing.filter(|t| !t.is_empty()) {
        out.push(' ');
        out.push_str(&trailing.lines.join(" "));
    }
}

/// Type text before the member list, e.g. `struct` or `[T any] interface`,
/// when a type declaration lists members.
fn body_head(decl: &Declaration) -> Option<&str> {
    if decl.kind != DeclKind::Type || decl.fields.is_empty() {
        return None;
    }
    let head = decl.signature.split('{').next().unwrap_or_default().trim();
    Some(if head.is_empty() { "struct" } else { head })
}

/// A stand-alone declaration or the members of one group, in tree order
enum Unit<'a> {
    Single(&'a Declaration),
    Grouped(GroupId, Vec<&'a Declaration>),
}

impl Unit<'_> {
    fn kind(&self) -> DeclKind {
        match self {
            Unit::Single(decl) => decl.kind,
            Unit::Grouped(_, members) => members[0].kind,
        }
    }
}

fn units(tree: &DeclarationTree) -> Vec<Unit<'_>> {
    let mut units: Vec<Unit<'_>> = Vec::new();
    for decl in tree.decls.iter().filter(|d| d.kind != DeclKind::Import) {
        let Some(gid) = decl.group else {
            units.push(Unit::Single(decl));
            continue;
        };
        let existing = units.iter_mut().find_map(|unit| match unit {
            Unit::Grouped(id, members) if *id == gid => Some(members),
            _ => None,
        });
        match existing {
            Some(members) => members.push(decl),
            None => units.push(Unit::Grouped(gid, vec![decl])),
        }
    }
    units
}
