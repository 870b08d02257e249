//! Building declaration trees from Go syntax trees

use docsync_content::{
    CommentBlock, DeclKind, Declaration, DeclarationTree, Field, Group, is_bilingual_name,
};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser};

use crate::comments::{self, Block};
use crate::error::{Error, Result};
use crate::flatten::flatten;

/// Parse Go source into a declaration tree.
///
/// `file_name` only decides the bilingual layout tag (see
/// [`is_bilingual_name`]). Syntax errors do not fail the load: whatever
/// parsed is returned and a warning is logged.
pub fn parse(source: &str, file_name: Option<&str>) -> Result<DeclarationTree> {
    let name = file_name.unwrap_or("<input>");
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    let syntax = parser
        .parse(source, None)
        .ok_or_else(|| Error::parse(name))?;
    let root = syntax.root_node();
    if root.has_error() {
        warn!(file = name, "source has syntax errors, loading what parsed");
    }

    let raw = comments::collect(root, source);
    let blocks = comments::group(&raw);
    let mut loader = Loader {
        code: source,
        line_starts: line_starts(source),
        comment_ranges: raw.iter().map(|c| c.range.clone()).collect(),
        attached: vec![false; blocks.len()],
        blocks,
        tree: DeclarationTree::new("").with_bilingual(file_name.is_some_and(is_bilingual_name)),
    };
    loader.file(root);
    let tree = loader.finish();

    debug!(
        file = name,
        package = %tree.package,
        decls = tree.decls.len(),
        comments = tree.comments.len(),
        bilingual = tree.bilingual,
        "loaded Go source"
    );
    Ok(tree)
}

/// Read and parse a Go file.
pub fn parse_file(path: &Path) -> Result<DeclarationTree> {
    let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&source, path.to_str())
}

fn line_starts(code: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(code.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// End of the last non-comment child, so that a same-line comment the
/// parser nested inside `node` does not count as part of it.
fn code_end(node: Node<'_>) -> usize {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .last()
        .map_or(node.end_byte(), |child| child.end_byte())
}

struct Loader<'s> {
    code: &'s str,
    line_starts: Vec<usize>,
    comment_ranges: Vec<Range<usize>>,
    blocks: Vec<Block>,
    /// Same-line blocks claimed by a declaration or field
    attached: Vec<bool>,
    tree: DeclarationTree,
}

impl<'s> Loader<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        &self.code[node.byte_range()]
    }

    fn flat(&self, range: Range<usize>) -> String {
        flatten(self.code, range, &self.comment_ranges)
    }

    fn row_of(&self, byte: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= byte).saturating_sub(1)
    }

    /// The block ending on the line just above `node`.
    fn doc_for(&self, node: Node<'_>) -> Option<CommentBlock> {
        let row = node.start_position().row;
        self.blocks
            .iter()
            .find(|b| !b.trailing && b.end_row + 1 == row && b.comment.end() <= node.start_byte())
            .map(|b| b.comment.clone())
    }

    /// The same-line block following the code of `node`.
    fn trailing_for(&mut self, node: Node<'_>) -> Option<CommentBlock> {
        let end = code_end(node);
        let row = self.row_of(end);
        let pos = self
            .blocks
            .iter()
            .zip(&self.attached)
            .position(|(b, &taken)| {
                b.trailing && !taken && b.start_row == row && b.comment.start() >= end
            })?;
        self.attached[pos] = true;
        Some(self.blocks[pos].comment.clone())
    }

    fn file(&mut self, root: Node<'_>) {
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "package_clause" => self.package(node),
                "import_declaration" => self.imports(node),
                "const_declaration" => self.values(node, DeclKind::Const),
                "var_declaration" => self.values(node, DeclKind::Var),
                "type_declaration" => self.types(node),
                "function_declaration" | "method_declaration" => self.func(node),
                "comment" => {}
                other => debug!(kind = other, "skipping top-level node"),
            }
        }
    }

    fn package(&mut self, node: Node<'_>) {
        let mut cursor = node.walk();
        if let Some(name) = node
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_identifier")
        {
            self.tree.package = self.text(name).to_string();
        }
        self.tree.package_offset = node.start_byte();
        self.tree.doc = self.doc_for(node);

        let row = node.end_position().row;
        let import_comment = self
            .blocks
            .iter()
            .find(|b| b.trailing && b.start_row == row)
            .map(|b| b.comment.text());
        if let Some(text) = import_comment {
            self.tree.import_path = text
                .trim()
                .strip_prefix("import ")
                .map(|path| path.trim().trim_matches('"').to_string());
        }
    }

    fn imports(&mut self, node: Node<'_>) {
        let mut specs = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => specs.push(child),
                "import_spec_list" => {
                    let mut inner = child.walk();
                    specs.extend(
                        child
                            .named_children(&mut inner)
                            .filter(|n| n.kind() == "import_spec"),
                    );
                }
                _ => {}
            }
        }
        for spec in specs {
            let Some(path) = spec.child_by_field_name("path") else {
                continue;
            };
            let decl = Declaration::new(DeclKind::Import, self.text(path)).with_span(spec.byte_range());
            self.tree.push(decl);
        }
    }

    /// Spec nodes of a declaration and whether they are parenthesized.
    fn specs<'t>(node: Node<'t>, kinds: &[&str]) -> (Vec<Node<'t>>, bool) {
        let mut specs = Vec::new();
        let mut grouped = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                kind if kinds.contains(&kind) => specs.push(child),
                "(" => grouped = true,
                "var_spec_list" => {
                    grouped = true;
                    let mut inner = child.walk();
                    specs.extend(
                        child
                            .named_children(&mut inner)
                            .filter(|n| kinds.contains(&n.kind())),
                    );
                }
                _ => {}
            }
        }
        (specs, grouped)
    }

    fn values(&mut self, node: Node<'_>, kind: DeclKind) {
        let (specs, grouped) = Self::specs(node, &["const_spec", "var_spec"]);
        self.declare(node, kind, specs, grouped, Self::value_spec);
    }

    fn types(&mut self, node: Node<'_>) {
        let (specs, grouped) = Self::specs(node, &["type_spec", "type_alias"]);
        self.declare(node, DeclKind::Type, specs, grouped, Self::type_spec);
    }

    /// Push one declaration per spec; a parenthesized form also becomes a
    /// group carrying the declaration comment.
    fn declare<'t>(
        &mut self,
        node: Node<'t>,
        kind: DeclKind,
        specs: Vec<Node<'t>>,
        grouped: bool,
        build: fn(&mut Self, Node<'t>, DeclKind) -> Option<Declaration>,
    ) {
        let doc = self.doc_for(node);
        if !grouped {
            for spec in specs {
                if let Some(mut decl) = build(self, spec, kind) {
                    decl.doc = doc.clone();
                    decl.span = node.byte_range();
                    self.tree.push(decl);
                }
            }
            return;
        }

        let group = self.tree.add_group(Group {
            kind,
            doc,
            span: node.byte_range(),
        });
        for spec in specs {
            if let Some(mut decl) = build(self, spec, kind) {
                decl.doc = self.doc_for(spec);
                self.tree.push(decl.in_group(group));
            }
        }
    }

    fn value_spec(&mut self, spec: Node<'_>, kind: DeclKind) -> Option<Declaration> {
        let mut cursor = spec.walk();
        let names: Vec<String> = spec
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.text(n).to_string())
            .collect();
        if names.is_empty() {
            return None;
        }
        let mut decl = Declaration::new(kind, String::new()).with_span(spec.byte_range());
        decl.names = names;
        if let Some(ty) = spec.child_by_field_name("type") {
            decl.signature = self.flat(ty.byte_range());
        }
        if let Some(value) = spec.child_by_field_name("value") {
            decl.value = self.flat(value.byte_range());
        }
        decl.trailing = self.trailing_for(spec);
        Some(decl)
    }

    fn type_spec(&mut self, spec: Node<'_>, kind: DeclKind) -> Option<Declaration> {
        let name = spec.child_by_field_name("name")?;
        let mut decl = Declaration::new(kind, self.text(name))
            .with_signature(self.flat(name.end_byte()..code_end(spec)))
            .with_span(spec.byte_range());
        decl.trailing = self.trailing_for(spec);

        if let Some(body) = spec.child_by_field_name("type") {
            match body.kind() {
                "struct_type" => decl.fields = self.struct_fields(body),
                "interface_type" => decl.fields = self.interface_members(body),
                _ => {}
            }
        }
        Some(decl)
    }

    fn struct_fields(&mut self, body: Node<'_>) -> Vec<Field> {
        let mut fields = Vec::new();
        let mut cursor = body.walk();
        let Some(list) = body
            .named_children(&mut cursor)
            .find(|n| n.kind() == "field_declaration_list")
        else {
            return fields;
        };
        let mut cursor = list.walk();
        for node in list
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "field_declaration")
        {
            let mut names_cursor = node.walk();
            let names: Vec<String> = node
                .children_by_field_name("name", &mut names_cursor)
                .map(|n| self.text(n).to_string())
                .collect();
            let type_start = match node.child_by_field_name("type") {
                Some(ty) if !names.is_empty() => ty.start_byte(),
                _ => node.start_byte(),
            };
            let field = Field::new(names, self.flat(type_start..code_end(node)));
            fields.push(self.member(field, node));
        }
        fields
    }

    fn interface_members(&mut self, body: Node<'_>) -> Vec<Field> {
        let mut fields = Vec::new();
        let mut cursor = body.walk();
        for node in body.named_children(&mut cursor) {
            let field = match node.kind() {
                "method_elem" => {
                    let Some(name) = node.child_by_field_name("name") else {
                        continue;
                    };
                    Field::new(
                        vec![self.text(name).to_string()],
                        self.flat(name.end_byte()..code_end(node)),
                    )
                }
                "type_elem" => Field::new(Vec::new(), self.flat(node.start_byte()..code_end(node))),
                _ => continue,
            };
            fields.push(self.member(field, node));
        }
        fields
    }

    fn member(&mut self, mut field: Field, node: Node<'_>) -> Field {
        field.doc = self.doc_for(node);
        field.trailing = self.trailing_for(node);
        field.span = node.byte_range();
        field
    }

    fn func(&mut self, node: Node<'_>) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name);
        let (kind, identifier) = match node.child_by_field_name("receiver") {
            Some(receiver) => (DeclKind::Method, format!("{}.{name}", self.receiver(receiver))),
            None => (DeclKind::Func, name.to_string()),
        };
        let end = node
            .child_by_field_name("body")
            .map_or_else(|| code_end(node), |body| body.start_byte());

        let mut decl = Declaration::new(kind, identifier)
            .with_signature(self.flat(node.start_byte()..end))
            .with_span(node.byte_range());
        decl.doc = self.doc_for(node);
        if node.child_by_field_name("body").is_none() {
            decl.trailing = self.trailing_for(node);
        }
        self.tree.push(decl);
    }

    /// Receiver type as used in method identifiers: `T` or `*T`, type
    /// arguments removed.
    fn receiver(&self, list: Node<'_>) -> String {
        let mut cursor = list.walk();
        let ty = list
            .named_children(&mut cursor)
            .find(|n| n.kind() == "parameter_declaration")
            .and_then(|param| param.child_by_field_name("type"));
        let Some(ty) = ty else {
            return String::new();
        };
        let text: String = self
            .text(ty)
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')'))
            .collect();
        match text.split_once('[') {
            Some((base, _)) => base.to_string(),
            None => text,
        }
    }

    fn finish(mut self) -> DeclarationTree {
        for (block, attached) in self.blocks.iter().zip(&self.attached) {
            if !block.trailing || *attached {
                self.tree.add_comment(block.comment.clone());
            }
        }
        self.tree
    }
}
