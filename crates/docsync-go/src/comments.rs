//! Collecting and grouping comment tokens

use docsync_content::CommentBlock;
use std::ops::Range;
use tree_sitter::Node;

/// One comment token
#[derive(Debug, Clone)]
pub(crate) struct RawComment {
    pub range: Range<usize>,
    pub start_row: usize,
    pub end_row: usize,
    /// Code precedes the comment on its line
    pub trailing: bool,
    pub text: String,
}

impl RawComment {
    fn new(node: Node<'_>, code: &str) -> Self {
        let range = node.byte_range();
        let line_start = code[..range.start].rfind('\n').map_or(0, |i| i + 1);
        Self {
            trailing: !code[line_start..range.start].trim().is_empty(),
            start_row: node.start_position().row,
            end_row: node.end_position().row,
            text: code[range.clone()].to_string(),
            range,
        }
    }
}

/// A comment block with the rows it occupies
#[derive(Debug, Clone)]
pub(crate) struct Block {
    pub comment: CommentBlock,
    pub start_row: usize,
    pub end_row: usize,
    pub trailing: bool,
}

/// Every comment token outside function bodies, in position order.
pub(crate) fn collect(root: Node<'_>, code: &str) -> Vec<RawComment> {
    let mut out = Vec::new();
    walk(root, code, &mut out);
    out.sort_by_key(|c| c.range.start);
    out
}

fn walk(node: Node<'_>, code: &str, out: &mut Vec<RawComment>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "comment" => out.push(RawComment::new(child, code)),
            "block" => {}
            _ => walk(child, code, out),
        }
    }
}

/// Group tokens into blocks.
///
/// Comments on consecutive lines form one block. A comment preceded by
/// code on its line starts a block of its own that only extends along the
/// same line.
pub(crate) fn group(raw: &[RawComment]) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    for token in raw {
        let joins = blocks.last().is_some_and(|block| {
            token.start_row == block.end_row
                || (!token.trailing && !block.trailing && token.start_row == block.end_row + 1)
        });
        match blocks.last_mut() {
            Some(block) if joins => {
                block.comment.lines.push(token.text.clone());
                block.comment.span.end = token.range.end;
                block.end_row = token.end_row;
            }
            _ => blocks.push(Block {
                comment: CommentBlock::new(vec![token.text.clone()], token.range.clone()),
                start_row: token.start_row,
                end_row: token.end_row,
                trailing: token.trailing,
            }),
        }
    }
    blocks
}
