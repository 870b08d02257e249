//! Translation progress of a bilingual tree

use tracing::debug;

use crate::comment::{CommentBlock, normalize};
use crate::decl::DeclKind;
use crate::matcher::{AdjacencyMatcher, OriginMatcher};
use crate::tree::DeclarationTree;

/// Progress with the default [`AdjacencyMatcher`].
pub fn progress(tree: &DeclarationTree) -> u8 {
    progress_with(tree, &AdjacencyMatcher::default())
}

/// Percentage of documentation comments that are verified translations.
///
/// Every package, group, declaration and field doc counts; imports,
/// same-line comments and the licence header do not. A doc is translated
/// when the matcher finds its origin and the two texts differ. A tree
/// without documentation is complete.
pub fn progress_with<M: OriginMatcher + ?Sized>(tree: &DeclarationTree, matcher: &M) -> u8 {
    let license = tree.license().map(CommentBlock::start);
    let comments: Vec<&CommentBlock> = tree
        .leading_comments()
        .into_iter()
        .filter(|c| Some(c.start()) != license)
        .collect();

    let mut docs: Vec<&CommentBlock> = Vec::new();
    docs.extend(tree.doc.as_ref());
    docs.extend(tree.groups.iter().filter_map(|g| g.doc.as_ref()));
    for decl in tree.decls.iter().filter(|d| d.kind != DeclKind::Import) {
        docs.extend(decl.doc.as_ref());
        docs.extend(decl.fields.iter().filter_map(|f| f.doc.as_ref()));
    }
    docs.retain(|doc| Some(doc.start()) != license);

    if docs.is_empty() {
        return 100;
    }
    let translated = docs
        .iter()
        .filter(|doc| {
            matcher
                .origin_of(&comments, doc)
                .is_some_and(|origin| normalize(&origin.text()) != normalize(&doc.text()))
        })
        .count();

    let percent = translated * 100 / docs.len();
    debug!(package = %tree.package, docs = docs.len(), translated, percent, "translation progress");
    u8::try_from(percent).unwrap_or(100)
}
