//! Merging a second language into documentation comments
//!
//! [`merge`] walks the documented kinds in rank order, looks up each
//! source declaration in the target by identifier, and appends the source
//! comment below a dividing line in the matching target comment. Spans
//! are never moved, so positional origin matching keeps working on the
//! merged tree.

use std::collections::HashSet;
use tracing::{debug, info};

use crate::comment::{CommentBlock, normalize};
use crate::decl::{DeclKind, Declaration, Field, GroupId};
use crate::edit::{Edit, EditKind, SyncReport};
use crate::error::Result;
use crate::index::{DeclIndex, Lookup};
use crate::tree::DeclarationTree;

/// Merge the documentation of `source` into `target`.
///
/// Matching declarations get the source comment appended as their
/// translation; fields and same-line comments are merged independently,
/// and a group comment is merged once per group. Missing counterparts,
/// kind mismatches, empty comments, and comments whose texts are equal
/// apart from layout are skipped.
pub fn merge(source: &DeclarationTree, target: &mut DeclarationTree) -> Result<SyncReport> {
    let index = DeclIndex::new(target);
    let mut report = SyncReport::default();
    let mut merged_groups: HashSet<GroupId> = HashSet::new();

    merge_doc(&mut target.doc, source.doc.as_ref(), "", &mut report)?;

    for kind in DeclKind::DOCUMENTED {
        for sdecl in source.decls_of(kind) {
            let Some(pos) = counterpart(&index, target, sdecl) else {
                continue;
            };
            let tdecl = &mut target.decls[pos];
            let owner = tdecl.identifier().to_string();
            merge_doc(&mut tdecl.doc, sdecl.doc.as_ref(), &owner, &mut report)?;
            merge_trailing(&mut tdecl.trailing, sdecl.trailing.as_ref(), &owner, &mut report);
            merge_fields(&mut tdecl.fields, &sdecl.fields, &owner, &mut report)?;

            let sgroup = sdecl.group.and_then(|id| source.group(id));
            if let (Some(gid), Some(sgroup)) = (tdecl.group, sgroup) {
                if merged_groups.insert(gid) {
                    if let Some(tgroup) = target.groups.get_mut(gid.0) {
                        merge_doc(&mut tgroup.doc, sgroup.doc.as_ref(), &owner, &mut report)?;
                    }
                }
            }
        }
    }

    info!(package = %target.package, edits = report.count(), "merge finished");
    Ok(report)
}

/// Position in `target` of the declaration matching `sdecl` by identifier
/// and kind.
pub(crate) fn counterpart(
    index: &DeclIndex,
    target: &DeclarationTree,
    sdecl: &Declaration,
) -> Option<usize> {
    if sdecl.is_blank() {
        return None;
    }
    match index.get_kind(target, sdecl.identifier(), sdecl.kind) {
        Lookup::Found(pos) => Some(pos),
        Lookup::NotFound => {
            debug!(identifier = sdecl.identifier(), "no counterpart in target");
            None
        }
        Lookup::KindMismatch(found) => {
            debug!(
                identifier = sdecl.identifier(),
                expected = %sdecl.kind,
                %found,
                "kind mismatch, skipping"
            );
            None
        }
    }
}

/// Pair each source field with the target field declaring the same name.
/// Embedded members match on their type.
pub(crate) fn field_pairs<'s>(
    targets: &[Field],
    sources: &'s [Field],
) -> Vec<(usize, &'s Field, String)> {
    let mut pairs = Vec::new();
    for sfield in sources {
        if sfield.names.is_empty() {
            if let Some(pos) = targets
                .iter()
                .position(|t| t.names.is_empty() && t.type_text == sfield.type_text)
            {
                pairs.push((pos, sfield, sfield.type_text.clone()));
            }
            continue;
        }
        let found = sfield
            .names
            .iter()
            .filter(|name| name.as_str() != "_")
            .find_map(|name| {
                targets
                    .iter()
                    .position(|t| t.has_name(name))
                    .map(|pos| (pos, name.clone()))
            });
        if let Some((pos, name)) = found {
            pairs.push((pos, sfield, name));
        }
    }
    pairs
}

fn merge_fields(
    targets: &mut [Field],
    sources: &[Field],
    owner: &str,
    report: &mut SyncReport,
) -> Result<()> {
    for (pos, sfield, name) in field_pairs(targets, sources) {
        let tfield = &mut targets[pos];
        let path = format!("{owner}.{name}");
        merge_doc(&mut tfield.doc, sfield.doc.as_ref(), &path, report)?;
        merge_trailing(&mut tfield.trailing, sfield.trailing.as_ref(), &path, report);
    }
    Ok(())
}

fn merge_doc(
    target: &mut Option<CommentBlock>,
    source: Option<&CommentBlock>,
    identifier: &str,
    report: &mut SyncReport,
) -> Result<()> {
    let (Some(target), Some(source)) = (target.as_mut(), source) else {
        return Ok(());
    };
    if target.is_empty() || source.is_empty() {
        return Ok(());
    }
    if normalize(&target.text()) == normalize(&source.text()) {
        return Ok(());
    }
    let incoming = normalize(&source.translation()?.unwrap_or_else(|| source.text()));
    if let Some(existing) = target.translation()? {
        if normalize(&existing) == incoming {
            return Ok(());
        }
    }

    let before = target.clone();
    target.set_translation(source)?;
    report.push(Edit::new(EditKind::Merge, identifier, Some(&before), target));
    Ok(())
}

fn merge_trailing(
    target: &mut Option<CommentBlock>,
    source: Option<&CommentBlock>,
    identifier: &str,
    report: &mut SyncReport,
) {
    let (Some(target), Some(source)) = (target.as_mut(), source) else {
        return;
    };
    if target.is_empty() || source.is_empty() {
        return;
    }
    let (original, existing) = target.inline_parts();
    let incoming = match source.inline_parts() {
        (_, Some(translation)) => translation,
        (text, None) => text,
    };
    if original == incoming || existing.as_deref() == Some(incoming.as_str()) {
        return;
    }

    let before = target.clone();
    target.set_inline_translation(source);
    report.push(Edit::new(EditKind::Trailing, identifier, Some(&before), target));
}
