//! Propagating verified translations between bilingual trees
//!
//! Replace copies a translation from `source` into `target` only where
//! the position matcher confirms the source comment sits directly below
//! its original. Comments in `target` that are already verified
//! translations are left untouched.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::comment::{CommentBlock, normalize};
use crate::decl::{DeclKind, GroupId};
use crate::edit::{Edit, EditKind, SyncReport};
use crate::error::Result;
use crate::index::DeclIndex;
use crate::matcher::{AdjacencyMatcher, OriginMatcher, leading_comments};
use crate::merge::{counterpart, field_pairs};
use crate::tree::DeclarationTree;

/// Replace with the default [`AdjacencyMatcher`].
pub fn replace(target: &mut DeclarationTree, source: &DeclarationTree) -> Result<SyncReport> {
    replace_with(target, source, &AdjacencyMatcher::default())
}

/// Propagate the verified translations of `source` into `target`.
///
/// Both trees must carry the bilingual layout tag; otherwise nothing is
/// changed and the report is marked as skipped.
pub fn replace_with<M: OriginMatcher + ?Sized>(
    target: &mut DeclarationTree,
    source: &DeclarationTree,
    matcher: &M,
) -> Result<SyncReport> {
    if !target.bilingual || !source.bilingual {
        warn!(
            target = %target.package,
            source = %source.package,
            "replace needs both trees in bilingual layout, skipping"
        );
        return Ok(SyncReport::skipped());
    }

    let index = DeclIndex::new(target);
    let trailing = target.trailing_starts();
    let source_comments = source.leading_comments();
    let target_comments = leading_comments(&target.comments, &trailing);
    let replacer = Replacer {
        matcher,
        source_comments: &source_comments,
        target_comments: &target_comments,
    };
    let mut report = SyncReport::default();
    let mut replaced_groups: HashSet<GroupId> = HashSet::new();

    replacer.doc(
        &mut target.doc,
        source.doc.as_ref(),
        target.package_offset,
        "",
        &mut report,
    )?;

    for kind in DeclKind::DOCUMENTED {
        for sdecl in source.decls_of(kind) {
            let Some(pos) = counterpart(&index, target, sdecl) else {
                continue;
            };
            let tdecl = &mut target.decls[pos];
            let owner = tdecl.identifier().to_string();

            replacer.trailing(&mut tdecl.trailing, sdecl.trailing.as_ref(), &owner, &mut report);
            replacer.doc(
                &mut tdecl.doc,
                sdecl.doc.as_ref(),
                tdecl.span.start,
                &owner,
                &mut report,
            )?;

            for (fpos, sfield, name) in field_pairs(&tdecl.fields, &sdecl.fields) {
                let tfield = &mut tdecl.fields[fpos];
                let path = format!("{owner}.{name}");
                replacer.trailing(&mut tfield.trailing, sfield.trailing.as_ref(), &path, &mut report);
                replacer.doc(
                    &mut tfield.doc,
                    sfield.doc.as_ref(),
                    tfield.span.start,
                    &path,
                    &mut report,
                )?;
            }

            let sgroup = sdecl.group.and_then(|id| source.group(id));
            if let (Some(gid), Some(sgroup)) = (tdecl.group, sgroup) {
                if replaced_groups.insert(gid) {
                    if let Some(tgroup) = target.groups.get_mut(gid.0) {
                        let anchor = tgroup.span.start;
                        replacer.doc(&mut tgroup.doc, sgroup.doc.as_ref(), anchor, &owner, &mut report)?;
                    }
                }
            }
        }
    }

    info!(package = %target.package, edits = report.count(), "replace finished");
    Ok(report)
}

struct Replacer<'a, M: ?Sized> {
    matcher: &'a M,
    source_comments: &'a [&'a CommentBlock],
    target_comments: &'a [&'a CommentBlock],
}

impl<M: OriginMatcher + ?Sized> Replacer<'_, M> {
    /// Apply a verified source translation to one target comment.
    ///
    /// A missing target comment receives a copy of the source anchored at
    /// `anchor`; an untranslated one gets the source appended below a
    /// dividing line.
    fn doc(
        &self,
        target: &mut Option<CommentBlock>,
        source: Option<&CommentBlock>,
        anchor: usize,
        identifier: &str,
        report: &mut SyncReport,
    ) -> Result<()> {
        let Some(source) = source else {
            return Ok(());
        };
        if source.is_empty() {
            return Ok(());
        }
        if self.matcher.origin_of(self.source_comments, source).is_none() {
            debug!(identifier, "source comment is not a verified translation");
            return Ok(());
        }

        if target.is_none() {
            let mut block = source.clone();
            block.span = anchor..anchor;
            report.push(Edit::new(EditKind::Assign, identifier, None, &block));
            *target = Some(block);
            return Ok(());
        }
        let Some(existing) = target.as_mut() else {
            return Ok(());
        };

        if self.matcher.origin_of(self.target_comments, existing).is_some() {
            debug!(identifier, "target comment already translated");
            return Ok(());
        }
        let incoming = normalize(&source.text());
        if normalize(&existing.text()) == incoming {
            return Ok(());
        }
        if let Some(previous) = existing.translation()? {
            if normalize(&previous) == incoming {
                return Ok(());
            }
        }

        let before = existing.clone();
        existing.set_translation(source)?;
        report.push(Edit::new(EditKind::Translate, identifier, Some(&before), existing));
        Ok(())
    }

    /// Copy a bilingual same-line comment over a monolingual one.
    fn trailing(
        &self,
        target: &mut Option<CommentBlock>,
        source: Option<&CommentBlock>,
        identifier: &str,
        report: &mut SyncReport,
    ) {
        let (Some(target), Some(source)) = (target.as_mut(), source) else {
            return;
        };
        if !source.is_inline_bilingual() || target.is_inline_bilingual() {
            return;
        }
        if normalize(&target.text()) == normalize(&source.text()) {
            return;
        }
        let before = target.clone();
        target.overwrite(source);
        report.push(Edit::new(EditKind::Trailing, identifier, Some(&before), target));
    }
}
