//! Origin matching between translated comments and their originals
//!
//! In the bilingual layout a translated comment is written directly below
//! the comment it translates, separated by one blank line plus
//! indentation. Matching is therefore positional: the origin of a comment
//! is the comment immediately before it in the flat, position-ordered
//! comment list, provided the gap between the two is one of a small set of
//! byte distances.

use std::collections::HashSet;

use crate::comment::CommentBlock;
use crate::tree::DeclarationTree;

/// Gap values accepted by [`AdjacencyMatcher::default`].
///
/// `"\n\n"` at top level, plus one or two tabs of indentation for group
/// members and struct fields, plus the six-byte layout of some generators.
pub const DEFAULT_GAPS: [usize; 4] = [2, 3, 4, 6];

/// Finds the original of a translated comment.
pub trait OriginMatcher {
    /// The origin of `target` within `comments`, which must be ordered by
    /// position and exclude same-line comments. `None` when `target` is not
    /// a verified translation.
    fn origin_of<'a>(
        &self,
        comments: &[&'a CommentBlock],
        target: &CommentBlock,
    ) -> Option<&'a CommentBlock>;
}

/// Positional matcher using a configurable set of gap values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatcher {
    gaps: Vec<usize>,
}

impl AdjacencyMatcher {
    pub fn with_gaps(gaps: impl IntoIterator<Item = usize>) -> Self {
        let mut gaps: Vec<usize> = gaps.into_iter().collect();
        gaps.sort_unstable();
        gaps.dedup();
        Self { gaps }
    }

    pub fn gaps(&self) -> &[usize] {
        &self.gaps
    }
}

impl Default for AdjacencyMatcher {
    fn default() -> Self {
        Self::with_gaps(DEFAULT_GAPS)
    }
}

impl OriginMatcher for AdjacencyMatcher {
    fn origin_of<'a>(
        &self,
        comments: &[&'a CommentBlock],
        target: &CommentBlock,
    ) -> Option<&'a CommentBlock> {
        let pos = comments
            .binary_search_by_key(&target.start(), |c| c.start())
            .ok()?;
        let candidate = *comments.get(pos.checked_sub(1)?)?;
        if candidate.is_directive() {
            return None;
        }
        let gap = target.start().checked_sub(candidate.end())?;
        self.gaps.binary_search(&gap).ok().map(|_| candidate)
    }
}

/// The comments of a tree that can take part in origin matching: every
/// comment except same-line ones, in position order.
pub fn leading_comments<'a>(
    comments: &'a [CommentBlock],
    trailing: &HashSet<usize>,
) -> Vec<&'a CommentBlock> {
    comments
        .iter()
        .filter(|c| !trailing.contains(&c.start()))
        .collect()
}

impl DeclarationTree {
    /// Shorthand for [`leading_comments`] over this tree.
    pub fn leading_comments(&self) -> Vec<&CommentBlock> {
        leading_comments(&self.comments, &self.trailing_starts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pair(gap: usize) -> (CommentBlock, CommentBlock) {
        let origin = CommentBlock::from_text("OK indicates the lack of an error.", 0);
        let trans = CommentBlock::from_text("testOk 表示没有出错", origin.end() + gap);
        (origin, trans)
    }

    #[rstest]
    #[case(2, true)]
    #[case(3, true)]
    #[case(4, true)]
    #[case(6, true)]
    #[case(1, false)]
    #[case(5, false)]
    #[case(40, false)]
    fn matches_configured_gaps(#[case] gap: usize, #[case] matched: bool) {
        let (origin, trans) = pair(gap);
        let comments = vec![&origin, &trans];
        let found = AdjacencyMatcher::default().origin_of(&comments, &trans);
        assert_eq!(found.is_some(), matched);
    }

    #[test]
    fn first_comment_has_no_origin() {
        let (origin, trans) = pair(2);
        let comments = vec![&origin, &trans];
        assert!(AdjacencyMatcher::default().origin_of(&comments, &origin).is_none());
    }

    #[test]
    fn target_missing_from_list_has_no_origin() {
        let (origin, trans) = pair(2);
        let comments = vec![&origin];
        assert!(AdjacencyMatcher::default().origin_of(&comments, &trans).is_none());
    }

    #[test]
    fn directives_are_never_origins() {
        let directive = CommentBlock::from_text("+build linux", 0);
        let doc = CommentBlock::from_text("Package p does things.", directive.end() + 2);
        let comments = vec![&directive, &doc];
        assert!(AdjacencyMatcher::default().origin_of(&comments, &doc).is_none());
    }

    #[test]
    fn custom_gaps_replace_defaults() {
        let (origin, trans) = pair(5);
        let comments = vec![&origin, &trans];
        let matcher = AdjacencyMatcher::with_gaps([5]);
        assert!(matcher.origin_of(&comments, &trans).is_some());
        assert_eq!(matcher.gaps(), &[5]);
    }

    #[test]
    fn trailing_comments_are_excluded() {
        let a = CommentBlock::from_text("a", 0);
        let b = CommentBlock::from_text("b", 10);
        let trailing: HashSet<usize> = [10].into_iter().collect();
        let all = vec![a, b];
        let leading = leading_comments(&all, &trailing);
        assert_eq!(leading.len(), 1);
        assert_eq!(leading[0].start(), 0);
    }
}
