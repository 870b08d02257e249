//! Declaration model and bilingual comment synchronization
//!
//! A [`DeclarationTree`] is the parsed form of one source unit: its
//! declarations, the documentation comments attached to them, and the flat
//! position-ordered list of every comment. On top of it this crate
//! provides:
//!
//! - [`index`]: canonical ordering and identifier lookup
//! - [`matcher`]: positional origin matching for translated comments
//! - [`merge()`], [`replace()`], [`diff()`]: synchronization between trees
//! - [`render`]: comment formatting and documentation output

pub mod comment;
pub mod convention;
pub mod decl;
pub mod diff;
pub mod edit;
pub mod error;
pub mod index;
pub mod matcher;
pub mod merge;
pub mod progress;
pub mod render;
pub mod replace;
pub mod tree;

pub use comment::{CommentBlock, DIVIDER, INLINE_SEPARATOR, normalize, split_divider};
pub use convention::{bilingual_name, is_bilingual_name, lang_of, normalize_lang};
pub use decl::{DeclKind, Declaration, Field, Group, GroupId};
pub use diff::{DiffMode, DiscrepancyKind, DiscrepancyRecord, diff};
pub use edit::{Edit, EditKind, SyncReport};
pub use error::{Error, Result};
pub use index::{DeclIndex, Found, Lookup, index, search};
pub use matcher::{AdjacencyMatcher, DEFAULT_GAPS, OriginMatcher};
pub use merge::merge;
pub use progress::{progress, progress_with};
pub use render::{
    RenderOptions, Renderer, format_comments, render_godoc, render_markdown, render_records,
    render_source, to_source, to_text,
};
pub use replace::{replace, replace_with};
pub use tree::DeclarationTree;
