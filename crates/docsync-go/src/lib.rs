//! Go source loader
//!
//! Parses Go source with tree-sitter and builds the
//! [`DeclarationTree`](docsync_content::DeclarationTree) the
//! synchronization engine works on: declarations in source order, their
//! documentation and same-line comments, parenthesized groups, struct and
//! interface members, and the flat position-ordered comment list used for
//! origin matching.
//!
//! # Example
//!
//! ```
//! let tree = docsync_go::parse(
//!     "package heap\n\n// Pop removes the minimum element.\nfunc Pop(h Interface) any\n",
//!     None,
//! )
//! .unwrap();
//! assert_eq!(tree.decls[0].signature, "func Pop(h Interface) any");
//! ```

mod comments;
pub mod error;
mod flatten;
mod loader;

pub use error::{Error, Result};
pub use loader::{parse, parse_file};
