//! Display-width aware text reflow for documentation comments
//!
//! Lines are measured in terminal columns rather than bytes or chars:
//! East-Asian wide characters count as two columns, control and
//! zero-width characters as none, and tabs advance to the next multiple
//! of [`TAB_WIDTH`].
//!
//! ```
//! let wrapped = docsync_text::wrap("Pop removes the minimum element.", "// ", 20);
//! assert_eq!(wrapped, "// Pop removes the\n// minimum element.\n");
//! ```

pub mod paragraph;
pub mod width;
pub mod wrap;

pub use paragraph::{is_wrapped, reflow};
pub use width::{TAB_WIDTH, advance, char_width, display_width, is_wide};
pub use wrap::{KEEP_PUNCT, OPEN_PUNCT, url_start, wrap};
