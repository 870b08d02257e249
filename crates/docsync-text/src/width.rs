//! Column width measurement

use unicode_width::UnicodeWidthChar;

/// Tab stops are placed every `TAB_WIDTH` columns.
pub const TAB_WIDTH: usize = 4;

/// Width of a single character in columns.
///
/// Control and zero-width characters measure 0, East-Asian wide and
/// fullwidth characters 2, everything else 1. Tabs are column dependent,
/// see [`advance`]; measured in isolation they count as a full stop.
pub fn char_width(c: char) -> usize {
    match c {
        '\t' => TAB_WIDTH,
        c if c.is_control() => 0,
        c => c.width().unwrap_or(0),
    }
}

/// Whether `c` occupies two columns.
pub fn is_wide(c: char) -> bool {
    c != '\t' && char_width(c) == 2
}

/// Column reached after writing `c` at column `col`.
pub fn advance(col: usize, c: char) -> usize {
    match c {
        '\t' => (col / TAB_WIDTH + 1) * TAB_WIDTH,
        _ => col + char_width(c),
    }
}

/// Width of `s` in columns when written from column zero.
pub fn display_width(s: &str) -> usize {
    advance_str(0, s)
}

pub(crate) fn advance_str(col: usize, s: &str) -> usize {
    s.chars().fold(col, advance)
}
