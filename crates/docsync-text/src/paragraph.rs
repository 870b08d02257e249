//! Paragraph detection and joining

use crate::width::{advance, is_wide};

/// Whether every line of `text` already fits in `limit` columns.
pub fn is_wrapped(text: &str, limit: usize) -> bool {
    text.lines()
        .all(|line| line.trim_end_matches('\r').chars().fold(0, advance) <= limit)
}

/// Join the hard-wrapped lines of each paragraph into a single line.
///
/// Paragraphs are separated by blank lines, which are kept (runs collapse
/// to one). Indented lines are preformatted and kept verbatim. Lines are
/// joined with a single space, except between two wide characters where
/// no separator is inserted.
pub fn reflow(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut paragraph = String::new();
    let mut blank = false;

    for line in text.lines().map(|line| line.trim_end()) {
        if line.is_empty() {
            flush(&mut out, &mut paragraph);
            if !out.is_empty() && !blank {
                out.push('\n');
            }
            blank = true;
            continue;
        }
        blank = false;
        if line.starts_with([' ', '\t']) {
            flush(&mut out, &mut paragraph);
            out.push_str(line);
            out.push('\n');
            continue;
        }
        join(&mut paragraph, line);
    }
    flush(&mut out, &mut paragraph);

    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn join(paragraph: &mut String, line: &str) {
    let line = line.trim_start();
    let wide_seam = matches!(
        (paragraph.chars().next_back(), line.chars().next()),
        (Some(a), Some(b)) if is_wide(a) && is_wide(b)
    );
    if !paragraph.is_empty() && !wide_seam {
        paragraph.push(' ');
    }
    paragraph.push_str(line);
}

fn flush(out: &mut String, paragraph: &mut String) {
    if !paragraph.is_empty() {
        out.push_str(paragraph);
        out.push('\n');
        paragraph.clear();
    }
}
