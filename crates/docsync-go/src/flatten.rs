//! Single-line renderings of source fragments

use std::ops::Range;

/// Source text of `range` on one line: comments removed, whitespace
/// collapsed outside literals, and line breaks replaced by the separator
/// Go would need (`; ` between members, nothing inside brackets).
pub(crate) fn flatten(code: &str, range: Range<usize>, comments: &[Range<usize>]) -> String {
    let mut text = String::with_capacity(range.len());
    let mut pos = range.start;
    for comment in comments
        .iter()
        .filter(|c| c.start >= range.start && c.end <= range.end)
    {
        text.push_str(&code[pos..comment.start]);
        pos = comment.end;
    }
    text.push_str(&code[pos..range.end]);
    join_lines(&text)
}

fn join_lines(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines().map(collapse).filter(|l| !l.is_empty()) {
        if out.is_empty() {
            out = line;
            continue;
        }
        let first = line.chars().next();
        if matches!(first, Some(')' | ']' | '}')) && out.ends_with(',') {
            out.pop();
        }
        let last = out.chars().next_back();
        match (last, first) {
            (Some('(' | '['), _) | (_, Some(')' | ']')) => {}
            (Some('{' | ','), _) | (_, Some('}')) => out.push(' '),
            _ => out.push_str("; "),
        }
        out.push_str(&line);
    }
    out
}

fn collapse(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in line.trim().chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' && q != '`' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_whitespace() {
            if !out.ends_with(' ') {
                out.push(' ');
            }
            continue;
        }
        if matches!(c, '"' | '`' | '\'') {
            quote = Some(c);
        }
        out.push(c);
    }
    out
}
