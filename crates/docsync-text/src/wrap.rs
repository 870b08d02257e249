//! Greedy line breaking for mixed-width text

use std::ops::Range;

use crate::width::{advance_str, char_width, display_width};

/// Punctuation that stays on the line it follows, even when that line
/// then exceeds the limit.
pub const KEEP_PUNCT: &[char] = &[
    ',', '.', ':', ';', '?', '，', '．', '：', '；', '？', '。',
];

/// Opening punctuation that is carried over to the next line instead of
/// ending a line.
pub const OPEN_PUNCT: &[char] = &['`', '*', '@', '"', '\'', '[', '(', '“', '（', '［'];

/// Wrap `text` so that every line fits in `limit` columns, then prefix
/// each line with `prefix`.
///
/// The limit applies to the content after the prefix. Leading and
/// trailing blank lines are dropped. Lines starting with a tab or four
/// spaces are preformatted: leading tabs become four spaces and the line
/// is never broken. Every emitted line is right-trimmed and terminated by
/// `\n`; text without any non-blank line yields an empty string.
///
/// A single token wider than the limit (a long identifier or a URL) is
/// placed on its own line rather than split.
pub fn wrap(text: &str, prefix: &str, limit: usize) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    let Some(first) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .unwrap_or(first);

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for line in &lines[first..=last] {
        if is_preformatted(line) {
            emit(&mut out, prefix, &expand_indent(line));
            continue;
        }
        for piece in break_line(line, limit) {
            emit(&mut out, prefix, &piece);
        }
    }
    out
}

/// Start of the URL whose scheme separator `://` begins at byte `marker`.
///
/// Scans backwards over scheme characters (lowercase ASCII letters,
/// digits, `+`, `-` and `.`); the scheme must begin with a letter.
pub fn url_start(text: &str, marker: usize) -> Option<usize> {
    let head = text.get(..marker)?;
    let mut start = marker;
    for (i, c) in head.char_indices().rev() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.') {
            start = i;
        } else {
            break;
        }
    }
    let scheme = &head[start..];
    let offset = scheme.find(|c: char| c.is_ascii_lowercase())?;
    Some(start + offset)
}

fn is_preformatted(line: &str) -> bool {
    line.starts_with('\t') || line.starts_with("    ")
}

fn expand_indent(line: &str) -> String {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - body.len()];
    let mut out = indent.replace('\t', "    ");
    out.push_str(body);
    out
}

fn emit(out: &mut String, prefix: &str, body: &str) {
    let start = out.len();
    out.push_str(prefix);
    out.push_str(body);
    let trimmed = out[start..].trim_end().len();
    out.truncate(start + trimmed);
    out.push('\n');
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Space,
    Narrow,
    Wide,
    Zero,
}

fn classify(c: char) -> Class {
    match c {
        c if c.is_whitespace() => Class::Space,
        _ => match char_width(c) {
            0 => Class::Zero,
            2 => Class::Wide,
            _ => Class::Narrow,
        },
    }
}

/// A breakable unit of a line: a whitespace run, a run of narrow
/// characters, a single wide character, or a whole URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    range: Range<usize>,
    space: bool,
}

fn url_ranges(line: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(found) = line[from..].find("://") {
        let marker = from + found;
        let end = line[marker..]
            .find(char::is_whitespace)
            .map_or(line.len(), |n| marker + n);
        match url_start(line, marker) {
            Some(start) if start >= from => {
                ranges.push(start..end);
                from = end;
            }
            _ => from = marker + 3,
        }
    }
    ranges
}

fn segments(line: &str) -> Vec<Segment> {
    fn flush(out: &mut Vec<Segment>, run: &mut Option<(usize, Class)>, end: usize) {
        if let Some((start, class)) = run.take() {
            out.push(Segment {
                range: start..end,
                space: class == Class::Space,
            });
        }
    }

    let urls = url_ranges(line);
    let mut out = Vec::new();
    let mut run: Option<(usize, Class)> = None;
    let mut skip_to = 0;

    for (i, c) in line.char_indices() {
        if i < skip_to {
            continue;
        }
        if let Some(url) = urls.iter().find(|url| url.start == i) {
            flush(&mut out, &mut run, i);
            out.push(Segment {
                range: url.clone(),
                space: false,
            });
            skip_to = url.end;
            continue;
        }
        let end = i + c.len_utf8();
        match classify(c) {
            Class::Zero => {
                if run.is_some() {
                    continue;
                }
                match out.last_mut().filter(|seg| !seg.space) {
                    Some(last) => last.range.end = end,
                    None => run = Some((i, Class::Narrow)),
                }
            }
            Class::Wide => {
                flush(&mut out, &mut run, i);
                out.push(Segment {
                    range: i..end,
                    space: false,
                });
            }
            class => match run {
                Some((_, current)) if current == class => {}
                _ => {
                    flush(&mut out, &mut run, i);
                    run = Some((i, class));
                }
            },
        }
    }
    flush(&mut out, &mut run, line.len());
    out
}

fn is_open(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| OPEN_PUNCT.contains(&c))
}

fn break_line(line: &str, limit: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;
    let mut pending = "";
    let mut last_word = 0;
    let mut last_open = false;

    for seg in segments(line) {
        let text = &line[seg.range];
        if seg.space {
            // whitespace at the start of a continuation line is dropped
            if !(current.is_empty() && !lines.is_empty()) {
                pending = text;
            }
            continue;
        }

        let start = advance_str(width, pending);
        let end = advance_str(start, text);
        let attached = pending.is_empty() && text.starts_with(KEEP_PUNCT);

        if end <= limit || current.is_empty() || attached {
            current.push_str(pending);
            last_word = current.len();
            current.push_str(text);
            width = end;
        } else {
            let carry = last_open && pending.is_empty() && !current[..last_word].trim().is_empty();
            let carried = if carry {
                current.split_off(last_word)
            } else {
                String::new()
            };
            lines.push(current.trim_end().to_string());
            current = carried;
            last_word = current.len();
            current.push_str(text);
            width = display_width(&current);
        }
        last_open = is_open(text);
        pending = "";
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}
