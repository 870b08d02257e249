//! Comment blocks and the bilingual dividing line
//!
//! A [`CommentBlock`] keeps the raw comment tokens of one contiguous
//! comment (`// text` lines or a `/* text */` block) together with the
//! byte span they occupied in the source. Bilingual comments hold the
//! original text, a line consisting of [`DIVIDER`], and the translation.

use docsync_text::is_wide;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Literal occupying the whole line that separates the two languages of a
/// merged comment.
pub const DIVIDER: &str = "___GoDocu_Dividing_line___";

/// Separator joining the two languages of a same-line (trailing) comment.
pub const INLINE_SEPARATOR: &str = " // ";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//(?:go:[a-z]|line |\s*\+build\b)").expect("Invalid directive regex")
});

/// One contiguous comment and its location in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentBlock {
    /// Raw comment tokens, markers included
    pub lines: Vec<String>,
    /// Byte range in the original source (markers included)
    pub span: Range<usize>,
}

impl CommentBlock {
    pub fn new(lines: Vec<String>, span: Range<usize>) -> Self {
        Self { lines, span }
    }

    /// Build a `//`-style block holding `text` that starts at byte `start`.
    ///
    /// The span covers the rendered lines joined by single newlines, the
    /// layout a loader would report for the same comment.
    pub fn from_text(text: &str, start: usize) -> Self {
        let lines: Vec<String> = text.lines().map(line_comment).collect();
        let len = lines.iter().map(String::len).sum::<usize>() + lines.len().saturating_sub(1);
        Self {
            lines,
            span: start..start + len,
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Start offset of the final line, derived from the end offset so that
    /// it stays consistent after the text has been rewritten in place.
    pub fn last_line_start(&self) -> usize {
        let last = self.lines.last().map_or(0, String::len);
        self.span.end.saturating_sub(last)
    }

    /// Documentation text with comment markers removed.
    ///
    /// Trailing whitespace is trimmed from every line, leading and trailing
    /// blank lines are dropped, runs of blank lines collapse to one, and
    /// every line ends with `\n`. Directive lines are omitted.
    pub fn text(&self) -> String {
        text_of(&self.lines)
    }

    /// True when the block carries no documentation text.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| marker_body(line).trim().is_empty())
    }

    /// Whether the block is a build or compiler directive rather than
    /// documentation.
    pub fn is_directive(&self) -> bool {
        self.lines
            .first()
            .is_some_and(|line| DIRECTIVE.is_match(line))
    }

    /// Index of the dividing line, if the block is bilingual.
    ///
    /// Fails when the divider literal shares a line with other text.
    pub fn divider_index(&self) -> Result<Option<usize>> {
        for (i, line) in self.lines.iter().enumerate() {
            if !line.contains(DIVIDER) {
                continue;
            }
            if marker_body(line).trim() == DIVIDER {
                return Ok(Some(i));
            }
            let position = self.span.start + line.find(DIVIDER).unwrap_or(0);
            return Err(Error::format(
                position,
                "dividing line must occupy a whole line",
            ));
        }
        Ok(None)
    }

    /// Lines before the divider, or every line of a monolingual block.
    pub fn original_lines(&self) -> Result<&[String]> {
        Ok(match self.divider_index()? {
            Some(i) => &self.lines[..i],
            None => &self.lines,
        })
    }

    /// Lines after the divider, or every line of a monolingual block.
    pub fn translation_lines(&self) -> Result<&[String]> {
        Ok(match self.divider_index()? {
            Some(i) => &self.lines[i + 1..],
            None => &self.lines,
        })
    }

    /// Text of the translated half; `None` for a monolingual block.
    pub fn translation(&self) -> Result<Option<String>> {
        Ok(self
            .divider_index()?
            .map(|i| text_of(&self.lines[i + 1..])))
    }

    /// Append `other` as the translation of this block.
    ///
    /// Anything after an existing divider is replaced; only the translated
    /// half of a bilingual `other` is taken. The span is left untouched.
    pub fn set_translation(&mut self, other: &CommentBlock) -> Result<()> {
        let incoming = other.translation_lines()?.to_vec();
        let keep = self.divider_index()?.unwrap_or(self.lines.len());
        self.lines.truncate(keep);
        self.lines.push(line_comment(DIVIDER));
        self.lines.extend(incoming);
        Ok(())
    }

    /// Replace the content wholesale, keeping the span.
    pub fn overwrite(&mut self, other: &CommentBlock) {
        self.lines = other.lines.clone();
    }

    /// Split a same-line comment at [`INLINE_SEPARATOR`].
    pub fn inline_parts(&self) -> (String, Option<String>) {
        let text = normalize(&self.text());
        match text.split_once(INLINE_SEPARATOR) {
            Some((original, translation)) => (
                original.trim().to_string(),
                Some(translation.trim().to_string()),
            ),
            None => (text, None),
        }
    }

    /// Whether a same-line comment already carries both languages.
    pub fn is_inline_bilingual(&self) -> bool {
        self.inline_parts().1.is_some()
    }

    /// Rewrite a same-line comment as `original // translation`.
    pub fn set_inline_translation(&mut self, other: &CommentBlock) {
        let (original, _) = self.inline_parts();
        let incoming = match other.inline_parts() {
            (_, Some(translation)) => translation,
            (text, None) => text,
        };
        self.lines = vec![format!("// {original}{INLINE_SEPARATOR}{incoming}")];
    }
}

/// Collapse `text` to a single line: every whitespace run becomes one
/// space, or nothing between two wide characters. Texts equal after
/// normalization differ only in layout.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        let joined = out.chars().next_back().is_some_and(is_wide)
            && word.chars().next().is_some_and(is_wide);
        if !out.is_empty() && !joined {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Split free text at the dividing line.
///
/// The divider must start at the beginning of the text or of a line and
/// be followed by a newline or the end of the text.
pub fn split_divider(text: &str) -> Result<Option<(&str, &str)>> {
    let Some(pos) = text.find(DIVIDER) else {
        return Ok(None);
    };
    let end = pos + DIVIDER.len();
    let starts_line = pos == 0 || text[..pos].ends_with('\n');
    let ends_line = end == text.len() || text[end..].starts_with('\n');
    if !starts_line || !ends_line {
        return Err(Error::format(
            pos,
            format!("invalid {DIVIDER}: it must occupy a whole line"),
        ));
    }
    let rest = &text[end..];
    Ok(Some((&text[..pos], rest.strip_prefix('\n').unwrap_or(rest))))
}

fn line_comment(text: &str) -> String {
    if text.is_empty() {
        "//".to_string()
    } else {
        format!("// {text}")
    }
}

fn marker_body(raw: &str) -> &str {
    if let Some(rest) = raw.strip_prefix("//") {
        rest.strip_prefix(' ').unwrap_or(rest)
    } else if let Some(rest) = raw.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest)
    } else {
        raw
    }
}

fn text_of(lines: &[String]) -> String {
    let mut text = String::new();
    let mut blank = false;
    for raw in lines {
        if DIRECTIVE.is_match(raw) && !raw.starts_with("// ") {
            continue;
        }
        for line in marker_body(raw).split('\n') {
            let line = line.trim_end();
            if line.is_empty() {
                blank = !text.is_empty();
                continue;
            }
            if blank {
                text.push('\n');
                blank = false;
            }
            text.push_str(line);
            text.push('\n');
        }
    }
    text
}
