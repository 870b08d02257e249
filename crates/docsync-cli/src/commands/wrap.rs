//! Wrap command implementation

use std::io::Read;
use std::path::Path;

use docsync_content::format_comments;

use super::write_output;
use crate::config::Config;
use crate::error::{CliError, Result};

/// Run the wrap command
///
/// Reads plain comment text and writes it rewrapped with `prefix`. Text
/// holding a dividing line is wrapped per language.
pub fn run_wrap(config: &Config, file: Option<&Path>, prefix: &str, width: Option<usize>) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let width = width.unwrap_or(config.render.source_width);
    if width == 0 {
        return Err(CliError::user("--width must be greater than zero"));
    }

    let wrapped = format_comments(&text, prefix, width)?;
    write_output(None, &wrapped)
}
