//! Diff command implementation
//!
//! Compares the documentation of two Go files.

use std::path::Path;

use colored::Colorize;
use docsync_content::{DiffMode, Renderer, diff};

use crate::config::Config;
use crate::error::Result;

/// Run the diff command
///
/// Returns the exit status: 0 when the documentation matches, 1 otherwise.
pub fn run_diff(
    config: &Config,
    a: &Path,
    b: &Path,
    full: bool,
    json: bool,
    unified: bool,
) -> Result<i32> {
    let tree_a = docsync_go::parse_file(a)?;
    let tree_b = docsync_go::parse_file(b)?;
    let mode = if full { DiffMode::Full } else { DiffMode::First };
    let records = diff(&tree_a, &tree_b, mode);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        eprintln!("{} documentation matches", "OK".green().bold());
    } else if unified {
        for record in &records {
            print!("{}", record.unified());
        }
    } else {
        print!("{}", Renderer::new(config.render).records(&records));
    }

    Ok(i32::from(!records.is_empty()))
}
