//! Replace command implementation

use std::path::Path;

use colored::Colorize;
use docsync_content::{Renderer, replace_with};

use super::emit;
use crate::config::Config;
use crate::error::Result;

/// Run the replace command
///
/// Propagates verified translations of `source` into `target` using the
/// configured matcher gaps.
pub fn run_replace(
    config: &Config,
    target: &Path,
    source: &Path,
    output: Option<&Path>,
    report: bool,
) -> Result<()> {
    let mut target_tree = docsync_go::parse_file(target)?;
    let source_tree = docsync_go::parse_file(source)?;

    let sync = replace_with(&mut target_tree, &source_tree, &config.matcher())?;
    if sync.style_mismatch {
        eprintln!(
            "{}: nothing replaced, both files must be named like {}",
            "warning".yellow().bold(),
            "doc_<lang>.go".cyan()
        );
    }

    let rendered = Renderer::new(config.render)
        .with_matcher(config.matcher())
        .source(&target_tree)?;
    emit(&rendered, &sync, output, report)
}
