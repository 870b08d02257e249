//! Merge command implementation

use std::path::Path;

use docsync_content::{Renderer, merge};

use super::emit;
use crate::config::Config;
use crate::error::Result;

/// Run the merge command
///
/// Loads both files, merges the comments of `source` into `target` and
/// renders the merged target as a documentation file.
pub fn run_merge(
    config: &Config,
    source: &Path,
    target: &Path,
    output: Option<&Path>,
    report: bool,
) -> Result<()> {
    let source_tree = docsync_go::parse_file(source)?;
    let mut target_tree = docsync_go::parse_file(target)?;

    let sync = merge(&source_tree, &mut target_tree)?;
    tracing::info!(edits = sync.count(), "merged {}", source.display());

    let rendered = Renderer::new(config.render)
        .with_matcher(config.matcher())
        .source(&target_tree)?;
    emit(&rendered, &sync, output, report)
}
