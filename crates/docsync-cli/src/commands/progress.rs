//! Progress command implementation

use std::path::PathBuf;

use colored::Colorize;
use docsync_content::progress_with;

use crate::config::Config;
use crate::error::Result;

/// Run the progress command
///
/// Prints the translation percentage of each file.
pub fn run_progress(config: &Config, files: &[PathBuf]) -> Result<()> {
    let matcher = config.matcher();
    for file in files {
        let tree = docsync_go::parse_file(file)?;
        let percent = progress_with(&tree, &matcher);
        let label = format!("{percent:>3}%");
        let label = if percent == 100 {
            label.green()
        } else {
            label.yellow()
        };
        println!("{label} {}", file.display());
    }
    Ok(())
}
