//! Markdown command implementation

use std::path::Path;

use docsync_content::Renderer;

use super::write_output;
use crate::config::Config;
use crate::error::Result;

/// Run the markdown command
pub fn run_markdown(config: &Config, file: &Path, output: Option<&Path>) -> Result<()> {
    let tree = docsync_go::parse_file(file)?;
    let page = Renderer::new(config.render).markdown(&tree)?;
    write_output(output, &page)
}
