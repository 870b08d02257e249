//! Godoc command implementation

use std::path::Path;

use docsync_content::Renderer;

use super::write_output;
use crate::config::Config;
use crate::error::Result;

/// Run the godoc command
pub fn run_godoc(config: &Config, file: &Path) -> Result<()> {
    let tree = docsync_go::parse_file(file)?;
    let text = Renderer::new(config.render).godoc(&tree)?;
    write_output(None, &text)
}
