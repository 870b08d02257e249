//! Inspect command implementation

use std::path::Path;

use crate::error::Result;

/// Run the inspect command
///
/// Dumps the declaration tree loaded from `file` as JSON.
pub fn run_inspect(file: &Path) -> Result<()> {
    let tree = docsync_go::parse_file(file)?;
    println!("{}", tree.to_json()?);
    Ok(())
}
