//! Command implementations for docsync-cli

pub mod diff;
pub mod godoc;
pub mod inspect;
pub mod markdown;
pub mod merge;
pub mod progress;
pub mod replace;
pub mod wrap;

pub use diff::run_diff;
pub use godoc::run_godoc;
pub use inspect::run_inspect;
pub use markdown::run_markdown;
pub use merge::run_merge;
pub use progress::run_progress;
pub use replace::run_replace;
pub use wrap::run_wrap;

use docsync_content::SyncReport;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Write `text` to `output`, or to stdout when no file is given.
pub(crate) fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

/// Emit the rendered result and, with `report`, the edit report.
///
/// The report takes stdout when requested, so the rendered source then
/// only goes to `output`.
pub(crate) fn emit(
    rendered: &str,
    sync: &SyncReport,
    output: Option<&Path>,
    report: bool,
) -> Result<()> {
    if report {
        if let Some(path) = output {
            std::fs::write(path, rendered)?;
        }
        println!("{}", serde_json::to_string_pretty(sync)?);
        return Ok(());
    }
    write_output(output, rendered)
}
