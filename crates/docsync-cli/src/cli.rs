//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docsync - Keep bilingual Go documentation comments in sync
#[derive(Parser, Debug)]
#[command(name = "docsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./docsync.toml when present)
    #[arg(long, global = true, env = "DOCSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compare the documentation of two Go files
    ///
    /// Exits with status 1 when discrepancies are found.
    Diff {
        /// First file
        a: PathBuf,

        /// Second file
        b: PathBuf,

        /// Report every discrepancy instead of stopping at the first
        #[arg(long)]
        full: bool,

        /// Output as JSON for scripting
        #[arg(long, conflicts_with = "unified")]
        json: bool,

        /// Output as unified line diffs
        #[arg(long)]
        unified: bool,
    },

    /// Merge the comments of SOURCE into TARGET as translations
    ///
    /// Examples:
    ///   docsync merge heap_zh.go heap.go -o doc_zh_CN.go
    ///   docsync merge heap_zh.go heap.go --report
    Merge {
        /// File providing the second language
        source: PathBuf,

        /// File receiving the merged comments
        target: PathBuf,

        /// Write the merged documentation here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the edit report as JSON on stdout
        #[arg(long)]
        report: bool,
    },

    /// Propagate verified translations from SOURCE into TARGET
    ///
    /// Both files must follow the bilingual naming convention,
    /// e.g. doc_zh_CN.go.
    Replace {
        /// Bilingual file receiving translations
        target: PathBuf,

        /// Bilingual file providing translations
        source: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the edit report as JSON on stdout
        #[arg(long)]
        report: bool,
    },

    /// Rewrap comment text read from FILE or stdin
    Wrap {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Prefix written before every output line
        #[arg(short, long, default_value = "// ")]
        prefix: String,

        /// Width limit (defaults to the configured source width)
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Show the translation progress of bilingual files
    Progress {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print godoc-style plain-text documentation
    Godoc {
        /// Go source file
        file: PathBuf,
    },

    /// Render a Go documentation file as Markdown
    Markdown {
        /// Go source file
        file: PathBuf,

        /// Write the page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dump the loaded declaration tree as JSON
    Inspect {
        /// Go source file
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_diff_flags() {
        let cli = Cli::try_parse_from(["docsync", "diff", "a.go", "b.go", "--full"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Diff {
                a: "a.go".into(),
                b: "b.go".into(),
                full: true,
                json: false,
                unified: false,
            })
        );
    }

    #[test]
    fn json_conflicts_with_unified() {
        assert!(Cli::try_parse_from(["docsync", "diff", "a", "b", "--json", "--unified"]).is_err());
    }

    #[test]
    fn progress_needs_files() {
        assert!(Cli::try_parse_from(["docsync", "progress"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["docsync", "godoc", "x.go", "-v", "--config", "c.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }
}
