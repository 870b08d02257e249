//! docsync CLI
//!
//! Keeps bilingual Go documentation comments in sync: compares, merges and
//! propagates translations, and rewraps comment text.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use config::Config;
use error::Result;

/// Exit status for runtime errors; 1 is reserved for `diff` findings.
const EXIT_ERROR: i32 = 2;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {e}", "warning".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} bilingual Go documentation sync", "docsync".green().bold());
        println!();
        println!("Run {} for available commands.", "docsync --help".cyan());
        return Ok(0);
    };
    let config = Config::load(cli.config.as_deref())?;
    execute_command(command, &config)
}

fn execute_command(cmd: Commands, config: &Config) -> Result<i32> {
    match cmd {
        Commands::Diff {
            a,
            b,
            full,
            json,
            unified,
        } => commands::run_diff(config, &a, &b, full, json, unified),
        Commands::Merge {
            source,
            target,
            output,
            report,
        } => commands::run_merge(config, &source, &target, output.as_deref(), report).map(|_| 0),
        Commands::Replace {
            target,
            source,
            output,
            report,
        } => commands::run_replace(config, &target, &source, output.as_deref(), report).map(|_| 0),
        Commands::Wrap {
            file,
            prefix,
            width,
        } => commands::run_wrap(config, file.as_deref(), &prefix, width).map(|_| 0),
        Commands::Progress { files } => commands::run_progress(config, &files).map(|_| 0),
        Commands::Godoc { file } => commands::run_godoc(config, &file).map(|_| 0),
        Commands::Markdown { file, output } => {
            commands::run_markdown(config, &file, output.as_deref()).map(|_| 0)
        }
        Commands::Inspect { file } => commands::run_inspect(&file).map(|_| 0),
    }
}
