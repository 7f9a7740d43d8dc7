use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Interlines Developers",
    version,
    about = "Interlines CLI - Inspect and validate the per-kind line settings used to draw molecular interaction lines.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an interaction settings file and print the resolved line settings.
    Check(CheckArgs),
    /// Print the built-in interaction settings as TOML.
    Defaults,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to a TOML file with one table per interaction kind.
    #[arg(value_name = "SETTINGS")]
    pub path: PathBuf,

    /// Do not fill kinds missing from the file with the built-in defaults.
    /// Every kind must then be configured explicitly.
    #[arg(long)]
    pub no_defaults: bool,
}
