//! Library interface for the `gradewise` CLI.
//!
//! Exposes the argument parser and command implementations so they can be
//! tested and reused. The entry point is in `main.rs`.
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - `server` - MCP server (feature `mcp`)

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                  Log filter (e.g., debug, gradewise=trace)
    GRADEWISE_LOG_PATH        Explicit log file path
    GRADEWISE_LOG_DIR         Log directory
    GRADEWISE_TARGET_GRADE    Target reading grade (6, 8, 10)
    GRADEWISE_<KEY>           Any config key; nest with __ (e.g. GRADEWISE_CLASSIFIER__MIN_WORDS)
";

/// Command-line interface definition for gradewise.
#[derive(Parser)]
#[command(name = "gradewise")]
#[command(
    about = "Readability annotation for a target reading grade",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Flag hard sentences and hard words in a file
    Annotate(commands::annotate::AnnotateArgs),

    /// Score readability (Flesch-Kincaid grade and reading ease)
    Score(commands::score::ScoreArgs),

    /// Classify a single sentence
    Sentence(commands::sentence::SentenceArgs),

    /// Check whether a single word is hard
    Word(commands::word::WordArgs),

    /// Re-annotate a file every time it changes
    Watch(commands::watch::WatchArgs),

    /// Show package information and effective configuration
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn target_grade_accepts_known_values_only() {
        let cli = Cli::try_parse_from(["gradewise", "sentence", "-g", "6", "Hi."]).unwrap();
        match cli.command {
            Some(Commands::Sentence(args)) => {
                assert_eq!(args.target_grade, Some(gradewise_core::TargetGrade::Six));
            }
            _ => panic!("expected sentence command"),
        }
        assert!(Cli::try_parse_from(["gradewise", "sentence", "-g", "7", "Hi."]).is_err());
    }
}
