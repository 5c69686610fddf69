//! Info command implementation

use clap::Args;
use gradewise_core::words::HardSyllables;
use gradewise_core::{ClassifierConfig, Config, ConfigSources, TargetGrade};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    target_grade: TargetGrade,
    show_hard_words: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    easy_words_path: Option<String>,
    stats_debounce_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_grade: Option<f64>,
    /// `null` when the limit is disabled.
    max_input_bytes: Option<usize>,
    classifier: ClassifierConfig,
    hard_syllables: HardSyllables,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            target_grade: config.target_grade,
            show_hard_words: config.show_hard_words,
            easy_words_path: config.easy_words_path.as_ref().map(|p| p.to_string()),
            stats_debounce_ms: config.stats_debounce_ms,
            max_grade: config.max_grade,
            max_input_bytes: config.input_limit(),
            classifier: config.classifier.clone(),
            hard_syllables: config.hard_syllables.clone(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }
    if !package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), package.repository.cyan());
    }

    let info = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match info.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), info.log_level);
    if let Some(ref dir) = info.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Analysis".bold().underline());
    println!("{}: {}", "Target grade".dimmed(), info.target_grade);
    println!("{}: {}", "Hard words".dimmed(), info.show_hard_words);
    println!(
        "{}: {}",
        "Easy words".dimmed(),
        info.easy_words_path.as_deref().unwrap_or("built-in")
    );
    println!(
        "{}: {}/{}/{} syllables",
        "Hard at (6/8/10)".dimmed(),
        info.hard_syllables.grade_6,
        info.hard_syllables.grade_8,
        info.hard_syllables.grade_10
    );
    println!(
        "{}: {} words (long {}, very long {})",
        "Sentence minimum".dimmed(),
        info.classifier.min_words,
        info.classifier.long_words,
        info.classifier.very_long_words
    );
    println!("{}: {} ms", "Stats debounce".dimmed(), info.stats_debounce_ms);
    match info.max_grade {
        Some(max) => println!("{}: {:.1}", "Max grade".dimmed(), max),
        None => println!("{}: {}", "Max grade".dimmed(), "(not set)".dimmed()),
    }
    match info.max_input_bytes {
        Some(max) => println!("{}: {} bytes", "Input limit".dimmed(), max),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    Ok(())
}
