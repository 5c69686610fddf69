//! Sentence command: metrics and classification for one sentence.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use gradewise_core::classify::{Classification, classify};
use gradewise_core::readability::{SentenceMetrics, analyze_sentence};
use gradewise_core::{Config, SentenceTag, TargetGrade};

/// Arguments for the `sentence` subcommand.
#[derive(Args, Debug)]
pub struct SentenceArgs {
    /// The sentence to analyze.
    pub text: String,

    /// Target reading grade (overrides config)
    #[arg(short = 'g', long, value_enum, value_name = "GRADE")]
    pub target_grade: Option<TargetGrade>,
}

/// Metrics plus the classification, if any rule fired.
#[derive(Debug, Serialize)]
pub struct SentenceReport {
    /// Counts and grade.
    #[serde(flatten)]
    pub metrics: SentenceMetrics,
    /// Grade the sentence was judged against.
    pub target_grade: TargetGrade,
    /// Severity tag, `null` when untagged.
    pub tag: Option<SentenceTag>,
    /// Explanation, when tagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// The full classification, when tagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
}

/// Score and classify one sentence against the classifier thresholds.
pub fn sentence_report(text: &str, target_grade: TargetGrade, config: &Config) -> SentenceReport {
    let metrics = analyze_sentence(text);
    let classification = classify(
        metrics.word_count,
        metrics.grade,
        target_grade,
        &config.classifier,
    );
    SentenceReport {
        metrics,
        target_grade,
        tag: classification.as_ref().map(|c| c.tag),
        tooltip: classification.as_ref().map(Classification::tooltip),
        classification,
    }
}

/// Analyze one sentence.
#[instrument(name = "cmd_sentence", skip_all, fields(text_len = args.text.len()))]
pub fn cmd_sentence(args: SentenceArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let target_grade = args.target_grade.unwrap_or(config.target_grade);
    debug!(target_grade = target_grade.as_u8(), "executing sentence command");

    let report = sentence_report(&args.text, target_grade, config);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "grade {:.1} (target {}), {} words, {} syllables",
        report.metrics.grade,
        report.target_grade,
        report.metrics.word_count,
        report.metrics.syllable_count
    );
    match (report.tag, report.tooltip) {
        (Some(SentenceTag::Red), Some(tip)) => println!("{} {tip}", "red:".red()),
        (Some(SentenceTag::Yellow), Some(tip)) => println!("{} {tip}", "yellow:".yellow()),
        (Some(SentenceTag::Blue), Some(tip)) => println!("{} {tip}", "blue:".blue()),
        _ => println!("{}", "no flag".green()),
    }
    Ok(())
}
