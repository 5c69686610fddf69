//! Score command: aggregate Flesch-Kincaid statistics for a file.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use gradewise_core::readability;

use super::{InputFormat, parse_document, read_input_file};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Maximum acceptable grade level.
    #[arg(long)]
    pub max_grade: Option<f64>,
}

/// Score the readability of a file.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config_max_grade: Option<f64>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, max_grade = ?args.max_grade, "executing score command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let max_grade = args.max_grade.or(config_max_grade);

    let report = match InputFormat::from_path(&args.file) {
        InputFormat::Json => {
            let document = parse_document(&args.file, &content)?;
            readability::check_readability(&document.plain_text(), false, max_grade)
        }
        InputFormat::Markdown => readability::check_readability(&content, true, max_grade),
        InputFormat::PlainText => readability::check_readability(&content, false, max_grade),
    }
    .with_context(|| format!("failed to score {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.over_max {
            bail!("{} scores {:.1}, over the maximum", args.file, report.grade);
        }
    } else if report.over_max {
        let max = report.max_grade.unwrap_or(0.0);
        bail!(
            "{} scores {:.1} (max: {:.1}). Split long sentences or use simpler words.",
            args.file,
            report.grade,
            max,
        );
    } else {
        if let Some(max) = report.max_grade {
            println!(
                "{} {} scores {:.1} (max: {:.1})",
                "PASS:".green(),
                args.file,
                report.grade,
                max,
            );
        } else {
            println!("{:.1}", report.grade);
        }
        println!(
            "{}",
            format!(
                "ease {:.1}, {} sentences, {} words, {} syllables",
                report.ease, report.sentences, report.words, report.syllables
            )
            .dimmed()
        );
    }

    Ok(())
}
