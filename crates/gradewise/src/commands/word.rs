//! Word command: hard-word verdict for one token.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use gradewise_core::words::{WordVerdict, check_word};
use gradewise_core::{Config, EasyWordSet, TargetGrade};

use super::load_easy_words;

/// Arguments for the `word` subcommand.
#[derive(Args, Debug)]
pub struct WordArgs {
    /// The token, as it appears in text.
    pub word: String,

    /// Treat the token as the first word of its sentence
    #[arg(long)]
    pub first: bool,

    /// Target reading grade (overrides config)
    #[arg(short = 'g', long, value_enum, value_name = "GRADE")]
    pub target_grade: Option<TargetGrade>,

    /// JSON array of easy words, replacing the built-in list
    #[arg(long, value_name = "FILE")]
    pub easy_words: Option<Utf8PathBuf>,
}

/// A verdict with the threshold and tooltip it was judged by.
#[derive(Debug, Serialize)]
pub struct WordReport<'a> {
    /// The token as given.
    pub token: &'a str,
    /// Grade the token was judged against.
    pub target_grade: TargetGrade,
    /// Syllables needed to count as hard.
    pub threshold: usize,
    /// What the check decided.
    #[serde(flatten)]
    pub verdict: WordVerdict<'a>,
    /// Explanation, when flagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// Judge one token.
pub fn word_report<'a>(
    token: &'a str,
    first: bool,
    target_grade: TargetGrade,
    config: &Config,
    easy_words: &EasyWordSet,
) -> WordReport<'a> {
    let threshold = config.hard_syllables.for_grade(target_grade);
    let verdict = check_word(token, first, threshold, easy_words);
    WordReport {
        token,
        target_grade,
        threshold,
        tooltip: verdict.hard().map(|hard| hard.tooltip()),
        verdict,
    }
}

/// Check whether one word would be flagged.
#[instrument(name = "cmd_word", skip_all, fields(word = %args.word))]
pub fn cmd_word(args: WordArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let target_grade = args.target_grade.unwrap_or(config.target_grade);
    debug!(
        first = args.first,
        target_grade = target_grade.as_u8(),
        "executing word command"
    );

    let easy_words = load_easy_words(
        args.easy_words
            .as_deref()
            .or(config.easy_words_path.as_deref()),
    );
    let report = word_report(&args.word, args.first, target_grade, config, &easy_words);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report.verdict {
        WordVerdict::Hard(hard) => {
            println!("{} {}", "hard:".red(), hard.text);
            println!("{}", hard.tooltip());
        }
        WordVerdict::Easy { syllables } => println!(
            "{} {} syllables, on the easy-word list",
            "ok:".green(),
            syllables
        ),
        WordVerdict::Short {
            syllables,
            threshold,
        } => println!(
            "{} {} syllables (hard at {} for grade {})",
            "ok:".green(),
            syllables,
            threshold,
            report.target_grade
        ),
        WordVerdict::Filtered { filter } => {
            println!("{} skipped ({filter:?})", "ok:".green());
        }
    }
    Ok(())
}
