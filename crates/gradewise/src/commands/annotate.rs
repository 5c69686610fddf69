//! Annotate command: print every flagged sentence and word in a file.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use gradewise_core::{
    AnalysisContext, Annotation, AnnotationSet, Config, Document, Mark, SentenceTag,
    build_annotations,
};

use super::{AnalysisArgs, load_easy_words, parse_document, read_input_file};

/// Longest snippet shown per annotation in text output.
const SNIPPET_CHARS: usize = 60;

/// Arguments for the `annotate` subcommand.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// File to annotate (.md, .json document snapshot, or plain text).
    pub file: Utf8PathBuf,

    /// Analysis settings.
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Build and print the annotation set for a file.
#[instrument(name = "cmd_annotate", skip_all, fields(file = %args.file))]
pub fn cmd_annotate(
    args: AnnotateArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let settings = args.analysis.settings(config);
    debug!(
        file = %args.file,
        target_grade = settings.target_grade.as_u8(),
        show_hard_words = settings.show_hard_words,
        "executing annotate command"
    );

    let content = read_input_file(&args.file, max_input_bytes)?;
    let document = parse_document(&args.file, &content)?;
    let easy_words = load_easy_words(args.analysis.easy_words_path(config));
    let set = build_annotations(&document, &AnalysisContext::new(&settings, &easy_words));

    if global_json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        print_annotations(&document, &set);
    }
    Ok(())
}

/// Human-readable listing followed by a one-line summary.
pub(crate) fn print_annotations(document: &Document, set: &AnnotationSet) {
    for annotation in &set.annotations {
        print_annotation(document, annotation);
    }
    println!("{}", summary(set));
}

fn print_annotation(document: &Document, annotation: &Annotation) {
    let range = format!("{}..{}", annotation.from, annotation.to);
    let text = document
        .slice(annotation.from, annotation.to)
        .map(snippet)
        .unwrap_or_default();
    let label = match &annotation.mark {
        Mark::Sentence { tag, .. } => match tag {
            SentenceTag::Red => format!("{:<6}", "red").red().to_string(),
            SentenceTag::Yellow => format!("{:<6}", "yellow").yellow().to_string(),
            SentenceTag::Blue => format!("{:<6}", "blue").blue().to_string(),
        },
        Mark::Word { .. } => format!("{:<6}", "word").magenta().to_string(),
    };
    println!("{label} {range:<12} {text}");
    println!("{:6} {:12} {}", "", "", annotation.tooltip.dimmed());
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(SNIPPET_CHARS - 1).collect();
    short.push('…');
    short
}

/// e.g. `1 red, 0 yellow, 2 blue sentences; 3 hard words`
pub(crate) fn summary(set: &AnnotationSet) -> String {
    format!(
        "{} red, {} yellow, {} blue sentences; {} hard words",
        set.count_tag(SentenceTag::Red),
        set.count_tag(SentenceTag::Yellow),
        set.count_tag(SentenceTag::Blue),
        set.word_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradewise_core::EasyWordSet;

    #[test]
    fn snippet_truncates_long_text() {
        let long = "word ".repeat(30);
        let short = snippet(&long);
        assert_eq!(short.chars().count(), SNIPPET_CHARS);
        assert!(short.ends_with('…'));
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn summary_counts_kinds() {
        let document = Document::from_plain_text("We utilize it.");
        let settings = gradewise_core::AnalysisSettings {
            target_grade: gradewise_core::TargetGrade::Six,
            ..Default::default()
        };
        let easy = EasyWordSet::seed();
        let set = build_annotations(&document, &AnalysisContext::new(&settings, &easy));
        assert_eq!(summary(&set), "0 red, 0 yellow, 0 blue sentences; 1 hard words");
    }
}
