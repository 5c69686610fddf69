//! Readability scoring.
//!
//! Two standard formulas over the same three counts:
//!
//! - Flesch-Kincaid Grade Level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//! - Flesch Reading Ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Lower grade = more readable; higher ease = more readable. Word and sentence
//! counts are floored at 1 before dividing, so every function here is total:
//! empty or degenerate text yields a defined score instead of an error.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::markdown;
use crate::syllables::estimate_syllables;

/// Runs of sentence-terminating punctuation.
static TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Per-sentence counts and grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentenceMetrics {
    /// Number of whitespace-separated words.
    pub word_count: usize,
    /// Estimated syllables across all words.
    pub syllable_count: usize,
    /// Flesch-Kincaid grade, treating the input as exactly one sentence.
    pub grade: f64,
}

/// Aggregate readability statistics for a whole text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Flesch-Kincaid Grade Level score.
    pub grade: f64,
    /// Flesch Reading Ease score.
    pub ease: f64,
    /// Number of sentences detected.
    pub sentences: usize,
    /// Number of words detected.
    pub words: usize,
    /// Total syllable count.
    pub syllables: usize,
    /// Maximum acceptable grade (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_grade: Option<f64>,
    /// Whether the grade exceeds the maximum.
    pub over_max: bool,
}

/// Count words by whitespace splitting.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count sentences as non-empty fragments between runs of `.`, `!` and `?`.
///
/// Never returns 0, so the result is always safe to divide by.
pub fn count_sentences(text: &str) -> usize {
    TERMINATORS
        .split(text)
        .filter(|fragment| !fragment.trim().is_empty())
        .count()
        .max(1)
}

/// Count total syllables across all words.
///
/// Each whitespace token is trimmed to its letters (keeping apostrophes and
/// hyphens) before estimation; tokens with no letters contribute nothing.
pub fn count_syllables(text: &str) -> usize {
    text.split_whitespace()
        .map(|w| {
            let cleaned = w.trim_matches(|c: char| !c.is_alphabetic());
            if cleaned.is_empty() {
                0
            } else {
                estimate_syllables(cleaned)
            }
        })
        .sum()
}

/// Flesch-Kincaid Grade Level, rounded to one decimal.
pub fn grade_score(text: &str) -> f64 {
    round1(fk_grade(
        count_words(text),
        count_sentences(text),
        count_syllables(text),
    ))
}

/// Flesch Reading Ease, rounded to one decimal.
pub fn ease_score(text: &str) -> f64 {
    round1(flesch_ease(
        count_words(text),
        count_sentences(text),
        count_syllables(text),
    ))
}

/// Score one sentence.
///
/// The sentence count is fixed at 1 regardless of any internal punctuation.
pub fn analyze_sentence(sentence: &str) -> SentenceMetrics {
    let word_count = count_words(sentence);
    let syllable_count = count_syllables(sentence);
    SentenceMetrics {
        word_count,
        syllable_count,
        grade: round1(fk_grade(word_count, 1, syllable_count)),
    }
}

/// Produce an aggregate readability report.
///
/// Unlike the scoring functions, this refuses input with no words at all,
/// since a report on nothing is meaningless to a caller gating on it.
///
/// # Arguments
///
/// * `text` - The text to analyze.
/// * `strip_md` - If `true`, strip markdown formatting before analysis.
/// * `max_grade` - Optional maximum acceptable grade level.
#[tracing::instrument(skip(text), fields(text_len = text.len(), strip_md))]
pub fn check_readability(
    text: &str,
    strip_md: bool,
    max_grade: Option<f64>,
) -> AnalysisResult<ReadabilityReport> {
    let prose = if strip_md {
        markdown::strip_to_prose(text)
    } else {
        text.to_string()
    };

    let words = count_words(&prose);
    if words == 0 {
        return Err(AnalysisError::EmptyInput);
    }
    let sentences = count_sentences(&prose);
    let syllables = count_syllables(&prose);

    let grade = round1(fk_grade(words, sentences, syllables));
    let ease = round1(flesch_ease(words, sentences, syllables));
    let over_max = max_grade.is_some_and(|max| grade > max);

    Ok(ReadabilityReport {
        grade,
        ease,
        sentences,
        words,
        syllables,
        max_grade,
        over_max,
    })
}

fn ratios(words: usize, sentences: usize, syllables: usize) -> (f64, f64) {
    let words = words.max(1) as f64;
    let sentences = sentences.max(1) as f64;
    (words / sentences, syllables as f64 / words)
}

fn fk_grade(words: usize, sentences: usize, syllables: usize) -> f64 {
    let (words_per_sentence, syllables_per_word) = ratios(words, sentences, syllables);
    0.39f64.mul_add(words_per_sentence, 11.8 * syllables_per_word) - 15.59
}

fn flesch_ease(words: usize, sentences: usize, syllables: usize) -> f64 {
    let (words_per_sentence, syllables_per_word) = ratios(words, sentences, syllables);
    (-1.015f64).mul_add(words_per_sentence, 206.835) - 84.6 * syllables_per_word
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
