//! Annotation building.
//!
//! A rebuild is a pure function of a [`Document`] snapshot and an
//! [`AnalysisContext`]: every block is segmented into sentences, each
//! sentence is scored and classified, and (when enabled) each of its tokens
//! is checked for hard words. Judgments are mapped onto absolute byte offsets
//! in the document's coordinate space.
//!
//! The whole set is recomputed on every rebuild; an edit to the document
//! invalidates it.

use serde::Serialize;

use crate::classify::{Reason, SentenceTag, classify};
use crate::config::AnalysisSettings;
use crate::dictionaries::easy_words::EasyWordSet;
use crate::document::{Block, Document};
use crate::readability::analyze_sentence;
use crate::text::{split_sentences, tokens};
use crate::words::check_word;

/// What an annotation marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mark {
    /// A whole sentence flagged for length or difficulty.
    Sentence {
        /// Severity.
        tag: SentenceTag,
        /// Flesch-Kincaid grade of the sentence.
        grade: f64,
        /// Words in the sentence.
        words: usize,
        /// Rules that fired.
        reasons: Vec<Reason>,
    },
    /// A single hard word.
    Word {
        /// Estimated syllables.
        syllables: usize,
        /// Case-matched simpler replacement.
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
}

/// A marked range of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Absolute start offset.
    pub from: usize,
    /// Absolute end offset, exclusive.
    pub to: usize,
    /// What is marked.
    #[serde(flatten)]
    pub mark: Mark,
    /// Explanation shown on hover.
    pub tooltip: String,
}

impl Annotation {
    /// Severity tag, for sentence annotations.
    pub const fn sentence_tag(&self) -> Option<SentenceTag> {
        match &self.mark {
            Mark::Sentence { tag, .. } => Some(*tag),
            Mark::Word { .. } => None,
        }
    }

    /// Whether this marks a single word.
    pub const fn is_word(&self) -> bool {
        matches!(self.mark, Mark::Word { .. })
    }
}

/// All annotations for one document revision, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationSet {
    /// Revision of the snapshot the annotations were computed from.
    pub revision: u64,
    /// Sentence annotations, each followed by its word annotations.
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    /// Number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Count of sentence annotations with the given tag.
    pub fn count_tag(&self, tag: SentenceTag) -> usize {
        self.annotations
            .iter()
            .filter(|a| a.sentence_tag() == Some(tag))
            .count()
    }

    /// Count of word annotations.
    pub fn word_count(&self) -> usize {
        self.annotations.iter().filter(|a| a.is_word()).count()
    }
}

/// Read-only inputs to a rebuild.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    /// Settings snapshot.
    pub settings: &'a AnalysisSettings,
    /// Current easy-word set.
    pub easy_words: &'a EasyWordSet,
}

impl<'a> AnalysisContext<'a> {
    /// Bundle settings and easy words.
    pub const fn new(settings: &'a AnalysisSettings, easy_words: &'a EasyWordSet) -> Self {
        Self {
            settings,
            easy_words,
        }
    }
}

/// Compute the full annotation set for a document snapshot.
#[tracing::instrument(skip_all, fields(revision = document.revision(), blocks = document.blocks().len()))]
pub fn build_annotations(document: &Document, ctx: &AnalysisContext<'_>) -> AnnotationSet {
    let mut annotations = Vec::new();
    for block in document.blocks() {
        annotate_block(block, ctx, &mut annotations);
    }
    tracing::info!(
        annotations = annotations.len(),
        target_grade = ctx.settings.target_grade.as_u8(),
        "annotations rebuilt"
    );
    AnnotationSet {
        revision: document.revision(),
        annotations,
    }
}

fn annotate_block(block: &Block, ctx: &AnalysisContext<'_>, out: &mut Vec<Annotation>) {
    let settings = ctx.settings;
    let threshold = settings.hard_word_threshold();

    // Every range below lies inside `block.offset..=block.end()`, which
    // `Document::new` checked fits in a usize.
    for sentence in split_sentences(&block.text) {
        let base = block.offset + sentence.start;
        let metrics = analyze_sentence(sentence.text);

        if let Some(classification) = classify(
            metrics.word_count,
            metrics.grade,
            settings.target_grade,
            &settings.classifier,
        ) {
            out.push(Annotation {
                from: base,
                to: block.offset + sentence.end(),
                tooltip: classification.tooltip(),
                mark: Mark::Sentence {
                    tag: classification.tag,
                    grade: metrics.grade,
                    words: metrics.word_count,
                    reasons: classification.reasons,
                },
            });
        }

        if !settings.show_hard_words {
            continue;
        }
        for token in tokens(sentence.text) {
            let verdict = check_word(token.text, token.is_first(), threshold, ctx.easy_words);
            if let Some(hard) = verdict.hard() {
                let from = base + token.start + hard.offset;
                out.push(Annotation {
                    from,
                    to: from + hard.text.len(),
                    tooltip: hard.tooltip(),
                    mark: Mark::Word {
                        syllables: hard.syllables,
                        suggestion: hard.suggestion.clone(),
                    },
                });
            }
        }
    }
}
