//! Sentence difficulty classification.
//!
//! Two independent hazards are checked, each with its own severity ladder
//! and its own minimum-word guard:
//!
//! - **length**: raw word count (`very_long_words` → red, `long_words` → yellow)
//! - **difficulty**: grade above target (`very_hard_margin` → red,
//!   `hard_margin` → yellow), both strict `>` comparisons
//!
//! Sentences under `min_words` are never tagged. The final tag is the more
//! severe of the two ladders; when neither fires, an optional blue tag marks
//! sentences that are merely on the long side.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::TargetGrade;

/// Severity of a flagged sentence, least severe first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SentenceTag {
    /// Long-ish; consider splitting.
    Blue,
    /// Long or harder than the target.
    Yellow,
    /// Very long or much harder than the target.
    Red,
}

impl SentenceTag {
    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for SentenceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification thresholds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Sentences with fewer words are never tagged.
    pub min_words: usize,
    /// Word count at which a sentence is yellow for length alone.
    pub long_words: usize,
    /// Word count at which a sentence is red for length alone.
    pub very_long_words: usize,
    /// Grade overshoot above which a sentence is yellow.
    pub hard_margin: f64,
    /// Grade overshoot above which a sentence is red.
    pub very_hard_margin: f64,
    /// Minimum words for a yellow difficulty tag.
    pub yellow_delta_min_words: usize,
    /// Minimum words for a red difficulty tag.
    pub red_delta_min_words: usize,
    /// Whether the blue fallback tag is emitted.
    pub blue_enabled: bool,
    /// Word count at which an otherwise untagged sentence is blue.
    pub blue_min_words: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_words: 8,
            long_words: 20,
            very_long_words: 25,
            hard_margin: 1.0,
            very_hard_margin: 3.0,
            yellow_delta_min_words: 14,
            red_delta_min_words: 18,
            blue_enabled: true,
            blue_min_words: 15,
        }
    }
}

/// A rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Reason {
    /// At or over `very_long_words`.
    VeryLong {
        /// Sentence word count.
        words: usize,
    },
    /// At or over `long_words`.
    Long {
        /// Sentence word count.
        words: usize,
    },
    /// Grade more than `very_hard_margin` over target.
    VeryHard {
        /// Sentence grade.
        grade: f64,
        /// Target grade.
        target: u8,
    },
    /// Grade more than `hard_margin` over target.
    Hard {
        /// Sentence grade.
        grade: f64,
        /// Target grade.
        target: u8,
    },
    /// Over `blue_min_words` with nothing else wrong.
    Lengthy {
        /// Sentence word count.
        words: usize,
    },
}

impl Reason {
    /// Tag this rule assigns.
    pub const fn tag(&self) -> SentenceTag {
        match self {
            Self::VeryLong { .. } | Self::VeryHard { .. } => SentenceTag::Red,
            Self::Long { .. } | Self::Hard { .. } => SentenceTag::Yellow,
            Self::Lengthy { .. } => SentenceTag::Blue,
        }
    }

    fn phrase(&self) -> String {
        match self {
            Self::VeryLong { words } => format!("very long ({words} words)"),
            Self::Long { words } => format!("long ({words} words)"),
            Self::VeryHard { grade, target } => {
                format!("very hard to read (grade {grade:.1}, target {target})")
            }
            Self::Hard { grade, target } => {
                format!("hard to read (grade {grade:.1}, target {target})")
            }
            Self::Lengthy { words } => format!("on the long side ({words} words)"),
        }
    }
}

/// Outcome for a tagged sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Classification {
    /// Most severe tag among the rules that fired.
    pub tag: SentenceTag,
    /// Every rule that fired, length first.
    pub reasons: Vec<Reason>,
}

impl Classification {
    /// Human-readable explanation built from the rules that fired.
    pub fn tooltip(&self) -> String {
        let phrases: Vec<String> = self.reasons.iter().map(Reason::phrase).collect();
        let advice = match self.tag {
            SentenceTag::Red => "Split it or use simpler words.",
            SentenceTag::Yellow => "Consider simplifying it.",
            SentenceTag::Blue => "Consider splitting it.",
        };
        format!("This sentence is {}. {advice}", phrases.join(" and "))
    }
}

/// Classify one sentence against a target grade.
///
/// Returns `None` when no rule fires.
pub fn classify(
    word_count: usize,
    grade: f64,
    target: TargetGrade,
    config: &ClassifierConfig,
) -> Option<Classification> {
    if word_count < config.min_words {
        return None;
    }

    let length = if word_count >= config.very_long_words {
        Some(Reason::VeryLong { words: word_count })
    } else if word_count >= config.long_words {
        Some(Reason::Long { words: word_count })
    } else {
        None
    };

    let delta = grade - target.value();
    let difficulty = if delta > config.very_hard_margin && word_count >= config.red_delta_min_words
    {
        Some(Reason::VeryHard {
            grade,
            target: target.as_u8(),
        })
    } else if delta > config.hard_margin && word_count >= config.yellow_delta_min_words {
        Some(Reason::Hard {
            grade,
            target: target.as_u8(),
        })
    } else {
        None
    };

    let reasons: Vec<Reason> = [length, difficulty].into_iter().flatten().collect();
    if let Some(tag) = reasons.iter().map(Reason::tag).max() {
        return Some(Classification { tag, reasons });
    }

    if config.blue_enabled && word_count >= config.blue_min_words {
        return Some(Classification {
            tag: SentenceTag::Blue,
            reasons: vec![Reason::Lengthy { words: word_count }],
        });
    }

    None
}
