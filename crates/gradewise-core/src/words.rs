//! Hard-word flagging.
//!
//! A token is checked against lexical filters first (URLs, numbers, proper
//! nouns, acronyms), then against the per-grade syllable threshold and the
//! easy-word allow-list. Flagged words get a case-matched suggestion when the
//! suggestion map has one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::TargetGrade;
use crate::dictionaries::easy_words::EasyWordSet;
use crate::dictionaries::suggestions::suggestion_for;
use crate::syllables::estimate_syllables;

/// Minimum syllables for a word to count as hard, per target grade.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct HardSyllables {
    /// Threshold at target grade 6.
    pub grade_6: usize,
    /// Threshold at target grade 8.
    pub grade_8: usize,
    /// Threshold at target grade 10.
    pub grade_10: usize,
}

impl Default for HardSyllables {
    fn default() -> Self {
        Self {
            grade_6: 3,
            grade_8: 4,
            grade_10: 5,
        }
    }
}

impl HardSyllables {
    /// Threshold for a target grade.
    pub const fn for_grade(&self, grade: TargetGrade) -> usize {
        match grade {
            TargetGrade::Six => self.grade_6,
            TargetGrade::Eight => self.grade_8,
            TargetGrade::Ten => self.grade_10,
        }
    }
}

/// Why a token was not considered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Nothing left after stripping apostrophes.
    Empty,
    /// Looks like a URL.
    Url,
    /// Starts with a digit.
    Number,
    /// Capitalized mid-sentence.
    ProperNoun,
    /// All capitals.
    Acronym,
}

/// A word judged likely too hard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardWord<'a> {
    /// The word, apostrophes stripped.
    pub text: &'a str,
    /// Byte offset of `text` within the original token.
    pub offset: usize,
    /// Estimated syllables.
    pub syllables: usize,
    /// Simpler replacement, case-matched to `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl HardWord<'_> {
    /// Human-readable explanation.
    pub fn tooltip(&self) -> String {
        match &self.suggestion {
            Some(simpler) => format!(
                "Hard word ({} syllables). Try \"{simpler}\".",
                self.syllables
            ),
            None => format!(
                "Hard word ({} syllables). Consider a simpler option.",
                self.syllables
            ),
        }
    }
}

/// Outcome of checking one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum WordVerdict<'a> {
    /// Skipped by a lexical filter.
    Filtered {
        /// Which filter matched.
        filter: Filter,
    },
    /// Under the syllable threshold.
    Short {
        /// Estimated syllables.
        syllables: usize,
        /// Threshold in effect.
        threshold: usize,
    },
    /// Over the threshold but on the easy-word list.
    Easy {
        /// Estimated syllables.
        syllables: usize,
    },
    /// Flagged as hard.
    Hard(HardWord<'a>),
}

impl<'a> WordVerdict<'a> {
    /// The flagged word, if any.
    pub const fn hard(&self) -> Option<&HardWord<'a>> {
        match self {
            Self::Hard(word) => Some(word),
            _ => None,
        }
    }
}

const fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '’')
}

/// Check one token as it appears in text.
///
/// `first_in_sentence` disables the proper-noun filter: sentence-initial
/// capitals say nothing about the word.
pub fn check_word<'a>(
    token: &'a str,
    first_in_sentence: bool,
    threshold: usize,
    easy_words: &EasyWordSet,
) -> WordVerdict<'a> {
    let word = token.trim_matches(is_apostrophe);
    if word.is_empty() {
        return WordVerdict::Filtered {
            filter: Filter::Empty,
        };
    }
    let offset = token.len() - token.trim_start_matches(is_apostrophe).len();

    if let Some(filter) = lexical_filter(word, first_in_sentence) {
        return WordVerdict::Filtered { filter };
    }

    let syllables = estimate_syllables(word);
    if syllables < threshold {
        return WordVerdict::Short {
            syllables,
            threshold,
        };
    }

    let lower = word.to_lowercase();
    if easy_words.contains(&lower) {
        return WordVerdict::Easy { syllables };
    }

    WordVerdict::Hard(HardWord {
        text: word,
        offset,
        syllables,
        suggestion: suggestion_for(&lower).map(|simpler| match_case(word, simpler)),
    })
}

fn lexical_filter(word: &str, first_in_sentence: bool) -> Option<Filter> {
    let lower = word.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
    {
        return Some(Filter::Url);
    }

    let mut chars = word.chars();
    let first = chars.next()?;
    if first.is_numeric() {
        return Some(Filter::Number);
    }

    if !first_in_sentence && first.is_uppercase() && chars.next().is_some_and(char::is_lowercase)
    {
        return Some(Filter::ProperNoun);
    }

    if is_all_caps(word) {
        return Some(Filter::Acronym);
    }

    None
}

/// More than one character, and every letter upper-case.
fn is_all_caps(word: &str) -> bool {
    word.chars().count() > 1
        && word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// Adapt a lowercase replacement to the case pattern of `original`.
pub fn match_case(original: &str, replacement: &str) -> String {
    if is_all_caps(original) {
        return replacement.to_uppercase();
    }
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        return chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        });
    }
    replacement.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(token: &str, first: bool) -> WordVerdict<'_> {
        check_word(token, first, 3, &EasyWordSet::seed())
    }

    #[test]
    fn all_caps_never_flagged() {
        assert_eq!(
            check("THE", false),
            WordVerdict::Filtered {
                filter: Filter::Acronym
            }
        );
        assert_eq!(
            check("EXTRAORDINARILY", true),
            WordVerdict::Filtered {
                filter: Filter::Acronym
            }
        );
    }

    #[test]
    fn proper_noun_filter_skips_sentence_start() {
        assert_eq!(
            check("Paris", false),
            WordVerdict::Filtered {
                filter: Filter::ProperNoun
            }
        );
        // first token is eligible: judged on syllables instead
        assert!(matches!(check("Paris", true), WordVerdict::Short { .. }));
        let lenient = check_word("Paris", true, 2, &EasyWordSet::seed());
        assert!(lenient.hard().is_some());
        assert!(check("Pennsylvania", true).hard().is_some());
    }

    #[test]
    fn urls_and_numbers_filtered() {
        assert_eq!(
            check("https://example.com/extraordinary", false),
            WordVerdict::Filtered {
                filter: Filter::Url
            }
        );
        assert_eq!(
            check("www.considerably.org", false),
            WordVerdict::Filtered {
                filter: Filter::Url
            }
        );
        assert_eq!(
            check("1990s", false),
            WordVerdict::Filtered {
                filter: Filter::Number
            }
        );
    }

    #[test]
    fn apostrophes_only_is_empty() {
        assert_eq!(
            check("''", false),
            WordVerdict::Filtered {
                filter: Filter::Empty
            }
        );
    }

    #[test]
    fn easy_words_are_not_flagged() {
        assert_eq!(check("everything", false), WordVerdict::Easy { syllables: 4 });
        let custom = EasyWordSet::from_words(["circumlocutory"]);
        assert!(matches!(
            check_word("circumlocutory", false, 3, &custom),
            WordVerdict::Easy { .. }
        ));
    }

    #[test]
    fn hard_word_with_suggestion_is_case_matched() {
        let verdict = check("Utilize", true);
        let hard = verdict.hard().expect("flagged");
        assert_eq!(hard.suggestion.as_deref(), Some("Use"));
        assert_eq!(hard.tooltip(), "Hard word (3 syllables). Try \"Use\".");
    }

    #[test]
    fn hard_word_without_suggestion_gets_generic_tooltip() {
        let verdict = check("circumlocutory", false);
        let hard = verdict.hard().expect("flagged");
        assert_eq!(hard.syllables, 6);
        assert!(hard.suggestion.is_none());
        assert!(hard.tooltip().contains("Consider a simpler option"));
    }

    #[test]
    fn quoted_word_offset_points_past_apostrophe() {
        let verdict = check("'extraordinarily'", false);
        let hard = verdict.hard().expect("flagged");
        assert_eq!(hard.text, "extraordinarily");
        assert_eq!(hard.offset, 1);
    }

    #[test]
    fn threshold_follows_target_grade() {
        let table = HardSyllables::default();
        assert_eq!(table.for_grade(TargetGrade::Six), 3);
        assert_eq!(table.for_grade(TargetGrade::Eight), 4);
        assert_eq!(table.for_grade(TargetGrade::Ten), 5);
        // "individual" has 4 syllables: hard at 8, fine at 10
        let easy = EasyWordSet::seed();
        assert!(check_word("individual", false, 4, &easy).hard().is_some());
        assert!(check_word("individual", false, 5, &easy).hard().is_none());
    }

    #[test]
    fn match_case_patterns() {
        assert_eq!(match_case("UTILIZE", "use"), "USE");
        assert_eq!(match_case("Utilize", "use"), "Use");
        assert_eq!(match_case("utilize", "use"), "use");
        assert_eq!(match_case("uTILIZE", "use"), "use");
    }
}
