//! Heuristic syllable estimation.
//!
//! One canonical heuristic, chosen for speed over precision:
//!
//! 1. Words of three letters or fewer are one syllable.
//! 2. Strip one silent or overcounted ending (`-es`, `-ed`, or a trailing `-e`
//!    after a consonant other than `l`).
//! 3. Strip a leading `y` (it is a consonant there).
//! 4. Count maximal runs of `a e i o u y`; no runs still counts as one.
//!
//! Rule 2 deliberately keeps the `e` after an `l`: in `-le` endings ("table",
//! "little") it closes a spoken syllable, and stripping it undercounts.

use std::sync::LazyLock;

use regex::Regex;

/// Endings that are usually silent or inflate a vowel-run count.
static SILENT_ENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("valid regex"));

const fn is_vowel_like(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimate the syllable count of a single word.
///
/// Case-insensitive. Returns 0 only for a token with no letters at all;
/// any real word scores at least 1.
pub fn estimate_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    if !lower.chars().any(char::is_alphabetic) {
        return 0;
    }
    if lower.chars().count() <= 3 {
        return 1;
    }

    let trimmed = SILENT_ENDING.replace(&lower, "");
    let core = trimmed.strip_prefix('y').unwrap_or(&trimmed);

    let mut runs = 0;
    let mut in_run = false;
    for ch in core.chars() {
        let vowel = is_vowel_like(ch);
        if vowel && !in_run {
            runs += 1;
        }
        in_run = vowel;
    }

    runs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_words_are_one_syllable() {
        assert_eq!(estimate_syllables("a"), 1);
        assert_eq!(estimate_syllables("cat"), 1);
        assert_eq!(estimate_syllables("THE"), 1);
        assert_eq!(estimate_syllables("eye"), 1);
    }

    #[test]
    fn silent_endings_are_stripped() {
        assert_eq!(estimate_syllables("makes"), 1);
        assert_eq!(estimate_syllables("jumped"), 1);
        assert_eq!(estimate_syllables("more"), 1);
        assert_eq!(estimate_syllables("sentence"), 2);
        // "-le" keeps its syllable
        assert_eq!(estimate_syllables("table"), 2);
        assert_eq!(estimate_syllables("little"), 2);
    }

    #[test]
    fn leading_y_is_a_consonant() {
        assert_eq!(estimate_syllables("yellow"), 2);
        assert_eq!(estimate_syllables("yesterday"), 3);
    }

    #[test]
    fn vowel_runs_count_once() {
        assert_eq!(estimate_syllables("hello"), 2);
        assert_eq!(estimate_syllables("beautiful"), 3);
        assert_eq!(estimate_syllables("queue"), 1);
        assert_eq!(estimate_syllables("rhythm"), 1);
    }

    #[test]
    fn long_words() {
        assert_eq!(estimate_syllables("extraordinarily"), 6);
        assert_eq!(estimate_syllables("circumlocutory"), 6);
        assert_eq!(estimate_syllables("Considerably"), 5);
    }

    #[test]
    fn no_vowels_still_one() {
        assert_eq!(estimate_syllables("brrr"), 1);
        assert_eq!(estimate_syllables("nth's"), 1);
    }

    #[test]
    fn non_words_are_zero() {
        assert_eq!(estimate_syllables(""), 0);
        assert_eq!(estimate_syllables("--"), 0);
        assert_eq!(estimate_syllables("1234"), 0);
    }
}
