//! Sentence segmentation and word tokenization with offsets.
//!
//! Segmentation is deliberately simple: a sentence is a run of text ending
//! in terminal punctuation (`.`, `!`, `?`, `…`), with any closing quotes or
//! brackets kept attached. Every piece carries its byte offset so judgments
//! can be mapped back onto the document.

use std::sync::LazyLock;

use regex::Regex;

/// A run ending in terminal punctuation, or the unterminated tail of the text.
static SENTENCE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^.!?…]+[.!?…]+["'”’)\]]*|[^.!?…]+$"#).expect("valid regex")
});

/// A URL, or a word with internal apostrophes and hyphens.
static WORD_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://|www\.)\S+|[\w'’]+(?:-[\w'’]+)*").expect("valid regex")
});

/// A trimmed sentence and its byte offset within the text it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Trimmed sentence text, trailing punctuation included.
    pub text: &'a str,
    /// Byte offset of `text` within the segmented text.
    pub start: usize,
}

impl Sentence<'_> {
    /// Byte offset one past the end of the sentence.
    pub const fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// A word token inside a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text exactly as written.
    pub text: &'a str,
    /// Byte offset of `text` within the sentence.
    pub start: usize,
    /// Zero-based position of the token in its sentence.
    pub index: usize,
}

impl Token<'_> {
    /// Whether this token opens its sentence.
    pub const fn is_first(&self) -> bool {
        self.index == 0
    }
}

/// Raw sentence fragments in order, untrimmed.
pub fn sentence_fragments(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE_FRAGMENT.find_iter(text).map(|m| m.as_str())
}

/// Forward-only substring search.
///
/// Each search starts where the previous match ended, so repeated sentences
/// ("Yes. Yes.") map to successive occurrences rather than the first one.
#[derive(Debug)]
pub struct Locator<'a> {
    haystack: &'a str,
    cursor: usize,
}

impl<'a> Locator<'a> {
    /// Start searching at the beginning of `haystack`.
    pub const fn new(haystack: &'a str) -> Self {
        Self {
            haystack,
            cursor: 0,
        }
    }

    /// Current search position.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Find `needle` at or after the cursor and move the cursor past it.
    ///
    /// On a miss the cursor still advances by the needle's length, so a
    /// caller looping over fragments always makes progress.
    pub fn locate(&mut self, needle: &str) -> Option<usize> {
        let found = self
            .haystack
            .get(self.cursor..)
            .and_then(|rest| rest.find(needle));
        match found {
            Some(idx) => {
                let start = self.cursor + idx;
                self.cursor = start + needle.len();
                Some(start)
            }
            None => {
                let mut next = (self.cursor + needle.len().max(1)).min(self.haystack.len());
                while !self.haystack.is_char_boundary(next) {
                    next += 1;
                }
                self.cursor = next;
                None
            }
        }
    }
}

/// Split text into trimmed, non-empty sentences with their offsets.
///
/// Fragments that cannot be located in `text` are dropped.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut locator = Locator::new(text);
    sentence_fragments(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .filter_map(|fragment| {
            locator.locate(fragment).map(|start| Sentence {
                text: &text[start..start + fragment.len()],
                start,
            })
        })
        .collect()
}

/// Word tokens of one sentence, in order.
pub fn tokens(sentence: &str) -> impl Iterator<Item = Token<'_>> {
    WORD_TOKEN
        .find_iter(sentence)
        .enumerate()
        .map(|(index, m)| Token {
            text: m.as_str(),
            start: m.start(),
            index,
        })
}
