//! Easy-word allow-list.
//!
//! Words in this set are presumed familiar regardless of syllable count.
//! A small seed set is built in; the full Dale–Chall-style list is a JSON
//! array of lowercase strings loaded from an external resource. A loaded list
//! replaces the seed wholesale.

use std::collections::HashSet;

use camino::Utf8Path;
use serde_json::Value;

use crate::error::{EasyWordsError, EasyWordsResult};

/// Familiar multi-syllable words used until a full list is loaded.
const SEED_WORDS: &[&str] = &[
    "about",
    "already",
    "animal",
    "another",
    "anybody",
    "anything",
    "banana",
    "beautiful",
    "bicycle",
    "butterfly",
    "candy",
    "computer",
    "different",
    "dinosaur",
    "elephant",
    "eleven",
    "everybody",
    "everyone",
    "everything",
    "family",
    "favorite",
    "grandmother",
    "happily",
    "hospital",
    "important",
    "library",
    "medicine",
    "memory",
    "potato",
    "remember",
    "several",
    "somebody",
    "together",
    "tomato",
    "tomorrow",
    "umbrella",
    "understand",
    "vacation",
    "video",
    "yesterday",
];

/// Where the current word set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasyWordSource {
    /// Built-in seed list.
    Seed,
    /// Externally loaded list.
    Loaded,
}

/// A set of lowercase easy words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EasyWordSet {
    words: HashSet<String>,
    source: EasyWordSource,
}

impl Default for EasyWordSet {
    fn default() -> Self {
        Self::seed()
    }
}

impl EasyWordSet {
    /// The built-in seed set.
    pub fn seed() -> Self {
        Self {
            words: SEED_WORDS.iter().map(|w| (*w).to_string()).collect(),
            source: EasyWordSource::Seed,
        }
    }

    /// Build a loaded set from words, lowercasing each.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            source: EasyWordSource::Loaded,
        }
    }

    /// Parse a JSON array of strings. Non-string entries are ignored.
    pub fn from_json(json: &str) -> EasyWordsResult<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => Ok(Self::from_words(items.iter().filter_map(Value::as_str))),
            other => Err(EasyWordsError::NotAnArray {
                found: json_type(&other),
            }),
        }
    }

    /// Read and parse a word list file.
    #[tracing::instrument(fields(path = %path))]
    pub fn load(path: &Utf8Path) -> EasyWordsResult<Self> {
        let json =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| EasyWordsError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let set = Self::from_json(&json)?;
        tracing::debug!(words = set.len(), "easy-word list loaded");
        Ok(set)
    }

    /// Whether the lowercase `word` is in the set.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Where the set came from.
    pub const fn source(&self) -> EasyWordSource {
        self.source
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn seed_contains_familiar_words() {
        let seed = EasyWordSet::seed();
        assert!(seed.contains("everything"));
        assert!(seed.contains("family"));
        assert!(!seed.contains("circumlocutory"));
        assert_eq!(seed.source(), EasyWordSource::Seed);
    }

    #[test]
    fn json_array_replaces_seed() {
        let set = EasyWordSet::from_json(r#"["Aardvark", "zebra", 3, null]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("aardvark"));
        assert!(set.contains("zebra"));
        // no merge with the seed
        assert!(!set.contains("family"));
        assert_eq!(set.source(), EasyWordSource::Loaded);
    }

    #[test]
    fn non_array_payload_is_rejected() {
        let err = EasyWordSet::from_json(r#"{"words": ["a"]}"#).unwrap_err();
        assert!(matches!(err, EasyWordsError::NotAnArray { found: "object" }));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            EasyWordSet::from_json("[\"unterminated"),
            Err(EasyWordsError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("easy.json");
        fs::write(&path, r#"["platypus"]"#).unwrap();
        let path = camino::Utf8PathBuf::try_from(path).unwrap();

        let set = EasyWordSet::load(&path).unwrap();
        assert!(set.contains("platypus"));
    }

    #[test]
    fn load_missing_file_errors() {
        let err = EasyWordSet::load(Utf8Path::new("/nonexistent/easy-words.json")).unwrap_err();
        assert!(matches!(err, EasyWordsError::Read { .. }));
    }
}
