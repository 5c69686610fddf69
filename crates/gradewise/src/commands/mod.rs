//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use gradewise_core::{AnalysisSettings, Config, Document, EasyWordSet, TargetGrade};

pub mod annotate;
pub mod info;
pub mod score;
pub mod sentence;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod watch;
pub mod word;

/// Flags shared by the commands that build annotations.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Target reading grade (overrides config)
    #[arg(short = 'g', long, value_enum, value_name = "GRADE")]
    pub target_grade: Option<TargetGrade>,

    /// Flag sentences only, not individual words
    #[arg(long)]
    pub no_hard_words: bool,

    /// JSON array of easy words, replacing the built-in list
    #[arg(long, value_name = "FILE")]
    pub easy_words: Option<Utf8PathBuf>,
}

impl AnalysisArgs {
    /// Merge these flags over the configured settings.
    pub fn settings(&self, config: &Config) -> AnalysisSettings {
        let mut settings = config.analysis_settings();
        if let Some(grade) = self.target_grade {
            settings.target_grade = grade;
        }
        if self.no_hard_words {
            settings.show_hard_words = false;
        }
        settings
    }

    /// Easy-word list to load: the flag, else the configured path.
    pub fn easy_words_path<'a>(&'a self, config: &'a Config) -> Option<&'a Utf8Path> {
        self.easy_words
            .as_deref()
            .or(config.easy_words_path.as_deref())
    }
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// How a file's contents become a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Blank-line separated paragraphs.
    PlainText,
    /// CommonMark.
    Markdown,
    /// A serialized document from an editing surface.
    Json,
}

impl InputFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("md" | "markdown") => Self::Markdown,
            Some("json") => Self::Json,
            _ => Self::PlainText,
        }
    }
}

/// Parse file contents into a document snapshot.
pub fn parse_document(path: &Utf8Path, content: &str) -> anyhow::Result<Document> {
    Ok(match InputFormat::from_path(path) {
        InputFormat::PlainText => Document::from_plain_text(content),
        InputFormat::Markdown => Document::from_markdown(content),
        InputFormat::Json => Document::from_json(content)
            .with_context(|| format!("failed to decode document {path}"))?,
    })
}

/// Load the easy-word list, keeping the seed set on failure.
pub fn load_easy_words(path: Option<&Utf8Path>) -> EasyWordSet {
    let Some(path) = path else {
        return EasyWordSet::seed();
    };
    match EasyWordSet::load(path) {
        Ok(words) => words,
        Err(error) => {
            tracing::warn!(%error, "easy-word list unavailable, using built-in seed");
            EasyWordSet::seed()
        }
    }
}
