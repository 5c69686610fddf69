//! Core library for gradewise.
//!
//! Scores prose with Flesch–Kincaid formulas, classifies sentences against a
//! target reading grade, flags hard words, and maps every judgment onto byte
//! ranges of a block-structured document.
//!
//! # Modules
//!
//! - [`syllables`] - Heuristic syllable estimation
//! - [`readability`] - Grade and ease scores, aggregate reports
//! - [`classify`] - Sentence severity classification
//! - [`words`] - Hard-word filters and verdicts
//! - [`dictionaries`] - Easy-word allow-list and suggestion map
//! - [`text`] - Sentence segmentation and tokenization
//! - [`document`] - Block-structured document snapshots
//! - [`annotate`] - Annotation set building
//! - [`session`] - Live editing session with debounced statistics
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use gradewise_core::{AnalysisContext, ConfigLoader, Document, EasyWordSet, build_annotations};
//!
//! let (config, _sources) = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//!
//! let settings = config.analysis_settings();
//! let easy_words = EasyWordSet::seed();
//! let document = Document::from_plain_text("The cat sat on the mat.");
//! let set = build_annotations(&document, &AnalysisContext::new(&settings, &easy_words));
//! println!("{} annotations", set.len());
//! ```
#![deny(unsafe_code)]

pub mod annotate;
pub mod classify;
pub mod config;
pub mod dictionaries;
pub mod document;
pub mod error;
pub mod markdown;
pub mod readability;
pub mod session;
pub mod syllables;
pub mod text;
pub mod words;

pub use annotate::{AnalysisContext, Annotation, AnnotationSet, Mark, build_annotations};
pub use classify::{Classification, ClassifierConfig, SentenceTag};
pub use config::{AnalysisSettings, Config, ConfigLoader, ConfigSources, LogLevel, TargetGrade};
pub use dictionaries::easy_words::EasyWordSet;
pub use document::{Block, BlockKind, Document};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, DocumentError, DocumentResult,
    EasyWordsError, EasyWordsResult,
};
pub use readability::{ReadabilityReport, SentenceMetrics};
pub use session::{Event, Session};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
