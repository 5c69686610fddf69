//! Error types for gradewise-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during aggregate text analysis.
///
/// The scoring and annotation functions themselves never fail; this is only
/// raised by report-producing entry points such as
/// [`check_readability`](crate::readability::check_readability).
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input text is empty or has no scorable content.
    #[error("no scorable text in input")]
    EmptyInput,
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur while loading an easy-word list.
///
/// None of these are fatal: callers keep the word set they already have.
#[derive(Error, Debug)]
pub enum EasyWordsError {
    /// The word list file could not be read.
    #[error("failed to read easy-word list {path}: {source}")]
    Read {
        /// Path of the word list.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid JSON.
    #[error("easy-word list is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload is valid JSON but not an array.
    #[error("easy-word list must be a JSON array, found {found}")]
    NotAnArray {
        /// JSON type that was found instead.
        found: &'static str,
    },
}

/// Result type alias using [`EasyWordsError`].
pub type EasyWordsResult<T> = Result<T, EasyWordsError>;

/// Errors that can occur when accepting a document from an editing surface.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document JSON could not be decoded.
    #[error("invalid document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Block offsets must be non-decreasing and must not overlap.
    #[error("block {index} starts at {offset}, before the end of the previous block ({previous_end})")]
    OverlappingBlocks {
        /// Index of the offending block.
        index: usize,
        /// Offset the offending block claims.
        offset: usize,
        /// End offset of the block before it.
        previous_end: usize,
    },

    /// A block ends past the largest representable offset.
    #[error("block {index} at offset {offset} ends past the addressable range")]
    OffsetOverflow {
        /// Index of the offending block.
        index: usize,
        /// Offset the offending block claims.
        offset: usize,
    },
}

/// Result type alias using [`DocumentError`].
pub type DocumentResult<T> = Result<T, DocumentError>;
