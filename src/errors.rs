/*!
 * Error types for the stac application.
 *
 * This module contains custom error types for the different parts of the corrector,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or parsing a subtitle file
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A UTF-16 byte-order mark was read as text: the file must be decoded again
    #[error("Unsupported encoding: byte-order mark artifact found at line {line}")]
    UnsupportedEncoding {
        /// 0-based index of the raw line holding the artifact
        line: usize,
    },

    /// No decoding strategy produced usable text
    #[error("Failed to decode subtitle file: {0}")]
    Decode(String),
}

/// Errors raised while reading word-list resources
#[derive(Error, Debug)]
pub enum WordListError {
    /// The resource exists but could not be read
    #[error("Failed to read word list {path:?}: {source}")]
    Unreadable {
        /// Resource path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from word-list loading
    #[error("Word list error: {0}")]
    WordList(#[from] WordListError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
