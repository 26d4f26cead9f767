/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use std::io;
use std::path::PathBuf;
use stac::errors::{AppError, SubtitleError, WordListError};

/// Test the subtitle error messages
#[test]
fn test_subtitle_error_withEachVariant_shouldDescribeProblem() {
    let error = SubtitleError::UnsupportedEncoding { line: 3 };
    assert_eq!(error.to_string(), "Unsupported encoding: byte-order mark artifact found at line 3");

    let error = SubtitleError::Decode("odd UTF-16 length: 3 bytes".to_string());
    assert_eq!(error.to_string(), "Failed to decode subtitle file: odd UTF-16 length: 3 bytes");
}

/// Test that the word-list error keeps its I/O cause
#[test]
fn test_word_list_error_withIoSource_shouldExposeSource() {
    let error = WordListError::Unreadable {
        path: PathBuf::from("lists/common_misspells.csv"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };

    assert!(error.to_string().contains("common_misspells.csv"));
    assert!(error.source().is_some());
}

/// Test the conversions into the application error
#[test]
fn test_app_error_withConversions_shouldPickVariant() {
    let error: AppError = SubtitleError::UnsupportedEncoding { line: 0 }.into();
    assert!(matches!(error, AppError::Subtitle(_)));
    assert!(error.to_string().starts_with("Subtitle error: "));

    let error: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, AppError::File(_)));
    assert_eq!(error.to_string(), "File error: gone");

    let error: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(error.to_string(), "Unknown error: boom");

    assert_eq!(AppError::Config("bad".to_string()).to_string(), "Configuration error: bad");
}
