// ABOUTME: Error types for the docdeck application
// ABOUTME: Provides structured error handling for inspection, rendering and deck writing

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid document {path:?}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("PPTX generation error: {0}")]
    PptxError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),
}

impl DeckError {
    pub(crate) fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DeckError::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::PptxError(format!("ZIP operation failed: {}", err))
    }
}

impl From<quick_xml::Error> for DeckError {
    fn from(err: quick_xml::Error) -> Self {
        DeckError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
