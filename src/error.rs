use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Invalid video locator: {0}")]
    InvalidLocator(String),

    #[error("Caption metadata not found: {0}")]
    MetadataNotFound(String),

    #[error("No captions available: {0}")]
    NoCaptionsAvailable(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Fieldless classification of a [`TranscriptError`], for callers that map
/// failures onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidLocator,
    MetadataNotFound,
    NoCaptionsAvailable,
    TranscriptUnavailable,
    NetworkFailure,
    Cancelled,
    Config,
}

impl ErrorKind {
    /// Suggested HTTP status for a service fronting the pipeline.
    pub fn http_status_hint(self) -> u16 {
        match self {
            ErrorKind::InvalidLocator | ErrorKind::NoCaptionsAvailable => 400,
            ErrorKind::MetadataNotFound | ErrorKind::TranscriptUnavailable => 404,
            ErrorKind::NetworkFailure => 503,
            ErrorKind::Cancelled => 499,
            ErrorKind::Config => 500,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::InvalidLocator => "invalid_locator",
            ErrorKind::MetadataNotFound => "metadata_not_found",
            ErrorKind::NoCaptionsAvailable => "no_captions_available",
            ErrorKind::TranscriptUnavailable => "transcript_unavailable",
            ErrorKind::NetworkFailure => "network_failure",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Config => "config",
        };
        f.write_str(name)
    }
}

impl TranscriptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscriptError::InvalidLocator(_) => ErrorKind::InvalidLocator,
            TranscriptError::MetadataNotFound(_) => ErrorKind::MetadataNotFound,
            TranscriptError::NoCaptionsAvailable(_) => ErrorKind::NoCaptionsAvailable,
            TranscriptError::TranscriptUnavailable(_) => ErrorKind::TranscriptUnavailable,
            TranscriptError::NetworkFailure(_) => ErrorKind::NetworkFailure,
            TranscriptError::Cancelled => ErrorKind::Cancelled,
            TranscriptError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
