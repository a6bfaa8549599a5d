//! Error types for the upload widget.
//!
//! - [`UploadError`] - everything that ends a submission attempt
//! - [`TransportError`] - the HTTP request itself failed
//! - [`ClipboardError`] - a copy strategy failed
//!
//! Every error is terminal for the attempt that raised it; nothing here is
//! retried.

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised while the upload request is built or in flight.
///
/// The non-200, network and aborted cases all render the same generic
/// message: the widget never inspects a failed response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Server answered with something other than 200.
    #[error("Upload failed")]
    Status(u16),

    /// The request errored before a response arrived.
    #[error("Upload failed")]
    Network,

    /// The transport went away without settling the request.
    #[error("Upload failed")]
    Aborted,

    /// Building the request (form data, XHR) failed.
    #[error("Failed to build request: {0}")]
    Request(String),
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Errors that end a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Nothing was selected.
    #[error("Please select files to upload")]
    NoFiles,

    /// At least one selected file is not an MP4.
    #[error("Only MP4 files are allowed")]
    DisallowedExtension { name: String },

    /// The request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered 200 with a body that is not an upload response.
    #[error("{0}")]
    MalformedResponse(String),
}

impl UploadError {
    /// Validation errors are caught before any network action.
    pub fn is_validation(&self) -> bool {
        matches!(self, UploadError::NoFiles | UploadError::DisallowedExtension { .. })
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        UploadError::MalformedResponse(err.to_string())
    }
}

// =============================================================================
// Clipboard Errors
// =============================================================================

/// Errors from either clipboard strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No window/document/clipboard to work with.
    #[error("Clipboard unavailable")]
    Unavailable,

    /// The async clipboard API rejected the write.
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),

    /// The legacy copy command threw or reported failure.
    #[error("Copy command failed: {0}")]
    Command(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type UploadResult<T> = Result<T, UploadError>;

pub type TransportResult<T> = Result<T, TransportError>;

pub type ClipboardResult<T> = Result<T, ClipboardError>;
