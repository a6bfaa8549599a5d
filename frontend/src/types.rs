//! Common types used across the upload widget.
//!
//! # Categories
//!
//! - **API Types** - upload response as sent by the server
//! - **Progress Types** - transfer progress ticks
//! - **Status Types** - what the status region displays

use serde::{Deserialize, Deserializer};

// =============================================================================
// API Response Types
// =============================================================================

/// Response body of `POST /upload`.
///
/// When `success` is true, `files` holds one entry per submitted file, in
/// submission order.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Missing and `null` both read as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<FileResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome for a single uploaded file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FileResult {
    /// Original file name
    pub name: String,
    /// Shareable link, present on success
    #[serde(default)]
    pub url: Option<String>,
    /// Server-side reason, present on failure
    #[serde(default)]
    pub error: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FileResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FileResult>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Progress Types
// =============================================================================

/// One progress tick of the upload body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UploadProgress {
    /// Bytes sent so far
    pub loaded: f64,
    /// Total body size, `None` when not length-computable
    pub total: Option<f64>,
}

impl UploadProgress {
    pub fn new(loaded: f64, total: Option<f64>) -> Self {
        Self { loaded, total }
    }

    /// Percentage sent, or `None` when the total is unknown.
    ///
    /// A zero total counts as unknown.
    pub fn percent(&self) -> Option<f64> {
        let total = self.total.filter(|t| *t > 0.0)?;
        Some((self.loaded / total * 100.0).clamp(0.0, 100.0))
    }

    /// Label shown next to the bar, e.g. `Uploading: 42%`.
    pub fn label(&self) -> Option<String> {
        self.percent()
            .map(|p| format!("Uploading: {}%", p.round() as u32))
    }
}

// =============================================================================
// Status Types
// =============================================================================

/// A block rendered into the status region.
#[derive(Clone, Debug, PartialEq)]
pub enum StatusBlock {
    /// Section heading
    Heading(String),
    /// Uploaded file with a copy control
    Link {
        name: String,
        url: String,
        /// Id of the "Copied!" indicator bound to this link
        indicator_id: String,
    },
    /// A single file the server rejected
    FileError { name: String, error: String },
    /// Whole-attempt error line
    Error(String),
}

impl StatusBlock {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusBlock::Heading(_) => "status-heading",
            StatusBlock::Link { .. } => "result-link",
            StatusBlock::FileError { .. } | StatusBlock::Error(_) => "error-message",
        }
    }

    /// Text of an error line, `None` for non-error blocks.
    pub fn error_text(&self) -> Option<String> {
        match self {
            StatusBlock::FileError { name, error } => {
                Some(format!("Error uploading {}: {}", name, error))
            }
            StatusBlock::Error(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}
