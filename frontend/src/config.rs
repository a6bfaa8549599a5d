//! Application configuration.
//!
//! Centralized configuration for the mp4drop upload widget.
//! Everything is compiled in: the widget reads no config file and no
//! environment.

/// Upload endpoint, relative to the page origin.
pub const UPLOAD_ENDPOINT: &str = "/upload";

/// Multipart field name, repeated once per file.
pub const UPLOAD_FIELD: &str = "files[]";

/// The only accepted file extension (compared case-insensitively).
pub const ALLOWED_EXTENSION: &str = ".mp4";

/// How long the "Copied!" indicator stays visible, in milliseconds.
pub const COPIED_INDICATOR_MS: u32 = 2000;

/// Prefix of the per-result copy indicator ids (`success-0`, `success-1`, ...).
pub const SUCCESS_ID_PREFIX: &str = "success-";

// =============================================================================
// DOM contract
// =============================================================================

pub const UPLOAD_FORM_ID: &str = "uploadForm";
pub const FILE_INPUT_ID: &str = "fileInput";
pub const UPLOAD_STATUS_ID: &str = "uploadStatus";
pub const PROGRESS_BAR_ID: &str = "progressBar";
pub const PROGRESS_FILL_ID: &str = "progressBarFill";
pub const PROGRESS_TEXT_ID: &str = "progressText";

// =============================================================================
// User-facing text
// =============================================================================

/// Progress label while no byte count is known yet.
pub const UPLOADING_LABEL: &str = "Uploading...";

/// Heading shown above the per-file results.
pub const UPLOAD_COMPLETE_HEADING: &str = "Upload Complete!";

/// Shown when the server reports failure without saying why.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Blocking alert when neither clipboard strategy worked.
pub const MANUAL_COPY_MESSAGE: &str = "Copy failed. Please copy the link manually.";

/// Build the indicator id for the result at `index`.
pub fn success_id(index: usize) -> String {
    format!("{}{}", SUCCESS_ID_PREFIX, index)
}
