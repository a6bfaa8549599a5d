//! UI Components for the mp4drop widget.
//!
//! # Layout Components
//! - [`Hero`] - Title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - File form, owns the upload and copy wiring
//! - [`ProgressBar`] - Upload progress indicator
//! - [`StatusPanel`] - Results, copy buttons and errors

mod hero;
mod upload;
mod progress;
mod status;
mod footer;

pub use hero::*;
pub use upload::*;
pub use progress::*;
pub use status::*;
pub use footer::*;
