//! Browser-facing services.
//!
//! # Services
//!
//! - [`upload`] - multipart upload with progress over `XMLHttpRequest`
//! - [`clipboard`] - two-tier copy to clipboard
//! - [`timer`] - one-shot timers for the copy indicator

pub mod upload;
pub mod clipboard;
pub mod timer;

pub use upload::*;
pub use clipboard::*;
pub use timer::*;
