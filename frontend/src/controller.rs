//! Upload flow: validate, send, render, clean up.
//!
//! ```text
//! submit ──▶ validate ──▶ POST /upload ──▶ parse ──▶ render ──▶ cleanup
//!               │            (progress ticks)          ▲
//!               └──────── local error ────────────────┘ (no cleanup)
//! ```
//!
//! The controller only talks to the page through [`UiPort`] and to the
//! network through [`UploadTransport`].

use crate::config::{
    success_id, ALLOWED_EXTENSION, FILE_INPUT_ID, PROGRESS_BAR_ID, PROGRESS_FILL_ID,
    PROGRESS_TEXT_ID, UNKNOWN_ERROR, UPLOADING_LABEL, UPLOAD_COMPLETE_HEADING, UPLOAD_ENDPOINT,
    UPLOAD_STATUS_ID,
};
use crate::error::{TransportError, UploadError, UploadResult};
use crate::services::upload::{NamedFile, UploadRequest, UploadTransport};
use crate::types::{StatusBlock, UploadProgress, UploadResponse};
use crate::ui::UiPort;

/// Whether `name` carries the accepted extension, ignoring case.
pub fn has_allowed_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(ALLOWED_EXTENSION)
}

/// All-or-nothing check of the selection.
pub fn validate_selection<F: NamedFile>(files: &[F]) -> UploadResult<()> {
    if files.is_empty() {
        return Err(UploadError::NoFiles);
    }
    if let Some(name) = files
        .iter()
        .map(NamedFile::file_name)
        .find(|name| !has_allowed_extension(name))
    {
        return Err(UploadError::DisallowedExtension { name });
    }
    Ok(())
}

/// Turn a parsed server response into status blocks.
pub fn render_response(response: &UploadResponse) -> Vec<StatusBlock> {
    if !response.success {
        let reason = response.error.as_deref().unwrap_or(UNKNOWN_ERROR);
        return vec![StatusBlock::Error(format!("Upload failed: {}", reason))];
    }

    let mut blocks = Vec::with_capacity(response.files.len() + 1);
    blocks.push(StatusBlock::Heading(UPLOAD_COMPLETE_HEADING.to_string()));
    for (index, file) in response.files.iter().enumerate() {
        match file.url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => blocks.push(StatusBlock::Link {
                name: file.name.clone(),
                url: url.to_string(),
                indicator_id: success_id(index),
            }),
            None => blocks.push(StatusBlock::FileError {
                name: file.name.clone(),
                error: file.error.clone().unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            }),
        }
    }
    blocks
}

/// Status for an attempt that produced no usable response.
pub fn render_error(err: &UploadError) -> Vec<StatusBlock> {
    if err.is_validation() {
        vec![StatusBlock::Error(err.to_string())]
    } else {
        vec![StatusBlock::Error(format!("Upload error: {}", err))]
    }
}

/// Drives one submission at a time against injected UI and transport.
///
/// Nothing stops a second submission while one is in flight; both will
/// write to the same elements.
#[derive(Clone)]
pub struct UploadController<U, T> {
    ui: U,
    transport: T,
}

impl<U, T> UploadController<U, T>
where
    U: UiPort,
    T: UploadTransport,
{
    pub fn new(ui: U, transport: T) -> Self {
        Self { ui, transport }
    }

    /// Handle a form submission with the current selection.
    ///
    /// Validation failures are rendered without touching the network or the
    /// progress UI. Once a request is attempted, the progress UI and file
    /// input are reset whatever the outcome.
    pub async fn submit(&self, files: Vec<T::File>) -> UploadResult<UploadResponse> {
        if let Err(err) = validate_selection(&files) {
            log::warn!("Upload rejected: {}", err);
            self.ui.render_status(UPLOAD_STATUS_ID, render_error(&err));
            return Err(err);
        }

        log::info!("Uploading {} file(s) to {}", files.len(), UPLOAD_ENDPOINT);
        self.begin();

        let result = self.transfer(files).await;
        let blocks = match &result {
            Ok(response) => {
                log::info!(
                    "Upload finished: success={}, {} file result(s)",
                    response.success,
                    response.files.len()
                );
                render_response(response)
            }
            Err(err) => {
                log::error!("Upload error: {}", err);
                render_error(err)
            }
        };
        self.ui.render_status(UPLOAD_STATUS_ID, blocks);

        self.finish();
        result
    }

    async fn transfer(&self, files: Vec<T::File>) -> UploadResult<UploadResponse> {
        let mut handle = self.transport.start(UploadRequest::new(files))?;

        while let Some(progress) = handle.next_progress().await {
            self.show_progress(progress);
        }

        let reply = handle.outcome().await?;
        if reply.status != 200 {
            return Err(TransportError::Status(reply.status).into());
        }
        Ok(serde_json::from_str(&reply.body)?)
    }

    fn begin(&self) {
        self.ui.set_width_percent(PROGRESS_FILL_ID, 0.0);
        self.ui.set_visible(PROGRESS_BAR_ID, true);
        self.ui.set_text(PROGRESS_TEXT_ID, UPLOADING_LABEL);
        self.ui.render_status(UPLOAD_STATUS_ID, Vec::new());
    }

    fn show_progress(&self, progress: UploadProgress) {
        let (Some(percent), Some(label)) = (progress.percent(), progress.label()) else {
            return;
        };
        log::debug!("Upload progress: {:.1}%", percent);
        self.ui.set_width_percent(PROGRESS_FILL_ID, percent);
        self.ui.set_text(PROGRESS_TEXT_ID, &label);
    }

    fn finish(&self) {
        self.ui.set_visible(PROGRESS_BAR_ID, false);
        self.ui.set_text(PROGRESS_TEXT_ID, "");
        self.ui.clear_value(FILE_INPUT_ID);
    }
}
