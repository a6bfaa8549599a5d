//! HTTP upload of the selected files.
//!
//! `fetch` cannot observe upload progress, so the browser transport drives
//! an `XMLHttpRequest` and exposes it as an [`UploadHandle`]: a stream of
//! progress ticks followed by exactly one outcome.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::{mpsc, oneshot};
use futures::StreamExt;
use wasm_bindgen::prelude::*;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

use crate::config::{UPLOAD_ENDPOINT, UPLOAD_FIELD};
use crate::error::{TransportError, TransportResult};
use crate::types::UploadProgress;

/// A file handle that knows its own name.
pub trait NamedFile {
    fn file_name(&self) -> String;
}

impl NamedFile for File {
    fn file_name(&self) -> String {
        self.name()
    }
}

/// One multipart POST: every file under the same field, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest<F> {
    pub endpoint: String,
    pub field: &'static str,
    pub files: Vec<F>,
}

impl<F> UploadRequest<F> {
    /// Request against the default endpoint and field.
    pub fn new(files: Vec<F>) -> Self {
        Self {
            endpoint: UPLOAD_ENDPOINT.to_string(),
            field: UPLOAD_FIELD,
            files,
        }
    }
}

/// Raw HTTP result. The body is only meaningful when `status` is 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Sends an upload request and reports on it.
pub trait UploadTransport {
    type File: NamedFile;

    /// Start the request. Errors here mean nothing was sent.
    fn start(&self, request: UploadRequest<Self::File>) -> TransportResult<UploadHandle>;
}

// =============================================================================
// Handle
// =============================================================================

/// Consumer side of an in-flight upload.
pub struct UploadHandle {
    progress: mpsc::UnboundedReceiver<UploadProgress>,
    outcome: oneshot::Receiver<TransportResult<HttpReply>>,
    _guard: Option<Box<dyn Any>>,
}

impl UploadHandle {
    /// Keep `guard` alive for as long as the handle (JS callbacks, mostly).
    pub fn with_guard(mut self, guard: impl Any) -> Self {
        self._guard = Some(Box::new(guard));
        self
    }

    /// Next progress tick; `None` once the request has settled.
    pub async fn next_progress(&mut self) -> Option<UploadProgress> {
        self.progress.next().await
    }

    /// Wait for the terminal outcome.
    pub async fn outcome(self) -> TransportResult<HttpReply> {
        self.outcome.await.unwrap_or(Err(TransportError::Aborted))
    }
}

/// Producer side of an in-flight upload.
pub struct UploadSink {
    progress: Option<mpsc::UnboundedSender<UploadProgress>>,
    outcome: Option<oneshot::Sender<TransportResult<HttpReply>>>,
}

impl UploadSink {
    /// Report a progress tick. Ignored once settled.
    pub fn progress(&self, tick: UploadProgress) {
        if let Some(tx) = &self.progress {
            let _ = tx.unbounded_send(tick);
        }
    }

    /// Settle the request. Only the first call has an effect.
    ///
    /// The progress stream is closed before the outcome is sent.
    pub fn settle(&mut self, result: TransportResult<HttpReply>) {
        self.progress.take();
        if let Some(tx) = self.outcome.take() {
            let _ = tx.send(result);
        }
    }

    pub fn is_settled(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Create a connected sink/handle pair.
pub fn upload_channel() -> (UploadSink, UploadHandle) {
    let (progress_tx, progress_rx) = mpsc::unbounded();
    let (outcome_tx, outcome_rx) = oneshot::channel();
    (
        UploadSink {
            progress: Some(progress_tx),
            outcome: Some(outcome_tx),
        },
        UploadHandle {
            progress: progress_rx,
            outcome: outcome_rx,
            _guard: None,
        },
    )
}

// =============================================================================
// XMLHttpRequest transport
// =============================================================================

/// Browser transport built on `XMLHttpRequest`.
#[derive(Clone, Copy, Debug, Default)]
pub struct XhrTransport;

/// Callbacks the XHR holds on to; dropped with the handle.
struct XhrCallbacks {
    _xhr: XmlHttpRequest,
    _on_progress: Closure<dyn FnMut(ProgressEvent)>,
    _on_load: Closure<dyn FnMut(web_sys::Event)>,
    _on_error: Closure<dyn FnMut(web_sys::Event)>,
    _on_abort: Closure<dyn FnMut(web_sys::Event)>,
}

fn request_error(context: &str, err: JsValue) -> TransportError {
    TransportError::Request(format!("{}: {:?}", context, err))
}

impl UploadTransport for XhrTransport {
    type File = File;

    fn start(&self, request: UploadRequest<File>) -> TransportResult<UploadHandle> {
        let form_data =
            FormData::new().map_err(|e| request_error("Failed to create FormData", e))?;
        for file in &request.files {
            form_data
                .append_with_blob(request.field, file)
                .map_err(|e| request_error("Failed to append file", e))?;
        }

        let xhr = XmlHttpRequest::new().map_err(|e| request_error("Failed to create request", e))?;
        xhr.open_with_async("POST", &request.endpoint, true)
            .map_err(|e| request_error("Failed to open request", e))?;

        let (sink, handle) = upload_channel();
        let sink = Rc::new(RefCell::new(sink));

        let on_progress = {
            let sink = Rc::clone(&sink);
            Closure::wrap(Box::new(move |event: ProgressEvent| {
                let total = event.length_computable().then(|| event.total());
                sink.borrow().progress(UploadProgress::new(event.loaded(), total));
            }) as Box<dyn FnMut(ProgressEvent)>)
        };

        let on_load = {
            let sink = Rc::clone(&sink);
            let xhr = xhr.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                let status = xhr.status().unwrap_or(0);
                let body = xhr.response_text().ok().flatten().unwrap_or_default();
                sink.borrow_mut().settle(Ok(HttpReply { status, body }));
            }) as Box<dyn FnMut(web_sys::Event)>)
        };

        let on_error = {
            let sink = Rc::clone(&sink);
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                sink.borrow_mut().settle(Err(TransportError::Network));
            }) as Box<dyn FnMut(web_sys::Event)>)
        };

        let on_abort = {
            let sink = Rc::clone(&sink);
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                sink.borrow_mut().settle(Err(TransportError::Aborted));
            }) as Box<dyn FnMut(web_sys::Event)>)
        };

        let upload = xhr
            .upload()
            .map_err(|e| request_error("Failed to access upload target", e))?;
        upload.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(on_abort.as_ref().unchecked_ref()));

        xhr.send_with_opt_form_data(Some(&form_data))
            .map_err(|e| request_error("Failed to send request", e))?;

        log::debug!(
            "POST {} sent with {} part(s) under '{}'",
            request.endpoint,
            request.files.len(),
            request.field
        );

        Ok(handle.with_guard(XhrCallbacks {
            _xhr: xhr,
            _on_progress: on_progress,
            _on_load: on_load,
            _on_error: on_error,
            _on_abort: on_abort,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_request_defaults() {
        let request = UploadRequest::new(vec!["a.mp4", "b.mp4"]);
        assert_eq!(request.endpoint, "/upload");
        assert_eq!(request.field, "files[]");
        assert_eq!(request.files, vec!["a.mp4", "b.mp4"]);
    }

    #[test]
    fn test_progress_then_outcome() {
        let (mut sink, mut handle) = upload_channel();
        sink.progress(UploadProgress::new(1.0, Some(4.0)));
        sink.progress(UploadProgress::new(4.0, Some(4.0)));
        sink.settle(Ok(HttpReply { status: 200, body: "{}".into() }));

        // Ticks sent after settling are dropped.
        sink.progress(UploadProgress::new(9.0, Some(9.0)));

        block_on(async {
            assert_eq!(handle.next_progress().await, Some(UploadProgress::new(1.0, Some(4.0))));
            assert_eq!(handle.next_progress().await, Some(UploadProgress::new(4.0, Some(4.0))));
            assert_eq!(handle.next_progress().await, None);
            assert_eq!(handle.outcome().await.unwrap().status, 200);
        });
    }

    #[test]
    fn test_only_first_settle_counts() {
        let (mut sink, handle) = upload_channel();
        sink.settle(Err(TransportError::Network));
        assert!(sink.is_settled());
        sink.settle(Ok(HttpReply { status: 200, body: String::new() }));

        assert_eq!(block_on(handle.outcome()), Err(TransportError::Network));
    }

    #[test]
    fn test_dropped_sink_reads_as_aborted() {
        let (sink, mut handle) = upload_channel();
        drop(sink);

        block_on(async {
            assert_eq!(handle.next_progress().await, None);
            assert_eq!(handle.outcome().await, Err(TransportError::Aborted));
        });
    }
}
