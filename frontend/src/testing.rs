//! In-memory stand-ins for the browser, used by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::error::{ClipboardError, ClipboardResult, TransportError, TransportResult};
use crate::services::clipboard::ClipboardPort;
use crate::services::timer::Scheduler;
use crate::services::upload::{
    upload_channel, HttpReply, NamedFile, UploadHandle, UploadRequest, UploadTransport,
};
use crate::types::{StatusBlock, UploadProgress};
use crate::ui::UiPort;

// =============================================================================
// Files
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TestFile(pub String);

impl NamedFile for TestFile {
    fn file_name(&self) -> String {
        self.0.clone()
    }
}

pub fn files(names: &[&str]) -> Vec<TestFile> {
    names.iter().map(|n| TestFile(n.to_string())).collect()
}

// =============================================================================
// UI
// =============================================================================

#[derive(Default)]
struct UiState {
    visible: HashMap<String, bool>,
    text: HashMap<String, String>,
    text_history: Vec<(String, String)>,
    width: HashMap<String, f64>,
    cleared: Vec<String>,
    status: HashMap<String, Vec<StatusBlock>>,
}

/// Records every mutation made through [`UiPort`].
#[derive(Clone, Default)]
pub struct RecordingUi {
    state: Rc<RefCell<UiState>>,
}

impl RecordingUi {
    pub fn is_visible(&self, id: &str) -> bool {
        self.state.borrow().visible.get(id).copied().unwrap_or(false)
    }

    pub fn text(&self, id: &str) -> String {
        self.state.borrow().text.get(id).cloned().unwrap_or_default()
    }

    /// Every text written to `id`, oldest first.
    pub fn text_history(&self, id: &str) -> Vec<String> {
        self.state
            .borrow()
            .text_history
            .iter()
            .filter(|(target, _)| target == id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn width(&self, id: &str) -> Option<f64> {
        self.state.borrow().width.get(id).copied()
    }

    pub fn times_cleared(&self, id: &str) -> usize {
        self.state.borrow().cleared.iter().filter(|c| *c == id).count()
    }

    pub fn status(&self, id: &str) -> Vec<StatusBlock> {
        self.state.borrow().status.get(id).cloned().unwrap_or_default()
    }
}

impl UiPort for RecordingUi {
    fn set_visible(&self, id: &str, visible: bool) {
        self.state.borrow_mut().visible.insert(id.to_string(), visible);
    }

    fn set_text(&self, id: &str, text: &str) {
        let mut state = self.state.borrow_mut();
        state.text.insert(id.to_string(), text.to_string());
        state.text_history.push((id.to_string(), text.to_string()));
    }

    fn set_width_percent(&self, id: &str, percent: f64) {
        self.state.borrow_mut().width.insert(id.to_string(), percent);
    }

    fn clear_value(&self, id: &str) {
        self.state.borrow_mut().cleared.push(id.to_string());
    }

    fn render_status(&self, id: &str, blocks: Vec<StatusBlock>) {
        self.state.borrow_mut().status.insert(id.to_string(), blocks);
    }
}

// =============================================================================
// Transport
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub field: &'static str,
    pub names: Vec<String>,
}

#[derive(Default)]
struct TransportState {
    ticks: Vec<UploadProgress>,
    outcome: Option<TransportResult<HttpReply>>,
    start_error: Option<TransportError>,
    requests: Vec<RecordedRequest>,
}

/// Replays a fixed sequence of progress ticks and one outcome.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Rc<RefCell<TransportState>>,
}

impl ScriptedTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self::settling(Ok(HttpReply {
            status,
            body: body.to_string(),
        }))
    }

    pub fn settling(outcome: TransportResult<HttpReply>) -> Self {
        let transport = Self::default();
        transport.state.borrow_mut().outcome = Some(outcome);
        transport
    }

    /// A transport that fails before sending anything.
    pub fn refusing(err: TransportError) -> Self {
        let transport = Self::default();
        transport.state.borrow_mut().start_error = Some(err);
        transport
    }

    pub fn with_ticks(self, ticks: Vec<UploadProgress>) -> Self {
        self.state.borrow_mut().ticks = ticks;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.borrow().requests.clone()
    }
}

impl UploadTransport for ScriptedTransport {
    type File = TestFile;

    fn start(&self, request: UploadRequest<TestFile>) -> TransportResult<UploadHandle> {
        let mut state = self.state.borrow_mut();
        state.requests.push(RecordedRequest {
            endpoint: request.endpoint.clone(),
            field: request.field,
            names: request.files.iter().map(NamedFile::file_name).collect(),
        });
        if let Some(err) = state.start_error.take() {
            return Err(err);
        }

        let (mut sink, handle) = upload_channel();
        for tick in &state.ticks {
            sink.progress(*tick);
        }
        if let Some(outcome) = state.outcome.take() {
            sink.settle(outcome);
        }
        Ok(handle)
    }
}

// =============================================================================
// Clipboard
// =============================================================================

#[derive(Default)]
struct ClipboardState {
    secure: bool,
    reject_writes: bool,
    fail_legacy: bool,
    written: Vec<String>,
    legacy_calls: usize,
    alerts: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeClipboard {
    state: Rc<RefCell<ClipboardState>>,
}

impl FakeClipboard {
    pub fn secure() -> Self {
        let clipboard = Self::default();
        clipboard.state.borrow_mut().secure = true;
        clipboard
    }

    pub fn insecure() -> Self {
        Self::default()
    }

    pub fn rejecting_writes(self) -> Self {
        self.state.borrow_mut().reject_writes = true;
        self
    }

    pub fn failing_legacy(self) -> Self {
        self.state.borrow_mut().fail_legacy = true;
        self
    }

    pub fn written(&self) -> Vec<String> {
        self.state.borrow().written.clone()
    }

    pub fn legacy_calls(&self) -> usize {
        self.state.borrow().legacy_calls
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }
}

impl ClipboardPort for FakeClipboard {
    fn async_api_available(&self) -> bool {
        self.state.borrow().secure
    }

    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, ClipboardResult<()>> {
        let mut state = self.state.borrow_mut();
        let result = if state.reject_writes {
            Err(ClipboardError::Rejected("NotAllowedError".into()))
        } else {
            state.written.push(text.to_string());
            Ok(())
        };
        future::ready(result).boxed_local()
    }

    fn legacy_copy(&self, _text: &str) -> ClipboardResult<()> {
        let mut state = self.state.borrow_mut();
        state.legacy_calls += 1;
        if state.fail_legacy {
            Err(ClipboardError::Command("copy command was refused".into()))
        } else {
            Ok(())
        }
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }
}

// =============================================================================
// Scheduler
// =============================================================================

#[derive(Default)]
struct SchedulerState {
    now: u64,
    tasks: Vec<(u64, Box<dyn FnOnce()>)>,
}

/// Timers that only fire when the test advances the clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl ManualScheduler {
    /// Move the clock forward, firing due tasks in due order.
    pub fn advance(&self, ms: u32) {
        let target = self.state.borrow().now + u64::from(ms);
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let index = state
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, (due, _))| *due <= target)
                    .min_by_key(|(_, (due, _))| *due)
                    .map(|(i, _)| i);
                index.map(|i| {
                    let (due, task) = state.tasks.remove(i);
                    state.now = due;
                    task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        let due = state.now + u64::from(delay_ms);
        state.tasks.push((due, task));
    }
}
