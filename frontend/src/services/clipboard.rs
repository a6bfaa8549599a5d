//! Copy-to-clipboard for result links.
//!
//! Two tiers: the async clipboard API when the page runs in a secure
//! context, then the legacy `document.execCommand("copy")` on a temporary
//! input. A successful copy flashes the result's "Copied!" indicator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlDocument, HtmlInputElement};

use crate::config::{COPIED_INDICATOR_MS, MANUAL_COPY_MESSAGE};
use crate::error::{ClipboardError, ClipboardResult};
use crate::services::timer::Scheduler;
use crate::ui::UiPort;

/// Clipboard capabilities of the host page.
pub trait ClipboardPort {
    /// Async clipboard API present and the context is secure.
    fn async_api_available(&self) -> bool;

    /// Write through the async clipboard API.
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, ClipboardResult<()>>;

    /// Copy through a temporary input and the legacy copy command.
    ///
    /// The temporary input never outlives this call.
    fn legacy_copy(&self, text: &str) -> ClipboardResult<()>;

    /// Blocking user-facing message.
    fn alert(&self, message: &str);
}

/// Which tier ended up copying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyMethod {
    ClipboardApi,
    LegacyCommand,
}

/// The copy action bound to result links.
///
/// Each successful copy schedules its own hide timer. An indicator only
/// hides when every timer scheduled for it has fired.
pub struct CopyAction<C, U, S> {
    clipboard: C,
    ui: U,
    scheduler: S,
    pending: Rc<RefCell<HashMap<String, usize>>>,
}

impl<C: Clone, U: Clone, S: Clone> Clone for CopyAction<C, U, S> {
    fn clone(&self) -> Self {
        Self {
            clipboard: self.clipboard.clone(),
            ui: self.ui.clone(),
            scheduler: self.scheduler.clone(),
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<C, U, S> CopyAction<C, U, S>
where
    C: ClipboardPort,
    U: UiPort + Clone + 'static,
    S: Scheduler,
{
    pub fn new(clipboard: C, ui: U, scheduler: S) -> Self {
        Self {
            clipboard,
            ui,
            scheduler,
            pending: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Copy `text` and flash `indicator_id` on success.
    ///
    /// On total failure the user is alerted and the fallback error returned.
    pub async fn copy(&self, text: &str, indicator_id: &str) -> ClipboardResult<CopyMethod> {
        if self.clipboard.async_api_available() {
            match self.clipboard.write_text(text).await {
                Ok(()) => {
                    self.reveal(indicator_id);
                    return Ok(CopyMethod::ClipboardApi);
                }
                Err(e) => log::error!("Clipboard API failed: {}", e),
            }
        }

        match self.clipboard.legacy_copy(text) {
            Ok(()) => {
                self.reveal(indicator_id);
                Ok(CopyMethod::LegacyCommand)
            }
            Err(e) => {
                log::error!("Fallback clipboard copy failed: {}", e);
                self.clipboard.alert(MANUAL_COPY_MESSAGE);
                Err(e)
            }
        }
    }

    fn reveal(&self, indicator_id: &str) {
        *self
            .pending
            .borrow_mut()
            .entry(indicator_id.to_string())
            .or_insert(0) += 1;
        self.ui.set_visible(indicator_id, true);

        let ui = self.ui.clone();
        let pending = Rc::clone(&self.pending);
        let id = indicator_id.to_string();
        self.scheduler.schedule(
            COPIED_INDICATOR_MS,
            Box::new(move || {
                let remaining = {
                    let mut pending = pending.borrow_mut();
                    let count = pending.entry(id.clone()).or_insert(1);
                    *count = count.saturating_sub(1);
                    let remaining = *count;
                    if remaining == 0 {
                        pending.remove(&id);
                    }
                    remaining
                };
                if remaining == 0 {
                    ui.set_visible(&id, false);
                }
            }),
        );
    }
}

// =============================================================================
// Browser clipboard
// =============================================================================

/// Clipboard of the current browser window.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClipboard;

fn document() -> ClipboardResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ClipboardError::Unavailable)
}

fn command_error(context: &str, err: JsValue) -> ClipboardError {
    ClipboardError::Command(format!("{}: {:?}", context, err))
}

/// Keeps the temporary input out of the flow and invisible.
const TEMPORARY_INPUT_STYLE: [(&str, &str); 2] = [("position", "fixed"), ("opacity", "0")];

/// Off-screen input holding `text`, already attached to the body.
fn create_temporary_input(document: &Document, text: &str) -> ClipboardResult<HtmlInputElement> {
    let input: HtmlInputElement = document
        .create_element("input")
        .map_err(|e| command_error("Failed to create input", e))?
        .dyn_into()
        .map_err(|e| command_error("Created element is not an input", e.into()))?;

    let style = input.style();
    for (property, value) in TEMPORARY_INPUT_STYLE {
        style
            .set_property(property, value)
            .map_err(|e| command_error("Failed to hide input", e))?;
    }
    input.set_value(text);

    let body = document.body().ok_or(ClipboardError::Unavailable)?;
    body.append_child(&input)
        .map_err(|e| command_error("Failed to attach input", e))?;
    Ok(input)
}

fn select_and_copy(document: &Document, input: &HtmlInputElement) -> ClipboardResult<()> {
    input.select();
    let html_document = document
        .dyn_ref::<HtmlDocument>()
        .ok_or(ClipboardError::Unavailable)?;
    match html_document.exec_command("copy") {
        Ok(true) => Ok(()),
        Ok(false) => Err(ClipboardError::Command("copy command was refused".into())),
        Err(e) => Err(command_error("copy command threw", e)),
    }
}

impl ClipboardPort for BrowserClipboard {
    fn async_api_available(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        if !window.is_secure_context() {
            return false;
        }
        js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false)
    }

    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, ClipboardResult<()>> {
        let Some(window) = web_sys::window() else {
            return futures::future::ready(Err(ClipboardError::Unavailable)).boxed_local();
        };
        let promise = window.navigator().clipboard().write_text(text);
        async move {
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))
        }
        .boxed_local()
    }

    fn legacy_copy(&self, text: &str) -> ClipboardResult<()> {
        let document = document()?;
        let input = create_temporary_input(&document, text)?;
        let copied = select_and_copy(&document, &input);
        input.remove();
        copied
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                log::error!("Failed to show alert: {:?}", e);
            }
        }
    }
}
