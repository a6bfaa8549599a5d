//! MP4 upload form.
//!
//! Wires the form to an [`UploadController`] and the result links to a
//! [`CopyAction`]. [`SignalUi`] maps the controller's element ids onto
//! reactive signals.

use std::collections::HashSet;

use leptos::*;
use web_sys::{File, HtmlInputElement};

use crate::components::{ProgressBar, StatusPanel};
use crate::config::{
    FILE_INPUT_ID, PROGRESS_BAR_ID, PROGRESS_FILL_ID, PROGRESS_TEXT_ID, SUCCESS_ID_PREFIX,
    UPLOAD_FORM_ID, UPLOAD_STATUS_ID,
};
use crate::controller::UploadController;
use crate::services::{BrowserClipboard, BrowserScheduler, CopyAction, XhrTransport};
use crate::types::StatusBlock;
use crate::ui::UiPort;

/// Reactive state behind the widget's elements.
#[derive(Clone, Copy)]
pub struct SignalUi {
    pub status: RwSignal<Vec<StatusBlock>>,
    pub progress_visible: RwSignal<bool>,
    pub progress_percent: RwSignal<f64>,
    pub progress_text: RwSignal<String>,
    pub indicators: RwSignal<HashSet<String>>,
    pub file_input: NodeRef<html::Input>,
}

impl SignalUi {
    pub fn new() -> Self {
        Self {
            status: create_rw_signal(Vec::new()),
            progress_visible: create_rw_signal(false),
            progress_percent: create_rw_signal(0.0),
            progress_text: create_rw_signal(String::new()),
            indicators: create_rw_signal(HashSet::new()),
            file_input: create_node_ref::<html::Input>(),
        }
    }
}

impl Default for SignalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl UiPort for SignalUi {
    fn set_visible(&self, id: &str, visible: bool) {
        match id {
            PROGRESS_BAR_ID => self.progress_visible.set(visible),
            id if id.starts_with(SUCCESS_ID_PREFIX) => self.indicators.update(|shown| {
                if visible {
                    shown.insert(id.to_string());
                } else {
                    shown.remove(id);
                }
            }),
            _ => log::warn!("set_visible: no element '{}'", id),
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        match id {
            PROGRESS_TEXT_ID => self.progress_text.set(text.to_string()),
            _ => log::warn!("set_text: no element '{}'", id),
        }
    }

    fn set_width_percent(&self, id: &str, percent: f64) {
        match id {
            PROGRESS_FILL_ID => self.progress_percent.set(percent),
            _ => log::warn!("set_width_percent: no element '{}'", id),
        }
    }

    fn clear_value(&self, id: &str) {
        match (id, self.file_input.get_untracked()) {
            (FILE_INPUT_ID, Some(input)) => input.set_value(""),
            _ => log::warn!("clear_value: no element '{}'", id),
        }
    }

    fn render_status(&self, id: &str, blocks: Vec<StatusBlock>) {
        match id {
            UPLOAD_STATUS_ID => {
                // Fresh results start with every "Copied!" indicator hidden.
                self.indicators.update(HashSet::clear);
                self.status.set(blocks);
            }
            _ => log::warn!("render_status: no element '{}'", id),
        }
    }
}

/// Files currently selected in `input`, in selection order.
fn selected_files(input: &HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[component]
pub fn UploadSection() -> impl IntoView {
    let ui = SignalUi::new();
    let controller = UploadController::new(ui, XhrTransport);
    let copy_action = CopyAction::new(BrowserClipboard, ui, BrowserScheduler);
    let file_input = ui.file_input;

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let files = file_input
            .get_untracked()
            .map(|input| selected_files(&input))
            .unwrap_or_default();

        let controller = controller.clone();
        spawn_local(async move {
            // Outcome is already rendered and logged by the controller.
            let _ = controller.submit(files).await;
        });
    };

    let on_copy = Callback::new(move |(url, indicator_id): (String, String)| {
        let action = copy_action.clone();
        spawn_local(async move {
            if let Err(e) = action.copy(&url, &indicator_id).await {
                log::warn!("Copy of {} failed: {}", url, e);
            }
        });
    });

    view! {
        <div class="upload-section">
            <form id=UPLOAD_FORM_ID class="pure-form upload-form" on:submit=on_submit>
                <input
                    type="file"
                    id=FILE_INPUT_ID
                    name="files"
                    accept=".mp4,video/mp4"
                    multiple=true
                    node_ref=file_input
                />
                <button type="submit" class="pure-button pure-button-primary">
                    "Upload"
                </button>
            </form>

            <ProgressBar
                visible=ui.progress_visible.read_only()
                percent=ui.progress_percent.read_only()
                text=ui.progress_text.read_only()
            />

            <StatusPanel
                blocks=ui.status.read_only()
                indicators=ui.indicators.read_only()
                on_copy=on_copy
            />
        </div>
    }
}
