//! Upload progress bar.

use leptos::*;

use crate::config::{PROGRESS_BAR_ID, PROGRESS_FILL_ID, PROGRESS_TEXT_ID};

#[component]
pub fn ProgressBar(
    visible: ReadSignal<bool>,
    /// Fill width, 0 to 100
    percent: ReadSignal<f64>,
    text: ReadSignal<String>,
) -> impl IntoView {
    view! {
        <div
            id=PROGRESS_BAR_ID
            class="progress-bar"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            <div
                id=PROGRESS_FILL_ID
                class="progress-fill"
                style:width=move || format!("{}%", percent.get())
            ></div>
            <div id=PROGRESS_TEXT_ID class="progress-text">
                {move || text.get()}
            </div>
        </div>
    }
}
