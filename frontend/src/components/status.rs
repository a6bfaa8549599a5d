//! Status region: upload results, copy buttons and error lines.
//!
//! Names and URLs come from the server and are inserted as text nodes.

use std::collections::HashSet;

use leptos::*;

use crate::config::UPLOAD_STATUS_ID;
use crate::types::StatusBlock;

#[component]
pub fn StatusPanel(
    blocks: ReadSignal<Vec<StatusBlock>>,
    /// Indicator ids currently showing "Copied!"
    indicators: ReadSignal<HashSet<String>>,
    /// Called with `(url, indicator_id)` when a copy button is pressed
    on_copy: Callback<(String, String)>,
) -> impl IntoView {
    view! {
        <div id=UPLOAD_STATUS_ID class="upload-status">
            {move || {
                blocks
                    .get()
                    .into_iter()
                    .map(|block| render_block(block, indicators, on_copy))
                    .collect_view()
            }}
        </div>
    }
}

fn render_block(
    block: StatusBlock,
    indicators: ReadSignal<HashSet<String>>,
    on_copy: Callback<(String, String)>,
) -> View {
    let class = block.css_class();
    match block {
        StatusBlock::Heading(text) => view! { <h3 class=class>{text}</h3> }.into_view(),
        StatusBlock::Link {
            name,
            url,
            indicator_id,
        } => {
            let copy_args = (url.clone(), indicator_id.clone());
            let shown_id = indicator_id.clone();
            view! {
                <div class=class>
                    <div><strong>"File:"</strong> " " {name}</div>
                    <div class="pure-g">
                        <div class="pure-u-4-5">{url}</div>
                        <div class="pure-u-1-5">
                            <button
                                type="button"
                                class="pure-button pure-button-primary copy-btn"
                                on:click=move |_| on_copy.call(copy_args.clone())
                            >
                                "Copy Link"
                            </button>
                            <span
                                id=indicator_id
                                class="success-message"
                                style:display=move || {
                                    if indicators.with(|shown| shown.contains(&shown_id)) {
                                        "inline"
                                    } else {
                                        "none"
                                    }
                                }
                            >
                                "Copied!"
                            </span>
                        </div>
                    </div>
                </div>
            }
            .into_view()
        }
        other => view! {
            <div class=class>{other.error_text().unwrap_or_default()}</div>
        }
        .into_view(),
    }
}
