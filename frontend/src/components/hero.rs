//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"mp4drop"</h1>
            <p class="subtitle">
                "Upload one or more MP4 videos and get a shareable link for each."
            </p>
        </div>
    }
}
