//! mp4drop - Frontend Rust/Leptos Application
//!
//! A WebAssembly widget that uploads MP4 files to `POST /upload` and shows
//! a shareable link, with a copy button, for every stored file.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UploadSection (form, file input)                            │
//! │        │ submit                                              │
//! │        ▼                                                     │
//! │  UploadController ──▶ UploadTransport (XMLHttpRequest)       │
//! │        │                    │ progress ticks, outcome        │
//! │        ▼                    ▼                                │
//! │  UiPort (SignalUi) ──▶ ProgressBar / StatusPanel             │
//! │                               │ copy                         │
//! │                               ▼                              │
//! │                   CopyAction ──▶ ClipboardPort, Scheduler    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoint, DOM ids, messages
//! - [`types`] - Upload response, progress, status blocks
//! - [`error`] - Error types
//! - [`ui`] - DOM access port
//! - [`controller`] - The upload flow
//! - [`services`] - Transport, clipboard, timers
//! - [`components`] - Leptos components

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod error;
pub mod ui;
pub mod controller;
pub mod components;
pub mod services;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{FileResult, StatusBlock, UploadProgress, UploadResponse};

// Errors
pub use error::{
    ClipboardError, ClipboardResult, TransportError, TransportResult, UploadError, UploadResult,
};

// Flow
pub use controller::{render_error, render_response, validate_selection, UploadController};
pub use ui::UiPort;

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install logging and the panic hook, then mount the app on `<body>`.
pub fn mount() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 mp4drop - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="mp4drop"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    view! {
        <div class="container">
            <Hero/>
            <UploadSection/>
        </div>

        <Footer/>
    }
}
