//! Virtual Try-On - Frontend Rust/Leptos Application
//!
//! A WebAssembly client that uploads a clothing photo to the image backend,
//! shows the segmentation results and, depending on the mode, a generated
//! try-on image.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent (mode from ?mode=)                              │
//! │  ├── Hero (title, mode description)                         │
//! │  └── TryOnWorkflow                                          │
//! │      ├── UploadForm ── MessageBanner                        │
//! │      ├── ProgressSection                                    │
//! │      ├── GenerateForm ── MessageBanner (two-step only)      │
//! │      └── ResultGallery                                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer (mode links)                                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`workflow`] - Browser-independent upload workflow (validation, progress,
//!   requests, banners)
//! - [`types`] - Common types (ImageSlot, WorkflowState, API bodies)
//! - [`error`] - Error types
//! - [`components`] - UI components
//! - [`services`] - Browser implementations of the workflow seams

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod error;
pub mod services;
pub mod types;
pub mod workflow;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Errors
pub use error::{ConfigError, ValidationError, WorkflowError, WorkflowResult};

// Types
pub use types::{
    // Files
    FileMeta,
    // Results
    ImageSlot, ResultImages,
    // API
    GenerateRequest, RawReply, ServerReply,
    // View state
    WorkflowState,
};

// Workflow
pub use workflow::{UploadWorkflowController, WorkflowMode};

// Components
pub use components::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install panic hook and logging, then mount the application.
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Virtual Try-On - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

/// Mode from the `mode` query parameter, falling back to [`DEFAULT_MODE`].
fn mode_from_query(raw: Option<&str>) -> WorkflowMode {
    match raw.map(str::parse::<WorkflowMode>) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            log::warn!("{}, using {}", e, DEFAULT_MODE);
            DEFAULT_MODE
        }
        None => DEFAULT_MODE,
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let query = use_query_map();
    let mode = query.with_untracked(|params| mode_from_query(params.get("mode").map(String::as_str)));

    view! {
        <div class="container">
            <Hero mode=mode/>
            <TryOnWorkflow mode=mode/>
        </div>

        <Footer mode=mode/>
    }
}
