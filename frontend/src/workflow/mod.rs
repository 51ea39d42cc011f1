//! Upload workflow core.
//!
//! Browser-independent logic of the try-on page. The Leptos components in
//! [`crate::components`] only forward DOM events here and render
//! [`crate::types::WorkflowState`].
//!
//! - [`validator`] - file presence, size and MIME checks
//! - [`progress`] - progress bar state and simulated progress plans
//! - [`banner`] - single auto-dismissed success/error notice
//! - [`mode`] - per-mode profile table
//! - [`session`] - upload session and request sequencing
//! - [`orchestrator`] - `/upload` and `/generate` calls, reply interpretation
//! - [`controller`] - [`UploadWorkflowController`], ties everything together

pub mod banner;
pub mod controller;
pub mod mode;
pub mod orchestrator;
pub mod progress;
pub mod session;
pub mod validator;

pub use banner::*;
pub use controller::*;
pub use mode::*;
pub use orchestrator::*;
pub use progress::*;
pub use session::*;
pub use validator::*;
