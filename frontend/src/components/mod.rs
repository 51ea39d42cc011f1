//! UI Components for the try-on application.
//!
//! # Layout Components
//! - [`Hero`] - Title and mode description
//! - [`Footer`] - Page footer with mode links
//!
//! # Feature Components
//! - [`TryOnWorkflow`] - Owns the workflow state and controller
//! - [`UploadForm`] - Image selection, preview and upload
//! - [`GenerateForm`] - Try-on generation (two-step mode)
//! - [`ProgressSection`] - Simulated progress bar
//! - [`ResultGallery`] - Result image slots and prompt info
//! - [`MessageBanner`] - Auto-dismissed success/error notice

mod banner;
mod footer;
mod generate;
mod hero;
mod progress;
mod results;
mod tryon;
mod upload;

pub use banner::*;
pub use footer::*;
pub use generate::*;
pub use hero::*;
pub use progress::*;
pub use results::*;
pub use tryon::*;
pub use upload::*;
