//! Application configuration.
//!
//! Centralized configuration for the try-on frontend. Values are compiled
//! in; the only runtime knob is the workflow mode, read from the `?mode=`
//! query parameter (see [`crate::workflow::WorkflowMode`]).

use crate::workflow::WorkflowMode;

/// Backend base URL.
///
/// Empty means same origin: the page is served by the image backend itself.
pub const BACKEND_URL: &str = "";

/// Multipart upload + segmentation endpoint.
pub const UPLOAD_PATH: &str = "/upload";

/// JSON try-on generation endpoint (two-step mode only).
pub const GENERATE_PATH: &str = "/generate";

/// Path segment prefixed to every filename returned by the backend.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Maximum file size for upload (in bytes).
///
/// 16 MiB, mirrors the backend's request limit.
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// MIME types accepted by the validator. The extension is never consulted.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// How long a success/error banner stays visible.
pub const BANNER_TIMEOUT_MS: u32 = 5_000;

/// Clothing categories offered in the forms.
pub const CLOTHING_TYPES: [&str; 6] = ["shirt", "t-shirt", "pants", "dress", "jacket", "skirt"];

/// Preselected clothing category.
pub const DEFAULT_CLOTHING_TYPE: &str = "shirt";

/// Mode used when the page URL does not select one.
pub const DEFAULT_MODE: WorkflowMode = WorkflowMode::SingleStep;

/// Application name, used for the document title.
pub const APP_NAME: &str = "Virtual Try-On";
