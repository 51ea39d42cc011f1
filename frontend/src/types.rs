//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **File Types** - metadata of the selected image
//! - **Result Types** - image slots and their rendered URLs
//! - **API Types** - request and reply bodies of the image backend
//! - **View State** - everything the workflow components render

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::config::{BACKEND_URL, UPLOADS_PREFIX};
use crate::workflow::{BannerState, ProgressState};

// =============================================================================
// File Types
// =============================================================================

/// What the validator needs to know about a selected file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    /// Original file name (informational only)
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Declared MIME type, e.g. `image/png`
    pub mime: String,
}

// =============================================================================
// Result Types
// =============================================================================

/// A display slot for one image of the workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageSlot {
    /// Uploaded photo (or its local preview)
    Original,
    /// Segmentation mask
    Mask,
    /// Original with mask applied
    Masked,
    /// Generated try-on composite
    TryOn,
    /// Generic result slot of the segmentation-only page
    Result,
}

impl ImageSlot {
    /// Card title.
    pub fn title(&self) -> &'static str {
        match self {
            ImageSlot::Original => "Original Image",
            ImageSlot::Mask => "Segmentation Mask",
            ImageSlot::Masked => "Masked Image",
            ImageSlot::TryOn => "Try-On Result",
            ImageSlot::Result => "Result",
        }
    }

    /// `alt` text once an image is rendered.
    pub fn alt(&self) -> &'static str {
        match self {
            ImageSlot::Original => "Original clothing",
            ImageSlot::Mask => "Segmented mask",
            ImageSlot::Masked => "Masked result",
            ImageSlot::TryOn => "Try-on result",
            ImageSlot::Result => "Segmentation result",
        }
    }

    /// DOM id of the `<img>` element.
    pub fn element_id(&self) -> &'static str {
        match self {
            ImageSlot::Original => "originalImage",
            ImageSlot::Mask => "maskImage",
            ImageSlot::Masked => "maskedImage",
            ImageSlot::TryOn => "tryonImage",
            ImageSlot::Result => "resultImage",
        }
    }
}

/// Build the public URL of a file stored by the backend.
pub fn uploads_url(filename: &str) -> String {
    format!("{}{}{}", BACKEND_URL, UPLOADS_PREFIX, filename)
}

/// Rendered images. A slot without an entry has no `src`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultImages {
    slots: BTreeMap<ImageSlot, String>,
    /// Effective prompt echoed by the backend
    pub prompt_used: Option<String>,
}

impl ResultImages {
    pub fn get(&self, slot: ImageSlot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn set(&mut self, slot: ImageSlot, url: String) {
        self.slots.insert(slot, url);
    }

    pub fn clear_slot(&mut self, slot: ImageSlot) {
        self.slots.remove(&slot);
    }

    /// Drop every image and hide the prompt info.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.prompt_used = None;
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.prompt_used.is_none()
    }
}

// =============================================================================
// API Types
// =============================================================================

/// Status and body of an HTTP reply, before interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A successful JSON reply from `/upload` or `/generate`.
///
/// Kept as a loose object: each mode reads only the fields its profile maps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServerReply(pub Map<String, Value>);

impl ServerReply {
    /// A non-empty string field. Missing, null and empty fields count as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Body of `POST /generate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    /// Server-assigned name of the uploaded image (`original_image`)
    pub filename: String,
    pub clothing_type: String,
    /// `null` when the user left the prompt empty
    pub prompt: Option<String>,
}

// =============================================================================
// View State
// =============================================================================

/// Everything the workflow components render, owned by one component instance.
#[derive(Clone, Debug, Default)]
pub struct WorkflowState {
    pub images: ResultImages,
    pub progress: ProgressState,
    pub progress_visible: bool,
    pub banner: BannerState,
    /// Two-step mode: the generate form is unlocked
    pub generate_visible: bool,
}
