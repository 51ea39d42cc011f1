//! Workflow modes and their profile table.
//!
//! The page runs in one of three product configurations. Everything that
//! differs between them lives in a static [`ModeProfile`], so the controller
//! has no per-mode branches beyond reading the profile.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::ImageSlot;
use crate::workflow::progress::{ProgressStep, SimulatedProgress};

/// Reply field name mapped to the slot it fills.
pub type FieldMap = &'static [(&'static str, ImageSlot)];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WorkflowMode {
    /// Upload with clothing type and prompt; every result comes back at once.
    #[default]
    SingleStep,
    /// Segment on upload, then generate the try-on from a second form.
    TwoStep,
    /// Segment only; the masked image is the single result.
    SegmentationOnly,
}

/// Mode-specific behaviour.
#[derive(Debug)]
pub struct ModeProfile {
    /// Slots rendered by the result gallery, in display order
    pub slots: &'static [ImageSlot],
    /// `/upload` reply fields to render
    pub upload_fields: FieldMap,
    /// Send `clothing_type` and `prompt` with the upload
    pub upload_sends_options: bool,
    /// Read `prompt_used` from the upload reply
    pub upload_reports_prompt: bool,
    /// A generate form follows a successful upload
    pub has_generate_step: bool,
    pub upload_progress: SimulatedProgress,
    pub upload_success: &'static str,
}

/// `/generate` reply fields to render.
pub const GENERATE_FIELDS: FieldMap = &[("tryon_image", ImageSlot::TryOn)];

pub const GENERATE_PROGRESS: SimulatedProgress = SimulatedProgress {
    before_request: &[
        ProgressStep::new(10, "Starting try-on generation..."),
        ProgressStep::new(30, "Generating try-on image..."),
    ],
    after_response: &[ProgressStep::paused(70, "Rendering try-on...", 500)],
    complete: "Try-on generation complete!",
    failed: "Generation failed",
};

pub const GENERATE_SUCCESS: &str = "Try-on image generated successfully!";

static SINGLE_STEP: ModeProfile = ModeProfile {
    slots: &[
        ImageSlot::Original,
        ImageSlot::Mask,
        ImageSlot::Masked,
        ImageSlot::TryOn,
    ],
    upload_fields: &[
        ("original_image", ImageSlot::Original),
        ("mask_image", ImageSlot::Mask),
        ("masked_image", ImageSlot::Masked),
        ("tryon_image", ImageSlot::TryOn),
    ],
    upload_sends_options: true,
    upload_reports_prompt: true,
    has_generate_step: false,
    upload_progress: SimulatedProgress {
        before_request: &[
            ProgressStep::new(10, "Starting image upload..."),
            ProgressStep::new(30, "Uploading image..."),
        ],
        after_response: &[
            ProgressStep::paused(50, "Generating mask...", 500),
            ProgressStep::paused(70, "Processing try-on...", 500),
        ],
        complete: "Processing complete!",
        failed: "Processing failed",
    },
    upload_success: "Image processed successfully!",
};

static TWO_STEP: ModeProfile = ModeProfile {
    slots: &[
        ImageSlot::Original,
        ImageSlot::Mask,
        ImageSlot::Masked,
        ImageSlot::TryOn,
    ],
    upload_fields: &[
        ("original_image", ImageSlot::Original),
        ("mask_image", ImageSlot::Mask),
        ("masked_image", ImageSlot::Masked),
    ],
    upload_sends_options: false,
    upload_reports_prompt: false,
    has_generate_step: true,
    upload_progress: SimulatedProgress {
        before_request: &[
            ProgressStep::new(10, "Starting image upload..."),
            ProgressStep::new(30, "Uploading image..."),
        ],
        after_response: &[
            ProgressStep::paused(50, "Generating mask...", 500),
            ProgressStep::paused(70, "Applying mask...", 500),
        ],
        complete: "Segmentation complete!",
        failed: "Segmentation failed",
    },
    upload_success: "Image segmented successfully! You can now generate a try-on.",
};

static SEGMENTATION_ONLY: ModeProfile = ModeProfile {
    slots: &[ImageSlot::Original, ImageSlot::Result],
    upload_fields: &[("masked_image", ImageSlot::Result)],
    upload_sends_options: false,
    upload_reports_prompt: false,
    has_generate_step: false,
    upload_progress: SimulatedProgress {
        before_request: &[
            ProgressStep::new(10, "Starting image upload..."),
            ProgressStep::new(30, "Uploading image..."),
        ],
        after_response: &[ProgressStep::new(70, "Segmenting clothing...")],
        complete: "Processing complete!",
        failed: "Processing failed",
    },
    upload_success: "Image processed successfully!",
};

impl WorkflowMode {
    pub const ALL: [WorkflowMode; 3] = [
        WorkflowMode::SingleStep,
        WorkflowMode::TwoStep,
        WorkflowMode::SegmentationOnly,
    ];

    pub fn profile(self) -> &'static ModeProfile {
        match self {
            WorkflowMode::SingleStep => &SINGLE_STEP,
            WorkflowMode::TwoStep => &TWO_STEP,
            WorkflowMode::SegmentationOnly => &SEGMENTATION_ONLY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowMode::SingleStep => "single-step",
            WorkflowMode::TwoStep => "two-step",
            WorkflowMode::SegmentationOnly => "segmentation-only",
        }
    }
}

impl fmt::Display for WorkflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single-step" | "single" => Ok(WorkflowMode::SingleStep),
            "two-step" | "two" => Ok(WorkflowMode::TwoStep),
            "segmentation-only" | "segmentation" => Ok(WorkflowMode::SegmentationOnly),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}
