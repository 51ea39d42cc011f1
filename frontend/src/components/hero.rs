//! Hero section component

use leptos::*;

use crate::workflow::WorkflowMode;

#[component]
pub fn Hero(mode: WorkflowMode) -> impl IntoView {
    let subtitle = match mode {
        WorkflowMode::SingleStep => {
            "Upload a clothing photo, pick its type and optionally describe the look. \
             The garment is segmented and tried on in one go."
        }
        WorkflowMode::TwoStep => {
            "Upload a clothing photo to segment it, then generate a try-on \
             with your own clothing type and prompt."
        }
        WorkflowMode::SegmentationOnly => {
            "Upload a clothing photo to isolate the garment from its background."
        }
    };

    view! {
        <div class="hero">
            <h1>"Virtual Try-On"</h1>
            <p class="subtitle">{subtitle}</p>
        </div>
    }
}
