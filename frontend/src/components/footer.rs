//! Footer component

use leptos::*;

use crate::workflow::WorkflowMode;

#[component]
pub fn Footer(mode: WorkflowMode) -> impl IntoView {
    view! {
        <footer>
            <div>
                "Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span>
            </div>
            <div class="footer-links">
                <a href="?mode=single-step" rel="external" class="footer-link" class:active=move || mode == WorkflowMode::SingleStep>
                    "Single step"
                </a>
                <a href="?mode=two-step" rel="external" class="footer-link" class:active=move || mode == WorkflowMode::TwoStep>
                    "Two step"
                </a>
                <a href="?mode=segmentation-only" rel="external" class="footer-link" class:active=move || mode == WorkflowMode::SegmentationOnly>
                    "Segmentation only"
                </a>
            </div>
        </footer>
    }
}
