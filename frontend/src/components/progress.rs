use leptos::*;

use crate::types::WorkflowState;
use crate::workflow::ProgressState;

#[component]
pub fn ProgressSection(state: RwSignal<WorkflowState>) -> impl IntoView {
    let progress = create_memo(move |_| state.with(|s| s.progress.clone()));
    let visible = create_memo(move |_| state.with(|s| s.progress_visible));

    view! {
        <div
            id="progressSection"
            class=move || if visible.get() { "progress-section" } else { "progress-section d-none" }
        >
            <div class="progress">
                <div
                    id="progressBar"
                    role="progressbar"
                    class=move || format!("progress-bar {}", progress.with(|p| p.tone().css_class()))
                    style=move || format!("width: {}%;", progress.with(|p| p.percent))
                    aria-valuenow=move || progress.with(|p| p.percent.to_string())
                    aria-valuemin="0"
                    aria-valuemax="100"
                >
                    {move || progress.with(ProgressState::label)}
                </div>
            </div>
            <p id="statusText" class="status-text">
                {move || progress.with(|p| p.status.clone())}
            </p>
        </div>
    }
}
