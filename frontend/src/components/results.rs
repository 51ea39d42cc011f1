//! Result image gallery.
//!
//! One card per slot of the active mode. A slot without an image renders an
//! `<img>` without `src`.

use leptos::*;

use crate::types::{ImageSlot, WorkflowState};

#[component]
pub fn ResultGallery(state: RwSignal<WorkflowState>, slots: &'static [ImageSlot]) -> impl IntoView {
    let prompt_used = create_memo(move |_| state.with(|s| s.images.prompt_used.clone()));

    view! {
        <div class="results row">
            {slots
                .iter()
                .map(|slot| view! { <ResultCard state=state image_slot=*slot/> })
                .collect_view()}
        </div>
        <div
            id="promptInfo"
            class=move || if prompt_used.with(Option::is_some) { "prompt-info" } else { "prompt-info d-none" }
        >
            <strong>"Prompt used: "</strong>
            <span id="usedPrompt">{move || prompt_used.get().unwrap_or_default()}</span>
        </div>
    }
}

#[component]
fn ResultCard(state: RwSignal<WorkflowState>, image_slot: ImageSlot) -> impl IntoView {
    let slot = image_slot;
    let src = create_memo(move |_| state.with(|s| s.images.get(slot).map(str::to_string)));

    view! {
        <div class="col-md-6 result-card">
            <h5>{slot.title()}</h5>
            <img
                id=slot.element_id()
                class="img-fluid result-image"
                src=move || src.get()
                alt=move || src.with(|s| s.as_ref().map(|_| slot.alt().to_string()))
            />
        </div>
    }
}
