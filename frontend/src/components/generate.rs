//! Try-on generation form (two-step mode).

use leptos::*;

use crate::components::{BrowserController, ClothingFields, MessageBanner};
use crate::config::DEFAULT_CLOTHING_TYPE;
use crate::types::WorkflowState;
use crate::workflow::FormAnchor;

#[component]
pub fn GenerateForm(controller: BrowserController, state: RwSignal<WorkflowState>) -> impl IntoView {
    let (clothing_type, set_clothing_type) = create_signal(DEFAULT_CLOTHING_TYPE.to_string());
    let (prompt, set_prompt) = create_signal(String::new());

    let visible = create_memo(move |_| state.with(|s| s.generate_visible));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let clothing_type = clothing_type.get_untracked();
        let prompt = prompt.get_untracked();
        let controller = controller.clone();

        spawn_local(async move {
            controller.generate(clothing_type, prompt).await;
        });
    };

    view! {
        <form
            id="generateForm"
            class=move || if visible.get() { "generate-form" } else { "generate-form d-none" }
            on:submit=on_submit
        >
            <h4>"Generate try-on"</h4>

            <ClothingFields
                id_prefix="generate"
                clothing_type=clothing_type
                set_clothing_type=set_clothing_type
                prompt=prompt
                set_prompt=set_prompt
            />

            <button type="submit" class="btn btn-success">"Generate Try-On"</button>

            <MessageBanner state=state anchor=FormAnchor::Generate/>
        </form>
    }
}
