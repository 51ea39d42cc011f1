//! Image upload form.
//!
//! Handles file selection (validation + local preview) and submission.
//! Clothing type and prompt are only part of this form in single-step mode.

use leptos::*;
use web_sys::HtmlInputElement;

use crate::components::{BrowserController, MessageBanner};
use crate::config::{CLOTHING_TYPES, DEFAULT_CLOTHING_TYPE};
use crate::services::preview_url;
use crate::types::WorkflowState;
use crate::workflow::{FileHandle, FormAnchor};

#[component]
pub fn UploadForm(controller: BrowserController, state: RwSignal<WorkflowState>) -> impl IntoView {
    let profile = controller.mode().profile();
    let file_input = create_node_ref::<html::Input>();
    let (clothing_type, set_clothing_type) = create_signal(DEFAULT_CLOTHING_TYPE.to_string());
    let (prompt, set_prompt) = create_signal(String::new());

    // Validate immediately and show a local preview
    let on_file_change = {
        let controller = controller.clone();
        move |ev: ev::Event| {
            let input: HtmlInputElement = event_target(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };

            if !controller.select_file(&file.meta()) {
                input.set_value("");
                return;
            }

            if let Some(url) = preview_url(&file) {
                controller.show_preview(url);
            }
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let file = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let clothing_type = clothing_type.get_untracked();
        let prompt = prompt.get_untracked();
        let controller = controller.clone();

        spawn_local(async move {
            controller.submit(file, clothing_type, prompt).await;
        });
    };

    let submit_label = if profile.has_generate_step {
        "Upload & Segment"
    } else {
        "Upload & Process"
    };

    view! {
        <form id="uploadForm" class="upload-form" on:submit=on_submit>
            <div class="mb-3">
                <label for="clothingImage" class="form-label">"Clothing image (JPEG or PNG, max 16MB)"</label>
                <input
                    type="file"
                    id="clothingImage"
                    class="form-control"
                    accept="image/jpeg,image/png"
                    node_ref=file_input
                    on:change=on_file_change
                />
            </div>

            {profile.upload_sends_options.then(|| view! {
                <ClothingFields
                    id_prefix="upload"
                    clothing_type=clothing_type
                    set_clothing_type=set_clothing_type
                    prompt=prompt
                    set_prompt=set_prompt
                />
            })}

            <button type="submit" class="btn btn-primary">{submit_label}</button>

            <MessageBanner state=state anchor=FormAnchor::Upload/>
        </form>
    }
}

/// Clothing type selector and optional prompt, shared by both forms.
#[component]
pub fn ClothingFields(
    #[prop(into)] id_prefix: String,
    clothing_type: ReadSignal<String>,
    set_clothing_type: WriteSignal<String>,
    prompt: ReadSignal<String>,
    set_prompt: WriteSignal<String>,
) -> impl IntoView {
    let select_id = format!("{}ClothingType", id_prefix);
    let prompt_id = format!("{}Prompt", id_prefix);

    view! {
        <div class="mb-3">
            <label for=select_id.clone() class="form-label">"Clothing type"</label>
            <select
                id=select_id
                class="form-select"
                on:change=move |ev| set_clothing_type.set(event_target_value(&ev))
            >
                {CLOTHING_TYPES
                    .iter()
                    .map(|kind| {
                        let kind = *kind;
                        view! {
                            <option value=kind selected=move || clothing_type.get() == kind>
                                {kind}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
        <div class="mb-3">
            <label for=prompt_id.clone() class="form-label">"Custom prompt (optional)"</label>
            <textarea
                id=prompt_id
                class="form-control"
                rows="2"
                placeholder="e.g. a red silk shirt worn by a model"
                prop:value=move || prompt.get()
                on:input=move |ev| set_prompt.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}
