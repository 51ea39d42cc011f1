//! Success/error notice, rendered as the last child of its form.

use leptos::*;

use crate::types::WorkflowState;
use crate::workflow::FormAnchor;

#[component]
pub fn MessageBanner(state: RwSignal<WorkflowState>, anchor: FormAnchor) -> impl IntoView {
    move || {
        state.with(|s| {
            s.banner.at(anchor).map(|banner| {
                let class = banner.kind.css_class();
                let text = banner.text.clone();
                view! { <div class=class role="alert">{text}</div> }
            })
        })
    }
}
