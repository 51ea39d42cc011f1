//! Try-on workflow container.
//!
//! Owns the per-instance [`WorkflowState`] signal and the controller wired to
//! the browser services, and lays out the forms, progress bar and gallery.

use leptos::*;

use crate::components::{GenerateForm, ProgressSection, ResultGallery, UploadForm};
use crate::services::{revoke_preview_url, superseded_preview, BrowserTimers, GlooTransport};
use crate::types::{ImageSlot, WorkflowState};
use crate::workflow::{UploadWorkflowController, WorkflowMode, WorkflowStore};

/// Controller as used on the page.
pub type BrowserController =
    UploadWorkflowController<GlooTransport, BrowserTimers, RwSignal<WorkflowState>>;

impl WorkflowStore for RwSignal<WorkflowState> {
    fn apply(&self, f: impl FnOnce(&mut WorkflowState)) {
        if SignalUpdate::try_update(self, f).is_none() {
            log::debug!("Workflow state disposed, update dropped");
        }
    }

    fn read<R>(&self, f: impl FnOnce(&WorkflowState) -> R) -> R {
        SignalWithUntracked::with_untracked(self, f)
    }
}

#[component]
pub fn TryOnWorkflow(mode: WorkflowMode) -> impl IntoView {
    let state = create_rw_signal(WorkflowState::default());
    let controller: BrowserController =
        UploadWorkflowController::new(GlooTransport::new(), BrowserTimers, state, mode);
    let profile = mode.profile();

    log::info!("🧵 Try-on workflow mounted in {} mode", mode);

    // Replies that arrive after unmount must not touch disposed signals
    {
        let controller = controller.clone();
        on_cleanup(move || controller.cancel_pending());
    }

    // Revoke the local preview once a reply, a failure or a new file replaces it
    create_effect(move |previous: Option<Option<String>>| {
        let current = state.with(|s| s.images.get(ImageSlot::Original).map(str::to_string));
        if let Some(url) = superseded_preview(previous.flatten().as_deref(), current.as_deref()) {
            revoke_preview_url(url);
        }
        current
    });

    let generate_form = profile
        .has_generate_step
        .then(|| view! { <GenerateForm controller=controller.clone() state=state/> });

    view! {
        <div class="workflow" data-mode=mode.as_str()>
            <UploadForm controller=controller state=state/>
            <ProgressSection state=state/>
            {generate_form}
            <ResultGallery state=state slots=profile.slots/>
        </div>
    }
}
