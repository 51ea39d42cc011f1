//! The upload workflow controller.
//!
//! One [`UploadWorkflowController`] drives one try-on form: it validates the
//! file, reports simulated progress, runs the requests of the active
//! [`WorkflowMode`] and writes every visible change into a [`WorkflowStore`].
//!
//! ```text
//! select file ──▶ validate ──▶ preview
//! submit ───────▶ validate ──▶ progress ──▶ /upload ──▶ render ──▶ banner
//!                                                       │
//!                               (two-step) generate ◀───┘
//!                                  └──▶ progress ──▶ /generate ──▶ render ──▶ banner
//! ```
//!
//! Each submit or generate takes a [`Ticket`]. Anything that completes for a
//! ticket that is no longer current is dropped without touching the store.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::BANNER_TIMEOUT_MS;
use crate::error::{ValidationError, WorkflowError};
use crate::types::{FileMeta, ImageSlot, WorkflowState};
use crate::workflow::banner::{BannerKind, FormAnchor};
use crate::workflow::mode::{WorkflowMode, GENERATE_FIELDS, GENERATE_PROGRESS, GENERATE_SUCCESS};
use crate::workflow::orchestrator::{FileHandle, RequestOrchestrator, Transport};
use crate::workflow::progress::{ProgressState, ProgressStep};
use crate::workflow::session::{RequestSequence, Ticket, UploadSession};
use crate::workflow::validator::validate;

/// Timer source: pauses for the simulated progress, callbacks for banners.
#[allow(async_fn_in_trait)]
pub trait Timers {
    async fn sleep(&self, ms: u32);

    /// Run `callback` once after `ms`. Not cancellable.
    fn after(&self, ms: u32, callback: Box<dyn FnOnce()>);
}

/// Where the controller keeps the state the page renders.
pub trait WorkflowStore: Clone + 'static {
    fn apply(&self, f: impl FnOnce(&mut WorkflowState));

    /// Read without subscribing.
    fn read<R>(&self, f: impl FnOnce(&WorkflowState) -> R) -> R;
}

/// Headless store, used outside a reactive runtime.
impl WorkflowStore for Rc<RefCell<WorkflowState>> {
    fn apply(&self, f: impl FnOnce(&mut WorkflowState)) {
        f(&mut self.borrow_mut());
    }

    fn read<R>(&self, f: impl FnOnce(&WorkflowState) -> R) -> R {
        f(&self.borrow())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FailureScope {
    Upload,
    Generate,
}

impl fmt::Display for FailureScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureScope::Upload => f.write_str("upload"),
            FailureScope::Generate => f.write_str("generate"),
        }
    }
}

pub struct UploadWorkflowController<T: Transport, M, S> {
    orchestrator: Rc<RequestOrchestrator<T>>,
    timers: Rc<M>,
    store: S,
    sequence: Rc<RequestSequence>,
    session: Rc<RefCell<Option<UploadSession<T::File>>>>,
}

impl<T: Transport, M, S: Clone> Clone for UploadWorkflowController<T, M, S> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Rc::clone(&self.orchestrator),
            timers: Rc::clone(&self.timers),
            store: self.store.clone(),
            sequence: Rc::clone(&self.sequence),
            session: Rc::clone(&self.session),
        }
    }
}

impl<T, M, S> UploadWorkflowController<T, M, S>
where
    T: Transport,
    M: Timers,
    S: WorkflowStore,
{
    pub fn new(transport: T, timers: M, store: S, mode: WorkflowMode) -> Self {
        Self {
            orchestrator: Rc::new(RequestOrchestrator::new(transport, mode)),
            timers: Rc::new(timers),
            store,
            sequence: Rc::new(RequestSequence::default()),
            session: Rc::new(RefCell::new(None)),
        }
    }

    pub fn mode(&self) -> WorkflowMode {
        self.orchestrator.mode()
    }

    /// Whether an upload has captured the name `/generate` needs.
    #[cfg(test)]
    fn has_uploaded_image(&self) -> bool {
        self.session
            .borrow()
            .as_ref()
            .is_some_and(|session| session.filename_token.is_some())
    }

    /// Make every in-flight request stale.
    pub fn cancel_pending(&self) {
        log::debug!("Invalidating pending requests");
        self.sequence.invalidate();
    }

    /// Forget the uploaded image. Requests still running for it go stale.
    fn abandon_session(&self) {
        self.sequence.invalidate();
        self.session.borrow_mut().take();
    }

    // -------------------------------------------------------------------------
    // File selection
    // -------------------------------------------------------------------------

    /// Validate a newly selected file. On `false` the caller resets the input.
    pub fn select_file(&self, file: &FileMeta) -> bool {
        match validate(Some(file)) {
            Ok(()) => {
                log::info!("📎 Selected {} ({} bytes, {})", file.name, file.size, file.mime);
                true
            }
            Err(err) => {
                self.reject(err);
                false
            }
        }
    }

    /// Show a local preview of the selected file; every other result goes.
    pub fn show_preview(&self, url: String) {
        self.abandon_session();
        self.store.apply(|state| {
            state.images.clear();
            state.images.set(ImageSlot::Original, url);
            state.generate_visible = false;
            state.progress_visible = false;
            state.progress = ProgressState::default();
        });
    }

    fn reject(&self, err: ValidationError) {
        log::warn!("⚠️ File rejected: {}", err);
        self.abandon_session();
        self.store.apply(|state| {
            state.images.clear();
            state.generate_visible = false;
            state.progress_visible = false;
            state.progress = ProgressState::default();
        });
        self.show_error(FormAnchor::Upload, WorkflowError::from(err).banner_text());
    }

    // -------------------------------------------------------------------------
    // Upload
    // -------------------------------------------------------------------------

    /// Validate and upload `file`, then render what the reply contains.
    pub async fn submit(&self, file: Option<T::File>, clothing_type: String, prompt: String) {
        let file = match file {
            Some(file) => file,
            None => return self.reject(ValidationError::MissingFile),
        };
        if let Err(err) = validate(Some(&file.meta())) {
            return self.reject(err);
        }

        let profile = self.mode().profile();
        let ticket = self.sequence.next();
        log::info!("🚀 Upload {} started ({} mode)", ticket, self.mode());

        self.session.borrow_mut().take();
        let mut session = UploadSession::new(file, clothing_type, &prompt);

        self.store.apply(|state| {
            state.progress_visible = true;
            state.generate_visible = false;
            state.images.prompt_used = None;
            for slot in profile.slots.iter().filter(|slot| **slot != ImageSlot::Original) {
                state.images.clear_slot(*slot);
            }
        });

        if !self.report_steps(ticket, profile.upload_progress.before_request).await {
            return;
        }

        let result = self.orchestrator.upload(&session).await;
        if !self.sequence.is_current(ticket) {
            log::debug!("Discarding stale upload reply {}", ticket);
            return;
        }
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => return self.fail(ticket, FailureScope::Upload, err),
        };

        if !self.report_steps(ticket, profile.upload_progress.after_response).await {
            return;
        }

        let rendered = session.record(&reply, profile.upload_fields);
        let prompt_used = if profile.upload_reports_prompt {
            session.record_prompt(&reply)
        } else {
            None
        };
        self.session.replace(Some(session));

        self.store.apply(|state| {
            for (slot, url) in rendered {
                state.images.set(slot, url);
            }
            state.images.prompt_used = prompt_used;
            state.progress = profile.upload_progress.complete_state();
            state.generate_visible = profile.has_generate_step;
        });
        log::info!("✅ Upload {} complete", ticket);
        self.show_success(FormAnchor::Upload, profile.upload_success);
    }

    // -------------------------------------------------------------------------
    // Generate (two-step mode)
    // -------------------------------------------------------------------------

    /// Request a try-on for the uploaded image.
    pub async fn generate(&self, clothing_type: String, prompt: String) {
        let request = match self.session.borrow_mut().as_mut() {
            Some(session) => session.generate_request(&clothing_type, &prompt),
            None => Err(WorkflowError::MissingPrecondition),
        };
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                log::warn!("⚠️ Generate refused: {}", err);
                // The generate form is hidden without an upload
                self.show_error(FormAnchor::Upload, err.banner_text());
                return;
            }
        };

        let ticket = self.sequence.next();
        log::info!("🎨 Generate {} started for {}", ticket, request.filename);

        self.store.apply(|state| {
            state.progress_visible = true;
            state.images.clear_slot(ImageSlot::TryOn);
            state.images.prompt_used = None;
        });

        if !self.report_steps(ticket, GENERATE_PROGRESS.before_request).await {
            return;
        }

        let result = self.orchestrator.generate(&request).await;
        if !self.sequence.is_current(ticket) {
            log::debug!("Discarding stale generate reply {}", ticket);
            return;
        }
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => return self.fail(ticket, FailureScope::Generate, err),
        };

        if !self.report_steps(ticket, GENERATE_PROGRESS.after_response).await {
            return;
        }

        let recorded = self
            .session
            .borrow_mut()
            .as_mut()
            .map(|session| (session.record(&reply, GENERATE_FIELDS), session.record_prompt(&reply)));
        let Some((rendered, prompt_used)) = recorded else {
            return self.fail(ticket, FailureScope::Generate, WorkflowError::MissingPrecondition);
        };

        self.store.apply(|state| {
            for (slot, url) in rendered {
                state.images.set(slot, url);
            }
            state.images.prompt_used = prompt_used;
            state.progress = GENERATE_PROGRESS.complete_state();
        });
        log::info!("✅ Generate {} complete", ticket);
        self.show_success(FormAnchor::Generate, GENERATE_SUCCESS);
    }

    // -------------------------------------------------------------------------
    // Progress & banners
    // -------------------------------------------------------------------------

    /// Update the progress bar.
    pub fn report(&self, progress: ProgressState) {
        self.store.apply(|state| state.progress = progress);
    }

    /// Report each step, pausing where the plan says so.
    ///
    /// Returns `false` as soon as `ticket` went stale.
    async fn report_steps(&self, ticket: Ticket, steps: &[ProgressStep]) -> bool {
        for step in steps {
            if !self.sequence.is_current(ticket) {
                break;
            }
            self.report(step.state());
            if step.delay_ms > 0 {
                self.timers.sleep(step.delay_ms).await;
            }
        }

        let current = self.sequence.is_current(ticket);
        if !current {
            log::debug!("Dropping progress of stale request {}", ticket);
        }
        current
    }

    fn fail(&self, ticket: Ticket, scope: FailureScope, err: WorkflowError) {
        log::error!("❌ {} {} failed: {}", scope, ticket, err);

        let failed = match scope {
            FailureScope::Upload => self.mode().profile().upload_progress.failed_state(),
            FailureScope::Generate => GENERATE_PROGRESS.failed_state(),
        };
        if scope == FailureScope::Upload {
            self.session.borrow_mut().take();
        }

        self.store.apply(|state| {
            state.progress = failed;
            match scope {
                FailureScope::Upload => {
                    state.images.clear();
                    state.generate_visible = false;
                }
                FailureScope::Generate => {
                    state.images.clear_slot(ImageSlot::TryOn);
                    state.images.prompt_used = None;
                }
            }
        });

        let anchor = match scope {
            FailureScope::Upload => FormAnchor::Upload,
            FailureScope::Generate => FormAnchor::Generate,
        };
        self.show_error(anchor, err.banner_text());
    }

    pub fn show_error(&self, anchor: FormAnchor, text: impl Into<String>) -> u64 {
        self.notify(BannerKind::Error, anchor, text.into())
    }

    pub fn show_success(&self, anchor: FormAnchor, text: impl Into<String>) -> u64 {
        self.notify(BannerKind::Success, anchor, text.into())
    }

    /// Replace the banner and schedule its removal.
    fn notify(&self, kind: BannerKind, anchor: FormAnchor, text: String) -> u64 {
        let mut id = 0;
        self.store.apply(|state| id = state.banner.show(kind, anchor, text));

        let store = self.store.clone();
        self.timers.after(
            BANNER_TIMEOUT_MS,
            Box::new(move || store.apply(|state| state.banner.dismiss(id))),
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_FILE_SIZE;
    use crate::error::WorkflowResult;
    use crate::types::RawReply;
    use crate::workflow::progress::ProgressTone;
    use futures::executor::block_on;
    use serde::Serialize;
    use serde_json::{json, Value};
    use std::cell::Cell;
    use std::collections::VecDeque;

    struct FakeFile(FileMeta);

    impl FileHandle for FakeFile {
        fn meta(&self) -> FileMeta {
            self.0.clone()
        }
    }

    fn image(name: &str, size: u64, mime: &str) -> Option<FakeFile> {
        Some(FakeFile(FileMeta {
            name: name.into(),
            size,
            mime: mime.into(),
        }))
    }

    fn png() -> Option<FakeFile> {
        image("shirt.png", 2048, "image/png")
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Form {
            url: String,
            fields: Vec<(&'static str, String)>,
        },
        Json {
            url: String,
            body: Value,
        },
    }

    #[derive(Default)]
    struct FakeTransport {
        replies: RefCell<VecDeque<WorkflowResult<RawReply>>>,
        calls: RefCell<Vec<Call>>,
        on_send: RefCell<Option<Box<dyn FnOnce()>>>,
    }

    impl FakeTransport {
        fn reply(&self, status: u16, body: Value) {
            self.replies
                .borrow_mut()
                .push_back(Ok(RawReply::new(status, body.to_string())));
        }

        fn reply_raw(&self, status: u16, body: &str) {
            self.replies.borrow_mut().push_back(Ok(RawReply::new(status, body)));
        }

        fn send(&self, call: Call) -> WorkflowResult<RawReply> {
            self.calls.borrow_mut().push(call);
            let hook = self.on_send.borrow_mut().take();
            if let Some(hook) = hook {
                hook();
            }
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(WorkflowError::Network("Failed to fetch".into())))
        }
    }

    impl Transport for FakeTransport {
        type File = FakeFile;

        async fn post_form(
            &self,
            url: &str,
            _file: &FakeFile,
            fields: &[(&'static str, String)],
        ) -> WorkflowResult<RawReply> {
            self.send(Call::Form {
                url: url.to_string(),
                fields: fields.to_vec(),
            })
        }

        async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> WorkflowResult<RawReply> {
            self.send(Call::Json {
                url: url.to_string(),
                body: serde_json::to_value(body).unwrap(),
            })
        }
    }

    #[derive(Default)]
    struct FakeTimers {
        slept_ms: Cell<u32>,
        pending: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
    }

    impl FakeTimers {
        fn fire_all(&self) {
            let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
            for (_, callback) in pending {
                callback();
            }
        }
    }

    impl Timers for FakeTimers {
        async fn sleep(&self, ms: u32) {
            self.slept_ms.set(self.slept_ms.get() + ms);
        }

        fn after(&self, ms: u32, callback: Box<dyn FnOnce()>) {
            self.pending.borrow_mut().push((ms, callback));
        }
    }

    /// Headless store that also logs every progress percentage it shows.
    #[derive(Clone, Default)]
    struct RecordingStore {
        state: Rc<RefCell<WorkflowState>>,
        reported: Rc<RefCell<Vec<u8>>>,
    }

    impl WorkflowStore for RecordingStore {
        fn apply(&self, f: impl FnOnce(&mut WorkflowState)) {
            let before = self.state.read(|state| state.progress.clone());
            self.state.apply(f);
            let after = self.state.read(|state| state.progress.clone());
            if after != before {
                self.reported.borrow_mut().push(after.percent);
            }
        }

        fn read<R>(&self, f: impl FnOnce(&WorkflowState) -> R) -> R {
            self.state.read(f)
        }
    }

    type TestController = UploadWorkflowController<FakeTransport, FakeTimers, RecordingStore>;

    fn controller(mode: WorkflowMode) -> TestController {
        UploadWorkflowController::new(
            FakeTransport::default(),
            FakeTimers::default(),
            RecordingStore::default(),
            mode,
        )
    }

    fn segmented(ctl: &TestController) {
        ctl.orchestrator.transport().reply(
            200,
            json!({"original_image": "old.png", "mask_image": "mask_old.png", "masked_image": "masked_old.png"}),
        );
        block_on(ctl.submit(png(), String::new(), String::new()));
        assert!(ctl.has_uploaded_image());
    }

    fn banner(ctl: &TestController) -> Option<(BannerKind, FormAnchor, String)> {
        ctl.store.read(|state| {
            state
                .banner
                .current()
                .map(|b| (b.kind, b.anchor, b.text.clone()))
        })
    }

    fn slot(ctl: &TestController, slot: ImageSlot) -> Option<String> {
        ctl.store.read(|state| state.images.get(slot).map(str::to_string))
    }

    fn progress(ctl: &TestController) -> ProgressState {
        ctl.store.read(|state| state.progress.clone())
    }

    fn seed_results(ctl: &TestController) {
        ctl.store.apply(|state| {
            state.images.set(ImageSlot::Original, "/uploads/old.png".into());
            state.images.set(ImageSlot::Mask, "/uploads/mask_old.png".into());
            state.images.prompt_used = Some("old prompt".into());
        });
    }

    #[test]
    fn test_oversized_file_never_reaches_network() {
        let ctl = controller(WorkflowMode::SingleStep);
        seed_results(&ctl);

        block_on(ctl.submit(
            image("big.png", MAX_FILE_SIZE + 1, "image/png"),
            "shirt".into(),
            String::new(),
        ));

        assert!(ctl.orchestrator.transport().calls.borrow().is_empty());
        assert!(ctl.store.read(|state| state.images.is_empty()));
        assert_eq!(
            banner(&ctl),
            Some((
                BannerKind::Error,
                FormAnchor::Upload,
                "File size exceeds 16MB limit.".to_string()
            ))
        );
    }

    #[test]
    fn test_unsupported_type_regardless_of_extension() {
        let ctl = controller(WorkflowMode::TwoStep);

        block_on(ctl.submit(image("photo.png", 100, "image/gif"), String::new(), String::new()));

        assert!(ctl.orchestrator.transport().calls.borrow().is_empty());
        assert_eq!(
            banner(&ctl).map(|(_, _, text)| text),
            Some("Please upload a valid image file (JPEG, PNG).".to_string())
        );
    }

    #[test]
    fn test_submit_without_file() {
        let ctl = controller(WorkflowMode::SingleStep);

        block_on(ctl.submit(None, "shirt".into(), String::new()));

        assert!(ctl.orchestrator.transport().calls.borrow().is_empty());
        assert_eq!(
            banner(&ctl).map(|(_, _, text)| text),
            Some("Please select an image file.".to_string())
        );
    }

    #[test]
    fn test_single_step_renders_only_present_fields() {
        let ctl = controller(WorkflowMode::SingleStep);
        ctl.orchestrator.transport()
            .reply(200, json!({"original_image": "a.png", "mask_image": "b.png"}));

        block_on(ctl.submit(png(), "shirt".into(), "   ".into()));

        assert_eq!(
            *ctl.orchestrator.transport().calls.borrow(),
            vec![Call::Form {
                url: "/upload".into(),
                fields: vec![("clothing_type", "shirt".into())],
            }]
        );
        assert_eq!(slot(&ctl, ImageSlot::Original).as_deref(), Some("/uploads/a.png"));
        assert_eq!(slot(&ctl, ImageSlot::Mask).as_deref(), Some("/uploads/b.png"));
        assert_eq!(slot(&ctl, ImageSlot::Masked), None);
        assert_eq!(slot(&ctl, ImageSlot::TryOn), None);

        let progress = progress(&ctl);
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.tone(), ProgressTone::Success);
        assert_eq!(progress.status, "Processing complete!");
        assert_eq!(ctl.timers.slept_ms.get(), 1000);
        assert_eq!(
            banner(&ctl),
            Some((
                BannerKind::Success,
                FormAnchor::Upload,
                "Image processed successfully!".to_string()
            ))
        );
        assert!(!ctl.store.read(|state| state.generate_visible));
    }

    #[test]
    fn test_single_step_prompt_round_trip() {
        let ctl = controller(WorkflowMode::SingleStep);
        ctl.orchestrator.transport().reply(
            200,
            json!({
                "original_image": "a.png",
                "mask_image": "mask_a.png",
                "masked_image": "masked_a.png",
                "tryon_image": "tryon_a.png",
                "prompt_used": "a red silk shirt"
            }),
        );

        block_on(ctl.submit(png(), "shirt".into(), " a red silk shirt ".into()));

        assert_eq!(
            *ctl.orchestrator.transport().calls.borrow(),
            vec![Call::Form {
                url: "/upload".into(),
                fields: vec![
                    ("clothing_type", "shirt".into()),
                    ("prompt", "a red silk shirt".into())
                ],
            }]
        );
        assert_eq!(slot(&ctl, ImageSlot::TryOn).as_deref(), Some("/uploads/tryon_a.png"));
        assert_eq!(
            ctl.store.read(|state| state.images.prompt_used.clone()).as_deref(),
            Some("a red silk shirt")
        );
    }

    #[test]
    fn test_server_error_clears_previous_results() {
        let ctl = controller(WorkflowMode::SingleStep);
        ctl.orchestrator.transport()
            .reply(200, json!({"original_image": "a.png", "mask_image": "b.png"}));
        block_on(ctl.submit(png(), "shirt".into(), String::new()));
        assert!(slot(&ctl, ImageSlot::Original).is_some());

        ctl.orchestrator.transport().reply(500, json!({"error": "bad input"}));
        block_on(ctl.submit(png(), "shirt".into(), String::new()));

        assert_eq!(
            banner(&ctl),
            Some((
                BannerKind::Error,
                FormAnchor::Upload,
                "Error: bad input".to_string()
            ))
        );
        let progress = progress(&ctl);
        assert_eq!(progress.percent, 0);
        assert_eq!(progress.tone(), ProgressTone::Error);
        assert_eq!(progress.tone().css_class(), "bg-danger");
        assert_eq!(progress.status, "Processing failed");
        assert!(ctl.store.read(|state| state.images.is_empty()));
    }

    #[test]
    fn test_network_failure_is_surfaced() {
        let ctl = controller(WorkflowMode::SegmentationOnly);

        block_on(ctl.submit(png(), String::new(), String::new()));

        assert_eq!(
            banner(&ctl).map(|(_, _, text)| text),
            Some("Error: Failed to fetch".to_string())
        );
        assert_eq!(progress(&ctl).percent, 0);
    }

    #[test]
    fn test_generate_requires_upload() {
        let ctl = controller(WorkflowMode::TwoStep);

        block_on(ctl.generate("shirt".into(), String::new()));

        assert!(ctl.orchestrator.transport().calls.borrow().is_empty());
        assert_eq!(
            banner(&ctl),
            Some((
                BannerKind::Error,
                FormAnchor::Upload,
                "Please upload and segment an image first.".to_string()
            ))
        );
        assert!(!ctl.store.read(|state| state.progress_visible));
    }

    #[test]
    fn test_two_step_upload_then_generate() {
        let ctl = controller(WorkflowMode::TwoStep);
        ctl.orchestrator.transport().reply(
            200,
            json!({
                "success": true,
                "original_image": "a.png",
                "mask_image": "mask_a.png",
                "masked_image": "masked_a.png"
            }),
        );

        block_on(ctl.submit(png(), String::new(), "ignored".into()));

        assert!(ctl.has_uploaded_image());
        assert!(ctl.store.read(|state| state.generate_visible));
        assert_eq!(progress(&ctl).status, "Segmentation complete!");
        assert_eq!(slot(&ctl, ImageSlot::Masked).as_deref(), Some("/uploads/masked_a.png"));

        ctl.orchestrator.transport().reply(
            200,
            json!({"tryon_image": "tryon_a.png", "prompt_used": "pants on a model"}),
        );
        block_on(ctl.generate("pants".into(), "  ".into()));

        let calls = ctl.orchestrator.transport().calls.borrow();
        assert_eq!(
            calls[0],
            Call::Form {
                url: "/upload".into(),
                fields: vec![]
            }
        );
        assert_eq!(
            calls[1],
            Call::Json {
                url: "/generate".into(),
                body: json!({"filename": "a.png", "clothing_type": "pants", "prompt": null}),
            }
        );
        assert_eq!(slot(&ctl, ImageSlot::TryOn).as_deref(), Some("/uploads/tryon_a.png"));
        assert_eq!(slot(&ctl, ImageSlot::Original).as_deref(), Some("/uploads/a.png"));
        assert_eq!(
            ctl.store.read(|state| state.images.prompt_used.clone()).as_deref(),
            Some("pants on a model")
        );
        assert_eq!(
            banner(&ctl),
            Some((
                BannerKind::Success,
                FormAnchor::Generate,
                "Try-on image generated successfully!".to_string()
            ))
        );
    }

    #[test]
    fn test_generate_failure_keeps_segmentation() {
        let ctl = controller(WorkflowMode::TwoStep);
        ctl.orchestrator.transport().reply(
            200,
            json!({"original_image": "a.png", "mask_image": "mask_a.png", "masked_image": "masked_a.png"}),
        );
        block_on(ctl.submit(png(), String::new(), String::new()));

        ctl.orchestrator.transport().reply_raw(500, "Internal Server Error");
        block_on(ctl.generate("shirt".into(), "blue".into()));

        assert_eq!(
            banner(&ctl).map(|(_, anchor, text)| (anchor, text)),
            Some((FormAnchor::Generate, "Error: HTTP error! status: 500".to_string()))
        );
        assert_eq!(progress(&ctl).status, "Generation failed");
        assert_eq!(slot(&ctl, ImageSlot::Mask).as_deref(), Some("/uploads/mask_a.png"));
        assert_eq!(slot(&ctl, ImageSlot::TryOn), None);
        assert!(ctl.has_uploaded_image());
        assert!(ctl.store.read(|state| state.generate_visible));
    }

    #[test]
    fn test_upload_failure_locks_generate() {
        let ctl = controller(WorkflowMode::TwoStep);
        ctl.orchestrator.transport()
            .reply(200, json!({"original_image": "a.png", "mask_image": "m.png"}));
        block_on(ctl.submit(png(), String::new(), String::new()));

        ctl.orchestrator.transport().reply(400, json!({"error": "Invalid file type"}));
        block_on(ctl.submit(png(), String::new(), String::new()));

        assert!(!ctl.has_uploaded_image());
        assert!(!ctl.store.read(|state| state.generate_visible));
        assert_eq!(progress(&ctl).status, "Segmentation failed");

        block_on(ctl.generate("shirt".into(), String::new()));
        assert_eq!(ctl.orchestrator.transport().calls.borrow().len(), 2);
    }

    #[test]
    fn test_segmentation_only_uses_result_slot() {
        let ctl = controller(WorkflowMode::SegmentationOnly);
        ctl.show_preview("blob:preview".into());
        ctl.orchestrator.transport().reply(
            200,
            json!({
                "original_image": "a.png",
                "mask_image": "mask_a.png",
                "masked_image": "masked_a.png",
                "tryon_image": "tryon_a.png"
            }),
        );

        block_on(ctl.submit(png(), "shirt".into(), "prompt".into()));

        assert_eq!(
            *ctl.orchestrator.transport().calls.borrow(),
            vec![Call::Form {
                url: "/upload".into(),
                fields: vec![]
            }]
        );
        assert_eq!(slot(&ctl, ImageSlot::Result).as_deref(), Some("/uploads/masked_a.png"));
        assert_eq!(slot(&ctl, ImageSlot::Original).as_deref(), Some("blob:preview"));
        assert_eq!(slot(&ctl, ImageSlot::TryOn), None);
        assert_eq!(slot(&ctl, ImageSlot::Masked), None);
        assert_eq!(ctl.timers.slept_ms.get(), 0);
    }

    #[test]
    fn test_banners_never_stack() {
        let ctl = controller(WorkflowMode::SingleStep);

        block_on(ctl.submit(None, String::new(), String::new()));
        block_on(ctl.submit(image("a.bmp", 10, "image/bmp"), String::new(), String::new()));

        assert_eq!(
            banner(&ctl).map(|(_, _, text)| text),
            Some("Please upload a valid image file (JPEG, PNG).".to_string())
        );
        assert!(ctl
            .timers
            .pending
            .borrow()
            .iter()
            .all(|(ms, _)| *ms == BANNER_TIMEOUT_MS));

        ctl.timers.fire_all();
        assert_eq!(banner(&ctl), None);
    }

    #[test]
    fn test_old_banner_timer_keeps_new_banner() {
        let ctl = controller(WorkflowMode::SingleStep);
        ctl.show_error(FormAnchor::Upload, "first");
        let timers = &ctl.timers;
        let first_timer = timers.pending.borrow_mut().remove(0);

        let second = ctl.show_success(FormAnchor::Upload, "second");
        (first_timer.1)();

        assert_eq!(
            ctl.store.read(|state| state.banner.current().map(|b| b.id)),
            Some(second)
        );
    }

    #[test]
    fn test_stale_reply_is_discarded() {
        let ctl = controller(WorkflowMode::SingleStep);
        ctl.orchestrator.transport()
            .reply(200, json!({"original_image": "a.png", "mask_image": "b.png"}));
        let canceller = ctl.clone();
        *ctl.orchestrator.transport().on_send.borrow_mut() = Some(Box::new(move || canceller.cancel_pending()));

        block_on(ctl.submit(png(), "shirt".into(), String::new()));

        assert_eq!(ctl.orchestrator.transport().calls.borrow().len(), 1);
        assert!(ctl.store.read(|state| state.images.is_empty()));
        assert_eq!(banner(&ctl), None);
        assert_eq!(progress(&ctl).percent, 30);
        assert!(!ctl.has_uploaded_image());
    }

    #[test]
    fn test_preview_replaces_results() {
        let ctl = controller(WorkflowMode::TwoStep);
        seed_results(&ctl);
        ctl.store.apply(|state| state.generate_visible = true);

        ctl.show_preview("blob:new".into());

        assert_eq!(slot(&ctl, ImageSlot::Original).as_deref(), Some("blob:new"));
        assert_eq!(slot(&ctl, ImageSlot::Mask), None);
        assert!(ctl.store.read(|state| state.images.prompt_used.is_none()));
        assert!(!ctl.store.read(|state| state.generate_visible));
    }

    #[test]
    fn test_invalid_selection_clears_images() {
        let ctl = controller(WorkflowMode::SingleStep);
        seed_results(&ctl);

        let accepted = ctl.select_file(&FileMeta {
            name: "clip.mp4".into(),
            size: 10,
            mime: "video/mp4".into(),
        });

        assert!(!accepted);
        assert!(ctl.store.read(|state| state.images.is_empty()));
        assert!(banner(&ctl).is_some());
        assert!(ctl.select_file(&FileMeta {
            name: "a.jpg".into(),
            size: 10,
            mime: "image/jpeg".into(),
        }));
    }

    #[test]
    fn test_progress_checkpoints_in_order() {
        let ctl = controller(WorkflowMode::SingleStep);
        ctl.orchestrator
            .transport()
            .reply(200, json!({"original_image": "a.png", "tryon_image": "t.png"}));

        block_on(ctl.submit(png(), "shirt".into(), String::new()));

        assert_eq!(*ctl.store.reported.borrow(), vec![10, 30, 50, 70, 100]);
    }

    #[test]
    fn test_new_file_during_upload_wins() {
        let ctl = controller(WorkflowMode::TwoStep);
        ctl.orchestrator.transport().reply(
            200,
            json!({"original_image": "old.png", "mask_image": "mask_old.png", "masked_image": "masked_old.png"}),
        );
        let picker = ctl.clone();
        *ctl.orchestrator.transport().on_send.borrow_mut() =
            Some(Box::new(move || picker.show_preview("blob:new".into())));

        block_on(ctl.submit(png(), String::new(), String::new()));

        assert_eq!(slot(&ctl, ImageSlot::Original).as_deref(), Some("blob:new"));
        assert_eq!(slot(&ctl, ImageSlot::Mask), None);
        assert!(!ctl.has_uploaded_image());
        assert!(!ctl.store.read(|state| state.generate_visible));
        assert!(!ctl.store.read(|state| state.progress_visible));
        assert_eq!(banner(&ctl), None);

        block_on(ctl.generate("shirt".into(), String::new()));
        assert_eq!(ctl.orchestrator.transport().calls.borrow().len(), 1);
        assert_eq!(
            banner(&ctl).map(|(_, anchor, text)| (anchor, text)),
            Some((
                FormAnchor::Upload,
                "Please upload and segment an image first.".to_string()
            ))
        );
    }

    #[test]
    fn test_rejected_file_during_upload_wins() {
        let ctl = controller(WorkflowMode::TwoStep);
        ctl.orchestrator
            .transport()
            .reply(200, json!({"original_image": "old.png", "masked_image": "masked_old.png"}));
        let picker = ctl.clone();
        *ctl.orchestrator.transport().on_send.borrow_mut() = Some(Box::new(move || {
            picker.select_file(&FileMeta {
                name: "clip.mp4".into(),
                size: 10,
                mime: "video/mp4".into(),
            });
        }));

        block_on(ctl.submit(png(), String::new(), String::new()));

        assert!(ctl.store.read(|state| state.images.is_empty()));
        assert!(!ctl.has_uploaded_image());
        assert!(!ctl.store.read(|state| state.generate_visible));
        assert_eq!(
            banner(&ctl).map(|(kind, _, text)| (kind, text)),
            Some((
                BannerKind::Error,
                "Please upload a valid image file (JPEG, PNG).".to_string()
            ))
        );
    }

    #[test]
    fn test_new_file_during_generate_wins() {
        let ctl = controller(WorkflowMode::TwoStep);
        segmented(&ctl);
        ctl.orchestrator
            .transport()
            .reply(200, json!({"tryon_image": "tryon_old.png", "prompt_used": "old"}));
        let picker = ctl.clone();
        *ctl.orchestrator.transport().on_send.borrow_mut() =
            Some(Box::new(move || picker.show_preview("blob:new".into())));

        block_on(ctl.generate("shirt".into(), String::new()));

        assert_eq!(ctl.orchestrator.transport().calls.borrow().len(), 2);
        assert_eq!(slot(&ctl, ImageSlot::Original).as_deref(), Some("blob:new"));
        assert_eq!(slot(&ctl, ImageSlot::TryOn), None);
        assert!(ctl.store.read(|state| state.images.prompt_used.is_none()));
        assert!(!ctl.store.read(|state| state.progress_visible));
        assert_eq!(progress(&ctl), ProgressState::default());
        assert_eq!(
            banner(&ctl).map(|(_, _, text)| text),
            Some("Image segmented successfully! You can now generate a try-on.".to_string())
        );
    }
}
