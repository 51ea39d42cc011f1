//! Backend calls and reply interpretation.
//!
//! [`RequestOrchestrator`] builds the `/upload` and `/generate` requests for
//! the active mode and turns raw HTTP replies into [`ServerReply`] or a
//! [`WorkflowError`]. The HTTP client itself sits behind [`Transport`] so
//! the workflow runs the same against the browser and against test fakes.

use serde::Serialize;
use serde_json::Value;

use crate::config::{BACKEND_URL, GENERATE_PATH, UPLOAD_PATH};
use crate::error::{WorkflowError, WorkflowResult};
use crate::types::{FileMeta, GenerateRequest, RawReply, ServerReply};
use crate::workflow::mode::WorkflowMode;
use crate::workflow::session::UploadSession;

/// A file the user picked.
pub trait FileHandle {
    fn meta(&self) -> FileMeta;
}

/// HTTP client used by the workflow.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type File: FileHandle;

    /// `POST` a multipart form with the file under `file` plus text fields.
    async fn post_form(
        &self,
        url: &str,
        file: &Self::File,
        fields: &[(&'static str, String)],
    ) -> WorkflowResult<RawReply>;

    /// `POST` a JSON body.
    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> WorkflowResult<RawReply>;
}

/// Turn a raw reply into a JSON object or an error.
///
/// A non-2xx status fails with the body's `error` message, falling back to
/// the status code. A 2xx body with a truthy `error` field also fails.
pub fn interpret_reply(raw: RawReply) -> WorkflowResult<ServerReply> {
    let object = match serde_json::from_str::<Value>(&raw.body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    };
    let server_error = object
        .as_ref()
        .and_then(|map| map.get("error"))
        .and_then(error_message);

    if !raw.is_success() {
        return Err(WorkflowError::Server(server_error.unwrap_or_else(|| {
            format!("HTTP error! status: {}", raw.status)
        })));
    }

    if let Some(message) = server_error {
        return Err(WorkflowError::Server(message));
    }

    object
        .map(ServerReply)
        .ok_or_else(|| WorkflowError::InvalidResponse("expected a JSON object".to_string()))
}

/// Message carried by an `error` field, if the field is truthy.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub struct RequestOrchestrator<T> {
    transport: T,
    mode: WorkflowMode,
    base_url: String,
}

impl<T: Transport> RequestOrchestrator<T> {
    pub fn new(transport: T, mode: WorkflowMode) -> Self {
        Self {
            transport,
            mode,
            base_url: BACKEND_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub fn mode(&self) -> WorkflowMode {
        self.mode
    }

    /// Text fields sent next to the file.
    pub fn upload_fields(&self, session: &UploadSession<T::File>) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if self.mode.profile().upload_sends_options {
            fields.push(("clothing_type", session.clothing_type.clone()));
            if let Some(prompt) = &session.custom_prompt {
                fields.push(("prompt", prompt.clone()));
            }
        }
        fields
    }

    /// `POST /upload` with the session's file.
    pub async fn upload(&self, session: &UploadSession<T::File>) -> WorkflowResult<ServerReply> {
        let url = format!("{}{}", self.base_url, UPLOAD_PATH);
        let fields = self.upload_fields(session);

        log::info!("📤 Uploading image to {} ({} extra fields)", url, fields.len());
        let raw = self.transport.post_form(&url, &session.file, &fields).await?;
        log::debug!("Upload replied with status {}", raw.status);

        interpret_reply(raw)
    }

    /// `POST /generate` for an already uploaded image.
    pub async fn generate(&self, request: &GenerateRequest) -> WorkflowResult<ServerReply> {
        let url = format!("{}{}", self.base_url, GENERATE_PATH);

        log::info!("🎨 Requesting try-on for {}", request.filename);
        let raw = self.transport.post_json(&url, request).await?;
        log::debug!("Generate replied with status {}", raw.status);

        interpret_reply(raw)
    }
}
