//! Upload session and request sequencing.

use std::cell::Cell;
use std::fmt;

use crate::error::{WorkflowError, WorkflowResult};
use crate::types::{uploads_url, GenerateRequest, ImageSlot, ServerReply};
use crate::workflow::mode::FieldMap;

/// State of one submit cycle.
///
/// Created on submit, filled in as replies arrive, replaced by the next
/// submit and discarded when the upload fails.
#[derive(Debug)]
pub struct UploadSession<F> {
    pub file: F,
    pub clothing_type: String,
    pub custom_prompt: Option<String>,
    pub original_image_url: Option<String>,
    pub mask_image_url: Option<String>,
    pub masked_image_url: Option<String>,
    pub tryon_image_url: Option<String>,
    pub used_prompt: Option<String>,
    /// Server name of the uploaded image, required by `/generate`
    pub filename_token: Option<String>,
}

/// Trim a free-text prompt; blank means no prompt.
pub fn normalize_prompt(prompt: &str) -> Option<String> {
    let prompt = prompt.trim();
    (!prompt.is_empty()).then(|| prompt.to_string())
}

impl<F> UploadSession<F> {
    pub fn new(file: F, clothing_type: impl Into<String>, prompt: &str) -> Self {
        Self {
            file,
            clothing_type: clothing_type.into(),
            custom_prompt: normalize_prompt(prompt),
            original_image_url: None,
            mask_image_url: None,
            masked_image_url: None,
            tryon_image_url: None,
            used_prompt: None,
            filename_token: None,
        }
    }

    /// Store the URLs of the mapped reply fields and return them per slot.
    ///
    /// `original_image` is always captured as the filename token, whichever
    /// slot (if any) displays it.
    pub fn record(&mut self, reply: &ServerReply, fields: FieldMap) -> Vec<(ImageSlot, String)> {
        if let Some(name) = reply.field("original_image") {
            self.filename_token = Some(name.to_string());
        }

        let mut rendered = Vec::new();
        for (field, slot) in fields {
            if let Some(name) = reply.field(field) {
                let url = uploads_url(name);
                match *field {
                    "original_image" => self.original_image_url = Some(url.clone()),
                    "mask_image" => self.mask_image_url = Some(url.clone()),
                    "masked_image" => self.masked_image_url = Some(url.clone()),
                    "tryon_image" => self.tryon_image_url = Some(url.clone()),
                    _ => {}
                }
                rendered.push((*slot, url));
            }
        }
        rendered
    }

    /// Store `prompt_used` if the reply carries one.
    pub fn record_prompt(&mut self, reply: &ServerReply) -> Option<String> {
        let prompt = reply.field("prompt_used").map(str::to_string);
        if prompt.is_some() {
            self.used_prompt = prompt.clone();
        }
        prompt
    }

    /// Body of the follow-up `/generate` call.
    ///
    /// Fails with [`WorkflowError::MissingPrecondition`] until an upload has
    /// captured the filename token.
    pub fn generate_request(
        &mut self,
        clothing_type: &str,
        prompt: &str,
    ) -> WorkflowResult<GenerateRequest> {
        let filename = self
            .filename_token
            .clone()
            .ok_or(WorkflowError::MissingPrecondition)?;

        self.clothing_type = clothing_type.to_string();
        self.custom_prompt = normalize_prompt(prompt);

        Ok(GenerateRequest {
            filename,
            clothing_type: self.clothing_type.clone(),
            prompt: self.custom_prompt.clone(),
        })
    }
}

/// Identifies one submit or generate attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic request counter.
///
/// Every attempt takes a ticket; results carrying an older ticket than the
/// latest one are stale and must not touch the UI.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn next(&self) -> Ticket {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        Ticket(ticket)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.next();
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
