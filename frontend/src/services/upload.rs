//! HTTP transport to the image backend.

use gloo_net::http::{Request, Response};
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::error::{WorkflowError, WorkflowResult};
use crate::types::RawReply;
use crate::workflow::Transport;

/// [`Transport`] backed by the browser's `fetch` through `gloo-net`.
#[derive(Clone, Debug, Default)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }
}

fn js_error(context: &str, err: JsValue) -> WorkflowError {
    WorkflowError::Network(format!("{}: {:?}", context, err))
}

/// Read status and body; a body that cannot be read becomes an empty string
/// so the status still decides the outcome.
async fn into_raw(response: Response) -> RawReply {
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|e| {
        log::warn!("Failed to read response body: {}", e);
        String::new()
    });
    RawReply { status, body }
}

impl Transport for GlooTransport {
    type File = File;

    async fn post_form(
        &self,
        url: &str,
        file: &File,
        fields: &[(&'static str, String)],
    ) -> WorkflowResult<RawReply> {
        let form_data = FormData::new().map_err(|e| js_error("Failed to create FormData", e))?;

        form_data
            .append_with_blob("file", file)
            .map_err(|e| js_error("Failed to append file", e))?;
        for (name, value) in fields {
            form_data
                .append_with_str(name, value)
                .map_err(|e| js_error("Failed to append form field", e))?;
        }

        let request = Request::post(url)
            .body(form_data)
            .map_err(|e| WorkflowError::Network(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| WorkflowError::Network(e.to_string()))?;

        Ok(into_raw(response).await)
    }

    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> WorkflowResult<RawReply> {
        let request = Request::post(url)
            .json(body)
            .map_err(|e| WorkflowError::Network(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| WorkflowError::Network(e.to_string()))?;

        Ok(into_raw(response).await)
    }
}
