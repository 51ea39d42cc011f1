//! Browser timers and file access.

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use web_sys::{File, Url};

use crate::types::FileMeta;
use crate::workflow::{FileHandle, Timers};

/// [`Timers`] on top of `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }

    fn after(&self, ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(ms, callback).forget();
    }
}

impl FileHandle for File {
    fn meta(&self) -> FileMeta {
        FileMeta {
            name: self.name(),
            size: self.size() as u64,
            mime: self.type_(),
        }
    }
}

/// Object URL showing `file` before it is uploaded.
pub fn preview_url(file: &File) -> Option<String> {
    match Url::create_object_url_with_blob(file) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("Could not create preview URL: {:?}", e);
            None
        }
    }
}

/// Release a preview URL created by [`preview_url`].
pub fn revoke_preview_url(url: &str) {
    if url.starts_with("blob:") {
        if let Err(e) = Url::revoke_object_url(url) {
            log::debug!("Could not revoke preview URL: {:?}", e);
        }
    }
}

/// The preview `previous` once the Original slot shows `current` instead.
pub fn superseded_preview<'a>(previous: Option<&'a str>, current: Option<&str>) -> Option<&'a str> {
    previous.filter(|url| url.starts_with("blob:") && Some(*url) != current)
}
