//! Browser services.
//!
//! Implementations of the workflow seams for the real page:
//!
//! - [`upload`] - HTTP transport to the image backend (`gloo-net`)
//! - [`browser`] - timers (`gloo-timers`) and `web_sys::File` access

pub mod browser;
pub mod upload;

pub use browser::*;
pub use upload::*;
