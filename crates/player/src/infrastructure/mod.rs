//! Infrastructure adapters - concrete implementations of the outbound ports

pub mod http_client;
pub mod sinks;
pub mod terminal;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use http_client::{HttpFormApi, DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS};
pub use sinks::{JsonWriterSink, LogFormSink};
pub use terminal::TerminalSurface;
