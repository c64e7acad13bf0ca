//! Logging setup shared by bcsync binaries.
//!
//! Libraries only emit `tracing` events; binaries call [`init_logger`] once at startup.
mod logger;
pub use logger::*;
