#![forbid(unsafe_code)]

//! Core: element and style model, input events, frame scheduling, and a
//! headless host for the tarea text area.

pub mod element;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod headless;
pub mod logging;
pub mod style;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, trace_span, warn};
