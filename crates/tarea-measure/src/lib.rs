#![forbid(unsafe_code)]

//! Autosize measurement for the tarea text area.
//!
//! - [`HeightCalculator`]: computes height and row bounds through a hidden
//!   measurement surface.
//! - [`StyleCache`]: per-element sizing-style snapshots, so repeated
//!   measurements skip computed-style reads.

pub mod cache;
pub mod height;
pub mod styling;

pub use cache::{CacheStats, StyleCache};
pub use height::{HeightCalculator, MeasuredStyle, Measurer, resolve_height};
pub use styling::{NodeStyling, calculate_node_styling};
