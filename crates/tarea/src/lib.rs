#![forbid(unsafe_code)]

//! tarea public facade crate.
//!
//! Re-exports the element model, the autosize calculator and the text area
//! widget, and offers a prelude for day-to-day usage.
//!
//! # Example
//! ```
//! use tarea::prelude::*;
//!
//! let mut ta = TextArea::new(
//!     HeadlessElement::new(),
//!     TextAreaProps::new().with_auto_size(AutoSize::rows(Some(1), Some(4))),
//! );
//! ta.handle_event(&Event::Input("hello".into()));
//! while ta.on_frame() != FrameReport::default() {}
//! assert!(ta.style().height.is_some());
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tarea_core::element::{
    ElementId, MeasureSurface, SelectionError, SelectionRange, TextElement, WrapMode,
};
pub use tarea_core::event::{
    ChangeEvent, ChangeSource, CompositionEvent, Event, KeyCode, KeyEvent, Modifiers,
};
pub use tarea_core::frame::{FrameQueue, FrameToken};
pub use tarea_core::geometry::{Edges, Size};
pub use tarea_core::headless::{HeadlessElement, HeadlessSurface};
pub use tarea_core::style::{BoxSizing, ComputedStyle, InlineStyle, LineHeight, Overflow, Resize};

// --- Measure re-exports ----------------------------------------------------

pub use tarea_measure::{HeightCalculator, MeasuredStyle, Measurer, StyleCache};

// --- Widget re-exports -----------------------------------------------------

pub use tarea_widgets::{
    AutoSize, ConfigError, CountConfig, FrameReport, ModeSwitch, ResizableTextArea, ResizePhase,
    ShowCount, TextArea, TextAreaConfig, TextAreaProps, TextAreaView,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tarea hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid runtime configuration.
    Config(ConfigError),
    /// Selection could not be read or written.
    Selection(SelectionError),
    /// A controlled/uncontrolled switch was attempted.
    ModeSwitch(ModeSwitch),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Selection(err) => write!(f, "{err}"),
            Self::ModeSwitch(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Selection(err) => Some(err),
            Self::ModeSwitch(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SelectionError> for Error {
    fn from(err: SelectionError) -> Self {
        Self::Selection(err)
    }
}

impl From<ModeSwitch> for Error {
    fn from(err: ModeSwitch) -> Self {
        Self::ModeSwitch(err)
    }
}

/// Standard result type for tarea APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load [`TextAreaConfig`] from the process environment, rejecting invalid
/// values.
pub fn config_from_env() -> Result<TextAreaConfig> {
    Ok(TextAreaConfig::try_from_env_with(|key| std::env::var(key).ok())?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AutoSize, ChangeEvent, ChangeSource, CompositionEvent, CountConfig, Error, Event,
        FrameReport, HeadlessElement, InlineStyle, KeyCode, KeyEvent, Result, SelectionRange,
        ShowCount, Size, TextArea, TextAreaConfig, TextAreaProps, TextElement,
    };

    pub use crate::{core, measure, widgets};
}

pub use tarea_core as core;
pub use tarea_measure as measure;
pub use tarea_widgets as widgets;
