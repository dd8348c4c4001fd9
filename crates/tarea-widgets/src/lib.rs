#![forbid(unsafe_code)]

//! Auto-resizing, character-counting, clearable text area.
//!
//! - [`textarea`]: the widget and its props.
//! - [`resize`]: the autosize lifecycle coordinator.
//! - [`count`]: counting strategies and length enforcement.
//! - [`value`]: controlled/uncontrolled value ownership.
//! - [`affix`]: the render-facing view model.
//! - [`config`]: runtime configuration from the environment.

pub mod affix;
pub mod config;
pub mod count;
pub mod resize;
pub mod textarea;
pub mod value;

pub use affix::{ClassList, ClearIcon, TextAreaView};
pub use config::{ConfigError, TextAreaConfig};
pub use count::{
    CountConfig, CountDisplay, CountStrategy, ExceedFormatter, ExceedInfo, ResolvedCount,
    ShowCount, ShowFormatter, grapheme_count, slice_graphemes,
};
pub use resize::{AutoSize, FrameReport, ResizableTextArea, ResizePhase};
pub use textarea::{DEFAULT_PREFIX_CLS, TextArea, TextAreaProps};
pub use value::{ModeSwitch, ValueSource};
