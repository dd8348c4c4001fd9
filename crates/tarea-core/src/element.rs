#![forbid(unsafe_code)]

//! Host element abstraction.
//!
//! The widget never talks to a concrete toolkit. It owns something that
//! implements [`TextElement`] (the live multi-line input) and measures text
//! through a [`MeasureSurface`] (an off-tree clone it owns privately).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::style::{ComputedStyle, InlineStyle, SizingStyle};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a host element, used as the style-cache key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Allocate a process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A caret or selection inside the element's text.
///
/// Offsets are in the element's own units (the headless element uses
/// `char` offsets). `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// Create a range, swapping the bounds if given in reverse.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A collapsed caret.
    #[must_use]
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The `wrap` attribute of a multi-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    Soft,
    Hard,
    Off,
}

/// Why a selection read or write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// The element kind does not expose a selection.
    Unsupported,
    /// The element is no longer attached to a document.
    Detached,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "element does not support selection"),
            Self::Detached => write!(f, "element is detached"),
        }
    }
}

impl std::error::Error for SelectionError {}

/// A live multi-line text input owned by the widget.
pub trait TextElement {
    /// Identity used for style caching.
    fn id(&self) -> ElementId;

    /// Whether the element is still attached to a document.
    fn is_connected(&self) -> bool;

    /// Read the computed style. May force layout; callers should cache.
    fn computed_style(&self) -> ComputedStyle;

    /// Current used width in pixels. Cheap compared to a full style read;
    /// used to detect reflow that invalidates a cached style snapshot.
    fn width(&self) -> f64;

    /// Current text.
    fn value(&self) -> &str;

    /// Replace the text. Hosts move the caret to the end, as browsers do.
    fn set_value(&mut self, value: &str);

    /// Placeholder text, if any.
    fn placeholder(&self) -> Option<&str> {
        None
    }

    /// Replace the placeholder text.
    fn set_placeholder(&mut self, _placeholder: Option<&str>) {}

    /// The `wrap` attribute, if set.
    fn wrap(&self) -> Option<WrapMode> {
        None
    }

    /// Current selection.
    fn selection(&self) -> Result<SelectionRange, SelectionError>;

    /// Replace the selection.
    fn set_selection_range(&mut self, range: SelectionRange) -> Result<(), SelectionError>;

    /// Give the element input focus.
    fn focus(&mut self);

    /// Remove input focus.
    fn blur(&mut self);

    /// Whether the element currently has input focus.
    fn is_focused(&self) -> bool;

    /// Write the widget-controlled inline style.
    fn apply_style(&mut self, style: &InlineStyle);

    /// Reflect the native max-length attribute.
    fn set_max_length(&mut self, _max: Option<usize>) {}
}

/// A hidden, absolutely positioned, non-interactive clone used for reading
/// natural content height without disturbing the live element.
pub trait MeasureSurface {
    /// Copy the sizing style (plus the hidden-clone overrides) and `wrap`.
    fn prepare(&mut self, sizing: &SizingStyle, wrap: Option<WrapMode>);

    /// Replace the clone's text.
    fn set_text(&mut self, text: &str);

    /// Natural content height including vertical padding, excluding border.
    fn scroll_height(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_are_unique() {
        let a = ElementId::next();
        let b = ElementId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn selection_range_normalizes() {
        assert_eq!(SelectionRange::new(5, 2), SelectionRange::new(2, 5));
        assert!(SelectionRange::caret(3).is_collapsed());
        assert!(!SelectionRange::new(1, 2).is_collapsed());
    }

    #[test]
    fn selection_error_display() {
        assert_eq!(
            SelectionError::Unsupported.to_string(),
            "element does not support selection"
        );
        assert_eq!(SelectionError::Detached.to_string(), "element is detached");
    }
}
