#![forbid(unsafe_code)]

//! Canonical input and notification events.
//!
//! The host translates its native events into [`Event`] and feeds them to the
//! widget. The widget reports value changes back as [`ChangeEvent`].

use bitflags::bitflags;

use crate::geometry::Size;

/// Input delivered to a text area by its host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The element's text changed through user input. Carries the raw text.
    Input(String),

    /// An IME composition started.
    CompositionStart(CompositionEvent),

    /// An IME composition finished; the element holds the composed text.
    CompositionEnd(CompositionEvent),

    /// A keyboard event.
    Key(KeyEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),

    /// Geometry observation reported a new element size.
    Resize(Size),

    /// The clear affordance was activated.
    Clear,
}

/// An IME composition event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositionEvent {
    /// Text composed so far (may be empty on start).
    pub data: String,
}

impl CompositionEvent {
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is the Enter key.
    #[must_use]
    pub const fn is_enter(&self) -> bool {
        matches!(self.code, KeyCode::Enter)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// What produced a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// Direct user input.
    Input,
    /// Commit at the end of an IME composition.
    CompositionEnd,
    /// The clear affordance.
    Clear,
}

/// Value change notification emitted by the widget.
///
/// `value` is the committed value: already truncated if a maximum applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub value: String,
    pub source: ChangeSource,
}

impl ChangeEvent {
    #[must_use]
    pub fn new(value: impl Into<String>, source: ChangeSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}
