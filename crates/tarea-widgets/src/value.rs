#![forbid(unsafe_code)]

//! Single source of truth for the text value.
//!
//! The mode is fixed when the widget is built: supplying `value` makes it
//! controlled, otherwise it is uncontrolled and seeded from
//! `default_value`. Later attempts to flip the mode are reported as a
//! [`ModeSwitch`] and leave the state untouched.

use std::fmt;

/// A refused change of value ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSwitch {
    /// An uncontrolled widget was handed an external value.
    UncontrolledToControlled,
    /// A controlled widget lost its external value.
    ControlledToUncontrolled,
}

impl fmt::Display for ModeSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UncontrolledToControlled => {
                write!(f, "text area is uncontrolled; ignoring external value")
            }
            Self::ControlledToUncontrolled => {
                write!(f, "text area is controlled; external value cannot be removed")
            }
        }
    }
}

impl std::error::Error for ModeSwitch {}

/// Where the current value lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Owned by the host; local commits are ignored.
    Controlled(String),
    /// Owned by the widget.
    Uncontrolled { initial: String, current: String },
}

impl ValueSource {
    /// Resolve the mode from the presence of `value`.
    #[must_use]
    pub fn resolve(value: Option<String>, default_value: Option<String>) -> Self {
        match value {
            Some(value) => Self::Controlled(value),
            None => {
                let initial = default_value.unwrap_or_default();
                Self::Uncontrolled {
                    current: initial.clone(),
                    initial,
                }
            }
        }
    }

    #[must_use]
    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled(_))
    }

    /// The value to display.
    #[must_use]
    pub fn current(&self) -> &str {
        match self {
            Self::Controlled(value) => value,
            Self::Uncontrolled { current, .. } => current,
        }
    }

    /// The value the widget started with.
    #[must_use]
    pub fn initial(&self) -> &str {
        match self {
            Self::Controlled(value) => value,
            Self::Uncontrolled { initial, .. } => initial,
        }
    }

    /// Store a locally produced value. Controlled sources ignore it.
    ///
    /// Returns `true` if the stored value changed.
    pub fn commit(&mut self, value: &str) -> bool {
        match self {
            Self::Controlled(_) => false,
            Self::Uncontrolled { current, .. } => {
                if current == value {
                    return false;
                }
                current.clear();
                current.push_str(value);
                true
            }
        }
    }

    /// Apply an external value update.
    ///
    /// Returns `Ok(true)` if the value changed.
    pub fn sync(&mut self, value: Option<&str>) -> Result<bool, ModeSwitch> {
        match (self, value) {
            (Self::Controlled(current), Some(value)) => {
                if current == value {
                    return Ok(false);
                }
                current.clear();
                current.push_str(value);
                Ok(true)
            }
            (Self::Controlled(_), None) => Err(ModeSwitch::ControlledToUncontrolled),
            (Self::Uncontrolled { .. }, Some(_)) => Err(ModeSwitch::UncontrolledToControlled),
            (Self::Uncontrolled { .. }, None) => Ok(false),
        }
    }
}
