#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All lengths are CSS pixels stored as `f64`. Constructors sanitize
//! non-finite input to `0.0` so downstream arithmetic stays finite.

/// Largest integer a `f64` represents exactly (`2^53 - 1`).
///
/// Used as the open upper bound for heights when no maximum is configured.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Replace NaN and infinities with `0.0`.
#[inline]
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// A width/height pair reported by geometry observation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size. Non-finite components become `0.0`.
    #[inline]
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: finite_or_zero(width),
            height: finite_or_zero(height),
        }
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Per-edge lengths (padding or border widths).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    /// Create edges with explicit values for each side.
    #[inline]
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: finite_or_zero(top),
            right: finite_or_zero(right),
            bottom: finite_or_zero(bottom),
            left: finite_or_zero(left),
        }
    }

    /// Same length on every side.
    #[inline]
    #[must_use]
    pub fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// `top + bottom`.
    #[inline]
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// `left + right`.
    #[inline]
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}
