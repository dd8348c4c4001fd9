#![forbid(unsafe_code)]

//! Computed and inline style model for text elements.
//!
//! [`ComputedStyle`] is what the host reports for a live element (the
//! equivalent of a computed-style read, which forces layout). [`SizingStyle`]
//! is the subset that influences text layout and is copied onto the hidden
//! measurement surface. [`InlineStyle`] is what the widget writes back.

use std::fmt::Write as _;

use crate::geometry::{Edges, finite_or_zero};

/// Multiplier applied to the font size for `line-height: normal`.
pub const NORMAL_LINE_HEIGHT_FACTOR: f64 = 1.2;

/// CSS `box-sizing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoxSizing {
    /// Height excludes padding and border.
    #[default]
    ContentBox,
    /// Height includes padding and border.
    BorderBox,
}

impl BoxSizing {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentBox => "content-box",
            Self::BorderBox => "border-box",
        }
    }
}

/// CSS `line-height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineHeight {
    #[default]
    Normal,
    /// Absolute line height in pixels.
    Px(f64),
    /// Multiple of the font size.
    Factor(f64),
}

impl LineHeight {
    /// Resolve to pixels for the given font size.
    #[must_use]
    pub fn resolve(self, font_size: f64) -> f64 {
        let px = match self {
            Self::Normal => font_size * NORMAL_LINE_HEIGHT_FACTOR,
            Self::Px(px) => px,
            Self::Factor(factor) => font_size * factor,
        };
        finite_or_zero(px).max(0.0)
    }

    fn css_value(self) -> String {
        match self {
            Self::Normal => "normal".to_string(),
            Self::Px(px) => format!("{px}px"),
            Self::Factor(factor) => format!("{factor}"),
        }
    }
}

/// CSS `white-space`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WhiteSpace {
    Normal,
    NoWrap,
    Pre,
    #[default]
    PreWrap,
    PreLine,
}

impl WhiteSpace {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::NoWrap => "nowrap",
            Self::Pre => "pre",
            Self::PreWrap => "pre-wrap",
            Self::PreLine => "pre-line",
        }
    }

    /// Whether long lines soft-wrap at the content width.
    #[must_use]
    pub const fn soft_wraps(self) -> bool {
        !matches!(self, Self::NoWrap | Self::Pre)
    }

    /// Whether `\n` starts a new line.
    #[must_use]
    pub const fn preserves_newlines(self) -> bool {
        !matches!(self, Self::Normal | Self::NoWrap)
    }
}

/// CSS `word-break`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordBreak {
    #[default]
    Normal,
    BreakAll,
    KeepAll,
}

impl WordBreak {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::BreakAll => "break-all",
            Self::KeepAll => "keep-all",
        }
    }
}

/// CSS `overflow-x` / `overflow-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overflow {
    Visible,
    Hidden,
    Auto,
    Scroll,
}

/// CSS `resize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resize {
    None,
    Both,
    Horizontal,
    Vertical,
}

/// Style values reported for a live element.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub box_sizing: BoxSizing,
    pub padding: Edges,
    pub border: Edges,
    pub line_height: LineHeight,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub font_variant: String,
    pub letter_spacing: f64,
    pub text_rendering: String,
    pub text_transform: String,
    pub text_indent: f64,
    pub white_space: WhiteSpace,
    pub word_break: WordBreak,
    /// Used value of `width` in pixels.
    pub width: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            box_sizing: BoxSizing::ContentBox,
            padding: Edges::all(2.0),
            border: Edges::all(1.0),
            line_height: LineHeight::Normal,
            font_family: "monospace".to_string(),
            font_size: 14.0,
            font_weight: 400,
            font_variant: "normal".to_string(),
            letter_spacing: 0.0,
            text_rendering: "auto".to_string(),
            text_transform: "none".to_string(),
            text_indent: 0.0,
            white_space: WhiteSpace::PreWrap,
            word_break: WordBreak::Normal,
            width: 200.0,
        }
    }
}

/// Snapshot of the layout-relevant properties of an element.
///
/// Cheap to clone and compare; the widget caches it per element so typing
/// does not force a computed-style read on every keystroke.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingStyle {
    pub box_sizing: BoxSizing,
    pub padding: Edges,
    pub border: Edges,
    pub line_height: LineHeight,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub font_variant: String,
    pub letter_spacing: f64,
    pub text_rendering: String,
    pub text_transform: String,
    pub text_indent: f64,
    pub white_space: WhiteSpace,
    pub word_break: WordBreak,
    pub width: f64,
}

impl SizingStyle {
    /// Copy the sizing subset out of a computed style.
    #[must_use]
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self {
            box_sizing: style.box_sizing,
            padding: style.padding,
            border: style.border,
            line_height: style.line_height,
            font_family: style.font_family.clone(),
            font_size: finite_or_zero(style.font_size),
            font_weight: style.font_weight,
            font_variant: style.font_variant.clone(),
            letter_spacing: finite_or_zero(style.letter_spacing),
            text_rendering: style.text_rendering.clone(),
            text_transform: style.text_transform.clone(),
            text_indent: finite_or_zero(style.text_indent),
            white_space: style.white_space,
            word_break: style.word_break,
            width: finite_or_zero(style.width),
        }
    }

    /// `padding-top + padding-bottom`.
    #[inline]
    #[must_use]
    pub fn padding_size(&self) -> f64 {
        self.padding.vertical()
    }

    /// `border-top-width + border-bottom-width`.
    #[inline]
    #[must_use]
    pub fn border_size(&self) -> f64 {
        self.border.vertical()
    }

    /// Line height in pixels.
    #[inline]
    #[must_use]
    pub fn line_height_px(&self) -> f64 {
        self.line_height.resolve(self.font_size)
    }

    /// Width available to text inside the box.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        let width = match self.box_sizing {
            BoxSizing::ContentBox => self.width,
            BoxSizing::BorderBox => {
                self.width - self.padding.horizontal() - self.border.horizontal()
            }
        };
        width.max(0.0)
    }

    /// Render as a `name:value;...` declaration list.
    ///
    /// Property order is fixed so equal snapshots render identical strings.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::with_capacity(320);
        let decls: [(&str, String); 18] = [
            ("letter-spacing", px_or_normal(self.letter_spacing)),
            ("line-height", self.line_height.css_value()),
            ("padding-top", format!("{}px", self.padding.top)),
            ("padding-bottom", format!("{}px", self.padding.bottom)),
            ("font-family", self.font_family.clone()),
            ("font-weight", self.font_weight.to_string()),
            ("font-size", format!("{}px", self.font_size)),
            ("font-variant", self.font_variant.clone()),
            ("text-rendering", self.text_rendering.clone()),
            ("text-transform", self.text_transform.clone()),
            ("width", format!("{}px", self.width)),
            ("text-indent", format!("{}px", self.text_indent)),
            ("padding-left", format!("{}px", self.padding.left)),
            ("padding-right", format!("{}px", self.padding.right)),
            (
                "border-width",
                format!(
                    "{}px {}px {}px {}px",
                    self.border.top, self.border.right, self.border.bottom, self.border.left
                ),
            ),
            ("box-sizing", self.box_sizing.as_str().to_string()),
            ("word-break", self.word_break.as_str().to_string()),
            ("white-space", self.white_space.as_str().to_string()),
        ];
        for (idx, (name, value)) in decls.iter().enumerate() {
            if idx > 0 {
                out.push(';');
            }
            let _ = write!(out, "{name}:{value}");
        }
        out
    }
}

fn px_or_normal(value: f64) -> String {
    if value == 0.0 {
        "normal".to_string()
    } else {
        format!("{value}px")
    }
}

/// Inline style the widget writes onto the element.
///
/// `None` means "leave unset" so the host or user stylesheet applies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InlineStyle {
    pub height: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    pub overflow_x: Option<Overflow>,
    pub overflow_y: Option<Overflow>,
    pub resize: Option<Resize>,
}

impl InlineStyle {
    /// Create an empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            height: None,
            min_height: None,
            max_height: None,
            overflow_x: None,
            overflow_y: None,
            resize: None,
        }
    }

    /// Set the height (builder).
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Set both overflow axes (builder).
    #[must_use]
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow_x = Some(overflow);
        self.overflow_y = Some(overflow);
        self
    }

    /// Layer `other` on top of `self`: every property set in `other` wins.
    #[must_use]
    pub fn merge(self, other: &InlineStyle) -> Self {
        Self {
            height: other.height.or(self.height),
            min_height: other.min_height.or(self.min_height),
            max_height: other.max_height.or(self.max_height),
            overflow_x: other.overflow_x.or(self.overflow_x),
            overflow_y: other.overflow_y.or(self.overflow_y),
            resize: other.resize.or(self.resize),
        }
    }

    /// Check whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }
}
