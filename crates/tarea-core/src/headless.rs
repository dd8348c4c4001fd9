#![forbid(unsafe_code)]

//! Deterministic in-memory host for tests and server-side layout.
//!
//! [`HeadlessElement`] implements [`TextElement`] with plain fields and
//! records side effects (selection writes, focus calls, style reads) so tests
//! can assert on them. [`HeadlessSurface`] implements [`MeasureSurface`] with
//! a fixed-advance font model:
//!
//! - every grapheme advances `cells * font_size / 2 + letter_spacing`, where
//!   `cells` is its terminal display width (CJK and emoji are two cells);
//! - `\n` starts a new line when `white-space` preserves newlines;
//! - lines soft-wrap at grapheme boundaries once they exceed the content
//!   width, unless `white-space` or `wrap="off"` forbids it;
//! - `scroll_height = lines * line_height + padding_top + padding_bottom`,
//!   and empty text still occupies one line.

use std::cell::Cell;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::element::{
    ElementId, MeasureSurface, SelectionError, SelectionRange, TextElement, WrapMode,
};
use crate::geometry::Size;
use crate::style::{BoxSizing, ComputedStyle, InlineStyle, SizingStyle};

/// Horizontal advance of one display cell, as a fraction of the font size.
const CELL_ADVANCE_FACTOR: f64 = 0.5;

/// Count laid-out lines for `text` under `sizing`.
#[must_use]
pub fn layout_line_count(text: &str, sizing: &SizingStyle, wrap: Option<WrapMode>) -> usize {
    let soft_wrap = sizing.white_space.soft_wraps() && wrap != Some(WrapMode::Off);
    let avail = sizing.content_width();
    let cell = sizing.font_size * CELL_ADVANCE_FACTOR;

    let normalized;
    let text = if sizing.white_space.preserves_newlines() {
        text
    } else {
        normalized = text.replace('\n', " ");
        normalized.as_str()
    };

    let mut lines = 0usize;
    for (idx, paragraph) in text.split('\n').enumerate() {
        lines += 1;
        if !soft_wrap {
            continue;
        }
        let mut used = if idx == 0 { sizing.text_indent } else { 0.0 };
        let mut line_has_glyph = false;
        for grapheme in paragraph.graphemes(true) {
            if grapheme == "\r" {
                continue;
            }
            let advance = UnicodeWidthStr::width(grapheme) as f64 * cell + sizing.letter_spacing;
            if line_has_glyph && used + advance > avail {
                lines += 1;
                used = advance;
            } else {
                used += advance;
            }
            line_has_glyph = true;
        }
    }
    lines.max(1)
}

/// Hidden measurement clone backed by [`layout_line_count`].
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    sizing: Option<SizingStyle>,
    css: String,
    wrap: Option<WrapMode>,
    text: String,
    prepares: usize,
}

impl HeadlessSurface {
    /// Create an unprepared surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`MeasureSurface::prepare`] calls (one per measurement pass).
    #[must_use]
    pub fn prepare_count(&self) -> usize {
        self.prepares
    }

    /// The style text applied on the last prepare.
    #[must_use]
    pub fn css_text(&self) -> &str {
        &self.css
    }

    /// Current clone text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl MeasureSurface for HeadlessSurface {
    fn prepare(&mut self, sizing: &SizingStyle, wrap: Option<WrapMode>) {
        self.prepares += 1;
        self.css = format!(
            "{};min-height:0;max-height:none;height:0;visibility:hidden;overflow:hidden;\
             position:absolute;z-index:-1000;top:0;right:0;pointer-events:none",
            sizing.css_text()
        );
        self.sizing = Some(sizing.clone());
        self.wrap = wrap;
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn scroll_height(&self) -> f64 {
        let Some(sizing) = &self.sizing else {
            return 0.0;
        };
        let lines = layout_line_count(&self.text, sizing, self.wrap);
        lines as f64 * sizing.line_height_px() + sizing.padding_size()
    }
}

/// In-memory multi-line input.
#[derive(Debug)]
pub struct HeadlessElement {
    id: ElementId,
    value: String,
    placeholder: Option<String>,
    wrap: Option<WrapMode>,
    style: ComputedStyle,
    inline: InlineStyle,
    selection: SelectionRange,
    selection_supported: bool,
    connected: bool,
    focused: bool,
    max_length: Option<usize>,
    selection_log: Vec<SelectionRange>,
    focus_calls: usize,
    blur_calls: usize,
    style_reads: Cell<usize>,
}

impl Default for HeadlessElement {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessElement {
    /// Create an empty, connected element with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ElementId::next(),
            value: String::new(),
            placeholder: None,
            wrap: None,
            style: ComputedStyle::default(),
            inline: InlineStyle::new(),
            selection: SelectionRange::default(),
            selection_supported: true,
            connected: true,
            focused: false,
            max_length: None,
            selection_log: Vec::new(),
            focus_calls: 0,
            blur_calls: 0,
            style_reads: Cell::new(0),
        }
    }

    // --- Builder methods ---

    /// Set the computed style (builder).
    #[must_use]
    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the placeholder (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the `wrap` attribute (builder).
    #[must_use]
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = Some(wrap);
        self
    }

    /// Make selection reads and writes fail with `Unsupported` (builder).
    #[must_use]
    pub fn without_selection_support(mut self) -> Self {
        self.selection_supported = false;
        self
    }

    // --- Host simulation ---

    /// Simulate the user typing: replace the text and put the caret at
    /// `caret` (clamped), without notifying anyone.
    pub fn type_text(&mut self, value: &str, caret: SelectionRange) {
        self.value = value.to_string();
        self.selection = self.clamp(caret);
    }

    /// Mutable access to the computed style, e.g. to simulate a reflow.
    pub fn style_mut(&mut self) -> &mut ComputedStyle {
        &mut self.style
    }

    /// Detach from the document.
    pub fn detach(&mut self) {
        self.connected = false;
        self.focused = false;
    }

    /// Border-box size as a geometry observer would report it.
    #[must_use]
    pub fn observed_size(&self) -> Size {
        let sizing = SizingStyle::from_computed(&self.style);
        let chrome_h = sizing.padding.horizontal() + sizing.border.horizontal();
        let chrome_v = sizing.padding_size() + sizing.border_size();
        let width = match sizing.box_sizing {
            BoxSizing::ContentBox => sizing.width + chrome_h,
            BoxSizing::BorderBox => sizing.width,
        };
        let height = match (self.inline.height, sizing.box_sizing) {
            (Some(h), BoxSizing::BorderBox) => h,
            (Some(h), BoxSizing::ContentBox) => h + chrome_v,
            (None, _) => {
                let mut surface = HeadlessSurface::new();
                surface.prepare(&sizing, self.wrap);
                surface.set_text(&self.value);
                surface.scroll_height() + sizing.border_size()
            }
        };
        Size::new(width, height)
    }

    // --- Recorded side effects ---

    /// Inline style last written by the widget.
    #[must_use]
    pub fn inline_style(&self) -> &InlineStyle {
        &self.inline
    }

    /// Every selection written through [`TextElement::set_selection_range`].
    #[must_use]
    pub fn selection_log(&self) -> &[SelectionRange] {
        &self.selection_log
    }

    /// Number of [`TextElement::focus`] calls.
    #[must_use]
    pub fn focus_calls(&self) -> usize {
        self.focus_calls
    }

    /// Number of [`TextElement::blur`] calls.
    #[must_use]
    pub fn blur_calls(&self) -> usize {
        self.blur_calls
    }

    /// Number of computed-style reads.
    #[must_use]
    pub fn style_reads(&self) -> usize {
        self.style_reads.get()
    }

    /// Native max-length attribute.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn clamp(&self, range: SelectionRange) -> SelectionRange {
        let len = self.char_len();
        SelectionRange::new(range.start.min(len), range.end.min(len))
    }
}

impl TextElement for HeadlessElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style_reads.set(self.style_reads.get() + 1);
        self.style.clone()
    }

    fn width(&self) -> f64 {
        self.style.width
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        if self.value == value {
            return;
        }
        self.value = value.to_string();
        self.selection = SelectionRange::caret(self.char_len());
    }

    fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    fn set_placeholder(&mut self, placeholder: Option<&str>) {
        self.placeholder = placeholder.map(str::to_string);
    }

    fn wrap(&self) -> Option<WrapMode> {
        self.wrap
    }

    fn selection(&self) -> Result<SelectionRange, SelectionError> {
        if !self.selection_supported {
            return Err(SelectionError::Unsupported);
        }
        if !self.connected {
            return Err(SelectionError::Detached);
        }
        Ok(self.selection)
    }

    fn set_selection_range(&mut self, range: SelectionRange) -> Result<(), SelectionError> {
        if !self.selection_supported {
            return Err(SelectionError::Unsupported);
        }
        if !self.connected {
            return Err(SelectionError::Detached);
        }
        self.selection_log.push(range);
        self.selection = self.clamp(range);
        Ok(())
    }

    fn focus(&mut self) {
        self.focus_calls += 1;
        if self.connected {
            self.focused = true;
        }
    }

    fn blur(&mut self) {
        self.blur_calls += 1;
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn apply_style(&mut self, style: &InlineStyle) {
        self.inline = *style;
    }

    fn set_max_length(&mut self, max: Option<usize>) {
        self.max_length = max;
    }
}
