#![forbid(unsafe_code)]

//! Auto-resizing, counting, clearable text area.
//!
//! [`TextArea`] owns a host [`TextElement`] and drives it from [`Event`]s.
//! It keeps the value, caret, counter and autosize height consistent across
//! controlled and uncontrolled use, IME composition and geometry changes.
//!
//! # Example
//! ```
//! use tarea_core::event::Event;
//! use tarea_core::headless::HeadlessElement;
//! use tarea_widgets::textarea::{TextArea, TextAreaProps};
//! use tarea_widgets::count::ShowCount;
//!
//! let props = TextAreaProps::new()
//!     .with_default_value("hello")
//!     .with_max_length(5)
//!     .with_show_count(ShowCount::Visible);
//! let mut ta = TextArea::new(HeadlessElement::new(), props);
//! assert_eq!(ta.view().count.as_deref(), Some("5 / 5"));
//!
//! ta.handle_event(&Event::Clear);
//! assert_eq!(ta.value(), "");
//! ```
//!
//! # Change Protocol
//!
//! 1. While composing, raw input passes through untouched.
//! 2. Otherwise an over-long value goes through the exceed formatter; if
//!    that changed the text, the caret captured beforehand is re-applied to
//!    the rewritten element.
//! 3. Uncontrolled widgets commit the result; controlled ones wait for the
//!    host to call [`TextArea::set_value`].
//! 4. `on_change` receives the committed text in both modes.

use std::fmt;

use tarea_core::element::{SelectionRange, TextElement};
use tarea_core::event::{ChangeEvent, ChangeSource, CompositionEvent, Event, KeyEvent};
use tarea_core::geometry::Size;
use tarea_core::headless::HeadlessSurface;
use tarea_core::style::InlineStyle;
use tarea_measure::{HeightCalculator, Measurer, StyleCache};

use crate::affix::{TextAreaView, ViewInputs};
use crate::config::TextAreaConfig;
use crate::count::{CountConfig, CountDisplay, ResolvedCount, ShowCount, ShowFormatter};
use crate::resize::{AutoSize, FrameReport, ResizableTextArea};
use crate::value::ValueSource;

/// Default class prefix.
pub const DEFAULT_PREFIX_CLS: &str = "rc-textarea";

pub type ChangeCallback = Box<dyn FnMut(&ChangeEvent)>;
pub type CompositionCallback = Box<dyn FnMut(&CompositionEvent)>;
pub type FocusCallback = Box<dyn FnMut()>;
pub type KeyCallback = Box<dyn FnMut(&KeyEvent)>;
pub type ResizeCallback = Box<dyn FnMut(Size)>;

/// Text area properties.
pub struct TextAreaProps {
    /// Presence makes the widget controlled.
    pub value: Option<String>,
    pub default_value: Option<String>,
    pub auto_size: AutoSize,
    pub max_length: Option<usize>,
    pub count: CountConfig,
    pub show_count: ShowCount,
    pub allow_clear: bool,
    pub disabled: bool,
    pub read_only: bool,
    pub placeholder: Option<String>,
    pub class_name: Option<String>,
    pub prefix_cls: String,
    pub style: InlineStyle,
    pub on_change: Option<ChangeCallback>,
    pub on_composition_start: Option<CompositionCallback>,
    pub on_composition_end: Option<CompositionCallback>,
    pub on_focus: Option<FocusCallback>,
    pub on_blur: Option<FocusCallback>,
    pub on_key_down: Option<KeyCallback>,
    pub on_press_enter: Option<KeyCallback>,
    pub on_resize: Option<ResizeCallback>,
}

impl Default for TextAreaProps {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            auto_size: AutoSize::Disabled,
            max_length: None,
            count: CountConfig::default(),
            show_count: ShowCount::Hidden,
            allow_clear: false,
            disabled: false,
            read_only: false,
            placeholder: None,
            class_name: None,
            prefix_cls: DEFAULT_PREFIX_CLS.to_string(),
            style: InlineStyle::new(),
            on_change: None,
            on_composition_start: None,
            on_composition_end: None,
            on_focus: None,
            on_blur: None,
            on_key_down: None,
            on_press_enter: None,
            on_resize: None,
        }
    }
}

impl fmt::Debug for TextAreaProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextAreaProps")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("auto_size", &self.auto_size)
            .field("max_length", &self.max_length)
            .field("count", &self.count)
            .field("show_count", &self.show_count)
            .field("allow_clear", &self.allow_clear)
            .field("disabled", &self.disabled)
            .field("read_only", &self.read_only)
            .field("placeholder", &self.placeholder)
            .field("class_name", &self.class_name)
            .field("prefix_cls", &self.prefix_cls)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl TextAreaProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the widget controlled with `value` (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the initial uncontrolled value (builder).
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the autosize mode (builder).
    #[must_use]
    pub fn with_auto_size(mut self, auto_size: impl Into<AutoSize>) -> Self {
        self.auto_size = auto_size.into();
        self
    }

    /// Set the maximum length (builder).
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the count configuration (builder).
    #[must_use]
    pub fn with_count(mut self, count: CountConfig) -> Self {
        self.count = count;
        self
    }

    /// Set counter visibility (builder).
    #[must_use]
    pub fn with_show_count(mut self, show_count: ShowCount) -> Self {
        self.show_count = show_count;
        self
    }

    /// Show the counter using a custom formatter (builder).
    #[must_use]
    pub fn with_show_count_formatter(
        mut self,
        formatter: impl Fn(&str, usize, Option<usize>) -> String + 'static,
    ) -> Self {
        let formatter: ShowFormatter = std::rc::Rc::new(formatter);
        self.show_count = ShowCount::Formatter(formatter);
        self
    }

    /// Show the clear affordance (builder).
    #[must_use]
    pub fn with_allow_clear(mut self, allow_clear: bool) -> Self {
        self.allow_clear = allow_clear;
        self
    }

    /// Disable the widget (builder).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Make the widget read-only (builder).
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the placeholder (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Add a user class (builder).
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set the class prefix (builder).
    #[must_use]
    pub fn with_prefix_cls(mut self, prefix_cls: impl Into<String>) -> Self {
        self.prefix_cls = prefix_cls.into();
        self
    }

    /// Set the user inline style (builder).
    #[must_use]
    pub fn with_style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the change callback (builder).
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Set the composition start callback (builder).
    #[must_use]
    pub fn on_composition_start(mut self, f: impl FnMut(&CompositionEvent) + 'static) -> Self {
        self.on_composition_start = Some(Box::new(f));
        self
    }

    /// Set the composition end callback (builder).
    #[must_use]
    pub fn on_composition_end(mut self, f: impl FnMut(&CompositionEvent) + 'static) -> Self {
        self.on_composition_end = Some(Box::new(f));
        self
    }

    /// Set the focus callback (builder).
    #[must_use]
    pub fn on_focus(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    /// Set the blur callback (builder).
    #[must_use]
    pub fn on_blur(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    /// Set the key-down callback (builder).
    #[must_use]
    pub fn on_key_down(mut self, f: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.on_key_down = Some(Box::new(f));
        self
    }

    /// Set the Enter callback, fired before `on_key_down` (builder).
    #[must_use]
    pub fn on_press_enter(mut self, f: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.on_press_enter = Some(Box::new(f));
        self
    }

    /// Set the resize callback (builder).
    #[must_use]
    pub fn on_resize(mut self, f: impl FnMut(Size) + 'static) -> Self {
        self.on_resize = Some(Box::new(f));
        self
    }
}

#[derive(Default)]
struct Callbacks {
    on_change: Option<ChangeCallback>,
    on_composition_start: Option<CompositionCallback>,
    on_composition_end: Option<CompositionCallback>,
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
    on_key_down: Option<KeyCallback>,
    on_press_enter: Option<KeyCallback>,
    on_resize: Option<ResizeCallback>,
}

/// Autosizing text area over a host element.
pub struct TextArea<E, M = HeightCalculator<HeadlessSurface>> {
    element: E,
    value: ValueSource,
    count: ResolvedCount,
    composing: bool,
    resizable: ResizableTextArea<M>,
    config: TextAreaConfig,
    allow_clear: bool,
    disabled: bool,
    read_only: bool,
    class_name: Option<String>,
    prefix_cls: String,
    callbacks: Callbacks,
}

impl<E: TextElement> TextArea<E> {
    /// Build a text area measured by the headless calculator with the
    /// default configuration.
    pub fn new(element: E, props: TextAreaProps) -> Self {
        Self::with_config(element, props, TextAreaConfig::default())
    }

    /// Build a text area measured by the headless calculator.
    pub fn with_config(element: E, props: TextAreaProps, config: TextAreaConfig) -> Self {
        let measurer = HeightCalculator::with_cache(
            HeadlessSurface::new(),
            StyleCache::new(config.style_cache_capacity),
        );
        Self::with_measurer(element, props, config, measurer)
    }
}

impl<E: TextElement, M: Measurer> TextArea<E, M> {
    /// Build a text area with a custom measurer.
    pub fn with_measurer(
        mut element: E,
        props: TextAreaProps,
        config: TextAreaConfig,
        measurer: M,
    ) -> Self {
        let TextAreaProps {
            value,
            default_value,
            auto_size,
            max_length,
            count,
            show_count,
            allow_clear,
            disabled,
            read_only,
            placeholder,
            class_name,
            prefix_cls,
            style,
            on_change,
            on_composition_start,
            on_composition_end,
            on_focus,
            on_blur,
            on_key_down,
            on_press_enter,
            on_resize,
        } = props;

        let count = ResolvedCount::resolve(&count, &show_count, max_length);
        let mut value = ValueSource::resolve(value, default_value);
        if !value.is_controlled() && count.is_exceeded(value.current()) {
            let sliced = count.enforce(value.current());
            value = ValueSource::Uncontrolled {
                initial: sliced.clone(),
                current: sliced,
            };
        }

        element.set_value(value.current());
        element.set_max_length(max_length);
        if placeholder.is_some() {
            element.set_placeholder(placeholder.as_deref());
        }

        let mut resizable = ResizableTextArea::new(measurer, auto_size);
        resizable.set_user_style(&mut element, style);
        resizable.trigger();

        Self {
            element,
            value,
            count,
            composing: false,
            resizable,
            config,
            allow_clear,
            disabled,
            read_only,
            class_name,
            prefix_cls,
            callbacks: Callbacks {
                on_change,
                on_composition_start,
                on_composition_end,
                on_focus,
                on_blur,
                on_key_down,
                on_press_enter,
                on_resize,
            },
        }
    }

    // --- Event handling ---

    /// Dispatch a host event. Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.resizable.is_unmounted() {
            return false;
        }
        match event {
            Event::Input(raw) => {
                self.handle_input(raw);
                true
            }
            Event::CompositionStart(composition) => {
                self.handle_composition_start(composition);
                true
            }
            Event::CompositionEnd(composition) => {
                self.handle_composition_end(composition);
                true
            }
            Event::Key(key) => {
                self.handle_key_down(key);
                true
            }
            Event::Focus(true) => {
                self.handle_focus();
                true
            }
            Event::Focus(false) => {
                self.handle_blur();
                true
            }
            Event::Resize(size) => self.handle_resize(*size),
            Event::Clear => self.handle_reset(),
        }
    }

    /// The element text changed through user input.
    pub fn handle_input(&mut self, raw: &str) {
        self.trigger_change(raw, ChangeSource::Input);
    }

    /// Run the value change protocol on `raw`.
    pub fn trigger_change(&mut self, raw: &str, source: ChangeSource) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "textarea_change",
            source = ?source,
            composing = self.composing,
            len = raw.len()
        )
        .entered();

        let mut committed = raw.to_string();
        if !self.composing && self.count.is_exceeded(raw) {
            let formatted = self.count.enforce(raw);
            if formatted != raw {
                let selection = self.capture_selection();
                self.element.set_value(&formatted);
                if let Some(range) = selection {
                    self.restore_selection(range);
                }
                committed = formatted;
            }
        }

        if self.value.commit(&committed) {
            self.resizable.trigger();
        }
        self.emit_change(ChangeEvent::new(committed, source));
    }

    /// An IME composition started.
    pub fn handle_composition_start(&mut self, event: &CompositionEvent) {
        self.composing = true;
        if let Some(cb) = &mut self.callbacks.on_composition_start {
            cb(event);
        }
    }

    /// An IME composition ended; the element holds the composed text.
    pub fn handle_composition_end(&mut self, event: &CompositionEvent) {
        self.composing = false;
        let composed = self.element.value().to_string();
        self.trigger_change(&composed, ChangeSource::CompositionEnd);
        if let Some(cb) = &mut self.callbacks.on_composition_end {
            cb(event);
        }
    }

    /// A key went down. Enter fires `on_press_enter` before `on_key_down`.
    pub fn handle_key_down(&mut self, key: &KeyEvent) {
        if key.is_enter()
            && let Some(cb) = &mut self.callbacks.on_press_enter
        {
            cb(key);
        }
        if let Some(cb) = &mut self.callbacks.on_key_down {
            cb(key);
        }
    }

    /// The element gained focus.
    pub fn handle_focus(&mut self) {
        if let Some(cb) = &mut self.callbacks.on_focus {
            cb();
        }
    }

    /// The element lost focus.
    pub fn handle_blur(&mut self) {
        if let Some(cb) = &mut self.callbacks.on_blur {
            cb();
        }
    }

    /// The clear affordance was activated.
    ///
    /// Ignored when disabled or read-only. Returns whether it was handled.
    pub fn handle_reset(&mut self) -> bool {
        if self.disabled || self.read_only {
            tarea_core::debug!("clear ignored on disabled or read-only text area");
            return false;
        }
        if self.value.commit("") {
            self.element.set_value("");
            self.resizable.trigger();
        }
        self.element.focus();
        self.emit_change(ChangeEvent::new("", ChangeSource::Clear));
        true
    }

    /// A geometry observer reported a new element size.
    ///
    /// Returns whether `on_resize` was notified.
    pub fn handle_resize(&mut self, size: Size) -> bool {
        let Some(size) = self.resizable.handle_geometry(size) else {
            return false;
        };
        if let Some(cb) = &mut self.callbacks.on_resize {
            cb(size);
        }
        true
    }

    /// Advance the resize lifecycle by one animation frame.
    pub fn on_frame(&mut self) -> FrameReport {
        self.resizable.on_frame(&mut self.element, &self.config)
    }

    // --- Prop updates ---

    /// Push a new controlled value.
    ///
    /// Passing `None` to a controlled widget, or `Some` to an uncontrolled
    /// one, is refused and logged. Returns whether the value changed.
    pub fn set_value(&mut self, value: Option<&str>) -> bool {
        match self.value.sync(value) {
            Ok(true) => {
                self.element.set_value(self.value.current());
                self.resizable.trigger();
                true
            }
            Ok(false) => false,
            Err(_switch) => {
                tarea_core::warn!(reason = %_switch, "value mode switch refused");
                false
            }
        }
    }

    /// Change the autosize mode.
    pub fn set_auto_size(&mut self, auto_size: impl Into<AutoSize>) -> bool {
        self.resizable.set_auto_size(&mut self.element, auto_size.into())
    }

    /// Replace the user inline style.
    pub fn set_style(&mut self, style: InlineStyle) {
        self.resizable.set_user_style(&mut self.element, style);
    }

    /// Detach from the host: cancels all pending frame work. Later events are
    /// ignored.
    pub fn unmount(&mut self) {
        self.resizable.unmount();
    }

    // --- Imperative handle ---

    /// Focus the element.
    pub fn focus(&mut self) {
        self.element.focus();
    }

    /// Blur the element.
    pub fn blur(&mut self) {
        self.element.blur();
    }

    /// The host element.
    pub fn native_element(&self) -> &E {
        &self.element
    }

    /// Mutable access to the host element, for hosts that simulate input.
    pub fn native_element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// The resize coordinator, for introspection.
    pub fn resizable_text_area(&self) -> &ResizableTextArea<M> {
        &self.resizable
    }

    // --- Queries ---

    /// The current value.
    pub fn value(&self) -> &str {
        self.value.current()
    }

    pub fn is_controlled(&self) -> bool {
        self.value.is_controlled()
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn config(&self) -> &TextAreaConfig {
        &self.config
    }

    /// Counter text and range flag for the current value.
    pub fn count_display(&self) -> CountDisplay {
        self.count.display(self.value.current())
    }

    /// The inline style the element should carry.
    pub fn style(&self) -> InlineStyle {
        self.resizable.style()
    }

    /// Render-facing view model.
    pub fn view(&self) -> TextAreaView {
        TextAreaView::build(
            ViewInputs {
                prefix_cls: &self.prefix_cls,
                class_name: self.class_name.as_deref(),
                value: self.value.current(),
                allow_clear: self.allow_clear,
                disabled: self.disabled,
                read_only: self.read_only,
                focused: self.element.is_focused(),
            },
            self.count_display(),
        )
    }

    // --- Internals ---

    fn emit_change(&mut self, event: ChangeEvent) {
        if let Some(cb) = &mut self.callbacks.on_change {
            cb(&event);
        }
    }

    fn capture_selection(&self) -> Option<SelectionRange> {
        match self.element.selection() {
            Ok(range) => Some(range),
            Err(_err) => {
                tarea_core::debug!(error = %_err, "selection capture failed");
                None
            }
        }
    }

    fn restore_selection(&mut self, range: SelectionRange) {
        if let Err(_err) = self.element.set_selection_range(range) {
            tarea_core::debug!(error = %_err, "selection restore failed");
        }
    }
}

impl<E: fmt::Debug, M: fmt::Debug> fmt::Debug for TextArea<E, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextArea")
            .field("element", &self.element)
            .field("value", &self.value)
            .field("count", &self.count)
            .field("composing", &self.composing)
            .field("resizable", &self.resizable)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
