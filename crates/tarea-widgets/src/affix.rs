#![forbid(unsafe_code)]

//! Render-facing view model.
//!
//! The widget does not draw anything itself. [`TextAreaView`] tells the host
//! which classes to put where, whether the clear affordance is visible and
//! what the counter says. Clicks on the clear affordance come back as
//! [`Event::Clear`](tarea_core::event::Event::Clear).

use crate::count::CountDisplay;

/// Space-separated class list builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `class` if non-empty.
    pub fn push(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() {
            self.0.push(class);
        }
    }

    /// Append `class` when `enabled`.
    pub fn push_if(&mut self, enabled: bool, class: impl Into<String>) {
        if enabled {
            self.push(class);
        }
    }

    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The `class` attribute value.
    #[must_use]
    pub fn to_class_string(&self) -> String {
        self.0.join(" ")
    }
}

/// The clear affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearIcon {
    pub class_name: ClassList,
    /// Rendered but invisible: empty value, disabled, or read-only.
    pub hidden: bool,
}

/// Everything a host needs to render the widget chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaView {
    /// Classes on the text element itself.
    pub class_name: ClassList,
    /// Classes on the wrapper holding the element, counter and clear icon.
    pub wrapper_class_name: ClassList,
    /// Present when `allow_clear` is set.
    pub clear_icon: Option<ClearIcon>,
    /// Counter text, when shown. Hosts may also expose it as `data-count`.
    pub count: Option<String>,
    pub out_of_range: bool,
    pub disabled: bool,
    pub read_only: bool,
}

/// Inputs for [`TextAreaView::build`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewInputs<'a> {
    pub prefix_cls: &'a str,
    pub class_name: Option<&'a str>,
    pub value: &'a str,
    pub allow_clear: bool,
    pub disabled: bool,
    pub read_only: bool,
    pub focused: bool,
}

impl TextAreaView {
    pub(crate) fn build(inputs: ViewInputs<'_>, count: CountDisplay) -> Self {
        let prefix = inputs.prefix_cls;

        let mut class_name = ClassList::new();
        class_name.push(prefix);
        class_name.push_if(inputs.disabled, format!("{prefix}-disabled"));
        if let Some(user) = inputs.class_name {
            class_name.push(user);
        }
        class_name.push_if(count.out_of_range, format!("{prefix}-out-of-range"));

        let mut wrapper_class_name = ClassList::new();
        wrapper_class_name.push(format!("{prefix}-affix-wrapper"));
        wrapper_class_name.push_if(inputs.focused, format!("{prefix}-affix-wrapper-focused"));
        wrapper_class_name.push_if(inputs.disabled, format!("{prefix}-affix-wrapper-disabled"));
        wrapper_class_name.push_if(count.text.is_some(), format!("{prefix}-show-count"));
        wrapper_class_name.push_if(inputs.allow_clear, format!("{prefix}-textarea-allow-clear"));

        let clear_icon = inputs.allow_clear.then(|| {
            let hidden = inputs.disabled || inputs.read_only || inputs.value.is_empty();
            let mut class_name = ClassList::new();
            class_name.push(format!("{prefix}-clear-icon"));
            class_name.push_if(hidden, format!("{prefix}-clear-icon-hidden"));
            ClearIcon { class_name, hidden }
        });

        Self {
            class_name,
            wrapper_class_name,
            clear_icon,
            count: count.text,
            out_of_range: count.out_of_range,
            disabled: inputs.disabled,
            read_only: inputs.read_only,
        }
    }
}
