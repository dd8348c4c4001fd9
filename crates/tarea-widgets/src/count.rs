#![forbid(unsafe_code)]

//! Character counting and length enforcement.
//!
//! Counting is pluggable: a [`CountStrategy`] maps text to a length. The
//! default counts extended grapheme clusters, so a family emoji built from
//! several code points joined by ZWJ counts as one.
//!
//! # Example
//! ```
//! use tarea_widgets::count::{CountConfig, ResolvedCount, ShowCount};
//!
//! let count = ResolvedCount::resolve(&CountConfig::default(), &ShowCount::Visible, Some(5));
//! assert_eq!(count.enforce("12345678"), "12345");
//! assert_eq!(count.display("123").text.as_deref(), Some("3 / 5"));
//! ```

use std::fmt;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;

/// Text length measure.
pub type CountStrategy = Rc<dyn Fn(&str) -> usize>;

/// Rewrites a value whose count exceeds the maximum.
pub type ExceedFormatter = Rc<dyn Fn(&str, ExceedInfo) -> String>;

/// Renders the counter from `(value, count, max)`.
pub type ShowFormatter = Rc<dyn Fn(&str, usize, Option<usize>) -> String>;

/// Context passed to an [`ExceedFormatter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceedInfo {
    pub max: usize,
}

/// Number of extended grapheme clusters in `text`.
#[must_use]
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// The first `max` extended grapheme clusters of `text`.
#[must_use]
pub fn slice_graphemes(text: &str, max: usize) -> &str {
    match text.grapheme_indices(true).nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Counter visibility, mirroring the `show_count` prop.
#[derive(Clone, Default)]
pub enum ShowCount {
    #[default]
    Hidden,
    Visible,
    Formatter(ShowFormatter),
}

impl ShowCount {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl fmt::Debug for ShowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => f.write_str("Hidden"),
            Self::Visible => f.write_str("Visible"),
            Self::Formatter(_) => f.write_str("Formatter(..)"),
        }
    }
}

/// The `count` prop.
///
/// A `max` without `show` still enforces the limit; only the counter text is
/// suppressed.
#[derive(Clone, Default)]
pub struct CountConfig {
    pub show: bool,
    pub max: Option<usize>,
    pub strategy: Option<CountStrategy>,
    pub exceed_formatter: Option<ExceedFormatter>,
    pub show_formatter: Option<ShowFormatter>,
}

impl CountConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the counter (builder).
    #[must_use]
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Set the maximum (builder).
    #[must_use]
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set a custom counting strategy (builder).
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Fn(&str) -> usize + 'static) -> Self {
        self.strategy = Some(Rc::new(strategy));
        self
    }

    /// Set a custom exceed formatter (builder).
    #[must_use]
    pub fn with_exceed_formatter(
        mut self,
        formatter: impl Fn(&str, ExceedInfo) -> String + 'static,
    ) -> Self {
        self.exceed_formatter = Some(Rc::new(formatter));
        self
    }

    /// Set a custom counter formatter (builder).
    #[must_use]
    pub fn with_show_formatter(
        mut self,
        formatter: impl Fn(&str, usize, Option<usize>) -> String + 'static,
    ) -> Self {
        self.show_formatter = Some(Rc::new(formatter));
        self.show = true;
        self
    }
}

impl fmt::Debug for CountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountConfig")
            .field("show", &self.show)
            .field("max", &self.max)
            .field("strategy", &self.strategy.as_ref().map(|_| ".."))
            .field("exceed_formatter", &self.exceed_formatter.as_ref().map(|_| ".."))
            .field("show_formatter", &self.show_formatter.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Counter state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountDisplay {
    /// Counter text, `None` when the counter is hidden.
    pub text: Option<String>,
    /// The value is longer than the maximum.
    pub out_of_range: bool,
}

/// `count`, `show_count` and `max_length` folded into one rule set.
#[derive(Clone)]
pub struct ResolvedCount {
    show: bool,
    max: Option<usize>,
    strategy: Option<CountStrategy>,
    exceed_formatter: Option<ExceedFormatter>,
    show_formatter: Option<ShowFormatter>,
}

impl ResolvedCount {
    /// Merge the props. `count.max` wins over `max_length`; a formatter in
    /// `count` wins over one in `show_count`.
    #[must_use]
    pub fn resolve(count: &CountConfig, show_count: &ShowCount, max_length: Option<usize>) -> Self {
        let show_formatter = count.show_formatter.clone().or(match show_count {
            ShowCount::Formatter(formatter) => Some(formatter.clone()),
            _ => None,
        });
        Self {
            show: count.show || show_count.is_visible(),
            max: count.max.or(max_length),
            strategy: count.strategy.clone(),
            exceed_formatter: count.exceed_formatter.clone(),
            show_formatter,
        }
    }

    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    #[must_use]
    pub fn show(&self) -> bool {
        self.show
    }

    /// Length of `value` under the configured strategy.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        match &self.strategy {
            Some(strategy) => strategy(value),
            None => grapheme_count(value),
        }
    }

    /// Whether `value` is longer than the maximum.
    #[must_use]
    pub fn is_exceeded(&self, value: &str) -> bool {
        self.max.is_some_and(|max| self.count(value) > max)
    }

    /// Apply the exceed formatter if `value` is too long; otherwise return
    /// it unchanged.
    #[must_use]
    pub fn enforce(&self, value: &str) -> String {
        let Some(max) = self.max.filter(|&max| self.count(value) > max) else {
            return value.to_string();
        };
        match &self.exceed_formatter {
            Some(formatter) => formatter(value, ExceedInfo { max }),
            None => slice_graphemes(value, max).to_string(),
        }
    }

    /// Counter text and range flag for `value`.
    #[must_use]
    pub fn display(&self, value: &str) -> CountDisplay {
        let count = self.count(value);
        let out_of_range = self.max.is_some_and(|max| count > max);
        let text = self.show.then(|| match (&self.show_formatter, self.max) {
            (Some(formatter), max) => formatter(value, count, max),
            (None, Some(max)) => format!("{count} / {max}"),
            (None, None) => count.to_string(),
        });
        CountDisplay { text, out_of_range }
    }
}

impl Default for ResolvedCount {
    fn default() -> Self {
        Self::resolve(&CountConfig::default(), &ShowCount::Hidden, None)
    }
}

impl fmt::Debug for ResolvedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCount")
            .field("show", &self.show)
            .field("max", &self.max)
            .field("custom_strategy", &self.strategy.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY: &str = "👨\u{200d}👩\u{200d}👧\u{200d}👦";

    fn utf16_len(text: &str) -> usize {
        text.encode_utf16().count()
    }

    #[test]
    fn grapheme_count_treats_zwj_sequence_as_one() {
        assert_eq!(grapheme_count(FAMILY), 1);
        assert_eq!(grapheme_count("e\u{301}"), 1);
        assert_eq!(grapheme_count(""), 0);
        assert_eq!(utf16_len(FAMILY), 11);
    }

    #[test]
    fn slice_graphemes_keeps_clusters_whole() {
        let text = format!("a{FAMILY}b");
        assert_eq!(slice_graphemes(&text, 2), format!("a{FAMILY}"));
        assert_eq!(slice_graphemes(&text, 0), "");
        assert_eq!(slice_graphemes(&text, 10), text);
    }

    #[test]
    fn custom_strategy_is_honoured() {
        let config = CountConfig::new().with_show(true).with_strategy(utf16_len);
        let count = ResolvedCount::resolve(&config, &ShowCount::Hidden, None);
        assert_eq!(count.count(FAMILY), 11);
        assert_eq!(count.display(FAMILY).text.as_deref(), Some("11"));
    }

    #[test]
    fn count_max_overrides_max_length() {
        let config = CountConfig::new().with_max(3);
        let count = ResolvedCount::resolve(&config, &ShowCount::Hidden, Some(10));
        assert_eq!(count.max(), Some(3));
        let count = ResolvedCount::resolve(&CountConfig::new(), &ShowCount::Hidden, Some(10));
        assert_eq!(count.max(), Some(10));
    }

    #[test]
    fn enforce_slices_by_default() {
        let count = ResolvedCount::resolve(&CountConfig::new(), &ShowCount::Hidden, Some(5));
        assert_eq!(count.enforce("12345678"), "12345");
        assert_eq!(count.enforce("12345"), "12345");
        let emoji = format!("{FAMILY}{FAMILY}{FAMILY}");
        let count = ResolvedCount::resolve(&CountConfig::new(), &ShowCount::Hidden, Some(2));
        assert_eq!(count.enforce(&emoji), format!("{FAMILY}{FAMILY}"));
    }

    #[test]
    fn enforce_uses_custom_exceed_formatter() {
        let config = CountConfig::new()
            .with_max(3)
            .with_exceed_formatter(|value, info| value.chars().rev().take(info.max).collect());
        let count = ResolvedCount::resolve(&config, &ShowCount::Hidden, None);
        assert_eq!(count.enforce("abcdef"), "fed");
        assert_eq!(count.enforce("abc"), "abc");
    }

    #[test]
    fn max_without_show_flags_range_but_hides_text() {
        let count = ResolvedCount::resolve(&CountConfig::new().with_max(2), &ShowCount::Hidden, None);
        let display = count.display("abc");
        assert_eq!(display.text, None);
        assert!(display.out_of_range);
    }

    #[test]
    fn default_counter_text() {
        let count = ResolvedCount::resolve(&CountConfig::new(), &ShowCount::Visible, Some(5));
        let display = count.display("12345678");
        assert_eq!(display.text.as_deref(), Some("8 / 5"));
        assert!(display.out_of_range);
        let count = ResolvedCount::resolve(&CountConfig::new(), &ShowCount::Visible, None);
        assert_eq!(count.display("abc").text.as_deref(), Some("3"));
    }

    #[test]
    fn show_formatter_receives_value_count_and_max() {
        let formatter: ShowFormatter =
            Rc::new(|value: &str, count: usize, max: Option<usize>| {
                format!("{value}-{count}-{}", max.unwrap_or(0))
            });
        let count =
            ResolvedCount::resolve(&CountConfig::new(), &ShowCount::Formatter(formatter), Some(5));
        assert_eq!(count.display("12").text.as_deref(), Some("12-2-5"));
    }

    #[test]
    fn count_formatter_wins_over_show_count_formatter() {
        let outer: ShowFormatter = Rc::new(|_: &str, _: usize, _: Option<usize>| "outer".to_string());
        let config = CountConfig::new().with_show_formatter(|_, _, _| "inner".to_string());
        let count = ResolvedCount::resolve(&config, &ShowCount::Formatter(outer), None);
        assert_eq!(count.display("x").text.as_deref(), Some("inner"));
    }
}
