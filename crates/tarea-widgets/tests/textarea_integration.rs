#![forbid(unsafe_code)]

//! End-to-end behaviour of the text area over the headless host.
//!
//! Element style used throughout: border-box, 100px wide, 10px font (5px per
//! ASCII cell), 20px lines, 2px padding and 1px border on every side. One
//! line of text therefore measures 26px and a single row is 20px.

use std::cell::RefCell;
use std::rc::Rc;

use tarea_core::element::{SelectionRange, TextElement};
use tarea_core::event::{ChangeEvent, ChangeSource, CompositionEvent, Event};
use tarea_core::geometry::{Edges, Size};
use tarea_core::headless::HeadlessElement;
use tarea_core::style::{BoxSizing, ComputedStyle, LineHeight, Overflow, Resize};
use tarea_widgets::{
    AutoSize, CountConfig, ResizePhase, ShowCount, TextArea, TextAreaConfig, TextAreaProps,
};

const FAMILY: &str = "👨\u{200d}👩\u{200d}👧\u{200d}👦";

type Log<T> = Rc<RefCell<Vec<T>>>;

fn log<T>() -> Log<T> {
    Rc::new(RefCell::new(Vec::new()))
}

fn element() -> HeadlessElement {
    HeadlessElement::new().with_style(ComputedStyle {
        box_sizing: BoxSizing::BorderBox,
        width: 100.0,
        font_size: 10.0,
        line_height: LineHeight::Px(20.0),
        padding: Edges::all(2.0),
        border: Edges::all(1.0),
        ..ComputedStyle::default()
    })
}

fn recording(props: TextAreaProps) -> (TextAreaProps, Log<ChangeEvent>) {
    let changes = log();
    let sink = changes.clone();
    let props = props.on_change(move |event| sink.borrow_mut().push(event.clone()));
    (props, changes)
}

/// Simulate the user typing `text` with the caret at `caret`.
fn type_text<M: tarea_measure::Measurer>(
    ta: &mut TextArea<HeadlessElement, M>,
    text: &str,
    caret: usize,
) {
    ta.native_element_mut()
        .type_text(text, SelectionRange::caret(caret));
    ta.handle_event(&Event::Input(text.to_string()));
}

fn settle<M: tarea_measure::Measurer>(ta: &mut TextArea<HeadlessElement, M>) {
    for _ in 0..8 {
        if !ta.resizable_text_area().has_pending_frame() {
            break;
        }
        ta.on_frame();
    }
    assert_eq!(ta.resizable_text_area().phase(), ResizePhase::Stable);
}

// ============================================================================
// Autosize
// ============================================================================

#[test]
fn autosize_measures_on_mount() {
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_default_value("a\nb")
            .with_auto_size(true),
    );
    assert_eq!(ta.resizable_text_area().phase(), ResizePhase::Start);
    settle(&mut ta);
    // 2 lines * 20 + 4 padding + 2 border
    assert_eq!(ta.native_element().inline_style().height, Some(46.0));
    assert_eq!(ta.native_element().inline_style().resize, None);
}

#[test]
fn cached_measurement_is_idempotent() {
    let config = TextAreaConfig::default().with_style_cache(true);
    let mut ta = TextArea::with_config(
        element(),
        TextAreaProps::new().with_auto_size(true),
        config,
    );
    settle(&mut ta);
    let first = ta.style();

    type_text(&mut ta, "x", 1);
    settle(&mut ta);
    type_text(&mut ta, "", 0);
    settle(&mut ta);

    assert_eq!(ta.style(), first);
    assert_eq!(ta.resizable_text_area().measure_count(), 3);
    assert_eq!(ta.native_element().style_reads(), 1);
}

#[test]
fn uncached_measurement_reads_style_each_pass() {
    let mut ta = TextArea::new(element(), TextAreaProps::new().with_auto_size(true));
    settle(&mut ta);
    type_text(&mut ta, "x", 1);
    settle(&mut ta);
    assert_eq!(ta.native_element().style_reads(), 2);
}

#[test]
fn rows_clamp_height() {
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_default_value("a")
            .with_auto_size(AutoSize::rows(Some(2), Some(4))),
    );
    settle(&mut ta);
    let style = *ta.native_element().inline_style();
    assert_eq!(style.min_height, Some(46.0));
    assert_eq!(style.max_height, Some(86.0));
    assert_eq!(style.height, Some(46.0));
    assert_eq!(style.overflow_y, Some(Overflow::Hidden));
    assert_eq!(style.resize, Some(Resize::None));

    let tall = (1..=10).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
    type_text(&mut ta, &tall, 0);
    settle(&mut ta);
    let style = *ta.native_element().inline_style();
    assert_eq!(style.height, Some(86.0));
    assert_eq!(style.overflow_y, None);
}

#[test]
fn overflow_locked_while_measuring() {
    let mut ta = TextArea::new(element(), TextAreaProps::new().with_auto_size(true));
    ta.on_frame();
    assert_eq!(ta.resizable_text_area().phase(), ResizePhase::Measuring);
    assert_eq!(ta.native_element().inline_style().overflow_x, Some(Overflow::Hidden));
    assert_eq!(ta.native_element().inline_style().overflow_y, Some(Overflow::Hidden));
    ta.on_frame();
    assert_eq!(ta.native_element().inline_style().overflow_x, None);
}

#[test]
fn placeholder_drives_height_when_empty() {
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_placeholder("one\ntwo\nthree")
            .with_auto_size(true),
    );
    settle(&mut ta);
    assert_eq!(ta.native_element().inline_style().height, Some(66.0));
}

#[test]
fn resize_triggers_coalesce_into_one_pass() {
    let resizes: Log<Size> = log();
    let sink = resizes.clone();
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_auto_size(true)
            .on_resize(move |size| sink.borrow_mut().push(size)),
    );
    settle(&mut ta);
    let measured_before = ta.resizable_text_area().measure_count();
    let prepares_before = ta.resizable_text_area().measurer().surface().prepare_count();

    type_text(&mut ta, "a\nb", 3);
    type_text(&mut ta, "a\nb\nc", 5);
    type_text(&mut ta, "a\nb\nc\nd", 7);
    settle(&mut ta);

    assert_eq!(ta.resizable_text_area().measure_count(), measured_before + 1);
    assert_eq!(
        ta.resizable_text_area().measurer().surface().prepare_count(),
        prepares_before + 1
    );
    assert_eq!(ta.native_element().inline_style().height, Some(86.0));

    // The observer reports the new size, then repeats itself.
    let observed = ta.native_element().observed_size();
    assert!(ta.handle_event(&Event::Resize(observed)));
    assert!(!ta.handle_event(&Event::Resize(observed)));
    settle(&mut ta);
    assert_eq!(ta.native_element().observed_size(), observed);

    assert_eq!(resizes.borrow().as_slice(), &[Size::new(100.0, 86.0)]);
}

#[test]
fn drag_back_to_earlier_size_after_snap_is_forwarded() {
    let resizes: Log<Size> = log();
    let sink = resizes.clone();
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_auto_size(true)
            .on_resize(move |size| sink.borrow_mut().push(size)),
    );
    settle(&mut ta);
    let measured_before = ta.resizable_text_area().measure_count();

    let dragged = Size::new(100.0, 200.0);
    assert!(ta.handle_event(&Event::Resize(dragged)));

    // Restart frame, then the measure pass snaps the height back.
    ta.on_frame();
    ta.on_frame();
    assert_eq!(ta.resizable_text_area().phase(), ResizePhase::Measuring);
    let snapped = ta.native_element().observed_size();
    assert_eq!(snapped, Size::new(100.0, 26.0));
    assert!(!ta.handle_event(&Event::Resize(snapped)));
    settle(&mut ta);

    assert!(ta.handle_event(&Event::Resize(dragged)));
    assert!(ta.resizable_text_area().has_pending_frame());
    settle(&mut ta);
    assert_eq!(ta.resizable_text_area().measure_count(), measured_before + 2);
    assert_eq!(ta.native_element().inline_style().height, Some(26.0));
    assert_eq!(resizes.borrow().as_slice(), &[dragged, dragged]);
}

#[test]
fn geometry_ignored_mid_cycle() {
    let resizes: Log<Size> = log();
    let sink = resizes.clone();
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_auto_size(true)
            .on_resize(move |size| sink.borrow_mut().push(size)),
    );
    assert!(!ta.handle_event(&Event::Resize(Size::new(100.0, 10.0))));
    ta.on_frame();
    assert!(!ta.handle_event(&Event::Resize(Size::new(100.0, 20.0))));
    assert!(resizes.borrow().is_empty());
}

#[test]
fn resize_without_autosize_still_notifies() {
    let resizes: Log<Size> = log();
    let sink = resizes.clone();
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new().on_resize(move |size| sink.borrow_mut().push(size)),
    );
    assert!(ta.handle_event(&Event::Resize(Size::new(100.0, 30.0))));
    assert!(!ta.resizable_text_area().has_pending_frame());
    assert_eq!(resizes.borrow().len(), 1);
}

#[test]
fn unmount_mid_cycle_leaves_element_alone() {
    let mut ta = TextArea::new(element(), TextAreaProps::new().with_auto_size(true));
    ta.on_frame();
    let locked = *ta.native_element().inline_style();
    ta.unmount();
    ta.on_frame();
    ta.on_frame();
    assert_eq!(*ta.native_element().inline_style(), locked);
    assert!(!ta.handle_event(&Event::Resize(Size::new(1.0, 1.0))));
}

#[test]
fn disabling_autosize_clears_measured_style() {
    let mut ta = TextArea::new(element(), TextAreaProps::new().with_auto_size(true));
    settle(&mut ta);
    assert!(ta.native_element().inline_style().height.is_some());
    assert!(ta.set_auto_size(false));
    assert_eq!(ta.native_element().inline_style().height, None);
}

// ============================================================================
// Counting and truncation
// ============================================================================

#[test]
fn default_count_is_grapheme_aware() {
    let ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_default_value(FAMILY)
            .with_show_count(ShowCount::Visible),
    );
    assert_eq!(ta.view().count.as_deref(), Some("1"));
}

#[test]
fn custom_strategy_is_honoured() {
    let ta = TextArea::new(
        element(),
        TextAreaProps::new().with_default_value(FAMILY).with_count(
            CountConfig::new()
                .with_show(true)
                .with_strategy(|text: &str| text.encode_utf16().count()),
        ),
    );
    assert_eq!(ta.view().count.as_deref(), Some("11"));
}

#[test]
fn controlled_overflow_is_display_only() {
    let (props, changes) = recording(
        TextAreaProps::new()
            .with_value("12345678")
            .with_max_length(5)
            .with_show_count(ShowCount::Visible),
    );
    let ta = TextArea::new(element(), props);
    let view = ta.view();
    assert_eq!(view.count.as_deref(), Some("8 / 5"));
    assert!(view.out_of_range);
    assert!(view.class_name.contains("rc-textarea-out-of-range"));
    assert_eq!(ta.value(), "12345678");
    assert_eq!(ta.native_element().value(), "12345678");
    assert!(changes.borrow().is_empty());
}

#[test]
fn input_over_max_is_truncated() {
    let (props, changes) = recording(TextAreaProps::new().with_max_length(5));
    let mut ta = TextArea::new(element(), props);

    type_text(&mut ta, "12345", 5);
    assert_eq!(ta.value(), "12345");

    type_text(&mut ta, "12345678", 8);
    assert_eq!(ta.value(), "12345");
    assert_eq!(ta.native_element().value(), "12345");

    let values: Vec<_> = changes.borrow().iter().map(|e| e.value.clone()).collect();
    assert_eq!(values, vec!["12345".to_string(), "12345".to_string()]);
}

#[test]
fn controlled_input_over_max_is_truncated_and_reported() {
    let (props, changes) = recording(TextAreaProps::new().with_value("").with_max_length(5));
    let mut ta = TextArea::new(element(), props);

    type_text(&mut ta, "12345678", 3);
    assert_eq!(ta.native_element().value(), "12345");
    assert_eq!(
        ta.native_element().selection_log(),
        &[SelectionRange::caret(3)]
    );
    assert_eq!(ta.value(), "");

    let values: Vec<_> = changes.borrow().iter().map(|e| e.value.clone()).collect();
    assert_eq!(values, vec!["12345".to_string()]);
}

#[test]
fn emoji_truncation_keeps_clusters_whole() {
    let mut ta = TextArea::new(element(), TextAreaProps::new().with_max_length(2));
    let three = FAMILY.repeat(3);
    type_text(&mut ta, &three, 3);
    assert_eq!(ta.value(), FAMILY.repeat(2));
}

#[test]
fn out_of_range_class_without_counter() {
    let ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_value("abcdef")
            .with_count(CountConfig::new().with_max(3)),
    );
    let view = ta.view();
    assert_eq!(view.count, None);
    assert!(view.out_of_range);
    assert!(view.class_name.contains("rc-textarea-out-of-range"));
}

#[test]
fn show_count_formatter_receives_value_count_and_max() {
    let ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_default_value("abc")
            .with_max_length(10)
            .with_show_count_formatter(|value: &str, count: usize, max: Option<usize>| {
                format!("{value}:{count}:{max:?}")
            }),
    );
    assert_eq!(ta.view().count.as_deref(), Some("abc:3:Some(10)"));
}

#[test]
fn uncontrolled_default_value_is_sliced() {
    let ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_default_value("12345678")
            .with_max_length(5),
    );
    assert_eq!(ta.value(), "12345");
    assert_eq!(ta.native_element().value(), "12345");
    assert_eq!(ta.native_element().max_length(), Some(5));
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn composition_defers_truncation_until_end() {
    let (props, changes) = recording(TextAreaProps::new().with_max_length(6));
    let phases: Log<&'static str> = log();
    let (start, end) = (phases.clone(), phases.clone());
    let props = props
        .on_composition_start(move |_| start.borrow_mut().push("start"))
        .on_composition_end(move |_| end.borrow_mut().push("end"));
    let mut ta = TextArea::new(element(), props);

    ta.handle_event(&Event::CompositionStart(CompositionEvent::default()));
    assert!(ta.is_composing());
    type_text(&mut ta, "1234567", 7);
    assert_eq!(ta.value(), "1234567");
    assert_eq!(ta.native_element().value(), "1234567");

    ta.handle_event(&Event::CompositionEnd(CompositionEvent::new("7")));
    assert!(!ta.is_composing());
    assert_eq!(ta.value(), "123456");
    assert_eq!(ta.native_element().value(), "123456");

    assert_eq!(
        changes.borrow().as_slice(),
        &[
            ChangeEvent::new("1234567", ChangeSource::Input),
            ChangeEvent::new("123456", ChangeSource::CompositionEnd),
        ]
    );
    assert_eq!(phases.borrow().as_slice(), &["start", "end"]);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn truncation_restores_captured_selection() {
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new().with_count(CountConfig::new().with_max(3)),
    );
    type_text(&mut ta, "1a23", 2);
    assert_eq!(ta.value(), "1a2");
    assert_eq!(
        ta.native_element().selection_log(),
        &[SelectionRange::caret(2)]
    );
    assert_eq!(ta.native_element().selection(), Ok(SelectionRange::caret(2)));
}

#[test]
fn custom_exceed_formatter_with_selection() {
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new().with_count(
            CountConfig::new()
                .with_max(3)
                .with_exceed_formatter(|value: &str, info| {
                    value.chars().filter(char::is_ascii_digit).take(info.max).collect()
                }),
        ),
    );
    type_text(&mut ta, "1a23", 2);
    assert_eq!(ta.value(), "123");
    assert_eq!(
        ta.native_element().selection_log(),
        &[SelectionRange::caret(2)]
    );
}

#[test]
fn selection_failure_does_not_block_truncation() {
    let mut ta = TextArea::new(
        element().without_selection_support(),
        TextAreaProps::new().with_max_length(2),
    );
    type_text(&mut ta, "abc", 3);
    assert_eq!(ta.value(), "ab");
    assert!(ta.native_element().selection_log().is_empty());
}

#[test]
fn no_selection_write_when_value_fits() {
    let mut ta = TextArea::new(element(), TextAreaProps::new().with_max_length(5));
    type_text(&mut ta, "abc", 1);
    assert!(ta.native_element().selection_log().is_empty());
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn reset_uncontrolled_clears_and_focuses() {
    let (props, changes) = recording(
        TextAreaProps::new()
            .with_default_value("111")
            .with_allow_clear(true),
    );
    let mut ta = TextArea::new(element(), props);
    assert!(!ta.view().clear_icon.as_ref().is_some_and(|icon| icon.hidden));

    assert!(ta.handle_event(&Event::Clear));
    assert_eq!(ta.value(), "");
    assert_eq!(ta.native_element().value(), "");
    assert!(ta.native_element().is_focused());
    assert_eq!(
        changes.borrow().as_slice(),
        &[ChangeEvent::new("", ChangeSource::Clear)]
    );
    assert!(ta.view().clear_icon.as_ref().is_some_and(|icon| icon.hidden));
}

#[test]
fn reset_controlled_notifies_but_keeps_value() {
    let (props, changes) = recording(
        TextAreaProps::new()
            .with_value("111")
            .with_allow_clear(true),
    );
    let mut ta = TextArea::new(element(), props);

    assert!(ta.handle_event(&Event::Clear));
    assert_eq!(ta.value(), "111");
    assert_eq!(ta.native_element().value(), "111");
    assert_eq!(ta.native_element().focus_calls(), 1);
    assert_eq!(
        changes.borrow().as_slice(),
        &[ChangeEvent::new("", ChangeSource::Clear)]
    );

    assert!(ta.set_value(Some("")));
    assert_eq!(ta.native_element().value(), "");
}

#[test]
fn reset_ignored_when_disabled() {
    let (props, changes) = recording(
        TextAreaProps::new()
            .with_default_value("111")
            .with_allow_clear(true)
            .with_disabled(true),
    );
    let mut ta = TextArea::new(element(), props);
    let view = ta.view();
    assert!(view.clear_icon.is_some_and(|icon| icon.hidden));
    assert!(view.class_name.contains("rc-textarea-disabled"));

    assert!(!ta.handle_event(&Event::Clear));
    assert_eq!(ta.value(), "111");
    assert!(changes.borrow().is_empty());
}

#[test]
fn reset_restarts_autosize() {
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_default_value("a\nb\nc")
            .with_allow_clear(true)
            .with_auto_size(true),
    );
    settle(&mut ta);
    assert_eq!(ta.native_element().inline_style().height, Some(66.0));
    ta.handle_event(&Event::Clear);
    settle(&mut ta);
    assert_eq!(ta.native_element().inline_style().height, Some(26.0));
}

// ============================================================================
// View
// ============================================================================

#[test]
fn view_classes_follow_props() {
    let mut ta = TextArea::new(
        element(),
        TextAreaProps::new()
            .with_prefix_cls("my")
            .with_class_name("extra")
            .with_allow_clear(true)
            .with_show_count(ShowCount::Visible),
    );
    ta.focus();
    let view = ta.view();
    assert_eq!(view.class_name.to_class_string(), "my extra");
    assert_eq!(
        view.wrapper_class_name.to_class_string(),
        "my-affix-wrapper my-affix-wrapper-focused my-show-count my-textarea-allow-clear"
    );
    assert_eq!(view.count.as_deref(), Some("0"));
}
