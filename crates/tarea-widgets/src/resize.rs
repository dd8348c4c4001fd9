#![forbid(unsafe_code)]

//! Autosize resize lifecycle.
//!
//! [`ResizableTextArea`] is the only caller of the [`Measurer`] and the only
//! writer of autosize style. Measurement is deferred through a
//! [`FrameQueue`] so that bursts of triggers inside one tick cost a single
//! pass.
//!
//! # State Machine
//!
//! ```text
//!            trigger()               frame                 frame
//!   Stable ───────────▶ Start ───────────▶ Measuring ───────────▶ Stable
//!     ▲                  │ trigger(): coalesced │ trigger(): dirty     │
//!     │                  │                      │                      │
//!     └──────────────────┴──── detached ────────┘     dirty? restart ◀─┘
//! ```
//!
//! - The measurer runs on entering `Measuring`; both overflow axes are forced
//!   to `hidden` until the cycle settles.
//! - Geometry notifications are only honoured while `Stable`, and only when
//!   the size differs from the last one forwarded since the previous measure
//!   pass. An honoured notification schedules a restart one frame later,
//!   replacing any restart already pending.
//! - After [`ResizableTextArea::unmount`] nothing is scheduled and no task
//!   touches the element.

use tarea_core::element::{SelectionRange, TextElement};
use tarea_core::frame::{FrameQueue, FrameToken};
use tarea_core::geometry::Size;
use tarea_core::style::{InlineStyle, Overflow};
use tarea_measure::{MeasuredStyle, Measurer};

use crate::config::TextAreaConfig;

/// Autosize mode, mirroring the `auto_size` prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSize {
    #[default]
    Disabled,
    Enabled,
    Rows {
        min_rows: Option<u32>,
        max_rows: Option<u32>,
    },
}

impl AutoSize {
    /// Row bounds with both ends optional.
    #[must_use]
    pub const fn rows(min_rows: Option<u32>, max_rows: Option<u32>) -> Self {
        Self::Rows { min_rows, max_rows }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    #[must_use]
    pub const fn min_rows(self) -> Option<u32> {
        match self {
            Self::Rows { min_rows, .. } => min_rows,
            _ => None,
        }
    }

    #[must_use]
    pub const fn max_rows(self) -> Option<u32> {
        match self {
            Self::Rows { max_rows, .. } => max_rows,
            _ => None,
        }
    }
}

impl From<bool> for AutoSize {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

/// Phase of the resize lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePhase {
    #[default]
    Stable,
    Start,
    Measuring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResizeTask {
    /// `Start → Measuring`.
    Measure,
    /// `Measuring → Stable`.
    Settle,
    /// Start a new cycle after a geometry change.
    Restart,
}

/// What one [`ResizableTextArea::on_frame`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub measured: bool,
    pub settled: bool,
    pub cancelled: bool,
}

/// Resize coordinator owning the measurer.
#[derive(Debug)]
pub struct ResizableTextArea<M> {
    measurer: M,
    auto_size: AutoSize,
    phase: ResizePhase,
    frames: FrameQueue<ResizeTask>,
    restart: Option<FrameToken>,
    dirty: bool,
    measured: Option<MeasuredStyle>,
    user_style: InlineStyle,
    last_size: Option<Size>,
    measure_count: u64,
    unmounted: bool,
}

impl<M: Measurer> ResizableTextArea<M> {
    /// Create a coordinator in the `Stable` phase. Nothing is scheduled until
    /// the first [`trigger`](Self::trigger).
    pub fn new(measurer: M, auto_size: AutoSize) -> Self {
        Self {
            measurer,
            auto_size,
            phase: ResizePhase::Stable,
            frames: FrameQueue::new(),
            restart: None,
            dirty: false,
            measured: None,
            user_style: InlineStyle::new(),
            last_size: None,
            measure_count: 0,
            unmounted: false,
        }
    }

    // --- Introspection ---

    #[must_use]
    pub fn phase(&self) -> ResizePhase {
        self.phase
    }

    #[must_use]
    pub fn auto_size(&self) -> AutoSize {
        self.auto_size
    }

    /// Result of the last measurement, if autosize is active.
    #[must_use]
    pub fn measured_style(&self) -> Option<&MeasuredStyle> {
        self.measured.as_ref()
    }

    /// Number of measurement passes run.
    #[must_use]
    pub fn measure_count(&self) -> u64 {
        self.measure_count
    }

    /// Whether any task is waiting for a frame.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        !self.frames.is_empty()
    }

    /// The last size forwarded from a geometry notification since the last
    /// measure pass.
    #[must_use]
    pub fn last_size(&self) -> Option<Size> {
        self.last_size
    }

    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// The style the element should carry right now: user style, then the
    /// measured autosize style, then the overflow lock while measuring.
    #[must_use]
    pub fn style(&self) -> InlineStyle {
        let mut style = self.user_style;
        if let Some(measured) = &self.measured {
            style = style.merge(&measured.to_inline());
        }
        if self.phase == ResizePhase::Measuring {
            style = style.merge(&InlineStyle::new().with_overflow(Overflow::Hidden));
        }
        style
    }

    // --- Inputs ---

    /// Request a measurement cycle. Returns `true` if a new cycle was
    /// scheduled.
    pub fn trigger(&mut self) -> bool {
        if self.unmounted || !self.auto_size.is_enabled() {
            return false;
        }
        match self.phase {
            ResizePhase::Stable => {
                self.phase = ResizePhase::Start;
                self.frames.schedule(ResizeTask::Measure);
                true
            }
            ResizePhase::Start => {
                tarea_core::trace!("resize trigger coalesced into pending cycle");
                false
            }
            ResizePhase::Measuring => {
                tarea_core::trace!("resize trigger during measure; cycle marked dirty");
                self.dirty = true;
                false
            }
        }
    }

    /// Replace the autosize mode. Returns `true` if it changed.
    ///
    /// Enabling (or changing row bounds) starts a cycle; disabling drops the
    /// measured style and any pending work.
    pub fn set_auto_size<E>(&mut self, element: &mut E, auto_size: AutoSize) -> bool
    where
        E: TextElement,
    {
        if self.auto_size == auto_size {
            return false;
        }
        self.auto_size = auto_size;
        if auto_size.is_enabled() {
            self.trigger();
        } else {
            self.frames.clear();
            self.restart = None;
            self.dirty = false;
            self.phase = ResizePhase::Stable;
            self.measured = None;
            self.last_size = None;
            if !self.unmounted {
                element.apply_style(&self.style());
            }
        }
        true
    }

    /// Replace the user-supplied inline style and re-apply.
    pub fn set_user_style<E>(&mut self, element: &mut E, style: InlineStyle)
    where
        E: TextElement,
    {
        self.user_style = style;
        if !self.unmounted {
            element.apply_style(&self.style());
        }
    }

    /// Handle a geometry notification.
    ///
    /// Returns the size to forward to `on_resize`, or `None` if the
    /// notification was ignored.
    pub fn handle_geometry(&mut self, size: Size) -> Option<Size> {
        if self.unmounted {
            return None;
        }
        if self.phase != ResizePhase::Stable {
            tarea_core::trace!(phase = ?self.phase, "geometry notification ignored");
            return None;
        }
        if self.last_size == Some(size) {
            return None;
        }
        self.last_size = Some(size);
        if self.auto_size.is_enabled() {
            if let Some(previous) = self.restart.take() {
                self.frames.cancel(previous);
            }
            self.restart = Some(self.frames.schedule(ResizeTask::Restart));
        }
        Some(size)
    }

    /// Run the tasks due this frame.
    pub fn on_frame<E>(&mut self, element: &mut E, config: &TextAreaConfig) -> FrameReport
    where
        E: TextElement,
    {
        let mut report = FrameReport::default();
        if self.unmounted {
            return report;
        }
        for (token, task) in self.frames.take_frame() {
            match task {
                ResizeTask::Measure => {
                    if self.measure(element, config) {
                        report.measured = true;
                    } else {
                        report.cancelled = true;
                    }
                }
                ResizeTask::Settle => {
                    self.settle(element, config);
                    report.settled = true;
                }
                ResizeTask::Restart => {
                    if self.restart == Some(token) {
                        self.restart = None;
                    }
                    self.trigger();
                }
            }
        }
        report
    }

    /// Cancel every pending task. Later calls become no-ops.
    pub fn unmount(&mut self) {
        let cancelled = self.frames.clear();
        if cancelled > 0 {
            tarea_core::debug!(cancelled, "resize tasks cancelled on unmount");
        }
        self.restart = None;
        self.dirty = false;
        self.phase = ResizePhase::Stable;
        self.unmounted = true;
    }

    fn measure<E>(&mut self, element: &mut E, config: &TextAreaConfig) -> bool
    where
        E: TextElement,
    {
        if !element.is_connected() {
            tarea_core::debug!("element detached; resize cycle cancelled");
            self.phase = ResizePhase::Stable;
            self.dirty = false;
            return false;
        }
        let measured = self.measurer.measure(
            &*element,
            config.use_style_cache,
            self.auto_size.min_rows(),
            self.auto_size.max_rows(),
        );
        self.measure_count += 1;
        self.measured = Some(measured);
        self.phase = ResizePhase::Measuring;
        element.apply_style(&self.style());
        // Geometry may have changed; the next stable report is forwarded.
        self.last_size = None;
        self.frames.schedule(ResizeTask::Settle);
        true
    }

    fn settle<E>(&mut self, element: &mut E, config: &TextAreaConfig)
    where
        E: TextElement,
    {
        self.phase = ResizePhase::Stable;
        element.apply_style(&self.style());
        if config.restore_selection_after_measure && element.is_focused() {
            restore_selection(element);
        }
        if std::mem::take(&mut self.dirty) {
            self.trigger();
        }
    }
}

/// Re-apply the current selection so hosts that scroll on height changes
/// keep the caret in view.
fn restore_selection<E>(element: &mut E)
where
    E: TextElement + ?Sized,
{
    let restored = element
        .selection()
        .and_then(|range: SelectionRange| element.set_selection_range(range));
    if let Err(_err) = restored {
        tarea_core::debug!(error = %_err, "selection restore after measure skipped");
    }
}
