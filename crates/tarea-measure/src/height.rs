#![forbid(unsafe_code)]

//! Autosize height calculation.
//!
//! [`HeightCalculator`] copies an element's sizing style onto a hidden
//! surface it owns, loads the element's text, and reads the natural content
//! height. Row bounds clamp the result to whole multiples of one line.
//!
//! # Box sizing
//!
//! The surface reports a scroll height that includes vertical padding and
//! excludes border:
//!
//! | box-sizing  | height                           |
//! |-------------|----------------------------------|
//! | border-box  | `scroll_height + border_size`    |
//! | content-box | `scroll_height - padding_size`   |
//!
//! Row bounds are computed from a single-line probe
//! (`single_row = probe_height - padding_size`), and under border-box
//! padding and border are added back to both bounds.
//!
//! # Invariants
//!
//! - Output is finite and non-negative.
//! - With rows `a <= b`, `height` lies in `[min_height, max_height]`.
//! - A missing `max_rows` uses [`MAX_SAFE_INTEGER`] as the open bound and
//!   leaves `max_height` unset.

use tarea_core::element::{MeasureSurface, TextElement};
use tarea_core::geometry::{MAX_SAFE_INTEGER, finite_or_zero};
use tarea_core::headless::HeadlessSurface;
use tarea_core::style::{BoxSizing, InlineStyle, Overflow, Resize};

use crate::cache::{CacheStats, StyleCache};
use crate::styling::{NodeStyling, calculate_node_styling};

/// Text loaded into the surface to measure one row.
const SINGLE_ROW_PROBE: &str = " ";

/// Style directives produced by one measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasuredStyle {
    pub height: f64,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    /// `Some(Hidden)` when the content fits the row bounds; `None` leaves the
    /// platform default so a scrollbar can appear.
    pub overflow_y: Option<Overflow>,
    /// `Some(Resize::None)` whenever row bounds are active.
    pub resize: Option<Resize>,
}

impl MeasuredStyle {
    /// Convert to the inline style written onto the element.
    #[must_use]
    pub fn to_inline(&self) -> InlineStyle {
        InlineStyle {
            height: Some(self.height),
            min_height: self.min_height,
            max_height: self.max_height,
            overflow_x: None,
            overflow_y: self.overflow_y,
            resize: self.resize,
        }
    }
}

/// Capability to compute autosize style for an element.
pub trait Measurer {
    /// Measure `element`; see the module docs for the algorithm.
    fn measure(
        &mut self,
        element: &dyn TextElement,
        use_cache: bool,
        min_rows: Option<u32>,
        max_rows: Option<u32>,
    ) -> MeasuredStyle;
}

/// Default [`Measurer`], owning its measurement surface and style cache.
#[derive(Debug)]
pub struct HeightCalculator<S = HeadlessSurface> {
    surface: S,
    cache: StyleCache,
    passes: u64,
}

impl Default for HeightCalculator<HeadlessSurface> {
    fn default() -> Self {
        Self::new(HeadlessSurface::new())
    }
}

impl<S: MeasureSurface> HeightCalculator<S> {
    /// Create a calculator over `surface` with the default cache capacity.
    pub fn new(surface: S) -> Self {
        Self::with_cache(surface, StyleCache::default())
    }

    /// Create a calculator with an explicit cache.
    pub fn with_cache(surface: S, cache: StyleCache) -> Self {
        Self {
            surface,
            cache,
            passes: 0,
        }
    }

    /// The measurement surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of completed measurement passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Style cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Mutable access to the style cache, e.g. to invalidate after a theme
    /// change.
    pub fn cache_mut(&mut self) -> &mut StyleCache {
        &mut self.cache
    }

    fn probe(&mut self, text: &str) -> f64 {
        self.surface.set_text(text);
        finite_or_zero(self.surface.scroll_height())
    }
}

impl<S: MeasureSurface> Measurer for HeightCalculator<S> {
    fn measure(
        &mut self,
        element: &dyn TextElement,
        use_cache: bool,
        min_rows: Option<u32>,
        max_rows: Option<u32>,
    ) -> MeasuredStyle {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "textarea_measure",
            element = element.id().0,
            use_cache,
            min_rows = min_rows.unwrap_or(0),
            max_rows = max_rows.unwrap_or(0)
        )
        .entered();

        let styling = calculate_node_styling(element, use_cache.then_some(&mut self.cache));
        self.surface.prepare(&styling.sizing, element.wrap());

        let text = match element.value() {
            "" => element.placeholder().unwrap_or(""),
            value => value,
        };
        let scroll_height = self.probe(text);
        let single_row = if min_rows.is_some() || max_rows.is_some() {
            Some(self.probe(SINGLE_ROW_PROBE) - styling.padding_size)
        } else {
            None
        };
        self.passes += 1;

        let style = resolve_height(&styling, scroll_height, single_row, min_rows, max_rows);
        tarea_core::trace!(height = style.height, "measured autosize height");
        style
    }
}

/// Pure part of the calculation, separated from surface I/O.
///
/// `single_row` must be `Some` whenever either row bound is.
#[must_use]
pub fn resolve_height(
    styling: &NodeStyling,
    scroll_height: f64,
    single_row: Option<f64>,
    min_rows: Option<u32>,
    max_rows: Option<u32>,
) -> MeasuredStyle {
    let padding_size = styling.padding_size;
    let border_size = styling.border_size;
    let mut height = match styling.box_sizing {
        BoxSizing::BorderBox => scroll_height + border_size,
        BoxSizing::ContentBox => scroll_height - padding_size,
    };

    let mut style = MeasuredStyle::default();
    if let Some(single_row) = single_row.filter(|_| min_rows.is_some() || max_rows.is_some()) {
        let single_row = finite_or_zero(single_row).max(0.0);
        let chrome = match styling.box_sizing {
            BoxSizing::BorderBox => padding_size + border_size,
            BoxSizing::ContentBox => 0.0,
        };

        if let Some(rows) = min_rows {
            let min_height = single_row * f64::from(rows) + chrome;
            height = height.max(min_height);
            style.min_height = Some(min_height);
        }

        let max_height = match max_rows {
            Some(rows) => {
                let max_height = single_row * f64::from(rows) + chrome;
                style.max_height = Some(max_height);
                max_height
            }
            None => MAX_SAFE_INTEGER,
        };
        style.overflow_y = if height > max_height {
            None
        } else {
            Some(Overflow::Hidden)
        };
        height = height.min(max_height);
        style.resize = Some(Resize::None);
    }

    style.height = finite_or_zero(height).max(0.0);
    style
}
