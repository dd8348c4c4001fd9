#![forbid(unsafe_code)]

//! Extraction of the layout-relevant style of a text element.

use tarea_core::element::TextElement;
use tarea_core::style::{BoxSizing, SizingStyle};

use crate::cache::StyleCache;

/// Sizing information derived from one computed-style read.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyling {
    /// Snapshot copied onto the measurement surface.
    pub sizing: SizingStyle,
    /// `sizing` rendered as a declaration list.
    pub css_text: String,
    /// `padding-top + padding-bottom`.
    pub padding_size: f64,
    /// `border-top-width + border-bottom-width`.
    pub border_size: f64,
    pub box_sizing: BoxSizing,
}

impl NodeStyling {
    /// Derive the padding/border totals from a snapshot.
    #[must_use]
    pub fn from_sizing(sizing: SizingStyle) -> Self {
        Self {
            css_text: sizing.css_text(),
            padding_size: sizing.padding_size(),
            border_size: sizing.border_size(),
            box_sizing: sizing.box_sizing,
            sizing,
        }
    }
}

/// Read the sizing style of `element`.
///
/// With a cache, a connected element whose width has not changed reuses its
/// previous snapshot. A disconnected element is never cached and its stale
/// entry is dropped.
pub fn calculate_node_styling<E>(element: &E, cache: Option<&mut StyleCache>) -> NodeStyling
where
    E: TextElement + ?Sized,
{
    let compute = || NodeStyling::from_sizing(SizingStyle::from_computed(&element.computed_style()));
    match cache {
        Some(cache) if element.is_connected() => {
            cache.get_or_compute(element.id(), element.width(), compute)
        }
        Some(cache) => {
            if cache.invalidate_element(element.id()) {
                tarea_core::debug!(element = element.id().0, "dropped style cache for detached element");
            }
            compute()
        }
        None => compute(),
    }
}
