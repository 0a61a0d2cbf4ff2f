//! Visibility tests against the current viewport
//!
//! All functions are pure. Comparisons involving NaN are false, so malformed
//! bounds never count as visible.

use crate::surface::{Bounds, ElementId, Surface, Viewport};

/// Default pixel margin used by reveal and counter triggers
pub const DEFAULT_THRESHOLD: f64 = 100.0;

/// Visible iff the box has crossed `threshold` px into the viewport from
/// either edge: `top <= viewport_height - threshold && bottom >= threshold`
#[inline]
pub fn is_visible(bounds: &Bounds, viewport_height: f64, threshold: f64) -> bool {
    bounds.top <= viewport_height - threshold && bounds.bottom >= threshold
}

/// Top edge has risen at least `threshold` px above the viewport bottom.
/// Elements already scrolled past still count.
#[inline]
pub fn has_entered(bounds: &Bounds, viewport_height: f64, threshold: f64) -> bool {
    bounds.top <= viewport_height - threshold
}

/// Any overlap with the viewport at all
#[inline]
pub fn intersects(bounds: &Bounds, viewport_height: f64) -> bool {
    bounds.top < viewport_height && bounds.bottom > 0.0
}

/// Threshold-carrying wrapper that reads live bounds from a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTracker {
    threshold: f64,
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ViewportTracker {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Elements without layout are never visible
    pub fn is_visible<S: Surface + ?Sized>(
        &self,
        surface: &S,
        element: ElementId,
        viewport: &Viewport,
    ) -> bool {
        surface
            .bounds(element)
            .is_some_and(|b| is_visible(&b, viewport.height, self.threshold))
    }

    pub fn has_entered<S: Surface + ?Sized>(
        &self,
        surface: &S,
        element: ElementId,
        viewport: &Viewport,
    ) -> bool {
        surface
            .bounds(element)
            .is_some_and(|b| has_entered(&b, viewport.height, self.threshold))
    }
}
