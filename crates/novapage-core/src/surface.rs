//! Capability interface between page behavior and the presentation layer
//!
//! Page components never touch a real document. They see elements through
//! [`Surface`], which exposes exactly four capabilities: bounding-box query,
//! state toggle, content set and placement.

use serde::{Deserialize, Serialize};

/// Opaque element handle assigned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Viewport-relative bounding box in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Bounds {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Full-width box spanning `height` pixels from `top`
    pub fn vertical(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
            left: 0.0,
            right: 0.0,
        }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Window metrics at the moment an event is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scroll_y: f64) -> Self {
        Self {
            width,
            height,
            scroll_y,
        }
    }

    pub fn scrolled_to(self, scroll_y: f64) -> Self {
        Self { scroll_y, ..self }
    }
}

/// Content written into an element
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Replace the element's text
    Text(String),
    /// Set the element's `src` and drop its deferred `data-src`
    Source(String),
}

/// State names toggled on elements
pub mod states {
    pub const REVEALED: &str = "aos-animate";
    pub const ACTIVE: &str = "active";
    pub const SCROLLED: &str = "scrolled";
    pub const LOADED: &str = "loaded";
    pub const SCROLL_LOCKED: &str = "scroll-locked";
    pub const HOVER: &str = "hover";
    pub const DISABLED: &str = "disabled";
    pub const SENT: &str = "sent";
}

/// Presentation-layer capabilities required by page components
pub trait Surface {
    /// Current viewport-relative bounds, or `None` if the element is not laid out
    fn bounds(&self, element: ElementId) -> Option<Bounds>;

    /// Add (`on = true`) or remove a named state
    fn set_state(&mut self, element: ElementId, state: &str, on: bool);

    /// Replace the element's content
    fn set_content(&mut self, element: ElementId, content: Content);

    /// Position a floating element at viewport coordinates
    fn place(&mut self, element: ElementId, x: f64, y: f64);
}
