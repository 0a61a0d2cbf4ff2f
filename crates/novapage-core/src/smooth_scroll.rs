//! Anchor links that scroll to their target below the fixed header

use crate::document::Document;
use crate::surface::{Surface, Viewport};

#[derive(Debug, Clone, Copy)]
pub struct SmoothScroll {
    header_offset: f64,
}

impl SmoothScroll {
    pub fn new(header_offset: f64) -> Self {
        Self { header_offset }
    }

    /// Document-absolute scroll destination for an in-page `href`.
    ///
    /// Returns `None` for bare `#`, non-fragment links, and fragments that
    /// name no laid-out element; the click is then left alone.
    pub fn destination<S: Surface + ?Sized>(
        &self,
        document: &Document,
        surface: &S,
        viewport: &Viewport,
        href: &str,
    ) -> Option<f64> {
        let fragment = href.strip_prefix('#').filter(|f| !f.is_empty())?;
        let target = document.by_dom_id(fragment)?;
        let bounds = surface.bounds(target.id)?;
        Some(bounds.top + viewport.scroll_y - self.header_offset)
    }
}
