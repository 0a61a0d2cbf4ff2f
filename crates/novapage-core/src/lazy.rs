//! Deferred image sources swapped in on first intersection

use tracing::debug;

use crate::document::Document;
use crate::surface::{Content, ElementId, Surface, Viewport};
use crate::viewport::intersects;

pub const SOURCE_ATTR: &str = "data-src";

#[derive(Debug, Clone, Default)]
pub struct LazyLoader {
    observed: Vec<(ElementId, String)>,
}

impl LazyLoader {
    /// Observe every `img` carrying a deferred source
    pub fn from_document(document: &Document) -> Self {
        Self {
            observed: document
                .with_attr(SOURCE_ATTR)
                .filter(|d| d.is_tag("img"))
                .filter_map(|d| d.attr(SOURCE_ATTR).map(|src| (d.id, src.to_string())))
                .collect(),
        }
    }

    /// Load every observed element that intersects the viewport and stop
    /// observing it. Returns the loaded elements.
    pub fn check<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: &Viewport) -> Vec<ElementId> {
        let mut loaded = Vec::new();
        self.observed.retain(|(element, src)| {
            let visible = surface
                .bounds(*element)
                .is_some_and(|b| intersects(&b, viewport.height));
            if visible {
                debug!(element = %element, src = %src, "Lazy source loaded");
                surface.set_content(*element, Content::Source(src.clone()));
                loaded.push(*element);
            }
            !visible
        });
        loaded
    }

    pub fn pending(&self) -> usize {
        self.observed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementDecl;
    use crate::surface::testing::FakeSurface;

    #[test]
    fn test_sources_load_once_on_intersection() {
        let doc = Document::new(vec![
            ElementDecl::new(ElementId(1), "img").with_attr(SOURCE_ATTR, "/img/team.webp"),
            ElementDecl::new(ElementId(2), "img").with_attr(SOURCE_ATTR, "/img/office.webp"),
            ElementDecl::new(ElementId(3), "img").with_attr("src", "/img/logo.svg"),
            ElementDecl::new(ElementId(4), "div").with_attr(SOURCE_ATTR, "/img/backdrop.webp"),
        ]);
        let mut lazy = LazyLoader::from_document(&doc);
        assert_eq!(lazy.pending(), 2);

        let mut surface = FakeSurface::new()
            .with_box(ElementId(1), 400.0, 200.0)
            .with_box(ElementId(2), 2000.0, 200.0)
            .with_box(ElementId(4), 0.0, 200.0);
        let viewport = Viewport::new(1280.0, 800.0, 0.0);

        // The visible div is not an image and stays untouched
        assert_eq!(lazy.check(&mut surface, &viewport), vec![ElementId(1)]);
        assert!(!surface.content.contains_key(&ElementId(4)));
        assert_eq!(
            surface.content.get(&ElementId(1)),
            Some(&Content::Source("/img/team.webp".to_string()))
        );

        assert!(lazy.check(&mut surface, &viewport).is_empty());
        assert_eq!(surface.writes.len(), 1);

        surface.scroll_y = 1500.0;
        assert_eq!(lazy.check(&mut surface, &viewport.scrolled_to(1500.0)), vec![ElementId(2)]);
        assert_eq!(lazy.pending(), 0);
    }
}
