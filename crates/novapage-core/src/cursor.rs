//! Custom pointer: a dot that tracks the mouse and a trailing follower ring

use tracing::debug;

use crate::config::CursorConfig;
use crate::document::{Document, ElementDecl};
use crate::surface::{states, ElementId, Surface, Viewport};
use crate::timer::Millis;

pub const CURSOR_CLASS: &str = "cursor";
pub const FOLLOWER_CLASS: &str = "cursor-follower";

const HOVER_TAGS: &[&str] = &["a", "button"];
const HOVER_CLASSES: &[&str] = &["service-card", "portfolio-card"];

/// Elements that put the follower into its hover state
pub fn is_hover_target(decl: &ElementDecl) -> bool {
    HOVER_TAGS.iter().any(|t| decl.is_tag(t)) || HOVER_CLASSES.iter().any(|c| decl.has_class(c))
}

#[derive(Debug, Clone, Copy)]
struct Parts {
    cursor: ElementId,
    follower: ElementId,
}

#[derive(Debug, Clone)]
pub struct CustomCursor {
    parts: Option<Parts>,
    follower_delay_ms: Millis,
}

impl CustomCursor {
    /// Disabled on narrow viewports or when either part is missing
    pub fn from_document(document: &Document, viewport: &Viewport, config: &CursorConfig) -> Self {
        let parts = if viewport.width <= config.min_width {
            debug!(width = viewport.width, "Custom cursor disabled on narrow viewport");
            None
        } else {
            match (
                document.first_with_class(CURSOR_CLASS),
                document.first_with_class(FOLLOWER_CLASS),
            ) {
                (Some(cursor), Some(follower)) => Some(Parts { cursor, follower }),
                _ => None,
            }
        };
        Self {
            parts,
            follower_delay_ms: config.follower_delay_ms,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.parts.is_some()
    }

    /// Move the cursor now. Returns the delay after which
    /// [`CustomCursor::follow`] should be called with the same coordinates.
    pub fn on_mouse_move<S: Surface + ?Sized>(&self, surface: &mut S, x: f64, y: f64) -> Option<Millis> {
        let parts = self.parts?;
        surface.place(parts.cursor, x, y);
        Some(self.follower_delay_ms)
    }

    pub fn follow<S: Surface + ?Sized>(&self, surface: &mut S, x: f64, y: f64) {
        if let Some(parts) = self.parts {
            surface.place(parts.follower, x, y);
        }
    }

    pub fn on_hover<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        document: &Document,
        element: ElementId,
        entered: bool,
    ) {
        let Some(parts) = self.parts else {
            return;
        };
        if document.get(element).is_some_and(is_hover_target) {
            surface.set_state(parts.follower, states::HOVER, entered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::FakeSurface;

    const CURSOR: ElementId = ElementId(1);
    const FOLLOWER: ElementId = ElementId(2);
    const BUTTON: ElementId = ElementId(3);
    const CARD: ElementId = ElementId(4);
    const TEXT: ElementId = ElementId(5);

    fn document() -> Document {
        Document::new(vec![
            ElementDecl::new(CURSOR, "div").with_class(CURSOR_CLASS),
            ElementDecl::new(FOLLOWER, "div").with_class(FOLLOWER_CLASS),
            ElementDecl::new(BUTTON, "button"),
            ElementDecl::new(CARD, "article").with_class("portfolio-card"),
            ElementDecl::new(TEXT, "p"),
        ])
    }

    fn wide() -> Viewport {
        Viewport::new(1440.0, 900.0, 0.0)
    }

    #[test]
    fn test_disabled_at_or_below_breakpoint() {
        let config = CursorConfig::default();
        let narrow = CustomCursor::from_document(&document(), &Viewport::new(1024.0, 900.0, 0.0), &config);
        assert!(!narrow.is_enabled());

        let mut surface = FakeSurface::new();
        assert_eq!(narrow.on_mouse_move(&mut surface, 10.0, 10.0), None);
        assert!(surface.placements.is_empty());
    }

    #[test]
    fn test_disabled_without_parts() {
        let doc = Document::new(vec![ElementDecl::new(CURSOR, "div").with_class(CURSOR_CLASS)]);
        assert!(!CustomCursor::from_document(&doc, &wide(), &CursorConfig::default()).is_enabled());
    }

    #[test]
    fn test_cursor_moves_immediately_follower_on_request() {
        let cursor = CustomCursor::from_document(&document(), &wide(), &CursorConfig::default());
        let mut surface = FakeSurface::new();

        assert_eq!(cursor.on_mouse_move(&mut surface, 120.0, 45.0), Some(50));
        assert_eq!(surface.placements.get(&CURSOR), Some(&(120.0, 45.0)));
        assert!(!surface.placements.contains_key(&FOLLOWER));

        cursor.follow(&mut surface, 120.0, 45.0);
        assert_eq!(surface.placements.get(&FOLLOWER), Some(&(120.0, 45.0)));
    }

    #[test]
    fn test_hover_targets() {
        let doc = document();
        let cursor = CustomCursor::from_document(&doc, &wide(), &CursorConfig::default());
        let mut surface = FakeSurface::new();

        cursor.on_hover(&mut surface, &doc, TEXT, true);
        assert!(!surface.has_state(FOLLOWER, states::HOVER));

        cursor.on_hover(&mut surface, &doc, CARD, true);
        assert!(surface.has_state(FOLLOWER, states::HOVER));
        cursor.on_hover(&mut surface, &doc, CARD, false);
        assert!(!surface.has_state(FOLLOWER, states::HOVER));

        cursor.on_hover(&mut surface, &doc, BUTTON, true);
        assert!(surface.has_state(FOLLOWER, states::HOVER));
    }
}
