//! One-time reveal of elements as they scroll into view

use tracing::{debug, warn};

use crate::document::Document;
use crate::surface::{states, ElementId, Surface, Viewport};
use crate::timer::Millis;
use crate::viewport::ViewportTracker;

/// Marks an element for reveal
pub const REVEAL_ATTR: &str = "data-aos";
/// Per-element reveal delay in milliseconds
pub const DELAY_ATTR: &str = "data-aos-delay";

#[derive(Debug, Clone, PartialEq)]
struct RevealTarget {
    element: ElementId,
    delay: Millis,
    triggered: bool,
}

/// A reveal the caller must apply after `delay` ms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReveal {
    pub element: ElementId,
    pub delay: Millis,
}

#[derive(Debug, Clone)]
pub struct RevealAnimator {
    targets: Vec<RevealTarget>,
    tracker: ViewportTracker,
}

impl RevealAnimator {
    pub fn new(tracker: ViewportTracker) -> Self {
        Self {
            targets: Vec::new(),
            tracker,
        }
    }

    /// Track every element carrying `data-aos`
    pub fn from_document(document: &Document, tracker: ViewportTracker) -> Self {
        let mut animator = Self::new(tracker);
        for decl in document.with_attr(REVEAL_ATTR) {
            animator.track(decl.id, parse_delay(decl.id, decl.attr(DELAY_ATTR)));
        }
        debug!(count = animator.targets.len(), "Reveal targets registered");
        animator
    }

    pub fn track(&mut self, element: ElementId, delay: Millis) {
        self.targets.push(RevealTarget {
            element,
            delay,
            triggered: false,
        });
    }

    /// Trigger every untriggered element that is now visible.
    ///
    /// Elements are marked triggered before their delay elapses, so repeated
    /// checks during the delay never schedule a second reveal.
    pub fn check<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        viewport: &Viewport,
    ) -> Vec<ScheduledReveal> {
        let mut scheduled = Vec::new();
        for target in self.targets.iter_mut().filter(|t| !t.triggered) {
            if self.tracker.is_visible(surface, target.element, viewport) {
                target.triggered = true;
                debug!(element = %target.element, delay = target.delay, "Reveal scheduled");
                scheduled.push(ScheduledReveal {
                    element: target.element,
                    delay: target.delay,
                });
            }
        }
        scheduled
    }

    /// Apply the revealed state
    pub fn reveal<S: Surface + ?Sized>(surface: &mut S, element: ElementId) {
        surface.set_state(element, states::REVEALED, true);
    }

    pub fn is_triggered(&self, element: ElementId) -> bool {
        self.targets
            .iter()
            .any(|t| t.element == element && t.triggered)
    }

    /// Tracked elements still waiting to be revealed
    pub fn remaining(&self) -> usize {
        self.targets.iter().filter(|t| !t.triggered).count()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Missing or malformed delays fall back to zero
fn parse_delay(element: ElementId, raw: Option<&str>) -> Millis {
    match raw.map(str::trim) {
        None | Some("") => 0,
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!(element = %element, value, "Ignoring malformed reveal delay");
            0
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementDecl;
    use crate::surface::testing::FakeSurface;

    fn doc() -> Document {
        Document::new(vec![
            ElementDecl::new(ElementId(1), "div").with_attr(REVEAL_ATTR, "fade-up"),
            ElementDecl::new(ElementId(2), "div")
                .with_attr(REVEAL_ATTR, "fade-up")
                .with_attr(DELAY_ATTR, "200"),
            ElementDecl::new(ElementId(3), "div")
                .with_attr(REVEAL_ATTR, "zoom-in")
                .with_attr(DELAY_ATTR, "soon"),
            ElementDecl::new(ElementId(4), "div"),
        ])
    }

    fn surface() -> FakeSurface {
        FakeSurface::new()
            .with_box(ElementId(1), 100.0, 300.0)
            .with_box(ElementId(2), 1200.0, 300.0)
            .with_box(ElementId(3), 2400.0, 300.0)
            .with_box(ElementId(4), 0.0, 300.0)
    }

    #[test]
    fn test_only_data_aos_elements_are_tracked() {
        let animator = RevealAnimator::from_document(&doc(), ViewportTracker::default());
        assert_eq!(animator.len(), 3);
    }

    #[test]
    fn test_visible_elements_scheduled_with_delay() {
        let mut animator = RevealAnimator::from_document(&doc(), ViewportTracker::default());
        let mut surface = surface();
        let viewport = Viewport::new(1280.0, 800.0, 0.0);

        let first = animator.check(&surface, &viewport);
        assert_eq!(
            first,
            vec![ScheduledReveal {
                element: ElementId(1),
                delay: 0
            }]
        );

        surface.scroll_y = 1000.0;
        let second = animator.check(&surface, &viewport.scrolled_to(1000.0));
        assert_eq!(
            second,
            vec![ScheduledReveal {
                element: ElementId(2),
                delay: 200
            }]
        );
    }

    #[test]
    fn test_triggers_at_most_once() {
        let mut animator = RevealAnimator::from_document(&doc(), ViewportTracker::default());
        let surface = surface();
        let viewport = Viewport::new(1280.0, 800.0, 0.0);

        assert_eq!(animator.check(&surface, &viewport).len(), 1);
        for _ in 0..20 {
            assert!(animator.check(&surface, &viewport).is_empty());
        }
        assert!(animator.is_triggered(ElementId(1)));
        assert_eq!(animator.remaining(), 2);
    }

    #[test]
    fn test_malformed_delay_defaults_to_zero() {
        let mut animator = RevealAnimator::from_document(&doc(), ViewportTracker::default());
        let mut surface = surface();
        surface.scroll_y = 2200.0;
        let scheduled = animator.check(&surface, &Viewport::new(1280.0, 800.0, 2200.0));
        assert!(scheduled.contains(&ScheduledReveal {
            element: ElementId(3),
            delay: 0
        }));
    }

    #[test]
    fn test_reveal_sets_state() {
        let mut surface = surface();
        RevealAnimator::reveal(&mut surface, ElementId(2));
        assert!(surface.has_state(ElementId(2), states::REVEALED));
    }
}
