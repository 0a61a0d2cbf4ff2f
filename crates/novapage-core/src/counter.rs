//! Count-up animation for statistic numbers
//!
//! Each counter interpolates from zero to its `data-count` target, one fixed
//! step per animation frame. The step is sized from a nominal frame interval
//! rather than measured frame times, so the wall-clock duration follows the
//! real frame rate.

use tracing::{debug, warn};

use crate::config::CounterConfig;
use crate::document::Document;
use crate::surface::{Content, ElementId, Surface, Viewport};
use crate::viewport::ViewportTracker;

/// Integer target for a counter element
pub const COUNT_ATTR: &str = "data-count";

/// Only elements with this class count up
pub const STAT_CLASS: &str = "stat-number";

/// Interpolation state of one counter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterSpec {
    pub target: i64,
    pub current: f64,
}

impl CounterSpec {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            current: 0.0,
        }
    }

    /// Per-frame increment: `target / (duration / frame_interval)`
    /// A zero frame interval falls back to ~60fps.
    pub fn step(&self, duration_ms: u64, frame_interval_ms: u64) -> f64 {
        let frame_interval_ms = if frame_interval_ms == 0 { 16 } else { frame_interval_ms };
        self.target as f64 / (duration_ms as f64 / frame_interval_ms as f64)
    }

    /// Advance one frame and return the value to display.
    ///
    /// Returns the displayed value and whether the counter reached its
    /// terminal state. A non-finite step snaps straight to the target.
    pub fn advance(&mut self, step: f64) -> (i64, bool) {
        let target = self.target as f64;
        self.current += step;
        if step.is_finite() && self.current < target {
            (self.current.floor() as i64, false)
        } else {
            self.current = target;
            (self.target, true)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Running,
    Done,
}

#[derive(Debug, Clone)]
struct Counter {
    element: ElementId,
    spec: CounterSpec,
    step: f64,
    phase: Phase,
    displayed: Option<i64>,
}

impl Counter {
    fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (value, done) = self.spec.advance(self.step);
        surface.set_content(self.element, Content::Text(value.to_string()));
        self.displayed = Some(value);
        if done {
            debug!(element = %self.element, target = self.spec.target, "Counter finished");
            self.phase = Phase::Done;
        }
    }
}

#[derive(Debug, Clone)]
pub struct CounterAnimator {
    counters: Vec<Counter>,
    tracker: ViewportTracker,
    duration_ms: u64,
    frame_interval_ms: u64,
}

impl CounterAnimator {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            counters: Vec::new(),
            tracker: ViewportTracker::new(config.threshold),
            duration_ms: config.duration_ms,
            frame_interval_ms: config.frame_interval_ms,
        }
    }

    /// Track every element carrying an integer `data-count`
    pub fn from_document(document: &Document, config: &CounterConfig) -> Self {
        let mut animator = Self::new(config);
        for decl in document.with_class(STAT_CLASS).filter(|d| d.has_attr(COUNT_ATTR)) {
            let raw = decl.attr(COUNT_ATTR).unwrap_or_default();
            match raw.trim().parse::<i64>() {
                Ok(target) => animator.track(decl.id, target),
                Err(_) => warn!(element = %decl.id, value = raw, "Skipping counter with non-integer target"),
            }
        }
        animator
    }

    pub fn track(&mut self, element: ElementId, target: i64) {
        let spec = CounterSpec::new(target);
        self.counters.push(Counter {
            element,
            step: spec.step(self.duration_ms, self.frame_interval_ms),
            spec,
            phase: Phase::Waiting,
            displayed: None,
        });
    }

    /// Start every waiting counter whose element has entered the viewport.
    ///
    /// A started counter is marked before its first frame runs, and that
    /// first frame runs immediately.
    pub fn check<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        viewport: &Viewport,
    ) -> Vec<ElementId> {
        let mut started = Vec::new();
        for counter in self.counters.iter_mut().filter(|c| c.phase == Phase::Waiting) {
            if self.tracker.has_entered(&*surface, counter.element, viewport) {
                counter.phase = Phase::Running;
                debug!(element = %counter.element, target = counter.spec.target, "Counter started");
                counter.tick(surface);
                started.push(counter.element);
            }
        }
        started
    }

    /// Advance every running counter by one frame.
    /// Returns `true` while any counter still needs frames.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        for counter in self.counters.iter_mut().filter(|c| c.phase == Phase::Running) {
            counter.tick(surface);
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.counters.iter().any(|c| c.phase == Phase::Running)
    }

    pub fn has_started(&self, element: ElementId) -> bool {
        self.counters
            .iter()
            .any(|c| c.element == element && c.phase != Phase::Waiting)
    }

    /// Last value written to the element, if any
    pub fn displayed(&self, element: ElementId) -> Option<i64> {
        self.counters
            .iter()
            .find(|c| c.element == element)
            .and_then(|c| c.displayed)
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementDecl;
    use crate::surface::testing::FakeSurface;

    const STAT: ElementId = ElementId(10);

    fn animator_for(target: &str) -> CounterAnimator {
        let doc = Document::new(vec![ElementDecl::new(STAT, "span")
            .with_class(STAT_CLASS)
            .with_attr(COUNT_ATTR, target)]);
        CounterAnimator::from_document(&doc, &CounterConfig::default())
    }

    fn displayed_values(surface: &FakeSurface) -> Vec<i64> {
        surface
            .writes
            .iter()
            .filter(|(el, _)| *el == STAT)
            .map(|(_, content)| match content {
                Content::Text(text) => text.parse().unwrap(),
                other => panic!("unexpected content {:?}", other),
            })
            .collect()
    }

    fn run_to_completion(animator: &mut CounterAnimator, surface: &mut FakeSurface) {
        let mut frames = 0;
        while animator.frame(surface) {
            frames += 1;
            assert!(frames < 10_000, "counter never finished");
        }
    }

    #[test]
    fn test_step_uses_nominal_frame_interval() {
        let spec = CounterSpec::new(100);
        assert!((spec.step(2000, 16) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_counts_to_exact_target_without_overshoot() {
        let mut animator = animator_for("100");
        let mut surface = FakeSurface::new().with_box(STAT, 200.0, 40.0);
        let viewport = Viewport::new(1280.0, 800.0, 0.0);

        assert_eq!(animator.check(&mut surface, &viewport), vec![STAT]);
        run_to_completion(&mut animator, &mut surface);

        let values = displayed_values(&surface);
        assert_eq!(*values.last().unwrap(), 100);
        assert!(values.iter().all(|v| *v <= 100));
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", values);
        // 2000 ms at a nominal 16 ms per frame
        assert!((125..=126).contains(&values.len()), "{} frames", values.len());
        assert_eq!(animator.displayed(STAT), Some(100));
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_strictly_increasing_when_step_exceeds_one() {
        let mut animator = animator_for("1000");
        let mut surface = FakeSurface::new().with_box(STAT, 200.0, 40.0);
        animator.check(&mut surface, &Viewport::new(1280.0, 800.0, 0.0));
        run_to_completion(&mut animator, &mut surface);

        let values = displayed_values(&surface);
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{:?}", values);
        assert_eq!(*values.last().unwrap(), 1000);
    }

    #[test]
    fn test_starts_once() {
        let mut animator = animator_for("50");
        let mut surface = FakeSurface::new().with_box(STAT, 200.0, 40.0);
        let viewport = Viewport::new(1280.0, 800.0, 0.0);

        assert_eq!(animator.check(&mut surface, &viewport).len(), 1);
        run_to_completion(&mut animator, &mut surface);
        let writes = surface.writes.len();

        for _ in 0..10 {
            assert!(animator.check(&mut surface, &viewport).is_empty());
            assert!(!animator.frame(&mut surface));
        }
        assert_eq!(surface.writes.len(), writes);
    }

    #[test]
    fn test_waits_until_entered() {
        let mut animator = animator_for("10");
        let mut surface = FakeSurface::new().with_box(STAT, 750.0, 40.0);
        let viewport = Viewport::new(1280.0, 800.0, 0.0);

        assert!(animator.check(&mut surface, &viewport).is_empty());
        assert!(!animator.has_started(STAT));

        surface.scroll_y = 60.0;
        assert_eq!(animator.check(&mut surface, &viewport.scrolled_to(60.0)), vec![STAT]);
        assert!(animator.has_started(STAT));
    }

    #[test]
    fn test_only_stat_numbers_are_tracked() {
        let doc = Document::new(vec![
            ElementDecl::new(STAT, "span").with_class(STAT_CLASS).with_attr(COUNT_ATTR, "10"),
            ElementDecl::new(ElementId(11), "span").with_attr(COUNT_ATTR, "20"),
            ElementDecl::new(ElementId(12), "span").with_class(STAT_CLASS),
        ]);
        let animator = CounterAnimator::from_document(&doc, &CounterConfig::default());
        assert_eq!(animator.len(), 1);
    }

    #[test]
    fn test_non_integer_target_is_skipped() {
        assert!(animator_for("lots").is_empty());
        assert_eq!(animator_for(" 42 ").len(), 1);
    }

    #[test]
    fn test_zero_duration_snaps_on_first_frame() {
        let config = CounterConfig {
            duration_ms: 0,
            ..Default::default()
        };
        let mut animator = CounterAnimator::new(&config);
        animator.track(STAT, 500);
        let mut surface = FakeSurface::new().with_box(STAT, 0.0, 40.0);

        animator.check(&mut surface, &Viewport::new(1280.0, 800.0, 0.0));
        assert_eq!(surface.text(STAT), Some("500"));
        assert!(!animator.is_animating());
    }
}
