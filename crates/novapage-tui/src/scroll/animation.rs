//! Scroll animator combining easing and timing

use novapage_core::timer::Millis;

use super::config::{Easing, ScrollConfig, ScrollConfigExt};
use super::timing::{is_complete, lerp_rows, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Option<Millis>,
    from: u16,
    to: u16,
    duration: Millis,
    easing: Easing,
}

/// Scroll position in rows, eased toward its target.
///
/// Requests (`scroll_to`, `scroll_by`) only record intent. [`update`]
/// applies them against the page clock and returns the row to show.
///
/// [`update`]: ScrollAnimator::update
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current: u16,
    /// Key presses between frames are batched into one animation
    pending_delta: i32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0,
            pending_delta: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation running or a batched delta waiting for the next update
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Where the page will rest once the animation ends
    pub fn target(&self) -> u16 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> u16 {
        self.current
    }

    /// Jump without animating
    pub fn set(&mut self, row: u16) {
        self.animation = None;
        self.current = row;
        self.pending_delta = 0;
    }

    /// Animate to an absolute row
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.is_smooth() {
            self.set(target);
            return;
        }
        if self.current == target {
            self.animation = None;
            return;
        }
        self.animation = Some(self.animation_to(target));
    }

    /// Move relative to the current target (positive is down)
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            let row = (self.current as i32 + delta).clamp(0, max_scroll as i32) as u16;
            self.set(row);
            return;
        }
        self.pending_delta += delta;
    }

    pub fn scroll_lines_down(&mut self, max_scroll: u16) {
        self.scroll_by(self.step_lines(), max_scroll);
    }

    pub fn scroll_lines_up(&mut self, max_scroll: u16) {
        self.scroll_by(-self.step_lines(), max_scroll);
    }

    pub fn scroll_half_page(&mut self, down: bool, viewport_rows: u16, max_scroll: u16) {
        let half = (viewport_rows / 2).max(1) as i32;
        self.scroll_by(if down { half } else { -half }, max_scroll);
    }

    pub fn scroll_full_page(&mut self, down: bool, viewport_rows: u16, max_scroll: u16) {
        let page = viewport_rows.max(1) as i32;
        self.scroll_by(if down { page } else { -page }, max_scroll);
    }

    fn step_lines(&self) -> i32 {
        if self.config.is_smooth() {
            1
        } else {
            self.config.scroll_lines.max(1) as i32
        }
    }

    fn animation_to(&self, to: u16) -> ActiveAnimation {
        ActiveAnimation {
            start: None,
            from: self.current,
            to,
            duration: self.config.animation_duration_ms,
            easing: self.config.easing,
        }
    }

    /// Apply pending requests, advance the animation to `now` and return the
    /// row to show. An animation starts counting at its first update.
    pub fn update(&mut self, max_scroll: u16, now: Millis) -> u16 {
        if self.pending_delta != 0 {
            let target = (self.target() as i32 + self.pending_delta).clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;
            if target != self.current {
                self.animation = Some(self.animation_to(target));
            }
        }

        if let Some(anim) = self.animation.as_mut() {
            let start = *anim.start.get_or_insert(now);
            if is_complete(start, anim.duration, now) {
                self.current = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let eased = anim.easing.apply(progress(start, anim.duration, now));
                self.current = lerp_rows(anim.from, anim.to, eased).min(max_scroll);
            }
        }

        self.current
    }

    /// Stop where the page is now
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(duration_ms: u64, easing: Easing) -> ScrollAnimator {
        ScrollAnimator::new(ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            easing,
            ..Default::default()
        })
    }

    #[test]
    fn test_instant_when_disabled() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            scroll_lines: 3,
            ..Default::default()
        });

        animator.scroll_to(100, 200);
        assert_eq!(animator.current(), 100);
        assert!(!animator.is_animating());

        animator.scroll_lines_down(200);
        assert_eq!(animator.current(), 103);
    }

    #[test]
    fn test_scroll_to_eases_over_duration() {
        let mut animator = smooth(100, Easing::Linear);
        animator.scroll_to(40, 200);
        assert!(animator.is_animating());

        assert_eq!(animator.update(200, 1000), 0);
        assert_eq!(animator.update(200, 1050), 20);
        assert_eq!(animator.update(200, 1100), 40);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_ease_out_front_loads_motion() {
        let mut animator = smooth(100, Easing::EaseOut);
        animator.scroll_to(100, 200);
        animator.update(200, 0);
        assert!(animator.update(200, 50) > 50);
    }

    #[test]
    fn test_default_curve_eases_both_ends() {
        let mut animator = smooth(100, Easing::EaseInOut);
        animator.scroll_to(100, 200);
        animator.update(200, 0);
        assert!(animator.update(200, 20) < 20);
        assert_eq!(animator.update(200, 50), 50);
        assert!(animator.update(200, 80) > 80);
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = smooth(100, Easing::EaseInOut);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        assert!(animator.needs_update());

        animator.update(200, 0);
        assert_eq!(animator.target(), 30);
    }

    #[test]
    fn test_clamped_to_max() {
        let mut animator = smooth(100, Easing::Linear);
        animator.set(50);
        animator.scroll_to(300, 100);
        assert_eq!(animator.target(), 100);

        animator.scroll_by(-500, 100);
        animator.update(100, 0);
        assert_eq!(animator.target(), 0);
    }
}
