//! Headless run of a page on the virtual clock

use std::fmt;

use novapage_core::surface::states;
use novapage_core::timer::Millis;
use novapage_core::PageConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::App;
use crate::manifest::{BlockKind, BuiltPage};

/// Time held after each scroll step so delayed reveals can land
const SETTLE_MS: Millis = 250;

/// Time given to counters and toasts after the last step
const FINISH_MS: Millis = 3000;

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Rows scrolled per step
    pub step_rows: u16,
    pub width: u16,
    pub height: u16,
    pub seed: u64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            step_rows: 4,
            width: 120,
            height: 40,
            seed: 0,
        }
    }
}

/// What the page looks like at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub at: Millis,
    pub scroll_row: u16,
    pub scroll_y: f64,
    pub loaded: bool,
    pub header_scrolled: bool,
    pub active_section: Option<String>,
    pub revealed: usize,
    pub reveal_total: usize,
    pub counters: Vec<(String, Option<i64>)>,
    pub images_loaded: usize,
    pub images_total: usize,
    pub typed: Option<String>,
    pub toasts: usize,
}

impl Snapshot {
    pub fn capture(app: &App) -> Self {
        let page = &app.page;
        let counters = app
            .built
            .blocks()
            .filter_map(|b| match &b.spec.kind {
                BlockKind::Stat { label, .. } => Some((label.clone(), page.counters().displayed(b.element))),
                _ => None,
            })
            .collect();
        let images: Vec<_> = app
            .built
            .blocks()
            .filter(|b| matches!(b.spec.kind, BlockKind::Image { .. }))
            .map(|b| b.element)
            .collect();
        let revealed = app
            .built
            .blocks()
            .filter(|b| page.reveal().is_triggered(b.element) && app.surface.has_state(b.element, states::REVEALED))
            .count();
        let typed = app
            .built
            .typing
            .as_ref()
            .and_then(|t| app.built.document.by_dom_id(&t.target))
            .and_then(|d| app.surface.text(d.id))
            .map(str::to_string);

        Self {
            at: app.now(),
            scroll_row: app.surface.scroll_row(),
            scroll_y: app.surface.scroll_y(),
            loaded: page.preloader().is_loaded(),
            header_scrolled: page.navigation().is_scrolled(),
            active_section: page.navigation().highlighter().active().map(str::to_string),
            revealed,
            reveal_total: page.reveal().len(),
            counters,
            images_loaded: images.iter().filter(|e| app.surface.source(**e).is_some()).count(),
            images_total: images.len(),
            typed,
            toasts: page.toasts().len(),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>6}ms row={:>3} y={:>5}px {} header={} active={} revealed={}/{} images={}/{}",
            self.at,
            self.scroll_row,
            self.scroll_y,
            if self.loaded { "loaded " } else { "loading" },
            if self.header_scrolled { "scrolled" } else { "top" },
            self.active_section.as_deref().map(|s| format!("#{}", s)).unwrap_or_else(|| "-".to_string()),
            self.revealed,
            self.reveal_total,
            self.images_loaded,
            self.images_total,
        )?;
        for (label, value) in &self.counters {
            match value {
                Some(v) => write!(f, " {}={}", label, v)?,
                None => write!(f, " {}=-", label)?,
            }
        }
        if let Some(typed) = &self.typed {
            write!(f, " typed={:?}", typed)?;
        }
        if self.toasts > 0 {
            write!(f, " toasts={}", self.toasts)?;
        }
        Ok(())
    }
}

/// Load the page, scroll it top to bottom in `step_rows` steps and record
/// a snapshot after each step.
pub fn simulate(built: BuiltPage, config: PageConfig, options: &SimulationOptions) -> Vec<Snapshot> {
    let frame = config.counter.frame_interval_ms.max(1);
    let preload = config.preloader.delay_ms;
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut app = App::new(built, config, options.width, options.height, &mut rng);

    let mut snapshots = vec![Snapshot::capture(&app)];
    run_until(&mut app, preload, frame);
    snapshots.push(Snapshot::capture(&app));

    let step = options.step_rows.max(1) as i32;
    while app.scroll.current() < app.max_scroll() {
        let before = app.scroll.current();
        app.wheel(step);
        settle(&mut app, frame);
        snapshots.push(Snapshot::capture(&app));
        if app.scroll.current() == before {
            break;
        }
    }

    let end = app.now() + FINISH_MS;
    run_until(&mut app, end, frame);
    snapshots.push(Snapshot::capture(&app));
    snapshots
}

/// Tick in frame-sized steps up to `until`
fn run_until(app: &mut App, until: Millis, frame: Millis) {
    let mut now = app.now();
    while now < until {
        now = (now + frame).min(until);
        app.tick(now);
    }
}

/// Play out the scroll animation, then hold
fn settle(app: &mut App, frame: Millis) {
    let mut now = app.now();
    while app.scroll.needs_update() {
        now += frame;
        app.tick(now);
    }
    run_until(app, now + SETTLE_MS, frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::tests::SAMPLE;
    use crate::manifest::Manifest;

    fn run(step_rows: u16) -> Vec<Snapshot> {
        let built = Manifest::from_toml(SAMPLE).unwrap().build().unwrap();
        let options = SimulationOptions {
            step_rows,
            width: 100,
            height: 30,
            seed: 3,
        };
        simulate(built, PageConfig::default(), &options)
    }

    #[test]
    fn test_starts_behind_preloader() {
        let snapshots = run(4);
        let first = &snapshots[0];
        assert_eq!(first.at, 0);
        assert!(!first.loaded);
        assert_eq!(first.scroll_row, 0);
        assert!(snapshots[1].loaded);
    }

    #[test]
    fn test_reaches_bottom_with_everything_triggered() {
        let snapshots = run(4);
        let last = snapshots.last().unwrap();
        assert!(last.scroll_row > 0);
        assert_eq!(last.header_scrolled, last.scroll_y > PageConfig::default().nav.scrolled_at);
        assert!(last.active_section.is_some());
        assert_eq!(last.revealed, last.reveal_total);
        assert_eq!(last.images_loaded, last.images_total);
        assert_eq!(last.counters, vec![("Projects".to_string(), Some(120))]);
    }

    #[test]
    fn test_scroll_never_moves_backwards() {
        let snapshots = run(2);
        for pair in snapshots.windows(2) {
            assert!(pair[1].scroll_row >= pair[0].scroll_row);
            assert!(pair[1].at >= pair[0].at);
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        assert_eq!(run(4), run(4));
    }

    #[test]
    fn test_display_line() {
        let snapshots = run(4);
        let line = snapshots.last().unwrap().to_string();
        assert!(line.contains("loaded"));
        assert!(line.contains("Projects=120"));
    }
}
