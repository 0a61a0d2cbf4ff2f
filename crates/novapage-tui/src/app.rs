use novapage_core::form::{Submission, TransportResponse};
use novapage_core::surface::states;
use novapage_core::timer::Millis;
use novapage_core::{ElementId, Page, PageConfig, Surface, Viewport};
use rand::Rng;
use tracing::{debug, info};

use crate::input::Action;
use crate::layout::{header_spans, toggle_span, MenuBox, PageLayout, HEADER_ROWS, STATUS_ROWS};
use crate::manifest::{BuiltPage, FormField};
use crate::scroll::ScrollAnimator;
use crate::surface::TerminalSurface;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Scrolling and following links
    Browse,
    /// Typing into a contact form field
    Form { field: usize },
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Structure of the page being previewed
    pub built: BuiltPage,
    /// Page behavior session
    pub page: Page,
    /// Presentation state written by the page
    pub surface: TerminalSurface,
    pub scroll: ScrollAnimator,
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    focused_link: Option<usize>,
    hovered: Option<ElementId>,
    width: u16,
    height: u16,
    now: Millis,
    last_frame: Millis,
    frame_interval: Millis,
    tick_rate: Millis,
}

impl App {
    /// Lay out `built` for a `width` x `height` terminal, start the page and
    /// fire its load event. Scrolling stays locked until the preloader is
    /// dismissed.
    pub fn new<R: Rng>(built: BuiltPage, mut config: PageConfig, width: u16, height: u16, rng: &mut R) -> Self {
        if config.typing.target.is_none() {
            if let Some(typing) = &built.typing {
                config.typing.target = Some(typing.target.clone());
                if config.typing.texts.is_empty() {
                    config.typing.texts = typing.texts.clone();
                }
            }
        }

        let layout = PageLayout::compute(&built, width);
        let mut surface = TerminalSurface::new(layout, &config.ui);
        surface.set_state(built.landmarks.body, states::SCROLL_LOCKED, true);

        let viewport = surface.viewport(width, content_rows(height));
        let scroll = ScrollAnimator::new(config.smooth_scroll.clone());
        let frame_interval = config.counter.frame_interval_ms.max(1);
        let tick_rate = config.ui.tick_rate_ms;

        let mut page = Page::new(built.document.clone(), config, &mut surface, viewport, rng);
        page.on_load(&mut surface);
        info!(title = %built.title, width, height, "Preview started");

        Self {
            built,
            page,
            surface,
            scroll,
            mode: Mode::Browse,
            should_quit: false,
            status_message: None,
            pending_key: None,
            focused_link: None,
            hovered: None,
            width,
            height,
            now: 0,
            last_frame: 0,
            frame_interval,
            tick_rate,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Page clock in milliseconds
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Rows between the header and the status bar
    pub fn viewport_rows(&self) -> u16 {
        content_rows(self.height)
    }

    pub fn max_scroll(&self) -> u16 {
        self.surface.layout().max_scroll(self.viewport_rows())
    }

    fn viewport(&self) -> Viewport {
        self.surface.viewport(self.width, self.viewport_rows())
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.surface
            .has_state(self.built.landmarks.body, states::SCROLL_LOCKED)
    }

    /// Something is moving and the host should poll at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.scroll.needs_update()
            || self.page.is_animating()
            || self
                .page
                .next_due()
                .is_some_and(|due| due.saturating_sub(self.now) < self.tick_rate)
    }

    /// Advance the page clock to `now`: run due timers, step the scroll
    /// animation, then run the counter frames that fell due.
    pub fn tick(&mut self, now: Millis) {
        self.now = self.now.max(now);
        self.page.tick(&mut self.surface, self.now);

        if !self.page.is_animating() {
            self.last_frame = self.now;
        }
        let row = self.scroll.update(self.max_scroll(), self.now);
        self.apply_scroll(row);

        while self.page.is_animating() && self.last_frame + self.frame_interval <= self.now {
            self.last_frame += self.frame_interval;
            self.page.on_frame(&mut self.surface);
        }
    }

    fn apply_scroll(&mut self, row: u16) {
        if row == self.surface.scroll_row() {
            return;
        }
        self.surface.set_scroll_row(row);
        let viewport = self.viewport();
        self.page.on_scroll(&mut self.surface, viewport);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.surface
            .set_layout(PageLayout::compute(&self.built, width));

        let max = self.max_scroll();
        if self.scroll.current() > max {
            self.scroll.set(max);
        }
        self.surface.set_scroll_row(self.scroll.current());
        let viewport = self.viewport();
        self.page.on_resize(&mut self.surface, viewport);
        debug!(width, height, "Resized");
    }

    /// Animate to a document-absolute pixel offset
    fn scroll_to_px(&mut self, y: f64) {
        let row = self.surface.px_to_rows(y.max(0.0));
        self.scroll.scroll_to(row, self.max_scroll());
    }

    /// Element under a terminal cell
    pub fn hit_test(&self, col: u16, row: u16) -> Option<ElementId> {
        let landmarks = &self.built.landmarks;
        if !self.page.preloader().is_loaded() {
            return Some(landmarks.preloader);
        }

        if row < HEADER_ROWS {
            if toggle_span(self.width).contains(&col) {
                return Some(landmarks.toggle);
            }
            let link = header_spans(&self.built.nav, &self.built.brand, self.width)
                .into_iter()
                .find(|(_, span)| span.contains(&col))
                .map(|(element, _)| element);
            return Some(link.unwrap_or(landmarks.header));
        }

        if self.page.navigation().is_menu_open() {
            let menu = MenuBox::new(&self.built.nav, self.width);
            if menu.contains(col, row) {
                let entry = menu
                    .entry_at(row)
                    .and_then(|i| self.built.nav.get(i))
                    .map(|e| e.element);
                return Some(entry.unwrap_or(landmarks.menu));
            }
        }

        let offset = row - HEADER_ROWS;
        if offset >= self.viewport_rows() {
            return None;
        }
        self.surface
            .layout()
            .hit(self.surface.scroll_row().saturating_add(offset))
    }

    /// Pointer moved to a terminal cell
    pub fn mouse_move(&mut self, col: u16, row: u16) {
        let target = self.hit_test(col, row);
        if target != self.hovered {
            if let Some(old) = self.hovered {
                self.page.on_hover(&mut self.surface, old, false);
            }
            if let Some(new) = target {
                self.page.on_hover(&mut self.surface, new, true);
            }
            self.hovered = target;
        }

        let x = self.surface.cols_to_px(col);
        let y = self.surface.rows_to_px(row);
        self.page.on_mouse_move(&mut self.surface, x, y);
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Click at a terminal cell. Returns a submission when the click
    /// pressed the submit button.
    pub fn click_at(&mut self, col: u16, row: u16) -> Option<Submission> {
        let target = self.hit_test(col, row);
        self.click(target)
    }

    fn click(&mut self, target: Option<ElementId>) -> Option<Submission> {
        if let Some(field) = target.and_then(|t| self.field_index(t)) {
            self.mode = Mode::Form { field };
        }

        if let Some(y) = self.page.on_click(&mut self.surface, target) {
            self.scroll_to_px(y);
        }

        let button = self.built.form().map(|f| f.button);
        if target.is_some() && target == button {
            return self.submit_form();
        }
        None
    }

    /// In-page and external links in document order
    pub fn links(&self) -> Vec<ElementId> {
        self.built
            .document
            .iter()
            .filter(|d| d.is_tag("a") && d.has_attr("href"))
            .map(|d| d.id)
            .collect()
    }

    pub fn focused_link(&self) -> Option<ElementId> {
        self.focused_link.and_then(|i| self.links().get(i).copied())
    }

    pub fn focus_next_link(&mut self) {
        let count = self.links().len();
        if count == 0 {
            return;
        }
        self.focused_link = Some(self.focused_link.map_or(0, |i| (i + 1) % count));
    }

    pub fn focus_prev_link(&mut self) {
        let count = self.links().len();
        if count == 0 {
            return;
        }
        self.focused_link = Some(self.focused_link.map_or(count - 1, |i| (i + count - 1) % count));
    }

    fn fields(&self) -> &[FormField] {
        self.built.form().map(|f| f.fields.as_slice()).unwrap_or(&[])
    }

    fn field_index(&self, element: ElementId) -> Option<usize> {
        self.fields().iter().position(|f| f.element == element)
    }

    /// Field being edited in form mode
    pub fn active_field(&self) -> Option<FormField> {
        match self.mode {
            Mode::Form { field } => self.fields().get(field).copied(),
            _ => None,
        }
    }

    /// Focus the first form field and bring the form into view
    pub fn enter_form(&mut self) {
        let Some(form) = self.built.form().map(|f| f.form) else {
            self.set_status("This page has no form");
            return;
        };
        self.mode = Mode::Form { field: 0 };
        if !self.is_scroll_locked() {
            if let Some(b) = self.surface.layout().get(form) {
                self.scroll.scroll_to(b.top.saturating_sub(1), self.max_scroll());
            }
        }
    }

    fn cycle_field(&mut self, forward: bool) {
        let count = self.fields().len();
        if let Mode::Form { field } = self.mode {
            if count > 0 {
                let next = if forward { (field + 1) % count } else { (field + count - 1) % count };
                self.mode = Mode::Form { field: next };
            }
        }
    }

    fn edit_field(&mut self, edit: impl FnOnce(&mut String)) {
        if self.page.submitter().is_busy() {
            return;
        }
        if let Some(field) = self.active_field() {
            edit(self.surface.input_mut(field.element));
        }
    }

    /// Validate the current input values and start a submission
    pub fn submit_form(&mut self) -> Option<Submission> {
        let form = self
            .page
            .collect_form(|element| self.surface.text(element).map(str::to_string));
        match self.page.begin_submit(&mut self.surface, &form) {
            Ok(submission) => {
                info!(endpoint = %submission.endpoint, "Submitting contact form");
                self.set_status("Sending...");
                Some(submission)
            }
            Err(e) => {
                self.set_status(e.to_string());
                None
            }
        }
    }

    /// Hand the outcome of a submission back to the page
    pub fn finish_submission(&mut self, result: novapage_core::Result<TransportResponse>) {
        match self.page.finish_submit(&mut self.surface, result) {
            Ok(()) => {
                self.mode = Mode::Browse;
                self.set_status("Message sent");
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Apply an input action. Returns a submission to post, if one started.
    pub fn handle_action(&mut self, action: Action) -> Option<Submission> {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        let max = self.max_scroll();
        let rows = self.viewport_rows();
        let locked = self.is_scroll_locked();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown if !locked => self.scroll.scroll_lines_down(max),
            Action::ScrollUp if !locked => self.scroll.scroll_lines_up(max),
            Action::ScrollHalfPageDown if !locked => self.scroll.scroll_half_page(true, rows, max),
            Action::ScrollHalfPageUp if !locked => self.scroll.scroll_half_page(false, rows, max),
            Action::ScrollPageDown if !locked => self.scroll.scroll_full_page(true, rows, max),
            Action::ScrollPageUp if !locked => self.scroll.scroll_full_page(false, rows, max),
            Action::JumpToTop if !locked => self.scroll.scroll_to(0, max),
            Action::JumpToBottom if !locked => self.scroll.scroll_to(max, max),
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextLink => self.focus_next_link(),
            Action::PrevLink => self.focus_prev_link(),
            Action::Activate => {
                if let Some(link) = self.focused_link() {
                    return self.click(Some(link));
                }
            }
            Action::ToggleMenu => {
                let toggle = self.built.landmarks.toggle;
                self.page.on_click(&mut self.surface, Some(toggle));
            }
            Action::EnterForm => self.enter_form(),
            Action::ToggleHelp => self.mode = Mode::Help,
            Action::ExitMode => {
                if self.mode == Mode::Browse {
                    self.page.on_click(&mut self.surface, None);
                }
                self.mode = Mode::Browse;
            }
            Action::NextField => self.cycle_field(true),
            Action::PrevField => self.cycle_field(false),
            Action::Submit => return self.submit_form(),
            Action::InputChar(c) => self.edit_field(|value| value.push(c)),
            Action::Backspace => self.edit_field(|value| {
                value.pop();
            }),
            _ => {}
        }
        None
    }

    /// Mouse wheel, in rows (positive is down)
    pub fn wheel(&mut self, delta: i32) {
        if !self.is_scroll_locked() {
            self.scroll.scroll_by(delta, self.max_scroll());
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

fn content_rows(height: u16) -> u16 {
    height.saturating_sub(HEADER_ROWS + STATUS_ROWS).max(1)
}
