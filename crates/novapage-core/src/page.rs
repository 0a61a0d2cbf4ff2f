//! Page session: owns every component and routes host events to them
//!
//! The host constructs one [`Page`] per loaded document, forwards its input
//! events and frame callbacks, and advances virtual time with
//! [`Page::tick`]. Delayed effects are queued as [`PageTask`]s and run from
//! whichever event method first observes them as due.

use rand::Rng;
use tracing::{debug, info};

use crate::config::PageConfig;
use crate::counter::CounterAnimator;
use crate::cursor::CustomCursor;
use crate::document::Document;
use crate::form::{ContactForm, FormControls, FormError, FormSubmitter, Submission, TransportResponse};
use crate::lazy::LazyLoader;
use crate::nav::Navigation;
use crate::particles::{self, Particle, PARTICLES_ID};
use crate::preloader::Preloader;
use crate::reveal::RevealAnimator;
use crate::smooth_scroll::SmoothScroll;
use crate::surface::{ElementId, Surface, Viewport};
use crate::timer::{Millis, Timers};
use crate::toast::{ToastId, ToastKind, Toasts};
use crate::typing::TypingEffect;
use crate::viewport::ViewportTracker;

/// Deferred work queued on the page clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageTask {
    Reveal(ElementId),
    HidePreloader,
    FollowCursor { x: f64, y: f64 },
    /// Ends the success window of the submission with this sequence number
    ResetSubmitButton(u64),
    DismissToast(ToastId),
    RemoveToast(ToastId),
    TypeNext,
}

pub struct Page {
    document: Document,
    config: PageConfig,
    viewport: Viewport,
    timers: Timers<PageTask>,
    preloader: Preloader,
    navigation: Navigation,
    cursor: CustomCursor,
    reveal: RevealAnimator,
    counters: CounterAnimator,
    lazy: LazyLoader,
    smooth_scroll: SmoothScroll,
    controls: Option<FormControls>,
    submitter: FormSubmitter,
    /// Bumped by every accepted submission; stale reset timers compare it
    submit_seq: u64,
    toasts: Toasts,
    typing: Option<TypingEffect>,
    particles: Vec<Particle>,
}

impl Page {
    /// Build every component from `document` and run the initial pass:
    /// header state, reveal, counters, particles, lazy sources and typing.
    pub fn new<S, R>(
        document: Document,
        config: PageConfig,
        surface: &mut S,
        viewport: Viewport,
        rng: &mut R,
    ) -> Self
    where
        S: Surface + ?Sized,
        R: Rng,
    {
        let controls = FormControls::from_document(&document);
        let mut submitter = FormSubmitter::new(&config.form);
        if let Some(action) = controls.as_ref().and_then(FormControls::action) {
            submitter = submitter.with_endpoint(action);
        }

        let particles = if document.by_dom_id(PARTICLES_ID).is_some() {
            particles::generate(rng, viewport.width, &config.particles)
        } else {
            Vec::new()
        };

        let typing = config.typing.target.as_deref().and_then(|target| {
            let element = document.by_dom_id(target)?;
            TypingEffect::new(element.id, &config.typing.texts, config.typing.speed_ms)
        });

        let mut page = Self {
            preloader: Preloader::from_document(&document, &config.preloader),
            navigation: Navigation::from_document(&document, &config.nav),
            cursor: CustomCursor::from_document(&document, &viewport, &config.cursor),
            reveal: RevealAnimator::from_document(
                &document,
                ViewportTracker::new(config.reveal.threshold),
            ),
            counters: CounterAnimator::from_document(&document, &config.counter),
            lazy: LazyLoader::from_document(&document),
            smooth_scroll: SmoothScroll::new(config.smooth_scroll.header_offset),
            particles,
            toasts: Toasts::new(&config.toast),
            timers: Timers::new(),
            controls,
            submitter,
            submit_seq: 0,
            typing,
            viewport,
            document,
            config,
        };

        page.navigation.update_header(surface, &page.viewport);
        page.check_reveals(surface);
        page.counters.check(surface, &page.viewport);
        page.lazy.check(surface, &page.viewport);
        if let Some(typing) = page.typing.as_mut() {
            let delay = typing.step(surface);
            page.timers.schedule(delay, PageTask::TypeNext);
        }

        info!(
            elements = page.document.len(),
            reveals = page.reveal.len(),
            counters = page.counters.len(),
            particles = page.particles.len(),
            cursor = page.cursor.is_enabled(),
            "Page initialized"
        );
        page.run_due(surface);
        page
    }

    /// The document and its resources finished loading
    pub fn on_load<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.timers.schedule(self.preloader.delay(), PageTask::HidePreloader);
        self.run_due(surface);
    }

    pub fn on_scroll<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport) {
        self.viewport = viewport;
        self.navigation.on_scroll(surface, &self.viewport);
        self.check_reveals(surface);
        self.counters.check(surface, &self.viewport);
        self.lazy.check(surface, &self.viewport);
        self.run_due(surface);
    }

    pub fn on_resize<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport) {
        self.viewport = viewport;
        self.check_reveals(surface);
        self.lazy.check(surface, &self.viewport);
        self.run_due(surface);
    }

    pub fn on_mouse_move<S: Surface + ?Sized>(&mut self, surface: &mut S, x: f64, y: f64) {
        if let Some(delay) = self.cursor.on_mouse_move(surface, x, y) {
            self.timers.schedule(delay, PageTask::FollowCursor { x, y });
        }
        self.run_due(surface);
    }

    /// Pointer entered (`entered = true`) or left `element`
    pub fn on_hover<S: Surface + ?Sized>(&mut self, surface: &mut S, element: ElementId, entered: bool) {
        self.cursor.on_hover(surface, &self.document, element, entered);
        self.run_due(surface);
    }

    /// Route a click on `target` (`None` for empty space).
    ///
    /// Returns the document-absolute scroll destination when the click
    /// landed on an in-page anchor; the host animates the scroll.
    pub fn on_click<S: Surface + ?Sized>(&mut self, surface: &mut S, target: Option<ElementId>) -> Option<f64> {
        self.navigation.on_click(surface, &self.document, target);

        let destination = target
            .and_then(|t| self.document.closest(t, |d| d.is_tag("a") && d.has_attr("href")))
            .and_then(|anchor| self.document.get(anchor))
            .and_then(|anchor| anchor.attr("href"))
            .and_then(|href| {
                self.smooth_scroll
                    .destination(&self.document, &*surface, &self.viewport, href)
            });
        if let Some(y) = destination {
            debug!(destination = y, "Anchor scroll");
        }

        self.run_due(surface);
        destination
    }

    /// Advance frame-driven animations. Returns `true` while another frame
    /// is needed.
    pub fn on_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let animating = self.counters.frame(surface);
        self.run_due(surface);
        animating
    }

    /// Move the page clock to `now` and run everything that fell due
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Millis) {
        self.timers.advance_to(now);
        self.run_due(surface);
    }

    /// Validate `form` and put the submit button into its sending state.
    ///
    /// On success the host must post the returned [`Submission`] and hand the
    /// outcome to [`Page::finish_submit`]. Every error is also shown as a
    /// toast.
    pub fn begin_submit<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        form: &ContactForm,
    ) -> Result<Submission, FormError> {
        let result = self.submitter.begin(form);
        match &result {
            Ok(_) => {
                self.submit_seq += 1;
                if let Some(controls) = &self.controls {
                    controls.show_sending(surface);
                }
            }
            Err(e) => self.show_error(e),
        }
        self.run_due(surface);
        result
    }

    pub fn finish_submit<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        result: crate::Result<TransportResponse>,
    ) -> Result<(), FormError> {
        let outcome = self.submitter.complete(result);
        match &outcome {
            Ok(display_ms) => {
                if let Some(controls) = &self.controls {
                    controls.show_sent(surface);
                }
                self.timers
                    .schedule(*display_ms, PageTask::ResetSubmitButton(self.submit_seq));
            }
            Err(e) => {
                if let Some(controls) = &self.controls {
                    controls.restore(surface);
                }
                self.show_error(e);
            }
        }
        self.run_due(surface);
        outcome.map(|_| ())
    }

    /// Read the contact form's current input values from `value_of`
    pub fn collect_form<F>(&self, mut value_of: F) -> ContactForm
    where
        F: FnMut(ElementId) -> Option<String>,
    {
        let Some(controls) = &self.controls else {
            return ContactForm::default();
        };
        ContactForm::from_fields(
            controls
                .inputs()
                .map(|(name, element)| (name.to_string(), value_of(element).unwrap_or_default())),
        )
    }

    fn show_error(&mut self, error: &FormError) {
        let (id, delay) = self.toasts.push(ToastKind::Error, error.to_string());
        self.timers.schedule(delay, PageTask::DismissToast(id));
    }

    fn check_reveals<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for scheduled in self.reveal.check(&*surface, &self.viewport) {
            self.timers.schedule(scheduled.delay, PageTask::Reveal(scheduled.element));
        }
    }

    fn run_due<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        while let Some(task) = self.timers.pop_due() {
            match task {
                PageTask::Reveal(element) => RevealAnimator::reveal(surface, element),
                PageTask::HidePreloader => self.preloader.finish(surface),
                PageTask::FollowCursor { x, y } => self.cursor.follow(surface, x, y),
                PageTask::ResetSubmitButton(seq) => {
                    if seq != self.submit_seq || !self.submitter.reset() {
                        continue;
                    }
                    if let Some(controls) = &self.controls {
                        controls.restore(surface);
                    }
                }
                PageTask::DismissToast(id) => {
                    if let Some(delay) = self.toasts.begin_exit(id) {
                        self.timers.schedule(delay, PageTask::RemoveToast(id));
                    }
                }
                PageTask::RemoveToast(id) => self.toasts.remove(id),
                PageTask::TypeNext => {
                    if let Some(typing) = self.typing.as_mut() {
                        let delay = typing.step(surface);
                        self.timers.schedule(delay, PageTask::TypeNext);
                    }
                }
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// When the next queued task falls due, if any
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn is_animating(&self) -> bool {
        self.counters.is_animating()
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn preloader(&self) -> &Preloader {
        &self.preloader
    }

    pub fn cursor(&self) -> &CustomCursor {
        &self.cursor
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    pub fn counters(&self) -> &CounterAnimator {
        &self.counters
    }

    pub fn lazy(&self) -> &LazyLoader {
        &self.lazy
    }

    pub fn controls(&self) -> Option<&FormControls> {
        self.controls.as_ref()
    }

    pub fn submitter(&self) -> &FormSubmitter {
        &self.submitter
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::counter::{COUNT_ATTR, STAT_CLASS};
    use crate::document::ElementDecl;
    use crate::form::{SubmissionState, CONTACT_FORM_ID};
    use crate::reveal::{DELAY_ATTR, REVEAL_ATTR};
    use crate::surface::testing::FakeSurface;
    use crate::surface::{states, Content};
    use crate::toast::ToastPhase;
    use crate::Error;

    const BODY: ElementId = ElementId(1);
    const PRELOADER: ElementId = ElementId(2);
    const HEADER: ElementId = ElementId(3);
    const MENU: ElementId = ElementId(4);
    const TOGGLE: ElementId = ElementId(5);
    const LINK_HOME: ElementId = ElementId(6);
    const LINK_CONTACT: ElementId = ElementId(7);
    const HERO: ElementId = ElementId(8);
    const TITLE: ElementId = ElementId(9);
    const STAT: ElementId = ElementId(10);
    const CONTACT: ElementId = ElementId(11);
    const CARD: ElementId = ElementId(12);
    const FORM: ElementId = ElementId(13);
    const NAME: ElementId = ElementId(14);
    const EMAIL: ElementId = ElementId(15);
    const MESSAGE: ElementId = ElementId(16);
    const SUBMIT: ElementId = ElementId(17);
    const CURSOR: ElementId = ElementId(18);
    const FOLLOWER: ElementId = ElementId(19);
    const PARTICLES: ElementId = ElementId(20);

    fn document() -> Document {
        Document::new(vec![
            ElementDecl::new(BODY, "body"),
            ElementDecl::new(PRELOADER, "div").with_attr("id", "preloader"),
            ElementDecl::new(HEADER, "header").with_attr("id", "header"),
            ElementDecl::new(MENU, "ul").with_class("nav-menu").child_of(HEADER),
            ElementDecl::new(TOGGLE, "button").with_class("nav-toggle").child_of(HEADER),
            ElementDecl::new(LINK_HOME, "a")
                .with_class("nav-link")
                .with_attr("href", "#home")
                .child_of(MENU),
            ElementDecl::new(LINK_CONTACT, "a")
                .with_class("nav-link")
                .with_attr("href", "#contact")
                .child_of(MENU),
            ElementDecl::new(HERO, "section").with_attr("id", "home"),
            ElementDecl::new(PARTICLES, "div").with_attr("id", PARTICLES_ID).child_of(HERO),
            ElementDecl::new(TITLE, "span").with_attr("id", "typed").child_of(HERO),
            ElementDecl::new(STAT, "span")
                .with_class(STAT_CLASS)
                .with_attr(COUNT_ATTR, "40")
                .child_of(HERO),
            ElementDecl::new(CONTACT, "section").with_attr("id", "contact"),
            ElementDecl::new(CARD, "div")
                .with_class("service-card")
                .with_attr(REVEAL_ATTR, "fade-up")
                .with_attr(DELAY_ATTR, "200")
                .child_of(CONTACT),
            ElementDecl::new(FORM, "form")
                .with_attr("id", CONTACT_FORM_ID)
                .with_attr("action", "https://forms.example.com/f/abc")
                .child_of(CONTACT),
            ElementDecl::new(NAME, "input").with_attr("name", "name").child_of(FORM),
            ElementDecl::new(EMAIL, "input").with_attr("name", "email").child_of(FORM),
            ElementDecl::new(MESSAGE, "textarea").with_attr("name", "message").child_of(FORM),
            ElementDecl::new(SUBMIT, "button")
                .with_attr("type", "submit")
                .with_text("Send Message")
                .child_of(FORM),
            ElementDecl::new(CURSOR, "div").with_class("cursor"),
            ElementDecl::new(FOLLOWER, "div").with_class("cursor-follower"),
        ])
    }

    fn surface() -> FakeSurface {
        FakeSurface::new()
            .with_box(HERO, 0.0, 900.0)
            .with_box(STAT, 500.0, 40.0)
            .with_box(CONTACT, 900.0, 1200.0)
            .with_box(CARD, 1000.0, 300.0)
    }

    fn config() -> PageConfig {
        let mut config = PageConfig::default();
        config.typing.target = Some("typed".to_string());
        config.typing.texts = vec!["Hi".to_string()];
        config
    }

    fn page(surface: &mut FakeSurface) -> Page {
        let mut rng = StdRng::seed_from_u64(7);
        Page::new(
            document(),
            config(),
            surface,
            Viewport::new(1280.0, 800.0, 0.0),
            &mut rng,
        )
    }

    fn valid_form() -> ContactForm {
        ContactForm::new("Ada", "ada@example.com", "Hello there, friend")
    }

    #[test]
    fn test_initial_pass() {
        let mut surface = surface();
        let page = page(&mut surface);

        assert!(!surface.has_state(HEADER, states::SCROLLED));
        assert!(page.counters().has_started(STAT));
        assert!(!page.reveal().is_triggered(CARD));
        assert_eq!(page.particles().len(), 50);
        assert!(page.cursor().is_enabled());
        assert_eq!(surface.text(TITLE), Some("H"));
        assert_eq!(page.submitter().endpoint(), Some("https://forms.example.com/f/abc"));
    }

    #[test]
    fn test_no_particles_without_container() {
        let mut surface = surface();
        let decls: Vec<_> = document().iter().filter(|d| d.id != PARTICLES).cloned().collect();
        let mut rng = StdRng::seed_from_u64(7);
        let page = Page::new(
            Document::new(decls),
            config(),
            &mut surface,
            Viewport::new(1280.0, 800.0, 0.0),
            &mut rng,
        );
        assert!(page.particles().is_empty());
    }

    #[test]
    fn test_preloader_waits_for_delay_after_load() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        page.on_load(&mut surface);
        page.tick(&mut surface, 499);
        assert!(!surface.has_state(PRELOADER, states::LOADED));

        page.tick(&mut surface, 500);
        assert!(surface.has_state(PRELOADER, states::LOADED));
        assert!(!surface.has_state(BODY, states::SCROLL_LOCKED));
        assert!(page.preloader().is_loaded());
    }

    #[test]
    fn test_scroll_drives_header_reveal_and_links() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        surface.scroll_y = 800.0;
        page.on_scroll(&mut surface, Viewport::new(1280.0, 800.0, 800.0));
        assert!(surface.has_state(HEADER, states::SCROLLED));
        assert!(surface.has_state(LINK_CONTACT, states::ACTIVE));
        assert!(!surface.has_state(LINK_HOME, states::ACTIVE));

        assert!(page.reveal().is_triggered(CARD));
        assert!(!surface.has_state(CARD, states::REVEALED));
        page.tick(&mut surface, 200);
        assert!(surface.has_state(CARD, states::REVEALED));
    }

    #[test]
    fn test_frames_finish_counter() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        let mut frames = 0;
        while page.on_frame(&mut surface) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(surface.text(STAT), Some("40"));
        assert!(!page.is_animating());
    }

    #[test]
    fn test_follower_lags_cursor() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        page.on_mouse_move(&mut surface, 10.0, 20.0);
        assert_eq!(surface.placements.get(&CURSOR), Some(&(10.0, 20.0)));
        assert_eq!(surface.placements.get(&FOLLOWER), None);

        page.tick(&mut surface, 49);
        assert_eq!(surface.placements.get(&FOLLOWER), None);
        page.tick(&mut surface, 50);
        assert_eq!(surface.placements.get(&FOLLOWER), Some(&(10.0, 20.0)));

        page.on_hover(&mut surface, CARD, true);
        assert!(surface.has_state(FOLLOWER, states::HOVER));
        page.on_hover(&mut surface, CARD, false);
        assert!(!surface.has_state(FOLLOWER, states::HOVER));
    }

    #[test]
    fn test_anchor_click_returns_destination_and_closes_menu() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        page.on_click(&mut surface, Some(TOGGLE));
        assert!(page.navigation().is_menu_open());

        let destination = page.on_click(&mut surface, Some(LINK_CONTACT));
        assert_eq!(destination, Some(820.0));
        assert!(!page.navigation().is_menu_open());
        assert!(surface.has_state(LINK_CONTACT, states::ACTIVE));

        assert_eq!(page.on_click(&mut surface, None), None);
    }

    #[test]
    fn test_validation_error_becomes_toast() {
        let mut surface = surface();
        let mut page = page(&mut surface);
        let form = ContactForm::new("Ada", "ada@example.com", "short");

        let err = page.begin_submit(&mut surface, &form).unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        let toast = page.toasts().iter().next().unwrap();
        assert_eq!(toast.message, "Please enter a message (at least 10 characters)");

        page.tick(&mut surface, 3000);
        assert_eq!(page.toasts().iter().next().unwrap().phase, ToastPhase::Leaving);
        page.tick(&mut surface, 3299);
        assert_eq!(page.toasts().len(), 1);
        page.tick(&mut surface, 3300);
        assert!(page.toasts().is_empty());
    }

    #[test]
    fn test_successful_submission_lifecycle() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        let submission = page.begin_submit(&mut surface, &valid_form()).unwrap();
        assert_eq!(submission.endpoint, "https://forms.example.com/f/abc");
        assert_eq!(surface.text(SUBMIT), Some("Sending..."));
        assert!(surface.has_state(SUBMIT, states::DISABLED));

        page.tick(&mut surface, 1000);
        page.finish_submit(
            &mut surface,
            Ok(TransportResponse {
                status: 200,
                body: "{}".to_string(),
            }),
        )
        .unwrap();
        assert_eq!(page.submitter().state(), SubmissionState::Success);
        assert_eq!(surface.text(SUBMIT), Some("Message Sent!"));
        assert_eq!(surface.text(NAME), Some(""));

        page.tick(&mut surface, 3999);
        assert_eq!(page.submitter().state(), SubmissionState::Success);
        page.tick(&mut surface, 4000);
        assert_eq!(page.submitter().state(), SubmissionState::Idle);
        assert_eq!(surface.text(SUBMIT), Some("Send Message"));
        assert!(page.toasts().is_empty());
    }

    fn ok_response() -> crate::Result<TransportResponse> {
        Ok(TransportResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }

    #[test]
    fn test_success_window_leaves_new_submission_alone() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        page.begin_submit(&mut surface, &valid_form()).unwrap();
        page.finish_submit(&mut surface, ok_response()).unwrap();
        page.tick(&mut surface, 1000);

        page.begin_submit(&mut surface, &valid_form()).unwrap();
        page.tick(&mut surface, 3000);
        assert_eq!(page.submitter().state(), SubmissionState::Submitting);
        assert_eq!(surface.text(SUBMIT), Some("Sending..."));
        assert!(surface.has_state(SUBMIT, states::DISABLED));
    }

    #[test]
    fn test_second_success_gets_its_own_window() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        page.begin_submit(&mut surface, &valid_form()).unwrap();
        page.finish_submit(&mut surface, ok_response()).unwrap();
        page.tick(&mut surface, 1000);
        page.begin_submit(&mut surface, &valid_form()).unwrap();
        page.tick(&mut surface, 2000);
        page.finish_submit(&mut surface, ok_response()).unwrap();

        page.tick(&mut surface, 3000);
        assert_eq!(page.submitter().state(), SubmissionState::Success);
        assert_eq!(surface.text(SUBMIT), Some("Message Sent!"));

        page.tick(&mut surface, 5000);
        assert_eq!(page.submitter().state(), SubmissionState::Idle);
        assert_eq!(surface.text(SUBMIT), Some("Send Message"));
    }

    #[test]
    fn test_transport_failure_restores_button() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        page.begin_submit(&mut surface, &valid_form()).unwrap();
        let err = page
            .finish_submit(&mut surface, Err(Error::Other("offline".to_string())))
            .unwrap_err();
        assert!(matches!(err, FormError::TransportFailure(_)));
        assert_eq!(surface.text(SUBMIT), Some("Send Message"));
        assert!(!surface.has_state(SUBMIT, states::DISABLED));
        assert_eq!(
            page.toasts().iter().next().map(|t| t.message.as_str()),
            Some("Network error. Please check your connection and try again.")
        );
        assert_eq!(page.submitter().state(), SubmissionState::Error);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        page.begin_submit(&mut surface, &valid_form()).unwrap();
        let err = page.begin_submit(&mut surface, &valid_form()).unwrap_err();
        assert!(matches!(err, FormError::InFlight));
    }

    #[test]
    fn test_collect_form_reads_named_inputs() {
        let mut surface = surface();
        let page = page(&mut surface);

        let form = page.collect_form(|element| match element {
            NAME => Some("Ada".to_string()),
            EMAIL => Some("ada@example.com".to_string()),
            _ => None,
        });
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.message, "");
    }

    #[test]
    fn test_typing_advances_with_clock() {
        let mut surface = surface();
        let mut page = page(&mut surface);

        page.tick(&mut surface, 100);
        assert_eq!(surface.text(TITLE), Some("Hi"));
        page.tick(&mut surface, 2100);
        assert_eq!(surface.text(TITLE), Some("H"));
        page.tick(&mut surface, 2150);
        assert_eq!(surface.text(TITLE), Some(""));
        page.tick(&mut surface, 2650);
        assert_eq!(surface.text(TITLE), Some("H"));
        assert!(surface
            .writes
            .iter()
            .all(|(el, c)| *el != TITLE || matches!(c, Content::Text(_))));
    }
}
