//! Navigation state: header styling, mobile menu and active-section links

use tracing::debug;

use crate::config::NavConfig;
use crate::document::Document;
use crate::surface::{states, ElementId, Surface, Viewport};

pub const NAV_LINK_CLASS: &str = "nav-link";
pub const NAV_MENU_CLASS: &str = "nav-menu";
pub const NAV_TOGGLE_CLASS: &str = "nav-toggle";
pub const HEADER_ID: &str = "header";

/// A page section measured from live layout
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top_offset: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top_offset: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top_offset,
            height,
        }
    }

    /// `scroll_y` lies in `[top - offset, top - offset + height)`
    #[inline]
    pub fn contains(&self, scroll_y: f64, offset: f64) -> bool {
        let start = self.top_offset - offset;
        scroll_y >= start && scroll_y < start + self.height
    }
}

/// The active section for a scroll position.
///
/// Adjusted ranges may overlap; the last matching section in document order
/// wins.
pub fn active_section(sections: &[Section], scroll_y: f64, offset: f64) -> Option<&Section> {
    sections.iter().rev().find(|s| s.contains(scroll_y, offset))
}

#[derive(Debug, Clone)]
struct NavLink {
    element: ElementId,
    href: String,
}

/// Reflects the section under the scroll position into nav link states
#[derive(Debug, Clone)]
pub struct NavigationHighlighter {
    links: Vec<NavLink>,
    sections: Vec<(ElementId, String)>,
    offset: f64,
    active: Option<String>,
}

impl NavigationHighlighter {
    pub fn new(offset: f64) -> Self {
        Self {
            links: Vec::new(),
            sections: Vec::new(),
            offset,
            active: None,
        }
    }

    /// Links are `.nav-link` elements with an `href`; sections are `section`
    /// elements with a non-empty `id`
    pub fn from_document(document: &Document, offset: f64) -> Self {
        let mut highlighter = Self::new(offset);
        for decl in document.with_class(NAV_LINK_CLASS) {
            if let Some(href) = decl.attr("href") {
                highlighter.add_link(decl.id, href);
            }
        }
        for decl in document.iter().filter(|d| d.is_tag("section")) {
            if let Some(id) = decl.dom_id() {
                highlighter.add_section(decl.id, id);
            }
        }
        highlighter
    }

    pub fn add_link(&mut self, element: ElementId, href: impl Into<String>) {
        self.links.push(NavLink {
            element,
            href: href.into(),
        });
    }

    pub fn add_section(&mut self, element: ElementId, id: impl Into<String>) {
        self.sections.push((element, id.into()));
    }

    /// Section geometry derived from current layout; unlaid sections are skipped
    pub fn measure<S: Surface + ?Sized>(&self, surface: &S, viewport: &Viewport) -> Vec<Section> {
        self.sections
            .iter()
            .filter_map(|(element, id)| {
                surface.bounds(*element).map(|b| Section {
                    id: id.clone(),
                    top_offset: b.top + viewport.scroll_y,
                    height: b.height(),
                })
            })
            .collect()
    }

    /// Recompute the active section and update link states.
    ///
    /// When no section matches, link states are left untouched.
    pub fn update<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: &Viewport) -> Option<&str> {
        let sections = self.measure(&*surface, viewport);
        if let Some(section) = active_section(&sections, viewport.scroll_y, self.offset) {
            let fragment = format!("#{}", section.id);
            for link in &self.links {
                surface.set_state(link.element, states::ACTIVE, link.href == fragment);
            }
            if self.active.as_deref() != Some(section.id.as_str()) {
                debug!(section = %section.id, "Active section changed");
                self.active = Some(section.id.clone());
            }
        }
        self.active.as_deref()
    }

    /// Make exactly `element` the active link
    pub fn set_active_link<S: Surface + ?Sized>(&mut self, surface: &mut S, element: ElementId) {
        for link in &self.links {
            surface.set_state(link.element, states::ACTIVE, link.element == element);
        }
        if let Some(link) = self.links.iter().find(|l| l.element == element) {
            self.active = link.href.strip_prefix('#').map(str::to_string);
        }
    }

    pub fn is_link(&self, element: ElementId) -> bool {
        self.links.iter().any(|l| l.element == element)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn links(&self) -> impl Iterator<Item = (ElementId, &str)> {
        self.links.iter().map(|l| (l.element, l.href.as_str()))
    }
}

/// Header, mobile menu and link highlighting
#[derive(Debug, Clone)]
pub struct Navigation {
    header: Option<ElementId>,
    toggle: Option<ElementId>,
    menu: Option<ElementId>,
    highlighter: NavigationHighlighter,
    scrolled_at: f64,
    menu_open: bool,
    scrolled: bool,
}

impl Navigation {
    pub fn from_document(document: &Document, config: &NavConfig) -> Self {
        Self {
            header: document.by_dom_id(HEADER_ID).map(|d| d.id),
            toggle: document.first_with_class(NAV_TOGGLE_CLASS),
            menu: document.first_with_class(NAV_MENU_CLASS),
            highlighter: NavigationHighlighter::from_document(document, config.section_offset),
            scrolled_at: config.scrolled_at,
            menu_open: false,
            scrolled: false,
        }
    }

    /// Header state plus active-link update, run on every scroll
    pub fn on_scroll<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: &Viewport) {
        self.update_header(surface, viewport);
        self.highlighter.update(surface, viewport);
    }

    /// `scrolled` while the page is more than the threshold from the top
    pub fn update_header<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: &Viewport) {
        self.scrolled = viewport.scroll_y > self.scrolled_at;
        if let Some(header) = self.header {
            surface.set_state(header, states::SCROLLED, self.scrolled);
        }
    }

    pub fn toggle_menu<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.set_menu(surface, !self.menu_open);
    }

    pub fn close_menu<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.set_menu(surface, false);
    }

    fn set_menu<S: Surface + ?Sized>(&mut self, surface: &mut S, open: bool) {
        self.menu_open = open;
        for element in [self.menu, self.toggle].into_iter().flatten() {
            surface.set_state(element, states::ACTIVE, open);
        }
    }

    /// Route a document click: toggle, nav link, or outside-menu dismissal
    pub fn on_click<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        document: &Document,
        target: Option<ElementId>,
    ) {
        if let Some(target) = target {
            if self.toggle.is_some() && document.closest(target, |d| Some(d.id) == self.toggle).is_some() {
                self.toggle_menu(surface);
                return;
            }
            if let Some(link) = document.closest(target, |d| self.highlighter.is_link(d.id)) {
                self.close_menu(surface);
                self.highlighter.set_active_link(surface, link);
                return;
            }
            if self.menu.is_some() && document.closest(target, |d| Some(d.id) == self.menu).is_some() {
                return;
            }
        }
        self.close_menu(surface);
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn highlighter(&self) -> &NavigationHighlighter {
        &self.highlighter
    }
}
