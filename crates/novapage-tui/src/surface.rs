//! Terminal implementation of the page capability interface
//!
//! Layout is kept in rows and scroll position in pixels. One row stands for
//! `px_per_row` pixels and one column for `px_per_col`, so the page behavior
//! sees browser-like numbers.

use std::collections::{BTreeSet, HashMap};

use novapage_core::config::UiConfig;
use novapage_core::{Bounds, Content, ElementId, Surface, Viewport};

use crate::layout::PageLayout;

#[derive(Debug, Clone)]
pub struct TerminalSurface {
    layout: PageLayout,
    px_per_row: f64,
    px_per_col: f64,
    scroll_y: f64,
    states: HashMap<ElementId, BTreeSet<String>>,
    content: HashMap<ElementId, Content>,
    placements: HashMap<ElementId, (f64, f64)>,
}

impl TerminalSurface {
    pub fn new(layout: PageLayout, ui: &UiConfig) -> Self {
        Self {
            layout,
            px_per_row: ui.px_per_row.max(1.0),
            px_per_col: ui.px_per_col.max(1.0),
            scroll_y: 0.0,
            states: HashMap::new(),
            content: HashMap::new(),
            placements: HashMap::new(),
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: PageLayout) {
        self.layout = layout;
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// First document row in view
    pub fn scroll_row(&self) -> u16 {
        self.px_to_rows(self.scroll_y)
    }

    pub fn set_scroll_row(&mut self, row: u16) {
        self.scroll_y = self.rows_to_px(row);
    }

    pub fn rows_to_px(&self, rows: u16) -> f64 {
        rows as f64 * self.px_per_row
    }

    pub fn cols_to_px(&self, cols: u16) -> f64 {
        cols as f64 * self.px_per_col
    }

    /// Nearest whole row, clamped to the representable range
    pub fn px_to_rows(&self, px: f64) -> u16 {
        (px / self.px_per_row).round().clamp(0.0, u16::MAX as f64) as u16
    }

    pub fn px_to_cols(&self, px: f64) -> u16 {
        (px / self.px_per_col).round().clamp(0.0, u16::MAX as f64) as u16
    }

    /// Window metrics for a content area of `cols` x `rows`
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(self.cols_to_px(cols), self.rows_to_px(rows), self.scroll_y)
    }

    pub fn has_state(&self, element: ElementId, state: &str) -> bool {
        self.states
            .get(&element)
            .is_some_and(|states| states.contains(state))
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        match self.content.get(&element) {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn source(&self, element: ElementId) -> Option<&str> {
        match self.content.get(&element) {
            Some(Content::Source(src)) => Some(src),
            _ => None,
        }
    }

    /// Host-side edit of an input's value
    pub fn input_mut(&mut self, element: ElementId) -> &mut String {
        let entry = self
            .content
            .entry(element)
            .or_insert_with(|| Content::Text(String::new()));
        if let Content::Source(_) = entry {
            *entry = Content::Text(String::new());
        }
        match entry {
            Content::Text(text) => text,
            Content::Source(src) => src,
        }
    }

    /// Placement of a floating element as (column, row) of the content area
    pub fn placement_cell(&self, element: ElementId) -> Option<(u16, u16)> {
        self.placements
            .get(&element)
            .map(|&(x, y)| (self.px_to_cols(x), self.px_to_rows(y)))
    }
}

impl Surface for TerminalSurface {
    fn bounds(&self, element: ElementId) -> Option<Bounds> {
        let b = self.layout.get(element)?;
        let top = self.rows_to_px(b.top) - self.scroll_y;
        Some(Bounds::new(
            top,
            top + self.rows_to_px(b.height),
            0.0,
            self.cols_to_px(self.layout.width()),
        ))
    }

    fn set_state(&mut self, element: ElementId, state: &str, on: bool) {
        let states = self.states.entry(element).or_default();
        if on {
            states.insert(state.to_string());
        } else {
            states.remove(state);
        }
    }

    fn set_content(&mut self, element: ElementId, content: Content) {
        self.content.insert(element, content);
    }

    fn place(&mut self, element: ElementId, x: f64, y: f64) {
        self.placements.insert(element, (x, y));
    }
}
