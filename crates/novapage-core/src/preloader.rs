//! Loading screen dismissed shortly after the page finishes loading

use tracing::info;

use crate::config::PreloaderConfig;
use crate::document::Document;
use crate::surface::{states, ElementId, Surface};
use crate::timer::Millis;

pub const PRELOADER_ID: &str = "preloader";

#[derive(Debug, Clone)]
pub struct Preloader {
    element: Option<ElementId>,
    body: Option<ElementId>,
    delay_ms: Millis,
    loaded: bool,
}

impl Preloader {
    pub fn from_document(document: &Document, config: &PreloaderConfig) -> Self {
        Self {
            element: document.by_dom_id(PRELOADER_ID).map(|d| d.id),
            body: document.iter().find(|d| d.is_tag("body")).map(|d| d.id),
            delay_ms: config.delay_ms,
            loaded: false,
        }
    }

    /// Delay to wait after the load event before calling [`Preloader::finish`]
    pub fn delay(&self) -> Millis {
        self.delay_ms
    }

    /// Hide the preloader and unlock page scrolling
    pub fn finish<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(element) = self.element {
            surface.set_state(element, states::LOADED, true);
        }
        if let Some(body) = self.body {
            surface.set_state(body, states::SCROLL_LOCKED, false);
        }
        self.loaded = true;
        info!("Preloader dismissed");
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn element(&self) -> Option<ElementId> {
        self.element
    }
}
