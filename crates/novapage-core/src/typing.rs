//! Typewriter effect cycling through a list of phrases

use crate::surface::{Content, ElementId, Surface};
use crate::timer::Millis;

/// Pause after a phrase is fully typed
const HOLD_MS: Millis = 2000;
/// Pause after a phrase is fully deleted
const NEXT_PHRASE_MS: Millis = 500;

#[derive(Debug, Clone)]
pub struct TypingEffect {
    element: ElementId,
    phrases: Vec<Vec<char>>,
    speed_ms: Millis,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl TypingEffect {
    /// Empty phrases are dropped; `None` when nothing is left to type
    pub fn new(element: ElementId, phrases: &[String], speed_ms: Millis) -> Option<Self> {
        let phrases: Vec<Vec<char>> = phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.chars().collect())
            .collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            element,
            phrases,
            speed_ms,
            phrase: 0,
            chars: 0,
            deleting: false,
        })
    }

    /// Type or delete one character and return the delay before the next step
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Millis {
        let current = &self.phrases[self.phrase];

        if self.deleting {
            self.chars -= 1;
        } else {
            self.chars += 1;
        }
        let text: String = current[..self.chars].iter().collect();
        surface.set_content(self.element, Content::Text(text));

        if !self.deleting && self.chars == current.len() {
            self.deleting = true;
            HOLD_MS
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            NEXT_PHRASE_MS
        } else if self.deleting {
            self.speed_ms / 2
        } else {
            self.speed_ms
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }
}
