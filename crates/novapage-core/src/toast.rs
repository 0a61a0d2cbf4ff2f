//! Stacked transient notifications
//!
//! Every toast runs its own timeline: shown, then leaving, then removed.
//! Toasts are never cancelled early and any number may be on screen.

use tracing::debug;

use crate::config::ToastConfig;
use crate::timer::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Shown,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    pub phase: ToastPhase,
}

#[derive(Debug, Clone)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
    display_ms: Millis,
    exit_ms: Millis,
}

impl Toasts {
    pub fn new(config: &ToastConfig) -> Self {
        Self {
            next_id: 0,
            items: Vec::new(),
            display_ms: config.display_ms,
            exit_ms: config.exit_ms,
        }
    }

    /// Show a toast. The caller schedules [`Toasts::begin_exit`] after the
    /// returned delay.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> (ToastId, Millis) {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let message = message.into();
        debug!(toast = id.0, %message, "Toast shown");
        self.items.push(Toast {
            id,
            kind,
            message,
            phase: ToastPhase::Shown,
        });
        (id, self.display_ms)
    }

    /// Start the exit animation. Returns the delay before [`Toasts::remove`],
    /// or `None` if the toast is already gone.
    pub fn begin_exit(&mut self, id: ToastId) -> Option<Millis> {
        let toast = self.items.iter_mut().find(|t| t.id == id)?;
        toast.phase = ToastPhase::Leaving;
        Some(self.exit_ms)
    }

    pub fn remove(&mut self, id: ToastId) {
        self.items.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
