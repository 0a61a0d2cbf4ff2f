//! Eased scrolling for the page view
//!
//! - `timing`: progress and interpolation helpers
//! - `config`: helpers over the core `ScrollConfig`
//! - `animation`: the animator, eased with the core `Easing` curves
//!
//! The animator runs on the page clock (milliseconds since the session
//! started), so anchor scrolls and key scrolls are replayable in tests.

pub mod config;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{Easing, ScrollConfig, ScrollConfigExt};
