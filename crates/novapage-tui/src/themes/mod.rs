//! Built-in theme registry

mod dracula;
mod nord;

use tracing::warn;

use crate::theme::Theme;

/// Names accepted by [`load_theme`]
pub const THEME_NAMES: &[&str] = &["nova-dark", "nord", "dracula"];

/// Load a theme by name; unknown names fall back to the default
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "nova-dark" | "nova" | "default" => Theme::default(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        other => {
            warn!(theme = other, "Unknown theme, using nova-dark");
            Theme::default()
        }
    }
}
