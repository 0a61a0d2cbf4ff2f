use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::easing::Easing;
use crate::timer::Millis;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub preloader: PreloaderConfig,
    #[serde(default)]
    pub toast: ToastConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub smooth_scroll: ScrollConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Pixel margin applied to both viewport edges
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Nominal animation duration
    #[serde(default = "default_counter_duration")]
    pub duration_ms: u64,
    /// Nominal frame interval used to size each step
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    /// Pixel margin above the viewport bottom
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_counter_duration(),
            frame_interval_ms: default_frame_interval(),
            threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Offset subtracted from each section top before matching
    #[serde(default = "default_section_offset")]
    pub section_offset: f64,
    /// Scroll position past which the header is marked as scrolled
    #[serde(default = "default_scrolled_at")]
    pub scrolled_at: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            section_offset: default_section_offset(),
            scrolled_at: default_scrolled_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Custom cursor stays off at or below this viewport width
    #[serde(default = "default_cursor_min_width")]
    pub min_width: f64,
    /// Delay before the follower catches up
    #[serde(default = "default_follower_delay")]
    pub follower_delay_ms: Millis,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            min_width: default_cursor_min_width(),
            follower_delay_ms: default_follower_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Particle count above the breakpoint
    #[serde(default = "default_wide_count")]
    pub wide_count: usize,
    /// Particle count at or below the breakpoint
    #[serde(default = "default_narrow_count")]
    pub narrow_count: usize,
    #[serde(default = "default_particle_breakpoint")]
    pub breakpoint: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            wide_count: default_wide_count(),
            narrow_count: default_narrow_count(),
            breakpoint: default_particle_breakpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreloaderConfig {
    /// Delay between the load event and hiding the preloader
    #[serde(default = "default_preloader_delay")]
    pub delay_ms: Millis,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_preloader_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    /// How long a toast stays fully visible
    #[serde(default = "default_display_window")]
    pub display_ms: Millis,
    /// Length of the exit animation before removal
    #[serde(default = "default_toast_exit")]
    pub exit_ms: Millis,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_window(),
            exit_ms: default_toast_exit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Fallback endpoint when the form declares no action
    #[serde(default)]
    pub endpoint: Option<String>,
    /// How long the success confirmation stays on the submit control
    #[serde(default = "default_display_window")]
    pub success_display_ms: Millis,
    #[serde(default = "default_min_name_len")]
    pub min_name_len: usize,
    #[serde(default = "default_min_message_len")]
    pub min_message_len: usize,
    /// Request timeout in seconds (unset = wait indefinitely)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            success_display_ms: default_display_window(),
            min_name_len: default_min_name_len(),
            min_message_len: default_min_message_len(),
            request_timeout_secs: None,
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Space reserved for the fixed header when jumping to an anchor
    #[serde(default = "default_header_offset")]
    pub header_offset: f64,
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
    /// Lines moved per scroll key press when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: default_header_offset(),
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: Easing::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingConfig {
    /// `id` of the element that receives the typed text
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default = "default_typing_speed")]
    pub speed_ms: Millis,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            target: None,
            texts: Vec::new(),
            speed_ms: default_typing_speed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixels represented by one terminal row
    #[serde(default = "default_px_per_row")]
    pub px_per_row: f64,
    /// Pixels represented by one terminal column
    #[serde(default = "default_px_per_col")]
    pub px_per_col: f64,
    /// Color theme of the terminal preview
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            px_per_row: default_px_per_row(),
            px_per_col: default_px_per_col(),
            theme: default_theme(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("novapage")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    100.0
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_frame_interval() -> u64 {
    16
}

fn default_section_offset() -> f64 {
    150.0
}

fn default_scrolled_at() -> f64 {
    100.0
}

fn default_cursor_min_width() -> f64 {
    1024.0
}

fn default_follower_delay() -> Millis {
    50
}

fn default_wide_count() -> usize {
    50
}

fn default_narrow_count() -> usize {
    25
}

fn default_particle_breakpoint() -> f64 {
    768.0
}

fn default_preloader_delay() -> Millis {
    500
}

fn default_display_window() -> Millis {
    3000
}

fn default_toast_exit() -> Millis {
    300
}

fn default_min_name_len() -> usize {
    2
}

fn default_min_message_len() -> usize {
    10
}

fn default_header_offset() -> f64 {
    80.0
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_typing_speed() -> Millis {
    100
}

fn default_tick_rate() -> u64 {
    100
}

fn default_px_per_row() -> f64 {
    20.0
}

fn default_px_per_col() -> f64 {
    8.0
}

fn default_theme() -> String {
    "nova-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl PageConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let path = expand_tilde(path);
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/novapage/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("novapage")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file used by the terminal host
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("novapage.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_script() {
        let config = PageConfig::default();
        assert_eq!(config.reveal.threshold, 100.0);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.counter.frame_interval_ms, 16);
        assert_eq!(config.nav.section_offset, 150.0);
        assert_eq!(config.preloader.delay_ms, 500);
        assert_eq!(config.toast.display_ms, 3000);
        assert_eq!(config.form.success_display_ms, 3000);
        assert_eq!(config.smooth_scroll.header_offset, 80.0);
        assert!(config.form.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PageConfig::from_toml(
            r#"
            [counter]
            duration_ms = 1000

            [smooth_scroll]
            easing = "ease-out"

            [form]
            endpoint = "https://formspree.io/f/abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.counter.duration_ms, 1000);
        assert_eq!(config.counter.frame_interval_ms, 16);
        assert_eq!(config.smooth_scroll.easing, Easing::EaseOut);
        assert_eq!(config.form.endpoint.as_deref(), Some("https://formspree.io/f/abc"));
        assert_eq!(config.cursor.follower_delay_ms, 50);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = PageConfig::from_toml("[counter\nduration_ms = ").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = PageConfig::default();
        config.typing.texts = vec!["Automate".to_string(), "Scale".to_string()];
        config.save(&path).unwrap();

        let loaded = PageConfig::load_from(&path).unwrap();
        assert_eq!(loaded.typing.texts, config.typing.texts);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PageConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.particles.wide_count, 50);
    }
}
