//! Helpers over the scroll section of the page configuration

pub use novapage_core::{Easing, ScrollConfig};

pub trait ScrollConfigExt {
    /// Smooth scrolling is on and has a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrollConfig::default();
        assert!(config.is_smooth());
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.easing, Easing::EaseInOut);
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        config.smooth_enabled = false;
        assert!(!config.is_smooth());

        config.smooth_enabled = true;
        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());
    }
}
