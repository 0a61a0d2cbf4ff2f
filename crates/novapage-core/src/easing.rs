//! Timing curves for page animations, named after their CSS keywords

use serde::{Deserialize, Serialize};

/// Maps animation progress in [0, 1] to eased progress in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Cubic `ease-out`
    EaseOut,
    /// Cubic `ease-in-out`: smooth `scrollTo` and the particle float
    #[default]
    EaseInOut,
}

impl Easing {
    /// Input outside [0, 1] is clamped
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
