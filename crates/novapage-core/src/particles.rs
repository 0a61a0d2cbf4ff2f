//! Decorative floating particles behind the hero section

use rand::Rng;

use crate::config::ParticleConfig;
use crate::easing::Easing;

/// `id` of the container particles float in; without it there are none
pub const PARTICLES_ID: &str = "particles";

/// One randomized particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Diameter in pixels, in [1, 5)
    pub size_px: f64,
    /// Horizontal position as a percentage of the container, in [0, 100)
    pub x_pct: f64,
    /// Vertical position as a percentage of the container, in [0, 100)
    pub y_pct: f64,
    /// Length of one float loop in seconds, in [10, 30)
    pub duration_s: f64,
    /// Delay before the loop starts in seconds, in [0, 5)
    pub delay_s: f64,
    /// Base alpha of the particle color, in [0.2, 0.7)
    pub opacity: f64,
}

/// Transform of a particle at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub dx: f64,
    pub dy: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl ParticleFrame {
    const REST: ParticleFrame = ParticleFrame {
        dx: 0.0,
        dy: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };
}

/// `float` keyframes: (offset, dx, dy, scale, opacity)
const FLOAT_KEYFRAMES: [(f64, f64, f64, f64, f64); 5] = [
    (0.00, 0.0, 0.0, 1.0, 0.5),
    (0.25, 20.0, -30.0, 1.1, 0.8),
    (0.50, -10.0, -50.0, 0.9, 0.6),
    (0.75, -20.0, -20.0, 1.05, 0.7),
    (1.00, 0.0, 0.0, 1.0, 0.5),
];

impl Particle {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            size_px: rng.random::<f64>() * 4.0 + 1.0,
            x_pct: rng.random::<f64>() * 100.0,
            y_pct: rng.random::<f64>() * 100.0,
            duration_s: rng.random::<f64>() * 20.0 + 10.0,
            delay_s: rng.random::<f64>() * 5.0,
            opacity: rng.random::<f64>() * 0.5 + 0.2,
        }
    }

    /// Evaluate the infinite float loop `elapsed_s` seconds after creation
    pub fn frame_at(&self, elapsed_s: f64) -> ParticleFrame {
        let running = elapsed_s - self.delay_s;
        if running < 0.0 || self.duration_s <= 0.0 {
            return ParticleFrame::REST;
        }
        let progress = (running / self.duration_s).fract();

        let segment = FLOAT_KEYFRAMES
            .windows(2)
            .find(|w| progress < w[1].0)
            .unwrap_or(&FLOAT_KEYFRAMES[3..5]);
        let (from, to) = (segment[0], segment[1]);
        let t = Easing::EaseInOut.apply((progress - from.0) / (to.0 - from.0));

        ParticleFrame {
            dx: lerp(from.1, to.1, t),
            dy: lerp(from.2, to.2, t),
            scale: lerp(from.3, to.3, t),
            opacity: lerp(from.4, to.4, t),
        }
    }
}

/// Number of particles for a viewport width
pub fn particle_count(viewport_width: f64, config: &ParticleConfig) -> usize {
    if viewport_width > config.breakpoint {
        config.wide_count
    } else {
        config.narrow_count
    }
}

pub fn generate<R: Rng>(rng: &mut R, viewport_width: f64, config: &ParticleConfig) -> Vec<Particle> {
    if !config.enabled {
        return Vec::new();
    }
    (0..particle_count(viewport_width, config))
        .map(|_| Particle::random(rng))
        .collect()
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
