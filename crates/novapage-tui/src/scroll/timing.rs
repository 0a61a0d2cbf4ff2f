//! Progress and interpolation on the page clock

use novapage_core::timer::Millis;

/// Fraction of `duration` elapsed between `start` and `now`, in [0, 1]
#[inline]
pub fn progress(start: Millis, duration: Millis, now: Millis) -> f64 {
    if duration == 0 {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    (elapsed as f64 / duration as f64).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Millis, duration: Millis, now: Millis) -> bool {
    now.saturating_sub(start) >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate between two row positions, rounding to the nearest row
#[inline]
pub fn lerp_rows(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}
