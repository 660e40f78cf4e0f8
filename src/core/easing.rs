//! Easing curves and a small time-based tween.

use std::time::Duration;

/// Decelerating cubic.  Used for content fades and slides.
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Smooth S-curve.  Used for the page entrance after the intro.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

/// Angular frequency of the layout spring: `sqrt(stiffness / mass)` for
/// stiffness 250 and mass 0.8.  Damping 30 makes it (just over) critical.
pub const LAYOUT_SPRING_OMEGA: f64 = 17.677_669_529_663_69;

/// Step response of a critically damped spring after `elapsed`,
/// `1 - (1 + ωt)·e^(-ωt)`.  Never overshoots.
pub fn spring_response(elapsed: Duration, omega: f64) -> f64 {
    let wt = omega * elapsed.as_secs_f64();
    (1.0 - (1.0 + wt) * (-wt).exp()).clamp(0.0, 1.0)
}

/// Spring response normalised so that it reaches exactly 1.0 at `total`.
pub fn spring_progress(elapsed: Duration, total: Duration, omega: f64) -> f64 {
    if total.is_zero() || elapsed >= total {
        return 1.0;
    }
    let end = spring_response(total, omega);
    if end <= f64::EPSILON {
        return 0.0;
    }
    (spring_response(elapsed, omega) / end).clamp(0.0, 1.0)
}

/// A fixed-length animation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    pub start: Duration,
    pub duration: Duration,
}

impl Tween {
    pub fn new(start: Duration, duration: Duration) -> Self {
        Self { start, duration }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }
}
