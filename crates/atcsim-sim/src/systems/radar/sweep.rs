//! Sweep rotation.

use atcsim_core::types::normalize_heading;

use super::Radar;

/// Rotate the beam by `sweep_rate * dt`, wrapping into [0, 360).
pub fn advance(radar: &mut Radar, dt: f64) {
    if dt <= 0.0 {
        return;
    }
    radar.sweep_angle = normalize_heading(radar.sweep_angle + radar.sweep_rate_deg_per_sec * dt);
}
