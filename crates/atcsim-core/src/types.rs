//! Fundamental geometric and simulation types.
//!
//! All angles are navigational: degrees, 0 = North, clockwise positive.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DT, KNOTS_TO_KM_PER_SEC};

/// 2D position in simulation space (kilometers, Cartesian).
/// x = East, y = North, origin at the radar site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Stable, opaque aircraft handle. Never reused within a session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AircraftId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Planar distance to another position (km).
    pub fn range_to(&self, other: &Position) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Bearing to another position in degrees, [0, 360).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        normalize_heading(dx.atan2(dy).to_degrees())
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl std::fmt::Display for AircraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl SimTime {
    /// Seconds per tick at the fixed step.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Wrap an angle into [0, 360).
pub fn normalize_heading(deg: f64) -> f64 {
    let h = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Signed shortest angular difference `target - current`, in (-180, 180].
pub fn heading_delta(current: f64, target: f64) -> f64 {
    let d = (target - current + 540.0).rem_euclid(360.0) - 180.0;
    if d == -180.0 {
        180.0
    } else {
        d
    }
}

/// Unit vector along a navigational bearing (x = sin, y = cos).
pub fn bearing_unit(deg: f64) -> DVec2 {
    let rad = deg.to_radians();
    DVec2::new(rad.sin(), rad.cos())
}

/// Ground velocity in km/s for a heading (degrees) and speed (knots).
pub fn velocity_kms(heading_deg: f64, speed_kts: f64) -> DVec2 {
    bearing_unit(heading_deg) * speed_kts * KNOTS_TO_KM_PER_SEC
}
