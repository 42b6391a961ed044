//! Read-only snapshots handed to display layers after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AircraftId, Position, SimTime};

/// Complete simulation state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub running: bool,
    pub aircraft: Vec<AircraftView>,
    pub radar: RadarView,
    pub conflicts: Vec<ConflictView>,
}

/// Display data for one aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub id: AircraftId,
    pub callsign: String,
    pub category: AircraftCategory,
    pub position: Position,
    /// Degrees, 0 = North.
    pub heading: f64,
    /// Knots.
    pub speed: f64,
    /// Feet.
    pub altitude: f64,
    /// Feet per minute.
    pub vertical_rate: f64,
    pub target_heading: f64,
    pub target_speed: f64,
    pub target_altitude: f64,
    pub behavior: Behavior,
    pub selected: bool,
    /// Bearing from the radar site (degrees).
    pub bearing: f64,
    /// Range from the radar site (km).
    pub range: f64,
    /// Only reported for hypersonic aircraft.
    pub mach: Option<f64>,
    /// Oldest first.
    pub trail: Vec<Position>,
}

/// Radar status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarView {
    pub strategy: RadarStrategy,
    pub site: Position,
    /// Km.
    pub range: f64,
    /// Current sweep angle (degrees) for the PPI sweep line.
    pub sweep_angle: f64,
    /// `None` in live-snapshot mode.
    pub tracked_targets: Option<Vec<TrackView>>,
}

/// A target as last painted by the sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackView {
    pub id: AircraftId,
    pub callsign: String,
    pub position: Position,
    pub altitude: f64,
    pub heading: f64,
    pub speed: f64,
    /// Simulation time of the last detection (seconds).
    pub last_seen_secs: f64,
}

/// A predicted loss of separation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictView {
    pub id_a: AircraftId,
    pub id_b: AircraftId,
    /// Seconds until closest approach.
    pub time_to_approach: f64,
    /// Predicted lateral distance at closest approach (km).
    pub distance_at_approach: f64,
}
