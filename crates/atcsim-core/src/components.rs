//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Behavior lives in the sim crate's systems.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TRAIL_POINTS, TRAIL_MIN_SPACING_KM};
use crate::enums::AircraftCategory;
use crate::types::Position;

/// Who the aircraft is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Upper-cased callsign, unique within the session.
    pub callsign: String,
    pub category: AircraftCategory,
}

/// Current kinematic state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// Degrees, [0, 360).
    pub heading: f64,
    /// Knots.
    pub speed: f64,
    /// Feet.
    pub altitude: f64,
    /// Feet per minute, derived from the last tick's altitude change.
    pub vertical_rate: f64,
}

/// Target state the aircraft is steering towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Clearance {
    pub heading: f64,
    pub speed: f64,
    pub altitude: f64,
    /// Stored for display; kinematics does not steer to it.
    pub waypoint: Option<Position>,
}

/// Past positions for trail rendering, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    pub positions: VecDeque<Position>,
}

/// Marks the aircraft currently selected by the operator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Selected;

impl Clearance {
    /// A clearance that keeps the aircraft doing exactly what it is doing.
    pub fn holding(state: &FlightState) -> Self {
        Self {
            heading: state.heading,
            speed: state.speed,
            altitude: state.altitude,
            waypoint: None,
        }
    }
}

impl Trail {
    /// Append `pos` if it is far enough from the newest sample, dropping the
    /// oldest samples beyond capacity. Returns whether a sample was taken.
    pub fn record(&mut self, pos: Position) -> bool {
        if let Some(last) = self.positions.back() {
            if last.range_to(&pos) < TRAIL_MIN_SPACING_KM {
                return false;
            }
        }
        self.positions.push_back(pos);
        while self.positions.len() > MAX_TRAIL_POINTS {
            self.positions.pop_front();
        }
        true
    }
}
