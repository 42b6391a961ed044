//! Rotating surveillance radar.
//!
//! The radar owns its sweep angle and, in sweep-tracking mode, the map of
//! targets it has painted. Sweep advance and detection run as separate steps
//! each tick, in that order.

pub mod detection;
pub mod sweep;

use std::collections::HashMap;

use atcsim_core::constants::{RADAR_MAX_RANGE_KM, RADAR_MIN_RANGE_KM};
use atcsim_core::enums::RadarStrategy;
use atcsim_core::types::{AircraftId, Position};

use crate::config::RadarConfig;

/// What the radar saw of one aircraft at the moment it was painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: AircraftId,
    pub callsign: String,
    pub position: Position,
    pub altitude: f64,
    pub heading: f64,
    pub speed: f64,
}

/// A painted target kept alive between sweeps.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarTrack {
    pub contact: Contact,
    /// Simulation time of the last successful detection (seconds).
    pub last_seen_secs: f64,
}

#[derive(Debug, Clone)]
pub struct Radar {
    site: Position,
    range_km: f64,
    sweep_angle: f64,
    strategy: RadarStrategy,
    sweep_rate_deg_per_sec: f64,
    beam_width_deg: f64,
    flicker_penalty: f64,
    clutter_floor: f64,
    tracks: HashMap<AircraftId, RadarTrack>,
}

impl Radar {
    pub fn new(config: &RadarConfig) -> Self {
        Self {
            site: Position::default(),
            range_km: config.range_km.clamp(RADAR_MIN_RANGE_KM, RADAR_MAX_RANGE_KM),
            sweep_angle: 0.0,
            strategy: config.strategy,
            sweep_rate_deg_per_sec: config.sweep_rate_deg_per_sec,
            beam_width_deg: config.beam_width_deg,
            flicker_penalty: config.flicker_penalty,
            clutter_floor: config.clutter_floor,
            tracks: HashMap::new(),
        }
    }

    pub fn site(&self) -> Position {
        self.site
    }

    pub fn range_km(&self) -> f64 {
        self.range_km
    }

    /// Set the range, clamped to the supported limits. Returns the value applied.
    ///
    /// Tracks whose last painted position falls outside the new range are
    /// dropped at once rather than at the next detection pass.
    pub fn set_range(&mut self, km: f64) -> f64 {
        let km = if km.is_nan() { self.range_km } else { km };
        self.range_km = km.clamp(RADAR_MIN_RANGE_KM, RADAR_MAX_RANGE_KM);

        let (site, range) = (self.site, self.range_km);
        self.tracks
            .retain(|_, track| site.range_to(&track.contact.position) <= range);
        self.range_km
    }

    pub fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    pub fn strategy(&self) -> RadarStrategy {
        self.strategy
    }

    pub fn beam_width_deg(&self) -> f64 {
        self.beam_width_deg
    }

    /// Seconds for one full rotation; also the track persistence limit.
    pub fn rotation_period(&self) -> f64 {
        360.0 / self.sweep_rate_deg_per_sec
    }

    pub fn track(&self, id: AircraftId) -> Option<&RadarTrack> {
        self.tracks.get(&id)
    }

    /// Tracks in id order.
    pub fn tracks(&self) -> Vec<&RadarTrack> {
        let mut tracks: Vec<&RadarTrack> = self.tracks.values().collect();
        tracks.sort_by_key(|t| t.contact.id);
        tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn forget(&mut self, id: AircraftId) {
        self.tracks.remove(&id);
    }
}
