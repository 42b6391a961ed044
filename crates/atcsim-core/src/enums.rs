//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Aircraft category. Each category is bound to a fixed performance profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AircraftCategory {
    #[default]
    Standard,
    Hypersonic,
}

/// Coarse behavioral tag shown next to each aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    #[default]
    Cruising,
    FollowingCommand,
    Climbing,
    Descending,
    Holding,
    /// Conflict resolution has taken over the targets.
    Evasive,
    /// A heading clearance was clipped to the aircraft's structural limit.
    TurningLimited,
}

/// Radar detection policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadarStrategy {
    /// Positions are read live; the sweep is cosmetic and no tracks are kept.
    LiveSnapshot,
    /// Targets are only seen when the beam passes, with range-dependent Pd,
    /// and persist until the beam comes round again.
    #[default]
    SweepTracking,
}

/// Per-category performance limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceProfile {
    pub max_speed_kts: f64,
    pub accel_kts_per_sec: f64,
    pub decel_kts_per_sec: f64,
    pub max_climb_fpm: f64,
    pub turn_rate_deg_per_sec: f64,
}

impl AircraftCategory {
    pub fn profile(self) -> PerformanceProfile {
        match self {
            AircraftCategory::Standard => PerformanceProfile {
                max_speed_kts: STANDARD_MAX_SPEED_KTS,
                accel_kts_per_sec: STANDARD_ACCEL_KTS_PER_SEC,
                decel_kts_per_sec: STANDARD_DECEL_KTS_PER_SEC,
                max_climb_fpm: STANDARD_MAX_CLIMB_FPM,
                turn_rate_deg_per_sec: STANDARD_TURN_RATE_DEG_PER_SEC,
            },
            AircraftCategory::Hypersonic => PerformanceProfile {
                max_speed_kts: HYPERSONIC_MAX_SPEED_KTS,
                accel_kts_per_sec: HYPERSONIC_ACCEL_KTS_PER_SEC,
                decel_kts_per_sec: HYPERSONIC_DECEL_KTS_PER_SEC,
                max_climb_fpm: HYPERSONIC_MAX_CLIMB_FPM,
                turn_rate_deg_per_sec: HYPERSONIC_TURN_RATE_DEG_PER_SEC,
            },
        }
    }

    /// Prefix used for generated callsigns.
    pub fn callsign_prefix(self) -> &'static str {
        match self {
            AircraftCategory::Standard => "AC",
            AircraftCategory::Hypersonic => "HX",
        }
    }
}

impl std::str::FromStr for AircraftCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "std" => Ok(AircraftCategory::Standard),
            "hypersonic" | "hyper" => Ok(AircraftCategory::Hypersonic),
            _ => Err(format!("unknown aircraft category: {s}")),
        }
    }
}

impl std::str::FromStr for RadarStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "live" | "live_snapshot" => Ok(RadarStrategy::LiveSnapshot),
            "sweep" | "sweep_tracking" => Ok(RadarStrategy::SweepTracking),
            _ => Err(format!("unknown radar strategy: {s}")),
        }
    }
}
