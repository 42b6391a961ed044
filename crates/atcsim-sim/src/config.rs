//! Simulation configuration.
//!
//! Every section has defaults, so a config file only needs the fields it
//! wants to change. Out-of-range values are clamped, never rejected.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use atcsim_core::constants::*;
use atcsim_core::enums::{AircraftCategory, RadarStrategy};
use atcsim_core::types::velocity_kms;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub radar: RadarConfig,
    pub separation: SeparationConfig,
    pub wind: WindConfig,
    pub spawn: SpawnConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub strategy: RadarStrategy,
    pub range_km: f64,
    pub sweep_rate_deg_per_sec: f64,
    pub beam_width_deg: f64,
    pub flicker_penalty: f64,
    pub clutter_floor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationConfig {
    pub lookahead_secs: f64,
    pub lateral_km: f64,
    pub vertical_ft: f64,
    pub evasive_climb_ft: f64,
}

/// Uniform wind. `direction_deg` is the bearing the air mass moves toward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub speed_kts: f64,
    pub direction_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_range_km: f64,
    pub max_range_km: f64,
    pub standard: SpawnEnvelope,
    pub hypersonic: SpawnEnvelope,
}

/// Altitude and speed bounds for freshly spawned aircraft of one category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnEnvelope {
    pub min_altitude_ft: f64,
    pub max_altitude_ft: f64,
    pub min_speed_kts: f64,
    pub max_speed_kts: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            radar: RadarConfig::default(),
            separation: SeparationConfig::default(),
            wind: WindConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            strategy: RadarStrategy::default(),
            range_km: RADAR_DEFAULT_RANGE_KM,
            sweep_rate_deg_per_sec: RADAR_SWEEP_RATE_DEG_PER_SEC,
            beam_width_deg: RADAR_BEAM_WIDTH_DEG,
            flicker_penalty: RADAR_FLICKER_PENALTY,
            clutter_floor: RADAR_CLUTTER_FLOOR,
        }
    }
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            lookahead_secs: CONFLICT_LOOKAHEAD_SECS,
            lateral_km: LATERAL_SEPARATION_KM,
            vertical_ft: VERTICAL_SEPARATION_FT,
            evasive_climb_ft: EVASIVE_CLIMB_FT,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_range_km: SPAWN_MIN_RANGE_KM,
            max_range_km: SPAWN_MAX_RANGE_KM,
            standard: SpawnEnvelope {
                min_altitude_ft: 5_000.0,
                max_altitude_ft: 35_000.0,
                min_speed_kts: 250.0,
                max_speed_kts: 480.0,
            },
            hypersonic: SpawnEnvelope {
                min_altitude_ft: 50_000.0,
                max_altitude_ft: 80_000.0,
                min_speed_kts: 1_500.0,
                max_speed_kts: 3_000.0,
            },
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: SimConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp values that would otherwise break the model. Non-finite values
    /// fall back to their defaults.
    pub fn sanitized(mut self) -> Self {
        let radar = RadarConfig::default();
        let separation = SeparationConfig::default();

        self.time_scale = finite_or(self.time_scale, 1.0).clamp(0.0, 4.0);
        self.radar.range_km = finite_or(self.radar.range_km, radar.range_km)
            .clamp(RADAR_MIN_RANGE_KM, RADAR_MAX_RANGE_KM);
        self.radar.beam_width_deg =
            finite_or(self.radar.beam_width_deg, radar.beam_width_deg).clamp(0.1, 360.0);
        // The beam may move at most half its width per tick, so no bearing
        // slips between two consecutive beam positions.
        let max_sweep_rate = (self.radar.beam_width_deg / 2.0 / DT).max(1.0);
        self.radar.sweep_rate_deg_per_sec =
            finite_or(self.radar.sweep_rate_deg_per_sec, radar.sweep_rate_deg_per_sec)
                .clamp(1.0, max_sweep_rate);
        self.radar.flicker_penalty =
            finite_or(self.radar.flicker_penalty, radar.flicker_penalty).clamp(0.0, 1.0);
        self.radar.clutter_floor =
            finite_or(self.radar.clutter_floor, radar.clutter_floor).clamp(0.0, 1.0);

        self.separation.lookahead_secs =
            finite_or(self.separation.lookahead_secs, separation.lookahead_secs).max(0.0);
        self.separation.lateral_km =
            finite_or(self.separation.lateral_km, separation.lateral_km).max(0.0);
        self.separation.vertical_ft =
            finite_or(self.separation.vertical_ft, separation.vertical_ft).max(0.0);
        self.separation.evasive_climb_ft =
            finite_or(self.separation.evasive_climb_ft, separation.evasive_climb_ft);

        if !self.wind.speed_kts.is_finite() || !self.wind.direction_deg.is_finite() {
            self.wind = WindConfig::default();
        }

        if self.spawn.max_range_km < self.spawn.min_range_km {
            std::mem::swap(&mut self.spawn.min_range_km, &mut self.spawn.max_range_km);
        }
        self
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

impl WindConfig {
    /// Wind as a ground-velocity contribution (km/s).
    pub fn velocity_kms(&self) -> DVec2 {
        velocity_kms(self.direction_deg, self.speed_kts)
    }
}

impl SpawnConfig {
    pub fn envelope(&self, category: AircraftCategory) -> SpawnEnvelope {
        match category {
            AircraftCategory::Standard => self.standard,
            AircraftCategory::Hypersonic => self.hypersonic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "seed": 7, "radar": { "range_km": 120 } }"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.radar.range_km, 120.0);
        assert_eq!(config.radar.strategy, RadarStrategy::SweepTracking);
        assert_eq!(config.separation.vertical_ft, VERTICAL_SEPARATION_FT);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let config = SimConfig::from_json(
            r#"{ "time_scale": 10, "radar": { "range_km": 9000, "strategy": "live_snapshot" } }"#,
        )
        .unwrap();
        assert_eq!(config.time_scale, 4.0);
        assert_eq!(config.radar.range_km, RADAR_MAX_RANGE_KM);
        assert_eq!(config.radar.strategy, RadarStrategy::LiveSnapshot);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(SimConfig::from_json("{ seed: }").is_err());
    }

    #[test]
    fn test_sweep_rate_limited_by_beam_width() {
        let config = SimConfig::from_json(
            r#"{ "radar": { "sweep_rate_deg_per_sec": 100000, "beam_width_deg": 6 } }"#,
        )
        .unwrap();
        let step = config.radar.sweep_rate_deg_per_sec * DT;
        assert!(step < config.radar.beam_width_deg, "beam step {step} leaves gaps");
        assert!((config.radar.sweep_rate_deg_per_sec - 90.0).abs() < 1e-9);

        let slow = SimConfig::from_json(r#"{ "radar": { "sweep_rate_deg_per_sec": 0 } }"#)
            .unwrap();
        assert_eq!(slow.radar.sweep_rate_deg_per_sec, 1.0);
    }

    #[test]
    fn test_non_finite_values_fall_back() {
        let config = SimConfig {
            time_scale: f64::NAN,
            wind: WindConfig {
                speed_kts: f64::INFINITY,
                direction_deg: 90.0,
            },
            radar: RadarConfig {
                range_km: f64::NAN,
                sweep_rate_deg_per_sec: f64::NAN,
                ..Default::default()
            },
            separation: SeparationConfig {
                lookahead_secs: f64::NEG_INFINITY,
                ..Default::default()
            },
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.wind.speed_kts, 0.0);
        assert_eq!(config.wind.velocity_kms(), DVec2::ZERO);
        assert_eq!(config.radar.range_km, RADAR_DEFAULT_RANGE_KM);
        assert_eq!(config.radar.sweep_rate_deg_per_sec, RADAR_SWEEP_RATE_DEG_PER_SEC);
        assert_eq!(config.separation.lookahead_secs, CONFLICT_LOOKAHEAD_SECS);
    }

    #[test]
    fn test_wind_vector_points_downwind() {
        let wind = WindConfig {
            speed_kts: 100.0,
            direction_deg: 90.0,
        };
        let v = wind.velocity_kms();
        assert!(v.x > 0.0);
        assert!(v.y.abs() < 1e-12);
    }
}
