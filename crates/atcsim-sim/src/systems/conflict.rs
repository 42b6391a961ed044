//! Pairwise separation prediction and the evasive response to it.
//!
//! Every tick is evaluated from scratch: aircraft are sampled, all pairs are
//! projected along straight-line tracks to their closest point of approach,
//! and each aircraft in a flagged pair steers away from the other.

use glam::DVec2;
use tracing::debug;

use atcsim_core::components::FlightState;
use atcsim_core::enums::Behavior;
use atcsim_core::state::ConflictView;
use atcsim_core::types::{normalize_heading, velocity_kms, AircraftId, Position};

use crate::config::SeparationConfig;
use crate::fleet::Fleet;

/// What the detector needs to know about one aircraft.
#[derive(Debug, Clone, Copy)]
pub struct AircraftSample {
    pub id: AircraftId,
    pub position: Position,
    /// Air velocity from heading and speed (km/s); wind is not included.
    pub velocity: DVec2,
    pub altitude: f64,
}

/// Closest point of approach for a pair moving in straight lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    /// Seconds from now; negative if the closest point is behind us.
    pub time: f64,
    /// Planar distance at that time (km).
    pub distance: f64,
}

/// Target change applied to one aircraft of a conflicting pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvasiveManeuver {
    pub id: AircraftId,
    pub heading: f64,
    pub altitude: f64,
}

/// Sample every aircraft, in id order.
pub fn collect_samples(fleet: &Fleet) -> Vec<AircraftSample> {
    let mut samples: Vec<AircraftSample> = fleet
        .world()
        .query::<(&AircraftId, &Position, &FlightState)>()
        .iter()
        .map(|(_, (id, pos, state))| AircraftSample {
            id: *id,
            position: *pos,
            velocity: velocity_kms(state.heading, state.speed),
            altitude: state.altitude,
        })
        .collect();
    samples.sort_by_key(|s| s.id);
    samples
}

/// Solve for the closest point of approach. `None` when the relative velocity
/// is exactly zero, since such a pair never converges.
pub fn closest_approach(a: &AircraftSample, b: &AircraftSample) -> Option<Approach> {
    let rel_pos = b.position.as_vec() - a.position.as_vec();
    let rel_vel = b.velocity - a.velocity;
    let speed_sq = rel_vel.length_squared();
    if speed_sq == 0.0 {
        return None;
    }
    let time = -rel_pos.dot(rel_vel) / speed_sq;
    let distance = (rel_pos + rel_vel * time).length();
    Some(Approach { time, distance })
}

/// Every unordered pair predicted to lose separation within the lookahead.
pub fn detect(samples: &[AircraftSample], config: &SeparationConfig) -> Vec<ConflictView> {
    let mut conflicts = Vec::new();
    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            let Some(approach) = closest_approach(a, b) else {
                continue;
            };
            if !approach.time.is_finite()
                || approach.time < 0.0
                || approach.time > config.lookahead_secs
            {
                continue;
            }
            let vertical = (a.altitude - b.altitude).abs();
            if approach.distance < config.lateral_km && vertical < config.vertical_ft {
                conflicts.push(ConflictView {
                    id_a: a.id,
                    id_b: b.id,
                    time_to_approach: approach.time,
                    distance_at_approach: approach.distance,
                });
            }
        }
    }
    conflicts
}

/// Each aircraft turns perpendicular to the bearing of the other and climbs
/// by the configured offset above its current altitude.
pub fn plan_evasive(
    samples: &[AircraftSample],
    conflicts: &[ConflictView],
    climb_ft: f64,
) -> Vec<EvasiveManeuver> {
    let find = |id: AircraftId| samples.iter().find(|s| s.id == id);
    let mut maneuvers = Vec::with_capacity(conflicts.len() * 2);
    for conflict in conflicts {
        let (Some(a), Some(b)) = (find(conflict.id_a), find(conflict.id_b)) else {
            continue;
        };
        for (me, other) in [(a, b), (b, a)] {
            maneuvers.push(EvasiveManeuver {
                id: me.id,
                heading: normalize_heading(me.position.bearing_to(&other.position) + 90.0),
                altitude: me.altitude + climb_ft,
            });
        }
    }
    maneuvers
}

/// Write the manoeuvres into the aircraft clearances. This bypasses command
/// validation; the later manoeuvre wins when an aircraft is in several pairs.
pub fn resolve(fleet: &mut Fleet, maneuvers: &[EvasiveManeuver]) {
    for maneuver in maneuvers {
        let Some(ctl) = fleet.control_surface(maneuver.id) else {
            continue;
        };
        ctl.clearance.heading = maneuver.heading;
        ctl.clearance.altitude = maneuver.altitude;
        *ctl.behavior = Behavior::Evasive;
        debug!(
            aircraft = %maneuver.id,
            heading = maneuver.heading,
            altitude = maneuver.altitude,
            "evasive manoeuvre"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atcsim_core::constants::KNOTS_TO_KM_PER_SEC;

    fn sample(id: u32, x: f64, y: f64, heading: f64, speed: f64, altitude: f64) -> AircraftSample {
        AircraftSample {
            id: AircraftId(id),
            position: Position::new(x, y),
            velocity: velocity_kms(heading, speed),
            altitude,
        }
    }

    #[test]
    fn test_head_on_cpa() {
        // 20 km apart, closing at 2 x 360 kts.
        let a = sample(0, 0.0, 0.0, 90.0, 360.0, 10_000.0);
        let b = sample(1, 20.0, 0.0, 270.0, 360.0, 10_000.0);
        let approach = closest_approach(&a, &b).unwrap();
        let closing = 2.0 * 360.0 * KNOTS_TO_KM_PER_SEC;
        assert!((approach.time - 20.0 / closing).abs() < 1e-6);
        assert!(approach.distance < 1e-6);
    }

    #[test]
    fn test_parallel_tracks_never_flagged() {
        let config = SeparationConfig::default();
        for gap in [0.5, 5.0, 50.0] {
            let samples = [
                sample(0, 0.0, 0.0, 45.0, 400.0, 10_000.0),
                sample(1, gap, 0.0, 45.0, 400.0, 10_000.0),
            ];
            assert!(closest_approach(&samples[0], &samples[1]).is_none());
            assert!(detect(&samples, &config).is_empty());
        }
    }

    #[test]
    fn test_vertical_separation_suppresses_conflict() {
        let config = SeparationConfig::default();
        let samples = [
            sample(0, 0.0, 0.0, 90.0, 360.0, 10_000.0),
            sample(1, 20.0, 0.0, 270.0, 360.0, 11_000.0),
        ];
        assert!(detect(&samples, &config).is_empty());
    }

    #[test]
    fn test_detection_is_symmetric() {
        let config = SeparationConfig::default();
        let a = sample(0, 0.0, 0.0, 80.0, 300.0, 10_000.0);
        let b = sample(1, 15.0, 3.0, 260.0, 420.0, 10_500.0);
        let forward = detect(&[a, b], &config);
        let backward = detect(&[b, a], &config);
        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert!((forward[0].time_to_approach - backward[0].time_to_approach).abs() < 1e-9);
        assert!(
            (forward[0].distance_at_approach - backward[0].distance_at_approach).abs() < 1e-9
        );
    }

    #[test]
    fn test_beyond_lookahead_ignored() {
        let config = SeparationConfig {
            lookahead_secs: 10.0,
            ..Default::default()
        };
        let samples = [
            sample(0, 0.0, 0.0, 90.0, 360.0, 10_000.0),
            sample(1, 100.0, 0.0, 270.0, 360.0, 10_000.0),
        ];
        assert!(detect(&samples, &config).is_empty());
    }

    #[test]
    fn test_evasive_turns_away_and_climbs() {
        let a = sample(0, 0.0, 0.0, 90.0, 360.0, 10_000.0);
        let b = sample(1, 20.0, 0.0, 270.0, 360.0, 10_000.0);
        let conflicts = detect(&[a, b], &SeparationConfig::default());
        let plan = plan_evasive(&[a, b], &conflicts, 1_000.0);
        assert_eq!(plan.len(), 2);
        // a sees b due east, so it turns south; b sees a due west, so it turns north.
        assert!((plan[0].heading - 180.0).abs() < 1e-9);
        assert!(plan[1].heading.abs() < 1e-9 || (plan[1].heading - 360.0).abs() < 1e-9);
        assert_eq!(plan[0].altitude, 11_000.0);
        assert_eq!(plan[1].altitude, 11_000.0);
    }
}
