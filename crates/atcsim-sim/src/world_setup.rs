//! Spawn factory for operator-requested aircraft.
//!
//! Position, heading, speed and altitude are drawn from the seeded RNG within
//! the configured envelope, so the same seed always produces the same traffic.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use atcsim_core::components::FlightState;
use atcsim_core::enums::AircraftCategory;
use atcsim_core::types::{bearing_unit, AircraftId, Position};

use crate::config::SpawnConfig;
use crate::fleet::Fleet;

/// Spawn one aircraft at a random bearing and range from the radar site.
pub fn spawn_aircraft(
    fleet: &mut Fleet,
    rng: &mut ChaCha8Rng,
    category: AircraftCategory,
    config: &SpawnConfig,
) -> AircraftId {
    let envelope = config.envelope(category);

    let bearing: f64 = rng.gen_range(0.0..360.0);
    let range = uniform(rng, config.min_range_km, config.max_range_km);
    let position = Position::from(bearing_unit(bearing) * range);

    let heading: f64 = rng.gen_range(0.0..360.0);
    let speed = uniform(rng, envelope.min_speed_kts, envelope.max_speed_kts);
    let altitude =
        (uniform(rng, envelope.min_altitude_ft, envelope.max_altitude_ft) / 100.0).round() * 100.0;

    let callsign = fleet.next_callsign(category);
    fleet.spawn(
        &callsign,
        category,
        position,
        FlightState {
            heading,
            speed,
            altitude,
            vertical_rate: 0.0,
        },
    )
}

/// `gen_range` panics on an empty range; a degenerate envelope pins the value.
fn uniform(rng: &mut ChaCha8Rng, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atcsim_core::components::Identity;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_within_envelope() {
        let mut fleet = Fleet::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = SpawnConfig::default();

        for _ in 0..50 {
            spawn_aircraft(&mut fleet, &mut rng, AircraftCategory::Standard, &config);
            spawn_aircraft(&mut fleet, &mut rng, AircraftCategory::Hypersonic, &config);
        }
        assert_eq!(fleet.len(), 100);

        let origin = Position::default();
        for (_entity, (identity, pos, state)) in fleet
            .world()
            .query::<(&Identity, &Position, &FlightState)>()
            .iter()
        {
            let env = config.envelope(identity.category);
            let r = origin.range_to(pos);
            assert!(r >= config.min_range_km - 1e-9 && r <= config.max_range_km + 1e-9);
            assert!(state.speed >= env.min_speed_kts && state.speed <= env.max_speed_kts);
            assert!(
                state.altitude >= env.min_altitude_ft && state.altitude <= env.max_altitude_ft
            );
            assert!((0.0..360.0).contains(&state.heading));
            assert_eq!(state.altitude % 100.0, 0.0);
        }
    }

    #[test]
    fn test_callsigns_follow_category() {
        let mut fleet = Fleet::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = SpawnConfig::default();
        spawn_aircraft(&mut fleet, &mut rng, AircraftCategory::Standard, &config);
        spawn_aircraft(&mut fleet, &mut rng, AircraftCategory::Hypersonic, &config);
        assert!(fleet.lookup_callsign("AC101").is_some());
        assert!(fleet.lookup_callsign("HX102").is_some());
    }

    #[test]
    fn test_degenerate_envelope_pins_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(uniform(&mut rng, 100.0, 100.0), 100.0);
    }
}
