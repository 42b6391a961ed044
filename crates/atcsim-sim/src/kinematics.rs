//! Aircraft kinematic model.
//!
//! Pure functions that steer heading, speed and altitude toward the cleared
//! targets under the category's rate limits, then integrate position with
//! forward Euler. No ECS dependency; operates on plain data.
//!
//! Forward Euler is exact for straight flight but cuts corners in turns; the
//! error grows with speed × dt, so hypersonic aircraft at large steps drift
//! noticeably from the true arc.

use glam::DVec2;

use atcsim_core::components::{Clearance, FlightState};
use atcsim_core::enums::PerformanceProfile;
use atcsim_core::types::{heading_delta, normalize_heading, velocity_kms, Position};

/// Input to the kinematic step for a single aircraft.
pub struct KinematicContext {
    pub position: Position,
    pub state: FlightState,
    pub clearance: Clearance,
    pub profile: PerformanceProfile,
    /// Wind contribution to ground velocity (km/s).
    pub wind: DVec2,
}

/// Output of the kinematic step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicUpdate {
    pub position: Position,
    pub state: FlightState,
}

/// Turn from `current` toward `target` by at most `turn_rate * dt` degrees,
/// the short way round. Snaps to the target once within one step.
pub fn turn_toward(current: f64, target: f64, turn_rate: f64, dt: f64) -> f64 {
    let d = heading_delta(current, target);
    let max_step = turn_rate * dt;
    if d.abs() <= max_step {
        normalize_heading(target)
    } else {
        normalize_heading(current + d.signum() * max_step)
    }
}

/// Rate-limited approach: move `current` toward `target` by at most
/// `rate_up * dt` when increasing or `rate_down * dt` when decreasing.
pub fn approach(current: f64, target: f64, rate_up: f64, rate_down: f64, dt: f64) -> f64 {
    let delta = target - current;
    let rate = if delta > 0.0 { rate_up } else { rate_down };
    let max_step = rate * dt;
    if delta.abs() <= max_step {
        // snap exactly; current + delta can miss target by an ulp
        target
    } else {
        current + delta.signum() * max_step
    }
}

/// Advance one aircraft by `dt` seconds.
pub fn step(ctx: &KinematicContext, dt: f64) -> KinematicUpdate {
    if dt <= 0.0 || !dt.is_finite() {
        return KinematicUpdate {
            position: ctx.position,
            state: FlightState {
                vertical_rate: 0.0,
                ..ctx.state
            },
        };
    }

    let profile = &ctx.profile;
    let state = &ctx.state;

    let heading = turn_toward(
        state.heading,
        ctx.clearance.heading,
        profile.turn_rate_deg_per_sec,
        dt,
    );

    let speed = approach(
        state.speed,
        ctx.clearance.speed,
        profile.accel_kts_per_sec,
        profile.decel_kts_per_sec,
        dt,
    )
    .max(0.0);

    let climb_fps = profile.max_climb_fpm / 60.0;
    let altitude = approach(
        state.altitude,
        ctx.clearance.altitude,
        climb_fps,
        climb_fps,
        dt,
    )
    .max(0.0);

    let vertical_rate = (altitude - state.altitude) / (dt / 60.0);

    let ground_velocity = velocity_kms(heading, speed) + ctx.wind;
    let position = Position::from(ctx.position.as_vec() + ground_velocity * dt);

    KinematicUpdate {
        position,
        state: FlightState {
            heading,
            speed,
            altitude,
            vertical_rate,
        },
    }
}

/// True once the aircraft sits exactly on all of its targets.
pub fn targets_reached(state: &FlightState, clearance: &Clearance) -> bool {
    state.heading == normalize_heading(clearance.heading)
        && state.speed == clearance.speed
        && state.altitude == clearance.altitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use atcsim_core::constants::{DT, KNOTS_TO_KM_PER_SEC};
    use atcsim_core::enums::AircraftCategory;

    fn context(state: FlightState, clearance: Clearance) -> KinematicContext {
        KinematicContext {
            position: Position::new(0.0, 0.0),
            state,
            clearance,
            profile: AircraftCategory::Standard.profile(),
            wind: DVec2::ZERO,
        }
    }

    #[test]
    fn test_turn_never_exceeds_rate_or_overshoots() {
        let rate = 3.0;
        for &(current, target) in &[
            (0.0, 90.0),
            (350.0, 10.0),
            (10.0, 350.0),
            (90.0, 270.0),
            (180.0, 181.0),
            (0.0, 0.0),
        ] {
            for &dt in &[0.0, DT, 0.5, 2.0, 10.0] {
                let new = turn_toward(current, target, rate, dt);
                let moved = heading_delta(current, new).abs();
                assert!(
                    moved <= rate * dt + 1e-9,
                    "turn {current}->{target} dt={dt} moved {moved}"
                );
                let before = heading_delta(current, target).abs();
                let after = heading_delta(new, target).abs();
                assert!(after <= before + 1e-9, "overshoot {current}->{target}");
                assert!((0.0..360.0).contains(&new));
            }
        }
    }

    #[test]
    fn test_turn_takes_short_way() {
        // 350 -> 10 should go through north (increasing heading).
        let h = turn_toward(350.0, 10.0, 3.0, 1.0);
        assert!((h - 353.0).abs() < 1e-9);
        let h = turn_toward(5.0, 345.0, 3.0, 1.0);
        assert!((h - 2.0).abs() < 1e-9);
        let h = turn_toward(1.0, 358.0, 3.0, 1.0);
        assert!((h - 358.0).abs() < 1e-9, "snap across north, got {h}");
    }

    #[test]
    fn test_approach_rate_limited_and_converges() {
        let mut speed = 250.0;
        let mut ticks = 0;
        while speed != 300.0 {
            let next = approach(speed, 300.0, 5.0, 4.0, DT);
            assert!((next - speed).abs() <= 5.0 * DT + 1e-12);
            speed = next;
            ticks += 1;
            assert!(ticks < 1000, "speed never converged");
        }
        // Idempotent once reached.
        assert_eq!(approach(speed, 300.0, 5.0, 4.0, DT), 300.0);

        let slower = approach(300.0, 200.0, 5.0, 4.0, 1.0);
        assert!((slower - 296.0).abs() < 1e-12, "decel rate applies when slowing");
    }

    #[test]
    fn test_step_climbs_at_profile_rate_and_reports_vs() {
        let state = FlightState {
            heading: 0.0,
            speed: 300.0,
            altitude: 10_000.0,
            vertical_rate: 0.0,
        };
        let clearance = Clearance {
            altitude: 20_000.0,
            ..Clearance::holding(&state)
        };
        let update = step(&context(state, clearance), 1.0);
        assert!((update.state.altitude - 10_050.0).abs() < 1e-9);
        assert!((update.state.vertical_rate - 3000.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_integrates_position_along_heading() {
        let state = FlightState {
            heading: 90.0,
            speed: 360.0,
            altitude: 10_000.0,
            vertical_rate: 0.0,
        };
        let update = step(&context(state, Clearance::holding(&state)), 10.0);
        let expected = 360.0 * KNOTS_TO_KM_PER_SEC * 10.0;
        assert!((update.position.x - expected).abs() < 1e-9);
        assert!(update.position.y.abs() < 1e-9);
        assert_eq!(update.state.vertical_rate, 0.0);
    }

    #[test]
    fn test_wind_drifts_position() {
        let state = FlightState {
            heading: 0.0,
            speed: 0.0,
            altitude: 0.0,
            vertical_rate: 0.0,
        };
        let mut ctx = context(state, Clearance::holding(&state));
        ctx.wind = DVec2::new(0.01, 0.0);
        let update = step(&ctx, 10.0);
        assert!((update.position.x - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_zero_dt_is_a_no_op() {
        let state = FlightState {
            heading: 45.0,
            speed: 300.0,
            altitude: 5_000.0,
            vertical_rate: 1200.0,
        };
        let clearance = Clearance {
            heading: 90.0,
            ..Clearance::holding(&state)
        };
        let update = step(&context(state, clearance), 0.0);
        assert_eq!(update.position, Position::new(0.0, 0.0));
        assert_eq!(update.state.heading, 45.0);
        assert_eq!(update.state.vertical_rate, 0.0);
    }

    #[test]
    fn test_targets_reached() {
        let state = FlightState {
            heading: 0.0,
            speed: 300.0,
            altitude: 5_000.0,
            vertical_rate: 0.0,
        };
        let mut clearance = Clearance::holding(&state);
        assert!(targets_reached(&state, &clearance));
        clearance.heading = 360.0;
        assert!(targets_reached(&state, &clearance));
        clearance.altitude = 6_000.0;
        assert!(!targets_reached(&state, &clearance));
    }
}
