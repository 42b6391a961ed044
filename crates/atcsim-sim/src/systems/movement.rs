//! Kinematic integration system.
//!
//! Steps every aircraft toward its clearance, settles transient behavior tags
//! once the targets are reached, and samples trails.

use glam::DVec2;
use hecs::World;

use atcsim_core::components::{Clearance, FlightState, Identity, Trail};
use atcsim_core::enums::Behavior;
use atcsim_core::types::Position;

use crate::kinematics::{self, KinematicContext};

/// Advance every aircraft by `dt` seconds.
pub fn run(world: &mut World, wind: DVec2, dt: f64) {
    for (_entity, (identity, pos, state, clearance, behavior)) in world.query_mut::<(
        &Identity,
        &mut Position,
        &mut FlightState,
        &Clearance,
        &mut Behavior,
    )>() {
        let ctx = KinematicContext {
            position: *pos,
            state: *state,
            clearance: *clearance,
            profile: identity.category.profile(),
            wind,
        };
        let update = kinematics::step(&ctx, dt);
        *pos = update.position;
        *state = update.state;

        if *behavior != Behavior::Holding && kinematics::targets_reached(state, clearance) {
            *behavior = Behavior::Cruising;
        }
    }
}

/// Append trail samples for aircraft that have moved far enough.
pub fn update_trails(world: &mut World) {
    for (_entity, (pos, trail)) in world.query_mut::<(&Position, &mut Trail)>() {
        trail.record(*pos);
    }
}
