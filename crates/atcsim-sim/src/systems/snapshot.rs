//! Snapshot system: queries the world and radar and builds a `SimSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use atcsim_core::components::*;
use atcsim_core::constants::SPEED_OF_SOUND_KTS;
use atcsim_core::enums::{AircraftCategory, Behavior, RadarStrategy};
use atcsim_core::state::*;
use atcsim_core::types::{AircraftId, Position, SimTime};

use crate::fleet::Fleet;
use crate::systems::radar::Radar;

/// Build a complete snapshot of the current state.
pub fn build_snapshot(
    fleet: &Fleet,
    radar: &Radar,
    time: &SimTime,
    running: bool,
    conflicts: &[ConflictView],
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        running,
        aircraft: build_aircraft(fleet.world(), &radar.site()),
        radar: build_radar(radar),
        conflicts: conflicts.to_vec(),
    }
}

/// Display data for every aircraft, in id order.
pub fn build_aircraft(world: &World, site: &Position) -> Vec<AircraftView> {
    let mut query = world.query::<(
        &AircraftId,
        &Identity,
        &Position,
        &FlightState,
        &Clearance,
        &Behavior,
        &Trail,
        Option<&Selected>,
    )>();

    let mut aircraft: Vec<AircraftView> = query
        .iter()
        .map(
            |(_, (id, identity, pos, state, clearance, behavior, trail, selected))| AircraftView {
                id: *id,
                callsign: identity.callsign.clone(),
                category: identity.category,
                position: *pos,
                heading: state.heading,
                speed: state.speed,
                altitude: state.altitude,
                vertical_rate: state.vertical_rate,
                target_heading: clearance.heading,
                target_speed: clearance.speed,
                target_altitude: clearance.altitude,
                behavior: *behavior,
                selected: selected.is_some(),
                bearing: site.bearing_to(pos),
                range: site.range_to(pos),
                mach: (identity.category == AircraftCategory::Hypersonic)
                    .then(|| state.speed / SPEED_OF_SOUND_KTS),
                trail: trail.positions.iter().copied().collect(),
            },
        )
        .collect();

    aircraft.sort_by_key(|a| a.id);
    aircraft
}

/// Radar status; tracked targets only exist in sweep-tracking mode.
pub fn build_radar(radar: &Radar) -> RadarView {
    let tracked_targets = match radar.strategy() {
        RadarStrategy::LiveSnapshot => None,
        RadarStrategy::SweepTracking => Some(
            radar
                .tracks()
                .into_iter()
                .map(|track| TrackView {
                    id: track.contact.id,
                    callsign: track.contact.callsign.clone(),
                    position: track.contact.position,
                    altitude: track.contact.altitude,
                    heading: track.contact.heading,
                    speed: track.contact.speed,
                    last_seen_secs: track.last_seen_secs,
                })
                .collect(),
        ),
    };

    RadarView {
        strategy: radar.strategy(),
        site: radar.site(),
        range: radar.range_km(),
        sweep_angle: radar.sweep_angle(),
        tracked_targets,
    }
}
