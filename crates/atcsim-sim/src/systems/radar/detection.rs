//! Radar detection system.
//!
//! In sweep-tracking mode each aircraft inside range and inside the beam gets
//! one Bernoulli draw per tick against a detection probability that falls off
//! linearly with range. Painted targets persist for one rotation period; a
//! target that leaves range is dropped at once.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use atcsim_core::components::{FlightState, Identity};
use atcsim_core::enums::RadarStrategy;
use atcsim_core::types::{heading_delta, AircraftId, Position};

use super::{Contact, Radar, RadarTrack};
use crate::fleet::Fleet;

/// True if `bearing` lies within half the beam width of the sweep angle.
pub fn in_beam(bearing: f64, sweep_angle: f64, beam_width: f64) -> bool {
    heading_delta(sweep_angle, bearing).abs() <= beam_width / 2.0
}

/// Probability of detection for a target `distance` km from the site.
///
/// `snr = 1 - distance / range`, less the flicker penalty, never below the
/// clutter floor. Zero outside range.
pub fn detection_probability(
    distance: f64,
    range: f64,
    flicker_penalty: f64,
    clutter_floor: f64,
) -> f64 {
    if range <= 0.0 || distance > range {
        return 0.0;
    }
    let snr = 1.0 - distance / range;
    (snr - flicker_penalty).clamp(clutter_floor, 1.0)
}

/// What the radar could see this tick, in id order.
pub fn collect_contacts(fleet: &Fleet) -> Vec<Contact> {
    let mut contacts: Vec<Contact> = fleet
        .world()
        .query::<(&AircraftId, &Identity, &Position, &FlightState)>()
        .iter()
        .map(|(_, (id, identity, pos, state))| Contact {
            id: *id,
            callsign: identity.callsign.clone(),
            position: *pos,
            altitude: state.altitude,
            heading: state.heading,
            speed: state.speed,
        })
        .collect();
    contacts.sort_by_key(|c| c.id);
    contacts
}

/// Run one detection pass at simulation time `now`.
pub fn run(radar: &mut Radar, contacts: Vec<Contact>, rng: &mut ChaCha8Rng, now: f64) {
    if radar.strategy == RadarStrategy::LiveSnapshot {
        radar.tracks.clear();
        return;
    }

    let mut present = Vec::with_capacity(contacts.len());
    for contact in contacts {
        present.push(contact.id);

        let distance = radar.site.range_to(&contact.position);
        if distance > radar.range_km {
            radar.forget(contact.id);
            continue;
        }

        let bearing = radar.site.bearing_to(&contact.position);
        if !in_beam(bearing, radar.sweep_angle, radar.beam_width_deg) {
            continue;
        }

        let pd = detection_probability(
            distance,
            radar.range_km,
            radar.flicker_penalty,
            radar.clutter_floor,
        );
        if rng.gen::<f64>() < pd {
            radar.tracks.insert(
                contact.id,
                RadarTrack {
                    contact,
                    last_seen_secs: now,
                },
            );
        }
    }

    let period = radar.rotation_period();
    radar
        .tracks
        .retain(|id, track| present.contains(id) && now - track.last_seen_secs <= period);
}
