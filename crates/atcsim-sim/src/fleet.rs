//! Aircraft registry.
//!
//! Aircraft live as entities in a hecs world. Two side indexes map the
//! stable `AircraftId` and the upper-cased callsign to the entity; both are
//! maintained on every spawn and despawn.

use std::collections::HashMap;

use hecs::{Entity, World};

use atcsim_core::components::*;
use atcsim_core::constants::FIRST_CALLSIGN_NUMBER;
use atcsim_core::enums::{AircraftCategory, Behavior};
use atcsim_core::types::{AircraftId, Position};

#[derive(Default)]
pub struct Fleet {
    world: World,
    by_id: HashMap<AircraftId, Entity>,
    by_callsign: HashMap<String, AircraftId>,
    next_id: u32,
    next_callsign_number: u32,
}

/// Mutable view of the parts of an aircraft a clearance may touch.
pub struct ControlSurface<'a> {
    pub category: AircraftCategory,
    pub state: &'a FlightState,
    pub clearance: &'a mut Clearance,
    pub behavior: &'a mut Behavior,
}

impl Fleet {
    pub fn new() -> Self {
        Self {
            next_callsign_number: FIRST_CALLSIGN_NUMBER,
            ..Default::default()
        }
    }

    /// Read-only access to the underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Register a new aircraft. The callsign is upper-cased; the caller must
    /// make sure it is not already taken (see `next_callsign`).
    pub fn spawn(
        &mut self,
        callsign: &str,
        category: AircraftCategory,
        position: Position,
        state: FlightState,
    ) -> AircraftId {
        let id = AircraftId(self.next_id);
        self.next_id += 1;

        let callsign = callsign.to_ascii_uppercase();
        let mut trail = Trail::default();
        trail.record(position);

        let entity = self.world.spawn((
            id,
            Identity {
                callsign: callsign.clone(),
                category,
            },
            position,
            state,
            Clearance::holding(&state),
            Behavior::Cruising,
            trail,
        ));

        self.by_id.insert(id, entity);
        self.by_callsign.insert(callsign, id);
        id
    }

    /// Remove an aircraft. Returns its identity if it existed.
    pub fn despawn(&mut self, id: AircraftId) -> Option<Identity> {
        let entity = self.by_id.remove(&id)?;
        let identity = self
            .world
            .get::<&Identity>(entity)
            .ok()
            .map(|identity| (*identity).clone());
        if let Some(identity) = &identity {
            self.by_callsign.remove(&identity.callsign);
        }
        let _ = self.world.despawn(entity);
        identity
    }

    pub fn contains(&self, id: AircraftId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn entity(&self, id: AircraftId) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    pub fn identity(&self, id: AircraftId) -> Option<Identity> {
        let entity = self.entity(id)?;
        let identity = self.world.get::<&Identity>(entity).ok()?;
        Some((*identity).clone())
    }

    /// Case-insensitive callsign lookup.
    pub fn lookup_callsign(&self, callsign: &str) -> Option<AircraftId> {
        self.by_callsign
            .get(&callsign.to_ascii_uppercase())
            .copied()
    }

    /// All registered ids in ascending order.
    pub fn ids(&self) -> Vec<AircraftId> {
        let mut ids: Vec<AircraftId> = self.by_id.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Generate the next unused callsign for a category, e.g. `AC101`, `HX102`.
    pub fn next_callsign(&mut self, category: AircraftCategory) -> String {
        loop {
            let candidate = format!("{}{}", category.callsign_prefix(), self.next_callsign_number);
            self.next_callsign_number += 1;
            if !self.by_callsign.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Borrow the controllable parts of one aircraft.
    pub fn control_surface(&mut self, id: AircraftId) -> Option<ControlSurface<'_>> {
        let entity = self.entity(id)?;
        let (identity, state, clearance, behavior) = self
            .world
            .query_one_mut::<(&Identity, &FlightState, &mut Clearance, &mut Behavior)>(entity)
            .ok()?;
        Some(ControlSurface {
            category: identity.category,
            state,
            clearance,
            behavior,
        })
    }

    /// Mark `id` as the single selected aircraft.
    pub fn select(&mut self, id: AircraftId) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        self.clear_selection();
        self.world.insert_one(entity, Selected).is_ok()
    }

    pub fn clear_selection(&mut self) {
        let selected: Vec<Entity> = self
            .world
            .query::<&Selected>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in selected {
            let _ = self.world.remove_one::<Selected>(entity);
        }
    }

    pub fn selected(&self) -> Option<AircraftId> {
        self.world
            .query::<(&AircraftId, &Selected)>()
            .iter()
            .next()
            .map(|(_, (id, _))| *id)
    }
}
