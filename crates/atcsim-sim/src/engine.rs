//! Simulation engine.
//!
//! `SimulationEngine` owns the aircraft registry, the radar and the seeded
//! RNG, applies operator commands, runs all systems at a fixed step, and
//! produces `SimSnapshot`s. Completely headless, enabling deterministic
//! testing.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace, warn};

use atcsim_core::constants::{DT, MAX_FRAME_SECS};
use atcsim_core::enums::AircraftCategory;
use atcsim_core::errors::CommandError;
use atcsim_core::events::CommandReport;
use atcsim_core::state::{AircraftView, ConflictView, RadarView, SimSnapshot};
use atcsim_core::types::{AircraftId, SimTime};

use crate::command;
use crate::config::SimConfig;
use crate::fleet::Fleet;
use crate::systems;
use crate::systems::radar::Radar;
use crate::world_setup;

/// Accumulated time within this of a full step still counts as a full step.
const ACCUMULATOR_EPSILON: f64 = 1e-9;

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    fleet: Fleet,
    radar: Radar,
    time: SimTime,
    rng: ChaCha8Rng,
    config: SimConfig,
    /// Conflicts found by the most recent tick.
    conflicts: Vec<ConflictView>,
    accumulator: f64,
    running: bool,
    time_scale: f64,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The engine
    /// starts running with an empty sky.
    pub fn new(config: SimConfig) -> Self {
        let config = config.sanitized();
        Self {
            fleet: Fleet::new(),
            radar: Radar::new(&config.radar),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            conflicts: Vec::new(),
            accumulator: 0.0,
            running: true,
            time_scale: config.time_scale,
            config,
        }
    }

    // --- Operator interface ---

    /// Spawn a randomly placed aircraft of the given category.
    pub fn add_aircraft(&mut self, category: AircraftCategory) -> AircraftId {
        let id =
            world_setup::spawn_aircraft(&mut self.fleet, &mut self.rng, category, &self.config.spawn);
        if let Some(identity) = self.fleet.identity(id) {
            info!(aircraft = %id, callsign = %identity.callsign, ?category, "aircraft added");
        }
        id
    }

    /// Remove an aircraft. Returns false if it did not exist.
    pub fn remove_aircraft(&mut self, id: AircraftId) -> bool {
        let Some(identity) = self.fleet.despawn(id) else {
            return false;
        };
        self.radar.forget(id);
        self.conflicts.retain(|c| c.id_a != id && c.id_b != id);
        info!(aircraft = %id, callsign = %identity.callsign, "aircraft removed");
        true
    }

    /// Select one aircraft, replacing any previous selection.
    pub fn select_aircraft(&mut self, id: AircraftId) -> bool {
        self.fleet.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.fleet.clear_selection();
    }

    /// Remove the selected aircraft, if any.
    pub fn remove_selected(&mut self) -> Option<AircraftId> {
        let id = self.fleet.selected()?;
        self.remove_aircraft(id).then_some(id)
    }

    /// Parse and apply one command line. Takes effect on the aircraft's
    /// targets immediately; the next tick flies them.
    pub fn submit_command(&mut self, raw: &str) -> Result<CommandReport, CommandError> {
        let result = command::submit(&mut self.fleet, raw);
        if let Err(err) = &result {
            warn!(line = raw.trim(), %err, "command line rejected");
        }
        result
    }

    /// Set the radar range (clamped). Returns the range applied.
    pub fn set_radar_range(&mut self, km: f64) -> f64 {
        let applied = self.radar.set_range(km);
        info!(requested = km, applied, "radar range set");
        applied
    }

    // --- Run control ---

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop the loop. Takes effect at the next tick boundary; any partially
    /// accumulated frame time is discarded.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed `dt` seconds of (already scaled) wall time into the fixed-step
    /// accumulator and run as many whole ticks as it holds. Returns the number
    /// of ticks run. No-op while stopped.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.accumulator += dt.min(MAX_FRAME_SECS);
        let mut ticks = 0;
        while self.accumulator + ACCUMULATOR_EPSILON >= DT {
            self.step();
            self.accumulator -= DT;
            ticks += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        ticks
    }

    /// Run exactly one fixed step, whether or not the loop is running, and
    /// return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.step();
        self.snapshot()
    }

    // --- Read interface ---

    /// Display data for every aircraft, in id order.
    pub fn list_aircraft_display_data(&self) -> Vec<AircraftView> {
        systems::snapshot::build_aircraft(self.fleet.world(), &self.radar.site())
    }

    pub fn radar_state(&self) -> RadarView {
        systems::snapshot::build_radar(&self.radar)
    }

    /// Conflicts predicted by the most recent tick.
    pub fn conflicts(&self) -> &[ConflictView] {
        &self.conflicts
    }

    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(
            &self.fleet,
            &self.radar,
            &self.time,
            self.running,
            &self.conflicts,
        )
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.time_scale = scale.clamp(0.0, 4.0);
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read-only access to the aircraft registry.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn radar(&self) -> &Radar {
        &self.radar
    }

    /// Place an aircraft with an exact state (for tests needing fixed geometry).
    #[cfg(test)]
    pub fn spawn_test_aircraft(
        &mut self,
        callsign: &str,
        category: AircraftCategory,
        position: atcsim_core::types::Position,
        state: atcsim_core::components::FlightState,
    ) -> AircraftId {
        self.fleet.spawn(callsign, category, position, state)
    }

    #[cfg(test)]
    pub fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    /// Run all systems in order for one fixed step.
    fn step(&mut self) {
        let dt = DT;

        // 1. Kinematics
        systems::movement::run(self.fleet.world_mut(), self.config.wind.velocity_kms(), dt);
        // 2. Trails
        systems::movement::update_trails(self.fleet.world_mut());
        // 3. Conflict prediction and resolution
        let samples = systems::conflict::collect_samples(&self.fleet);
        self.conflicts = systems::conflict::detect(&samples, &self.config.separation);
        let maneuvers = systems::conflict::plan_evasive(
            &samples,
            &self.conflicts,
            self.config.separation.evasive_climb_ft,
        );
        systems::conflict::resolve(&mut self.fleet, &maneuvers);
        // 4. Radar sweep and detection
        systems::radar::sweep::advance(&mut self.radar, dt);
        let contacts = systems::radar::detection::collect_contacts(&self.fleet);
        systems::radar::detection::run(
            &mut self.radar,
            contacts,
            &mut self.rng,
            self.time.elapsed_secs,
        );

        self.time.advance();
        trace!(
            tick = self.time.tick,
            aircraft = self.fleet.len(),
            conflicts = self.conflicts.len(),
            tracks = self.radar.track_count(),
            "tick"
        );
    }
}
