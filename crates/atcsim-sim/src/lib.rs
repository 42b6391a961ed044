//! Simulation engine for the airspace simulator.
//!
//! Owns the hecs world of aircraft, the radar, and the command pipeline, runs
//! systems at a fixed tick rate, and produces `SimSnapshot`s for any display.

pub mod capabilities;
pub mod command;
pub mod config;
pub mod engine;
pub mod fleet;
pub mod kinematics;
pub mod systems;
pub mod world_setup;

pub use atcsim_core as core;
pub use config::SimConfig;
pub use engine::SimulationEngine;
