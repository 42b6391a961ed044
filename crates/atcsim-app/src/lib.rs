//! Console driver for the airspace simulator.
//!
//! Wires the headless engine to a wall-clock game loop thread and a
//! line-oriented console.

pub mod config;
pub mod console;
pub mod errors;
pub mod game_loop;
pub mod logging;
pub mod state;

pub use atcsim_core as core;
