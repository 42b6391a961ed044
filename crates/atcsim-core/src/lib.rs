//! Core types and definitions for the airspace simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, parsed commands, command outcomes, errors, state snapshots,
//! and constants. It has no dependency on any runtime or display framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod state;
pub mod types;
