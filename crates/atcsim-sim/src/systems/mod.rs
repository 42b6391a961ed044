//! Systems that operate on the simulation each tick.
//!
//! Systems are plain functions over the world (or the radar). They do not
//! own state; aircraft state lives in components and radar state in `Radar`.

pub mod conflict;
pub mod movement;
pub mod radar;
pub mod snapshot;
