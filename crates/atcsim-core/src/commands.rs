//! Controller clearances parsed from command text.
//!
//! Commands are transient: parsed, validated, dispatched, then discarded.

use serde::{Deserialize, Serialize};

/// A single clearance for one aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClearanceCommand {
    /// Fly an absolute heading (degrees, [0, 360)).
    SetHeading { heading: f64 },
    /// Turn by a signed delta from the current heading (negative = left).
    /// Resolved into `SetHeading` by the dispatcher.
    RelativeHeading { delta: f64 },
    /// Climb or descend to an altitude (feet).
    SetAltitude { altitude_ft: f64 },
    /// Accelerate or decelerate to a speed (knots).
    SetSpeed { speed_kts: f64 },
    /// Maintain present heading, speed and altitude.
    Hold,
}

/// One submitted line: a callsign and the chain of clearances that follow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandLine {
    /// Callsign as typed, upper-cased.
    pub callsign: String,
    pub commands: Vec<ClearanceCommand>,
}

impl std::fmt::Display for ClearanceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClearanceCommand::SetHeading { heading } => write!(f, "heading {heading:03.0}"),
            ClearanceCommand::RelativeHeading { delta } if *delta < 0.0 => {
                write!(f, "turn left {:.0}", -delta)
            }
            ClearanceCommand::RelativeHeading { delta } => write!(f, "turn right {delta:.0}"),
            ClearanceCommand::SetAltitude { altitude_ft } => write!(f, "altitude {altitude_ft:.0}"),
            ClearanceCommand::SetSpeed { speed_kts } => write!(f, "speed {speed_kts:.0}"),
            ClearanceCommand::Hold => write!(f, "hold"),
        }
    }
}
