//! Error taxonomy for command handling.
//!
//! None of these are fatal: every rejection is reported to the caller and the
//! simulation carries on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommandError>;

/// Malformed command text. Aborts the whole submitted line.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseError {
    #[error("empty command line")]
    Empty,

    #[error("no command after callsign {0}")]
    MissingCommand(String),

    #[error("unknown verb {0}")]
    UnknownVerb(String),

    #[error("verb {0} requires a parameter")]
    MissingParameter(String),

    #[error("bad parameter {token:?} for verb {verb}")]
    MalformedParameter { verb: String, token: String },
}

/// Why a line or a single clearance in it was refused.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("unknown callsign {0}")]
    UnknownCallsign(String),

    #[error("altitude {requested_ft:.0} ft above ceiling {ceiling_ft:.0} ft")]
    AltitudeAboveCeiling { requested_ft: f64, ceiling_ft: f64 },

    #[error("speed {requested_kts:.0} kts above limit {limit_kts:.0} kts")]
    SpeedAboveLimit { requested_kts: f64, limit_kts: f64 },
}

impl CommandError {
    /// Parse errors are syntactic; everything else is semantic.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CommandError::Parse(_))
    }
}
