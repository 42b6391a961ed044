//! Results reported back to whoever submitted a command line.

use serde::{Deserialize, Serialize};

use crate::commands::ClearanceCommand;
use crate::errors::CommandError;
use crate::types::AircraftId;

/// Result of applying one clearance from a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The aircraft adopted the clearance as given.
    Accepted { command: ClearanceCommand },
    /// The aircraft adopted a clipped version of the clearance.
    Partial {
        command: ClearanceCommand,
        applied: ClearanceCommand,
        reason: String,
    },
    /// Validation refused the clearance; nothing changed.
    Rejected {
        command: ClearanceCommand,
        reason: CommandError,
    },
}

/// Everything that happened to one submitted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandReport {
    pub aircraft: AircraftId,
    pub callsign: String,
    pub outcomes: Vec<CommandOutcome>,
}

/// Flat `{ok, reason}` view of an outcome for display layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeView {
    pub ok: bool,
    pub reason: Option<String>,
}

impl CommandOutcome {
    pub fn is_ok(&self) -> bool {
        !matches!(self, CommandOutcome::Rejected { .. })
    }

    pub fn view(&self) -> OutcomeView {
        match self {
            CommandOutcome::Accepted { .. } => OutcomeView {
                ok: true,
                reason: None,
            },
            CommandOutcome::Partial { reason, .. } => OutcomeView {
                ok: true,
                reason: Some(reason.clone()),
            },
            CommandOutcome::Rejected { reason, .. } => OutcomeView {
                ok: false,
                reason: Some(reason.to_string()),
            },
        }
    }
}

impl CommandReport {
    /// True when every clearance in the chain was at least partially applied.
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(CommandOutcome::is_ok)
    }
}

impl From<&CommandError> for OutcomeView {
    fn from(err: &CommandError) -> Self {
        OutcomeView {
            ok: false,
            reason: Some(err.to_string()),
        }
    }
}
