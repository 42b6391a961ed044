//! State shared between the console thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use atcsim_core::enums::AircraftCategory;
use atcsim_core::errors::CommandError;
use atcsim_core::events::CommandReport;
use atcsim_core::state::SimSnapshot;
use atcsim_core::types::AircraftId;

use crate::errors::AppError;

/// Commands sent from the console to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A raw controller command line for the parser.
    Submit(String),
    Add(AircraftCategory),
    Remove(AircraftId),
    Select(AircraftId),
    RemoveSelected,
    SetRange(f64),
    Start,
    Stop,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Reply to every `GameLoopCommand` except `Shutdown`, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Command(Result<CommandReport, CommandError>),
    Added { id: AircraftId, callsign: String },
    Removed(Option<AircraftId>),
    Selected { id: AircraftId, found: bool },
    RangeSet(f64),
    Running(bool),
}

/// Handles held by the console side.
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub feedback_rx: mpsc::Receiver<Feedback>,
    /// Latest snapshot, updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
}

impl AppState {
    /// Send a command and wait for its reply.
    pub fn request(&self, command: GameLoopCommand) -> Result<Feedback, AppError> {
        self.command_tx
            .send(command)
            .map_err(|_| AppError::LoopStopped)?;
        self.feedback_rx.recv().map_err(|_| AppError::LoopStopped)
    }

    /// Clone of the most recent snapshot, if the loop has produced one.
    pub fn snapshot(&self) -> Option<SimSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }
}
