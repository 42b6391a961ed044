//! Game loop thread: drives the simulation engine from the wall clock.
//!
//! The engine is created inside this thread and never leaves it. Commands
//! arrive via an `mpsc` channel and are applied between frames, so they can
//! only ever land on a tick boundary. Each frame feeds the scaled wall time
//! since the previous frame into `SimulationEngine::advance` and publishes the
//! resulting snapshot for the console to poll.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use atcsim_core::constants::TICK_RATE;
use atcsim_core::state::SimSnapshot;
use atcsim_sim::engine::SimulationEngine;
use atcsim_sim::SimConfig;

use crate::state::{AppState, Feedback, GameLoopCommand};

/// Nominal duration of one frame.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawn the game loop in a new thread and return the console-side handles.
pub fn spawn_game_loop(config: SimConfig) -> std::io::Result<(AppState, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (feedback_tx, feedback_rx) = mpsc::channel::<Feedback>();
    let latest_snapshot = Arc::new(Mutex::new(None));

    let shared = Arc::clone(&latest_snapshot);
    let handle = std::thread::Builder::new()
        .name("atcsim-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, feedback_tx, &shared);
        })?;

    Ok((
        AppState {
            command_tx: cmd_tx,
            feedback_rx,
            latest_snapshot,
        },
        handle,
    ))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    feedback_tx: mpsc::Sender<Feedback>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;
    info!(seed = engine.config().seed, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => match apply_command(&mut engine, command) {
                    Some(feedback) => {
                        if feedback_tx.send(feedback).is_err() {
                            return;
                        }
                    }
                    None => {
                        info!(tick = engine.time().tick, "game loop shut down");
                        return;
                    }
                },
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Feed scaled wall time into the fixed-step accumulator
        let now = Instant::now();
        let elapsed = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        engine.advance(elapsed * engine.time_scale());

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(engine.snapshot());
        }

        // 4. Sleep until the next frame
        next_frame_time += TICK_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

/// Apply one console command to the engine and describe the result.
/// `None` means the loop should stop.
pub fn apply_command(engine: &mut SimulationEngine, command: GameLoopCommand) -> Option<Feedback> {
    let feedback = match command {
        GameLoopCommand::Submit(line) => Feedback::Command(engine.submit_command(&line)),
        GameLoopCommand::Add(category) => {
            let id = engine.add_aircraft(category);
            let callsign = engine
                .fleet()
                .identity(id)
                .map(|identity| identity.callsign)
                .unwrap_or_default();
            Feedback::Added { id, callsign }
        }
        GameLoopCommand::Remove(id) => {
            Feedback::Removed(engine.remove_aircraft(id).then_some(id))
        }
        GameLoopCommand::Select(id) => Feedback::Selected {
            id,
            found: engine.select_aircraft(id),
        },
        GameLoopCommand::RemoveSelected => Feedback::Removed(engine.remove_selected()),
        GameLoopCommand::SetRange(km) => Feedback::RangeSet(engine.set_radar_range(km)),
        GameLoopCommand::Start => {
            engine.start();
            Feedback::Running(true)
        }
        GameLoopCommand::Stop => {
            engine.stop();
            Feedback::Running(false)
        }
        GameLoopCommand::Shutdown => return None,
    };
    debug!(?feedback, "console command applied");
    Some(feedback)
}
