use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use atcsim_app::config::{apply_overrides, load_config, Overrides};
use atcsim_app::console::{self, ConsoleInput};
use atcsim_app::errors::AppError;
use atcsim_app::game_loop;
use atcsim_app::logging;
use atcsim_app::state::GameLoopCommand;
use atcsim_core::enums::AircraftCategory;
use atcsim_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Airspace simulator with conflict detection and a sweeping radar")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Standard aircraft spawned at start-up
    #[arg(long, default_value_t = 3)]
    standard: usize,

    /// Hypersonic aircraft spawned at start-up
    #[arg(long, default_value_t = 1)]
    hypersonic: usize,

    /// Radar strategy: live or sweep
    #[arg(long)]
    radar_mode: Option<String>,

    /// Radar range in km
    #[arg(long)]
    radar_range: Option<f64>,

    /// Simulation speed multiplier (0-4)
    #[arg(long)]
    time_scale: Option<f64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("atcsim: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    logging::init_logging(&args.log_level)?;

    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    let config = apply_overrides(
        base,
        &Overrides {
            seed: args.seed,
            radar_mode: args.radar_mode.clone(),
            radar_range_km: args.radar_range,
            time_scale: args.time_scale,
        },
    )?;
    info!(seed = config.seed, strategy = ?config.radar.strategy, "starting simulation");

    let (state, handle) = game_loop::spawn_game_loop(config)?;

    let initial = std::iter::repeat(AircraftCategory::Standard)
        .take(args.standard)
        .chain(std::iter::repeat(AircraftCategory::Hypersonic).take(args.hypersonic));
    for category in initial {
        let feedback = state.request(GameLoopCommand::Add(category))?;
        println!("{}", console::render_feedback(&feedback));
    }
    println!("type /help for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match console::parse_input(&line) {
            Ok(ConsoleInput::Loop(command)) => {
                let feedback = state.request(command)?;
                println!("{}", console::render_feedback(&feedback));
            }
            Ok(ConsoleInput::Status) => match state.snapshot() {
                Some(snapshot) => println!("{}", console::render_status(&snapshot)),
                None => println!("no snapshot yet"),
            },
            Ok(ConsoleInput::Help) => println!("{}", console::HELP),
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Empty) => {}
            Err(message) => println!("{message}"),
        }
        stdout.flush()?;
    }

    // The loop may already be gone; either way it is finished after this.
    let _ = state.command_tx.send(GameLoopCommand::Shutdown);
    handle.join().map_err(|_| AppError::LoopStopped)?;
    Ok(())
}
