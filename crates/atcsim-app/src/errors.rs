//! Driver-level errors. The simulation itself never fails; these cover the
//! things around it that can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid option: {0}")]
    Option(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("simulation loop is no longer running")]
    LoopStopped,
}
