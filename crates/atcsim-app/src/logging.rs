//! Log output setup.
//!
//! Events go to stderr so the console prompt on stdout stays readable.
//! `RUST_LOG` wins over the `--log-level` fallback.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::errors::AppError;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub fn fallback_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_logging(level: &str) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(level));

    Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
