//! Start-up configuration: a JSON file, then command-line overrides.

use std::path::Path;

use atcsim_core::enums::RadarStrategy;
use atcsim_sim::SimConfig;

use crate::errors::ConfigError;

/// Load a `SimConfig` from a JSON file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<SimConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    SimConfig::from_json(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub radar_mode: Option<String>,
    pub radar_range_km: Option<f64>,
    pub time_scale: Option<f64>,
}

pub fn apply_overrides(mut config: SimConfig, overrides: &Overrides) -> Result<SimConfig, ConfigError> {
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(mode) = &overrides.radar_mode {
        config.radar.strategy = mode.parse::<RadarStrategy>().map_err(ConfigError::Option)?;
    }
    if let Some(km) = overrides.radar_range_km {
        config.radar.range_km = km;
    }
    if let Some(scale) = overrides.time_scale {
        config.time_scale = scale;
    }
    Ok(config.sanitized())
}
