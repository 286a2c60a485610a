//! Host configuration parsed from environment variables.

use std::str::FromStr;
use std::time::Duration;

use canvas::engine::SceneConfig;
use canvas::particles::EvictionPolicy;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const WIDTH_VAR: &str = "HEARTFALL_WIDTH";
pub const HEIGHT_VAR: &str = "HEARTFALL_HEIGHT";
pub const CAPACITY_VAR: &str = "HEARTFALL_PARTICLE_CAPACITY";
pub const SPAWN_VAR: &str = "HEARTFALL_SPAWN_INTERVAL_MS";
pub const FRAME_VAR: &str = "HEARTFALL_FRAME_INTERVAL_MS";
pub const EVICTION_VAR: &str = "HEARTFALL_EVICTION";
pub const SEED_VAR: &str = "HEARTFALL_SEED";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    NotPositive { var: &'static str },
    #[error("HEARTFALL_EVICTION: unknown policy {0:?} (expected 'capacity' or 'on-complete')")]
    UnknownEviction(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostConfig {
    pub scene: SceneConfig,
    /// Fixed RNG seed. Unset means seed from OS entropy.
    pub seed: Option<u64>,
}

impl HostConfig {
    /// Build typed host config from the process environment.
    ///
    /// Optional:
    /// - `HEARTFALL_WIDTH` / `HEARTFALL_HEIGHT`: default 1920 / 1080
    /// - `HEARTFALL_PARTICLE_CAPACITY`: default 12
    /// - `HEARTFALL_SPAWN_INTERVAL_MS`: default 300
    /// - `HEARTFALL_FRAME_INTERVAL_MS`: default 16
    /// - `HEARTFALL_EVICTION`: `capacity` (default) or `on-complete`
    /// - `HEARTFALL_SEED`: unset by default
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] but reads variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SceneConfig::default();

        let width = positive(WIDTH_VAR, parse_var(&lookup, WIDTH_VAR, defaults.width)?)?;
        let height = positive(HEIGHT_VAR, parse_var(&lookup, HEIGHT_VAR, defaults.height)?)?;
        let particle_capacity = parse_var(&lookup, CAPACITY_VAR, defaults.particle_capacity)?;
        if particle_capacity == 0 {
            return Err(ConfigError::NotPositive { var: CAPACITY_VAR });
        }
        let spawn_interval = period_var(&lookup, SPAWN_VAR, defaults.spawn_interval)?;
        let frame_interval = period_var(&lookup, FRAME_VAR, defaults.frame_interval)?;
        let eviction = match lookup(EVICTION_VAR) {
            Some(raw) => parse_eviction(&raw)?,
            None => defaults.eviction,
        };
        let seed = match lookup(SEED_VAR) {
            Some(raw) => Some(parse_raw(SEED_VAR, raw)?),
            None => None,
        };

        Ok(Self {
            scene: SceneConfig {
                width,
                height,
                particle_capacity,
                spawn_interval,
                frame_interval,
                eviction,
                ..defaults
            },
            seed,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(raw) => parse_raw(var, raw),
        None => Ok(default),
    }
}

fn parse_raw<T: FromStr>(var: &'static str, raw: String) -> Result<T, ConfigError> {
    let parsed = raw.trim().parse::<T>();
    parsed.map_err(|_| ConfigError::Invalid { var, value: raw })
}

fn period_var<F>(lookup: &F, var: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match parse_raw::<u64>(var, raw)? {
        0 => Err(ConfigError::NotPositive { var }),
        ms => Ok(Duration::from_millis(ms)),
    }
}

fn positive(var: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { var })
    }
}

fn parse_eviction(raw: &str) -> Result<EvictionPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "capacity" => Ok(EvictionPolicy::Capacity),
        "on-complete" | "on_complete" => Ok(EvictionPolicy::OnComplete),
        _ => Err(ConfigError::UnknownEviction(raw.to_string())),
    }
}
