use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Side length of the grid
pub const GRID_SIZE: usize = 30;

/// Time between two generations while running
pub const TICK: Duration = Duration::from_millis(100);

/// Chance of a cell being alive after a randomize
pub const DENSITY: f64 = 0.3;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Grid size must be at least 1")]
    EmptyGrid,

    #[error("Grid size {0} is too large")]
    GridTooLarge(usize),

    #[error("Tick interval must be non zero")]
    ZeroTick,

    #[error("Density {0} is outside of [0, 1]")]
    InvalidDensity(f64),
}

/// Largest side length accepted, keeps every coordinate representable as a `GridOffset`
pub const MAX_GRID_SIZE: usize = 1 << 12;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Side length of the square grid
    pub size: usize,

    /// Time between two generations while running
    pub tick: Duration,

    /// Chance of a cell being alive after a randomize
    pub density: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            tick: TICK,
            density: DENSITY,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if self.size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.size));
        }

        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }

        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::InvalidDensity(self.density));
        }

        Ok(())
    }

    /// Build config from environment variables, falling back to defaults.
    ///
    /// * `LIFE_GRID_SIZE`: side length of the grid
    /// * `LIFE_TICK_MS`: milliseconds between generations
    /// * `LIFE_DENSITY`: chance of a cell being alive after a randomize
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("LIFE_GRID_SIZE") {
            match v.parse() {
                Ok(n) => cfg.size = n,
                Err(e) => warn!("Ignoring LIFE_GRID_SIZE={v:?}: {e}"),
            }
        }

        if let Some(v) = lookup("LIFE_TICK_MS") {
            match v.parse() {
                Ok(ms) => cfg.tick = Duration::from_millis(ms),
                Err(e) => warn!("Ignoring LIFE_TICK_MS={v:?}: {e}"),
            }
        }

        if let Some(v) = lookup("LIFE_DENSITY") {
            match v.parse() {
                Ok(p) => cfg.density = p,
                Err(e) => warn!("Ignoring LIFE_DENSITY={v:?}: {e}"),
            }
        }

        cfg
    }
}
