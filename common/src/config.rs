use std::str::FromStr;

use crate::error::ConfigError;

/// Shortest refresh cadence, in seconds. Anything below disables refresh.
pub const MINIMUM_UPDATE_INTERVAL: u64 = 10;

/// Refresh cadence used when nothing else is configured, in seconds.
pub const DEFAULT_UPDATE_INTERVAL: u64 = 60;

/// How far bucket cleanup reaches when a group is removed from its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CascadeMode {
    /// Only the removed group's own child list is dropped. Child lists of
    /// groups nested below it stay behind, unreachable from the root.
    #[default]
    Shallow,
    /// Child lists of every nested group are dropped as well.
    Recursive,
}

impl FromStr for CascadeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shallow" => Ok(CascadeMode::Shallow),
            "recursive" => Ok(CascadeMode::Recursive),
            other => Err(ConfigError::UnknownCascadeMode(other.to_string())),
        }
    }
}

pub struct Config {
    /// Refresh cadence in seconds. `0` disables periodic refresh.
    pub update_interval: u64,
    pub cascade: CascadeMode,
    /// Output verbosity reduction, `0` prints everything.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            cascade: CascadeMode::Shallow,
            quiet: 0,
        }
    }
}

impl Config {
    /// Whether the configured interval actually schedules refresh cycles.
    pub fn refresh_enabled(&self) -> bool {
        self.update_interval >= MINIMUM_UPDATE_INTERVAL
    }

    /// Rejects a non-zero interval that the directory would silently treat as
    /// disabled. `0` is an explicit opt-out and always passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval != 0 && !self.refresh_enabled() {
            return Err(ConfigError::IntervalTooShort {
                given: self.update_interval,
                minimum: MINIMUM_UPDATE_INTERVAL,
            });
        }
        Ok(())
    }
}
