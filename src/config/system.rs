//! Drive configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};

use super::motor::MotorConfig;
use super::moves::MoveConfig;

/// Tick rate used when none is configured.
pub const DEFAULT_TIMER_FREQUENCY_HZ: u32 = 500_000;

/// Periodic timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimerConfig {
    /// Tick (interrupt) frequency in Hz.
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u32,
}

fn default_frequency_hz() -> u32 {
    DEFAULT_TIMER_FREQUENCY_HZ
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_TIMER_FREQUENCY_HZ,
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriveConfig {
    /// Tick timer settings.
    #[serde(default)]
    pub timer: TimerConfig,

    /// Motor and driver board settings.
    #[serde(default)]
    pub motor: MotorConfig,

    /// Named move presets.
    #[serde(default)]
    pub moves: FnvIndexMap<String<32>, MoveConfig, 16>,
}

impl DriveConfig {
    /// Get a move preset by name.
    pub fn move_preset(&self, name: &str) -> Option<&MoveConfig> {
        self.moves
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a move preset by name, or a `MoveNotFound` error.
    pub fn move_or_error(&self, name: &str) -> Result<&MoveConfig> {
        self.move_preset(name).ok_or_else(|| {
            Error::Config(ConfigError::MoveNotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })
    }

    /// List all move preset names.
    pub fn move_names(&self) -> impl Iterator<Item = &str> {
        self.moves.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DriveConfig::default();

        assert_eq!(config.timer.frequency_hz, DEFAULT_TIMER_FREQUENCY_HZ);
        assert!(config.motor.enable_active_low);
        assert_eq!(config.move_names().count(), 0);
    }

    #[test]
    fn test_missing_move() {
        let config = DriveConfig::default();

        assert!(matches!(
            config.move_or_error("home"),
            Err(Error::Config(ConfigError::MoveNotFound(_)))
        ));
    }
}
