//! Motor and driver-board configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Microsteps, PulsesPerSec};

/// Motor wiring and resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default)]
    pub name: String<32>,

    /// Base steps per revolution (typically 200 for 1.8° motors).
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u16,

    /// Microstep setting of the driver board.
    #[serde(default)]
    pub microsteps: Microsteps,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// The driver is enabled by pulling its enable input LOW.
    #[serde(default = "default_enable_active_low")]
    pub enable_active_low: bool,
}

fn default_steps_per_revolution() -> u16 {
    200
}

fn default_enable_active_low() -> bool {
    true
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            steps_per_revolution: default_steps_per_revolution(),
            microsteps: Microsteps::default(),
            invert_direction: false,
            enable_active_low: default_enable_active_low(),
        }
    }
}

impl MotorConfig {
    /// Pulses per motor shaft revolution.
    pub fn pulses_per_revolution(&self) -> u32 {
        self.microsteps.scale(self.steps_per_revolution as u32)
    }

    /// Convert a shaft speed in RPM to a pulse rate.
    pub fn rpm_to_pulses_per_sec(&self, rpm: f32) -> PulsesPerSec {
        PulsesPerSec(rpm * self.pulses_per_revolution() as f32 / 60.0)
    }
}
