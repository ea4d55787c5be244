//! Configuration module for spta-motion.
//!
//! Provides types for loading and validating drive settings and move presets
//! from TOML files (with `std` feature) or pre-parsed data.

mod motor;
mod moves;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use moves::MoveConfig;
pub use system::{DriveConfig, TimerConfig, DEFAULT_TIMER_FREQUENCY_HZ};
pub use validation::{validate_config, validate_move};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microsteps, PulsesPerSec, PulsesPerSecSquared};
