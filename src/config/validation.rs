//! Configuration validation.

use crate::error::{ConfigError, Error, MotionError, Result};
use crate::motion::fixed::MAX_LOAD_VALUE;

use super::{DriveConfig, MoveConfig};

/// Validate a drive configuration.
///
/// Checks:
/// - Timer frequency is non-zero
/// - Move presets use load values the engine accepts
pub fn validate_config(config: &DriveConfig) -> Result<()> {
    if config.timer.frequency_hz == 0 {
        return Err(Error::Config(ConfigError::InvalidTimerFrequency(
            config.timer.frequency_hz,
        )));
    }

    for (_, preset) in config.moves.iter() {
        validate_move(preset)?;
    }

    Ok(())
}

/// Check the load values of a single move.
pub fn validate_move(preset: &MoveConfig) -> Result<()> {
    if preset.target_velocity > MAX_LOAD_VALUE {
        return Err(Error::Motion(MotionError::VelocityExceedsLimit {
            requested: preset.target_velocity,
            max: MAX_LOAD_VALUE,
        }));
    }

    if preset.acceleration == 0 {
        return Err(Error::Motion(MotionError::ZeroAcceleration));
    }

    if preset.acceleration > MAX_LOAD_VALUE {
        return Err(Error::Motion(MotionError::AccelerationExceedsLimit {
            requested: preset.acceleration,
            max: MAX_LOAD_VALUE,
        }));
    }

    Ok(())
}
