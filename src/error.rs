//! Error types for spta-motion.
//!
//! Busy controllers are not an error: commands issued while a move is in
//! progress return `Ok(false)` and leave the state untouched.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all spta-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor output error
    Motor(MotorError),
    /// Move parameter error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Timer frequency must be > 0
    InvalidTimerFrequency(u32),
    /// Move preset name not found in configuration
    MoveNotFound(heapless::String<32>),
    /// Builder is missing a required part
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

/// Move parameter errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Target velocity load value is above what the engine accepts
    VelocityExceedsLimit {
        /// Requested load value
        requested: u32,
        /// Largest accepted load value
        max: u32,
    },
    /// Acceleration load value is above what the engine accepts
    AccelerationExceedsLimit {
        /// Requested load value
        requested: u32,
        /// Largest accepted load value
        max: u32,
    },
    /// Acceleration of zero would never leave standstill
    ZeroAcceleration,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidTimerFrequency(v) => {
                write!(f, "Invalid timer frequency: {} Hz. Must be > 0", v)
            }
            ConfigError::MoveNotFound(name) => write!(f, "Move '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::VelocityExceedsLimit { requested, max } => {
                write!(f, "Target velocity {} exceeds maximum load value {}", requested, max)
            }
            MotionError::AccelerationExceedsLimit { requested, max } => {
                write!(f, "Acceleration {} exceeds maximum load value {}", requested, max)
            }
            MotionError::ZeroAcceleration => write!(f, "Acceleration must be > 0"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
