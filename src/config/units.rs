//! Unit types for physical quantities.
//!
//! Keeps physical pulse rates apart from the engine's load values and step
//! counts so they cannot be mixed up at call sites.

use serde::Deserialize;

use crate::error::ConfigError;

/// Pulse rate in (micro)steps per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct PulsesPerSec(pub f32);

impl PulsesPerSec {
    /// Create a new PulsesPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Pulse-rate change in (micro)steps per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct PulsesPerSecSquared(pub f32);

impl PulsesPerSecSquared {
    /// Create a new PulsesPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Microstep multiplier (1, 2, 4, 8, 16, 32, 64, 128, 256).
///
/// Validated at construction to be a power of 2 within the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Microsteps(u16);

impl Microsteps {
    /// Full step (no microstepping).
    pub const FULL: Self = Self(1);
    /// Half step.
    pub const HALF: Self = Self(2);
    /// Quarter step.
    pub const QUARTER: Self = Self(4);
    /// Eighth step.
    pub const EIGHTH: Self = Self(8);
    /// Sixteenth step.
    pub const SIXTEENTH: Self = Self(16);
    /// Thirty-second step.
    pub const THIRTY_SECOND: Self = Self(32);
    /// Sixty-fourth step.
    pub const SIXTY_FOURTH: Self = Self(64);
    /// 128th step.
    pub const ONE_TWENTY_EIGHTH: Self = Self(128);
    /// 256th step (maximum resolution).
    pub const TWO_FIFTY_SIXTH: Self = Self(256);

    const VALID_VALUES: [u16; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 256];

    /// Create a new Microsteps value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if the value is not a valid power of 2.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMicrosteps(value))
        }
    }

    /// Get the raw multiplier.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Scale a whole-step count to pulses, saturating at `u32::MAX`.
    #[inline]
    pub fn scale(self, full_steps: u32) -> u32 {
        full_steps.saturating_mul(self.0 as u32)
    }
}

impl Default for Microsteps {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u16> for Microsteps {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Microsteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Microsteps::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to PulsesPerSec.
    fn pulses_per_sec(self) -> PulsesPerSec;
    /// Convert to PulsesPerSecSquared.
    fn pulses_per_sec_squared(self) -> PulsesPerSecSquared;
}

impl UnitExt for f32 {
    #[inline]
    fn pulses_per_sec(self) -> PulsesPerSec {
        PulsesPerSec(self)
    }

    #[inline]
    fn pulses_per_sec_squared(self) -> PulsesPerSecSquared {
        PulsesPerSecSquared(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microsteps_valid_values() {
        for &v in &Microsteps::VALID_VALUES {
            assert!(Microsteps::new(v).is_ok());
        }
    }

    #[test]
    fn test_microsteps_invalid_values() {
        assert!(Microsteps::new(0).is_err());
        assert!(Microsteps::new(3).is_err());
        assert!(Microsteps::new(17).is_err());
        assert!(Microsteps::new(512).is_err());
    }

    #[test]
    fn test_microsteps_scale() {
        assert_eq!(Microsteps::SIXTEENTH.scale(200), 3200);
        assert_eq!(Microsteps::TWO_FIFTY_SIXTH.scale(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_unit_ext() {
        assert_eq!(10.0_f32.pulses_per_sec(), PulsesPerSec(10.0));
        assert_eq!(5.0_f32.pulses_per_sec_squared().value(), 5.0);
    }
}
