//! Position tracking for the controlled motor.

use crate::config::units::Microsteps;
use crate::motion::Direction;

/// Absolute position tracker.
///
/// Counts microsteps from the origin and converts to whole steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    /// Current position in microsteps (from origin)
    microsteps: i64,
    /// Microstep multiplier for conversions
    multiplier: u16,
}

impl Position {
    /// Create a new position tracker at the origin.
    #[inline]
    pub fn new(microsteps: Microsteps) -> Self {
        Self {
            microsteps: 0,
            multiplier: microsteps.value(),
        }
    }

    /// Create a position tracker at a specific position.
    #[inline]
    pub fn at(microsteps: i64, multiplier: Microsteps) -> Self {
        Self {
            microsteps,
            multiplier: multiplier.value(),
        }
    }

    /// Get current position in microsteps.
    #[inline]
    pub fn microsteps(&self) -> i64 {
        self.microsteps
    }

    /// Get current position in whole steps.
    #[inline]
    pub fn full_steps(&self) -> f32 {
        self.microsteps as f32 / self.multiplier.max(1) as f32
    }

    /// Record one microstep in the given direction.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        self.microsteps += direction.sign();
    }

    /// Set current position as the new origin.
    #[inline]
    pub fn set_origin(&mut self) {
        self.microsteps = 0;
    }

    /// Whole steps needed to reach `target` (whole steps), rounded toward zero.
    #[inline]
    pub fn steps_to(&self, target: i32) -> i32 {
        let target = target as i64 * self.multiplier as i64;
        ((target - self.microsteps) / self.multiplier.max(1) as i64) as i32
    }
}
