//! Fixed-point accumulators and load-value conversions.
//!
//! Velocities live in the "load value" domain: a load value `v` added to a
//! 17-bit accumulator once per timer tick overflows `v * f / 2^17` times per
//! second, where `f` is the tick frequency. Overflow (carry) of an accumulator
//! is the signal the engine reacts to, so all arithmetic here is modular.

use crate::config::units::PulsesPerSec;

/// Width of the velocity and step accumulators.
pub const STEP_BITS: u32 = 17;

/// Width of the half-step (rising edge) accumulator.
pub const HALF_STEP_BITS: u32 = 16;

/// Scale between a physical rate and its load value (`2^17`).
pub const LOAD_SCALE: u32 = 1 << STEP_BITS;

/// Largest load value the engine accepts for velocities and accelerations.
///
/// Keeps the half-step accumulator to at most one carry per tick.
pub const MAX_LOAD_VALUE: u32 = (1 << HALF_STEP_BITS) - 1;

/// Phase accumulator of `BITS` bits reporting its carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accumulator<const BITS: u32> {
    value: u32,
}

impl<const BITS: u32> Accumulator<BITS> {
    /// Carry bit of this accumulator.
    pub const CARRY: u32 = 1 << BITS;

    const MASK: u32 = Self::CARRY - 1;

    /// Create an empty accumulator.
    #[inline]
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Current (sub-carry) contents.
    #[inline]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Add `increment` modulo `2^BITS`.
    ///
    /// Returns `true` when the addition carried out of the top bit. The
    /// increment is expected to stay below `2^BITS`, which limits the carry
    /// to one per call.
    #[inline]
    pub fn accumulate(&mut self, increment: u32) -> bool {
        let sum = self.value.wrapping_add(increment);
        self.value = sum & Self::MASK;
        (sum & Self::CARRY) != 0
    }

    /// Clear the accumulator.
    #[inline]
    pub fn reset(&mut self) {
        self.value = 0;
    }
}

/// Accumulator driving the velocity ramp.
pub type VelocityAccumulator = Accumulator<STEP_BITS>;

/// Accumulator counting full steps (falling edges).
pub type StepAccumulator = Accumulator<STEP_BITS>;

/// Accumulator timing rising edges.
pub type HalfStepAccumulator = Accumulator<HALF_STEP_BITS>;

/// Convert a physical rate to its load value.
///
/// Non-zero rates are biased by one so that very slow commands still ramp.
/// Zero (or negative) maps to zero, and results saturate at [`MAX_LOAD_VALUE`].
pub fn velocity_to_load_value(velocity: PulsesPerSec, timer_frequency: u32) -> u32 {
    if velocity.0 <= 0.0 || timer_frequency == 0 {
        return 0;
    }

    let scaled = velocity.0 * LOAD_SCALE as f32 / timer_frequency as f32;
    if scaled >= MAX_LOAD_VALUE as f32 {
        return MAX_LOAD_VALUE;
    }

    (scaled as u32 + 1).min(MAX_LOAD_VALUE)
}

/// Convert a load value back to a physical rate.
pub fn load_value_to_velocity(load: u32, timer_frequency: u32) -> PulsesPerSec {
    PulsesPerSec(timer_frequency as f32 * load as f32 / LOAD_SCALE as f32)
}

/// Physical rate represented by one load-value quantum.
#[inline]
pub fn quantum(timer_frequency: u32) -> PulsesPerSec {
    load_value_to_velocity(1, timer_frequency)
}
