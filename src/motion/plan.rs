//! Move planning.
//!
//! Predicts the velocity profile a position move will follow before it is
//! started. The engine itself does not use the plan; it is for callers that
//! want to pick parameters or report an ETA.

use libm::sqrtf;

use super::fixed::LOAD_SCALE;

/// Shape of a position move's velocity profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileShape {
    /// Reaches the target velocity and cruises.
    Trapezoidal,
    /// Turns around at the midpoint without cruising.
    Triangular,
    /// One microstep; ramps up and straight back down.
    SingleStep,
}

/// Predicted profile of a position move (all counts in microsteps).
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan {
    /// Total steps of the move.
    pub steps_required: u32,

    /// Expected profile shape.
    pub shape: ProfileShape,

    /// Steps spent ramping up (and, symmetrically, down).
    pub ramp_steps: u32,

    /// Steps at constant velocity.
    pub cruise_steps: u32,

    /// Highest velocity reached (load value).
    pub peak_velocity: u32,

    /// Estimated number of timer ticks to complete the move.
    pub estimated_ticks: u64,
}

impl MovePlan {
    /// Predict the profile for a move of `steps_required` microsteps.
    ///
    /// `target_velocity` and `acceleration` are load values, as passed to the
    /// engine.
    pub fn predict(steps_required: u32, target_velocity: u32, acceleration: u32) -> Self {
        if steps_required == 0 || target_velocity == 0 || acceleration == 0 {
            return Self::zero(steps_required);
        }

        let scale = LOAD_SCALE as f32;
        let accel = acceleration as f32;
        let middle = steps_required >> 1;

        // Each velocity quantum lasts 2^17 / a ticks and covers v / a steps,
        // so ramping to v takes about v^2 / 2a steps.
        let (shape, ramp_steps, peak) = if middle == 0 {
            // Ticks until the first step at a linearly rising velocity
            let peak = sqrtf(2.0 * accel).min(target_velocity as f32).max(1.0);
            (ProfileShape::SingleStep, 0, peak)
        } else {
            let target = target_velocity as f32;
            let full_ramp = target * target / (2.0 * accel);
            if full_ramp < middle as f32 {
                (ProfileShape::Trapezoidal, full_ramp as u32, target)
            } else {
                let peak = sqrtf(2.0 * accel * middle as f32).min(target).max(1.0);
                (ProfileShape::Triangular, middle, peak)
            }
        };

        let cruise_steps = match shape {
            ProfileShape::Trapezoidal => steps_required.saturating_sub(2 * ramp_steps),
            _ => 0,
        };

        let ramp_ticks = peak * scale / accel;
        let cruise_ticks = cruise_steps as f32 * scale / peak;
        let estimated_ticks = match shape {
            ProfileShape::SingleStep => sqrtf(2.0 * scale * scale / accel) + ramp_ticks,
            _ => 2.0 * ramp_ticks + cruise_ticks,
        };

        Self {
            steps_required,
            shape,
            ramp_steps,
            cruise_steps,
            peak_velocity: peak as u32,
            estimated_ticks: estimated_ticks as u64,
        }
    }

    /// Plan for a move that cannot run.
    fn zero(steps_required: u32) -> Self {
        Self {
            steps_required,
            shape: ProfileShape::SingleStep,
            ramp_steps: 0,
            cruise_steps: 0,
            peak_velocity: 0,
            estimated_ticks: 0,
        }
    }

    /// Check whether the move reaches its target velocity.
    #[inline]
    pub fn reaches_cruise(&self) -> bool {
        self.shape == ProfileShape::Trapezoidal
    }

    /// Estimated duration in seconds at the given tick rate.
    pub fn estimated_duration_secs(&self, timer_frequency: u32) -> f32 {
        if timer_frequency == 0 {
            return 0.0;
        }
        self.estimated_ticks as f32 / timer_frequency as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoidal_plan() {
        // 200 full steps at 16 microsteps
        let plan = MovePlan::predict(3200, 50, 1);

        assert_eq!(plan.shape, ProfileShape::Trapezoidal);
        assert!(plan.reaches_cruise());
        assert_eq!(plan.ramp_steps, 1250);
        assert_eq!(plan.cruise_steps, 700);
        assert_eq!(plan.peak_velocity, 50);
    }

    #[test]
    fn test_triangular_plan() {
        let plan = MovePlan::predict(100, 50, 1);

        assert_eq!(plan.shape, ProfileShape::Triangular);
        assert_eq!(plan.cruise_steps, 0);
        assert_eq!(plan.peak_velocity, 10);
    }

    #[test]
    fn test_single_step_plan() {
        let plan = MovePlan::predict(1, 50, 1000);
        assert_eq!(plan.shape, ProfileShape::SingleStep);
        assert!(plan.estimated_ticks > 0);
    }

    #[test]
    fn test_duration_estimate() {
        let plan = MovePlan::predict(2000, 400, 2000);
        let secs = plan.estimated_duration_secs(50_000);

        // Cruise dominates: ~1920 steps at 400 * 50000 / 2^17 = ~152 pulses/s
        assert!(secs > 12.0 && secs < 14.5, "duration {}", secs);
    }
}
