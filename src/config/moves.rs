//! Named move presets from TOML.

use serde::Deserialize;

use crate::motion::plan::MovePlan;

use super::units::Microsteps;

/// A position move described in configuration.
///
/// Velocity and acceleration are load values, exactly as passed to
/// `move_by_steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MoveConfig {
    /// Signed whole-step count (negative = counter-clockwise).
    pub steps: i32,

    /// Cruise velocity (load value).
    pub target_velocity: u32,

    /// Ramp increment per tick (load value).
    pub acceleration: u32,
}

impl MoveConfig {
    /// Predict the profile this preset produces at the given microstep setting.
    pub fn plan(&self, microsteps: Microsteps) -> MovePlan {
        MovePlan::predict(
            microsteps.scale(self.steps.unsigned_abs()),
            self.target_velocity,
            self.acceleration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::plan::ProfileShape;

    #[test]
    fn test_plan_uses_microsteps() {
        let preset = MoveConfig {
            steps: -200,
            target_velocity: 50,
            acceleration: 1,
        };

        let plan = preset.plan(Microsteps::SIXTEENTH);
        assert_eq!(plan.steps_required, 3200);
        assert_eq!(plan.shape, ProfileShape::Trapezoidal);
    }
}
