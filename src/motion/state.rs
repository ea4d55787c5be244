//! Shared profile state between the command layer and the tick engine.

use super::fixed::{HalfStepAccumulator, StepAccumulator, VelocityAccumulator};

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (zero or positive step count).
    Clockwise,
    /// Counter-clockwise (negative step count).
    CounterClockwise,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i32) -> Self {
        if steps >= 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Decision policy of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Move a fixed number of steps with a ramp up and down.
    #[default]
    Position,
    /// Track a target velocity until stopped.
    Velocity,
}

/// Ramp phase of a position move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No move in progress (initial and terminal).
    #[default]
    Idle,
    /// Ramping up toward the target velocity.
    Accelerating,
    /// Holding the target velocity.
    Uniform,
    /// Ramping down toward the final step.
    Decelerating,
}

/// Profile state of the active move.
///
/// Counters are in microsteps, velocities and acceleration are load values
/// (see [`fixed`](super::fixed)). Everything is zeroed on entry to
/// [`Phase::Idle`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileState {
    pub(crate) mode: Mode,
    pub(crate) phase: Phase,
    /// Busy guard; velocity runs stay in `Phase::Idle`.
    pub(crate) active: bool,
    /// Velocity mode ends once the ramp reaches zero.
    pub(crate) halt_at_rest: bool,

    pub(crate) steps_required: u32,
    pub(crate) steps_middle: u32,
    pub(crate) steps_accelerated: u32,
    pub(crate) steps_taken: u32,

    pub(crate) target_velocity: u32,
    pub(crate) actual_velocity: u32,
    pub(crate) acceleration: u32,

    pub(crate) velocity_accumulator: VelocityAccumulator,
    pub(crate) step_accumulator: StepAccumulator,
    pub(crate) half_step_accumulator: HalfStepAccumulator,
}

impl ProfileState {
    /// Create a state at rest.
    pub const fn new() -> Self {
        Self {
            mode: Mode::Position,
            phase: Phase::Idle,
            active: false,
            halt_at_rest: false,
            steps_required: 0,
            steps_middle: 0,
            steps_accelerated: 0,
            steps_taken: 0,
            target_velocity: 0,
            actual_velocity: 0,
            acceleration: 0,
            velocity_accumulator: VelocityAccumulator::new(),
            step_accumulator: StepAccumulator::new(),
            half_step_accumulator: HalfStepAccumulator::new(),
        }
    }

    /// Check whether a move or velocity run is in progress.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.active
    }

    /// Current decision policy.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current ramp phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Steps the active move has to take.
    #[inline]
    pub fn steps_required(&self) -> u32 {
        self.steps_required
    }

    /// Midpoint of the move, where a triangular profile turns around.
    #[inline]
    pub fn steps_middle(&self) -> u32 {
        self.steps_middle
    }

    /// Steps consumed reaching the target velocity.
    #[inline]
    pub fn steps_accelerated(&self) -> u32 {
        self.steps_accelerated
    }

    /// Steps counted so far.
    #[inline]
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Target velocity (load value).
    #[inline]
    pub fn target_velocity(&self) -> u32 {
        self.target_velocity
    }

    /// Instantaneous velocity (load value).
    #[inline]
    pub fn actual_velocity(&self) -> u32 {
        self.actual_velocity
    }

    /// Ramp increment per tick (load value).
    #[inline]
    pub fn acceleration(&self) -> u32 {
        self.acceleration
    }

    /// Arm a position move. `steps_required` is already in microsteps.
    pub(crate) fn begin_position(
        &mut self,
        steps_required: u32,
        target_velocity: u32,
        acceleration: u32,
    ) {
        self.steps_required = steps_required;
        self.steps_middle = steps_required >> 1;
        self.target_velocity = target_velocity;
        self.acceleration = acceleration;
        self.mode = Mode::Position;
        self.phase = Phase::Accelerating;
        self.halt_at_rest = false;
        self.active = true;
    }

    /// Arm (or retarget) a velocity run.
    pub(crate) fn begin_velocity(&mut self, target_velocity: u32, acceleration: u32) {
        self.target_velocity = target_velocity;
        self.acceleration = acceleration;
        self.mode = Mode::Velocity;
        self.halt_at_rest = false;
        self.active = true;
    }

    /// Start ramping down to rest.
    ///
    /// Returns `true` if the state went straight to rest instead.
    pub(crate) fn request_stop(&mut self) -> bool {
        if !self.active {
            return true;
        }

        match self.mode {
            Mode::Velocity => {
                self.target_velocity = 0;
                self.halt_at_rest = true;
            }
            Mode::Position => match self.phase {
                Phase::Accelerating => {
                    if self.steps_taken == 0 {
                        self.reset();
                        return true;
                    }
                    // Ramp down over as many steps as the ramp up took
                    let ramp = self.steps_taken.saturating_mul(2);
                    self.steps_required = self.steps_required.min(ramp);
                    self.phase = Phase::Decelerating;
                }
                Phase::Uniform => {
                    let ramp = self.steps_taken.saturating_add(self.steps_accelerated);
                    self.steps_required = self.steps_required.min(ramp);
                    self.phase = Phase::Decelerating;
                }
                Phase::Decelerating => {}
                Phase::Idle => {
                    self.reset();
                    return true;
                }
            },
        }

        false
    }

    /// Return to the zeroed rest form.
    pub(crate) fn reset(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_position_computes_middle() {
        let mut state = ProfileState::new();
        state.begin_position(201, 50, 1);

        assert!(state.is_busy());
        assert_eq!(state.phase(), Phase::Accelerating);
        assert_eq!(state.mode(), Mode::Position);
        assert_eq!(state.steps_middle(), 100);
    }

    #[test]
    fn test_reset_returns_to_rest() {
        let mut state = ProfileState::new();
        state.begin_velocity(30, 4);
        state.actual_velocity = 12;
        state.steps_taken = 7;
        state.step_accumulator.accumulate(1000);

        state.reset();

        assert!(!state.is_busy());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.actual_velocity(), 0);
        assert_eq!(state.steps_taken(), 0);
        assert_eq!(state.step_accumulator.value(), 0);
    }

    #[test]
    fn test_request_stop_shortens_uniform_move() {
        let mut state = ProfileState::new();
        state.begin_position(1000, 50, 1);
        state.phase = Phase::Uniform;
        state.steps_accelerated = 120;
        state.steps_taken = 300;

        assert!(!state.request_stop());
        assert_eq!(state.phase(), Phase::Decelerating);
        assert_eq!(state.steps_required(), 420);
    }

    #[test]
    fn test_request_stop_before_first_step() {
        let mut state = ProfileState::new();
        state.begin_position(1000, 50, 1);

        assert!(state.request_stop());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_direction_from_steps() {
        assert_eq!(Direction::from_steps(0), Direction::Clockwise);
        assert_eq!(Direction::from_steps(5), Direction::Clockwise);
        assert_eq!(Direction::from_steps(-5), Direction::CounterClockwise);
        assert_eq!(Direction::CounterClockwise.sign(), -1);
    }
}
