//! Tick decision engine.
//!
//! [`tick`] runs once per timer period, independent of the motor speed:
//! velocity is realised through pulse density. The function only touches the
//! profile state and reports what the outputs should do, so it is cheap enough
//! for interrupt context and can be exercised without hardware.

use super::state::{Mode, Phase, ProfileState};

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickEvent {
    /// Drive the pulse line HIGH.
    pub rising_edge: bool,
    /// Drive the pulse line LOW; one step was counted.
    pub step: bool,
    /// The move finished this tick and the state is back at rest.
    pub completed: bool,
}

/// Advance the profile by one timer period.
pub fn tick(state: &mut ProfileState) -> TickEvent {
    if !state.active {
        return TickEvent::default();
    }

    let finished = match state.mode {
        Mode::Position => decide_position(state),
        Mode::Velocity => decide_velocity(state),
    };

    if finished {
        state.reset();
        return TickEvent {
            completed: true,
            ..TickEvent::default()
        };
    }

    generate_pulse(state)
}

/// Returns `true` when the move is complete.
fn decide_position(state: &mut ProfileState) -> bool {
    match state.phase {
        Phase::Accelerating => {
            // A single-step move has no cruise: it holds speed until the step lands.
            if state.actual_velocity >= state.target_velocity && state.steps_middle != 0 {
                state.actual_velocity = state.target_velocity;
                state.steps_accelerated = state.steps_taken;
                state.phase = Phase::Uniform;
                return false;
            }

            if state.actual_velocity < state.target_velocity {
                if state.velocity_accumulator.accumulate(state.acceleration) {
                    state.actual_velocity += 1;
                }
            } else {
                state.actual_velocity = state.target_velocity;
            }

            let turn_around = if state.steps_middle != 0 {
                state.steps_taken >= state.steps_middle
            } else {
                state.steps_taken > 0
            };
            if turn_around {
                state.phase = Phase::Decelerating;
            }
            false
        }
        Phase::Uniform => {
            let remaining = state.steps_required.saturating_sub(state.steps_taken);
            if remaining <= state.steps_accelerated {
                state.phase = Phase::Decelerating;
            }
            false
        }
        Phase::Decelerating => {
            if state.steps_taken >= state.steps_required {
                return true;
            }

            if state.velocity_accumulator.accumulate(state.acceleration) {
                // Never ramp to a standstill while steps remain
                state.actual_velocity = state.actual_velocity.saturating_sub(1).max(1);
            }
            false
        }
        Phase::Idle => true,
    }
}

/// Returns `true` when a soft stop has brought the run to rest.
fn decide_velocity(state: &mut ProfileState) -> bool {
    let actual = state.actual_velocity;
    let target = state.target_velocity;

    if state.halt_at_rest && actual == 0 && target == 0 {
        return true;
    }

    if actual != target && state.velocity_accumulator.accumulate(state.acceleration) {
        state.actual_velocity = if actual < target {
            (actual + 1).min(target)
        } else {
            (actual - 1).max(target)
        };
    }

    false
}

fn generate_pulse(state: &mut ProfileState) -> TickEvent {
    if state.mode == Mode::Position && state.steps_taken >= state.steps_required {
        return TickEvent::default();
    }

    let velocity = state.actual_velocity;
    let rising_edge = state.half_step_accumulator.accumulate(velocity);
    let step = state.step_accumulator.accumulate(velocity);
    if step {
        state.steps_taken = state.steps_taken.wrapping_add(1);
    }

    TickEvent {
        rising_edge,
        step,
        completed: false,
    }
}
