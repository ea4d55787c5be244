//! Motion controller: command layer on top of the tick engine.
//!
//! Generic over embedded-hal 1.0 output pins and a [`PeriodicTimer`].

use embedded_hal::digital::OutputPin;

use crate::config::units::{Microsteps, PulsesPerSec, PulsesPerSecSquared};
use crate::config::{validate_move, MoveConfig};
use crate::error::{MotorError, Result};
use crate::motion::engine::{self, TickEvent};
use crate::motion::fixed::{load_value_to_velocity, velocity_to_load_value, MAX_LOAD_VALUE};
use crate::motion::{Direction, Mode, MovePlan, Phase, ProfileState};
use crate::timer::PeriodicTimer;

use super::builder::MotionControllerBuilder;
use super::position::Position;

/// SPTA motion controller for one stepper driver.
///
/// Generic over:
/// - `PUL`: pulse (STEP) pin
/// - `DIR`: direction pin
/// - `EN`: driver enable pin
/// - `TIM`: periodic timer whose interrupt calls [`on_tick`](Self::on_tick)
///
/// At most one move runs at a time. Commands issued while busy are ignored
/// and return `Ok(false)`.
pub struct MotionController<PUL, DIR, EN, TIM>
where
    PUL: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    TIM: PeriodicTimer,
{
    pulse_pin: PUL,
    dir_pin: DIR,
    enable_pin: EN,
    timer: TIM,

    /// Profile of the active move.
    state: ProfileState,

    /// Absolute position in microsteps.
    position: Position,

    /// Latched direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Last level driven on the pulse pin.
    pulse_high: bool,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    microsteps: Microsteps,
    timer_frequency: u32,
    invert_direction: bool,
    enable_active_low: bool,
}

impl<PUL, DIR, EN, TIM> MotionController<PUL, DIR, EN, TIM>
where
    PUL: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    TIM: PeriodicTimer,
{
    /// Start building a controller.
    pub fn builder() -> MotionControllerBuilder<PUL, DIR, EN, TIM> {
        MotionControllerBuilder::new()
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        pulse_pin: PUL,
        dir_pin: DIR,
        enable_pin: EN,
        timer: TIM,
        name: heapless::String<32>,
        microsteps: Microsteps,
        timer_frequency: u32,
        invert_direction: bool,
        enable_active_low: bool,
    ) -> Self {
        Self {
            pulse_pin,
            dir_pin,
            enable_pin,
            timer,
            state: ProfileState::new(),
            position: Position::new(microsteps),
            current_direction: None,
            pulse_high: false,
            name,
            microsteps,
            timer_frequency,
            invert_direction,
            enable_active_low,
        }
    }

    /// Start a position move of `steps` whole steps.
    ///
    /// `target_velocity` and `acceleration` are load values. The direction
    /// pin is latched from the sign of `steps` before the timer starts.
    ///
    /// Returns `Ok(false)` without touching anything if a move is already in
    /// progress, or if the move is empty (zero steps, velocity or
    /// acceleration).
    pub fn move_by_steps(
        &mut self,
        steps: i32,
        target_velocity: u32,
        acceleration: u32,
    ) -> Result<bool> {
        if self.state.is_busy() {
            #[cfg(feature = "defmt")]
            defmt::trace!("{}: busy, move ignored", self.name.as_str());
            return Ok(false);
        }

        let steps_required = self.microsteps.scale(steps.unsigned_abs());
        let target_velocity = target_velocity.min(MAX_LOAD_VALUE);
        let acceleration = acceleration.min(MAX_LOAD_VALUE);
        if steps_required == 0 || target_velocity == 0 || acceleration == 0 {
            return Ok(false);
        }

        self.latch_direction(Direction::from_steps(steps))?;
        self.state
            .begin_position(steps_required, target_velocity, acceleration);
        self.timer.start(true);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{}: move {} steps, target {}, accel {}",
            self.name.as_str(),
            steps,
            target_velocity,
            acceleration
        );

        Ok(true)
    }

    /// Start a move from a configured preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset's load values are out of range.
    pub fn start_preset(&mut self, preset: &MoveConfig) -> Result<bool> {
        validate_move(preset)?;
        self.move_by_steps(preset.steps, preset.target_velocity, preset.acceleration)
    }

    /// Run at a constant speed until stopped.
    ///
    /// Both operands go through the velocity conversion. Calling this again
    /// while a velocity run is active retargets it; the ramp continues from
    /// the current speed. Ignored (`Ok(false)`) while a position move runs.
    pub fn set_velocity(
        &mut self,
        speed: PulsesPerSec,
        acceleration: PulsesPerSecSquared,
    ) -> Result<bool> {
        let running = self.state.is_busy();
        if running && self.state.mode() == Mode::Position {
            return Ok(false);
        }

        let target = velocity_to_load_value(speed, self.timer_frequency);
        let accel =
            velocity_to_load_value(PulsesPerSec(acceleration.0), self.timer_frequency).max(1);

        if self.current_direction.is_none() {
            self.latch_direction(Direction::Clockwise)?;
        }

        self.state.begin_velocity(target, accel);
        if !running {
            self.timer.start(true);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: velocity target {}, accel {}", self.name.as_str(), target, accel);

        Ok(true)
    }

    /// Latch a direction for the next run. Ignored while busy.
    pub fn set_direction(&mut self, direction: Direction) -> Result<bool> {
        if self.state.is_busy() {
            return Ok(false);
        }
        self.latch_direction(direction)?;
        Ok(true)
    }

    /// Abort immediately: back to rest, pulse line low, timer stopped.
    pub fn stop(&mut self) -> Result<()> {
        if !self.state.is_busy() {
            return Ok(());
        }

        self.state.reset();
        self.finish()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: stopped", self.name.as_str());

        Ok(())
    }

    /// Ramp down and stop.
    ///
    /// A position move is shortened to the distance needed to decelerate; a
    /// velocity run is retargeted to zero and ends once at rest.
    pub fn decelerate_to_stop(&mut self) -> Result<()> {
        if !self.state.is_busy() {
            return Ok(());
        }

        if self.state.request_stop() {
            self.finish()?;
        }
        Ok(())
    }

    /// Enable or disable the driver board.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if enabled != self.enable_active_low {
            self.enable_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.enable_pin.set_low().map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    /// Run one timer period. Call from the timer interrupt.
    pub fn on_tick(&mut self) -> Result<TickEvent> {
        let event = engine::tick(&mut self.state);

        if event.rising_edge {
            self.pulse_pin.set_high().map_err(|_| MotorError::PinError)?;
            self.pulse_high = true;
        }

        if event.step {
            self.pulse_pin.set_low().map_err(|_| MotorError::PinError)?;
            self.pulse_high = false;
            if let Some(direction) = self.current_direction {
                self.position.advance(direction);
            }
        }

        if event.completed {
            self.finish()?;

            #[cfg(feature = "defmt")]
            defmt::debug!("{}: move complete", self.name.as_str());
        }

        Ok(event)
    }

    /// Predict the profile of a move with this controller's microstep setting.
    pub fn plan(&self, steps: i32, target_velocity: u32, acceleration: u32) -> MovePlan {
        MovePlan::predict(
            self.microsteps.scale(steps.unsigned_abs()),
            target_velocity,
            acceleration,
        )
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the profile state.
    #[inline]
    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    /// Get current ramp phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Get current decision policy.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Check if a move or velocity run is in progress.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Get the latched direction, if any.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Get the absolute position.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Set the current position as the origin (zero).
    pub fn set_origin(&mut self) {
        self.position.set_origin();
    }

    /// Get the instantaneous pulse rate.
    #[inline]
    pub fn velocity(&self) -> PulsesPerSec {
        load_value_to_velocity(self.state.actual_velocity(), self.timer_frequency)
    }

    /// Get the microstep setting.
    #[inline]
    pub fn microsteps(&self) -> Microsteps {
        self.microsteps
    }

    /// Get the tick frequency in Hz.
    #[inline]
    pub fn timer_frequency(&self) -> u32 {
        self.timer_frequency
    }

    /// Give back the pins and timer.
    pub fn release(self) -> (PUL, DIR, EN, TIM) {
        (self.pulse_pin, self.dir_pin, self.enable_pin, self.timer)
    }

    fn latch_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Clockwise => !self.invert_direction,
            Direction::CounterClockwise => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    /// Disarm the timer and leave the pulse line low.
    fn finish(&mut self) -> Result<()> {
        self.timer.stop();
        if self.pulse_high {
            self.pulse_pin.set_low().map_err(|_| MotorError::PinError)?;
            self.pulse_high = false;
        }
        Ok(())
    }
}
