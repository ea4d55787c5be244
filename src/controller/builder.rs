//! Builder pattern for MotionController.

use embedded_hal::digital::OutputPin;

use crate::config::units::Microsteps;
use crate::config::{DriveConfig, MotorConfig, DEFAULT_TIMER_FREQUENCY_HZ};
use crate::error::{ConfigError, Error, Result};
use crate::timer::PeriodicTimer;

use super::driver::MotionController;

/// Builder for creating MotionController instances.
pub struct MotionControllerBuilder<PUL, DIR, EN, TIM>
where
    PUL: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    TIM: PeriodicTimer,
{
    pulse_pin: Option<PUL>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    timer: Option<TIM>,
    name: Option<heapless::String<32>>,
    microsteps: Microsteps,
    timer_frequency: u32,
    invert_direction: bool,
    enable_active_low: bool,
}

impl<PUL, DIR, EN, TIM> Default for MotionControllerBuilder<PUL, DIR, EN, TIM>
where
    PUL: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    TIM: PeriodicTimer,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<PUL, DIR, EN, TIM> MotionControllerBuilder<PUL, DIR, EN, TIM>
where
    PUL: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    TIM: PeriodicTimer,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pulse_pin: None,
            dir_pin: None,
            enable_pin: None,
            timer: None,
            name: None,
            microsteps: Microsteps::FULL,
            timer_frequency: DEFAULT_TIMER_FREQUENCY_HZ,
            invert_direction: false,
            enable_active_low: true,
        }
    }

    /// Set the pulse (STEP) pin.
    pub fn pulse_pin(mut self, pin: PUL) -> Self {
        self.pulse_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the driver enable pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the tick timer.
    pub fn timer(mut self, timer: TIM) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set microstep configuration.
    pub fn microsteps(mut self, microsteps: Microsteps) -> Self {
        self.microsteps = microsteps;
        self
    }

    /// Set the tick frequency in Hz.
    pub fn timer_frequency(mut self, hz: u32) -> Self {
        self.timer_frequency = hz;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set enable pin polarity.
    pub fn enable_active_low(mut self, active_low: bool) -> Self {
        self.enable_active_low = active_low;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        if !config.name.is_empty() {
            self.name = Some(config.name.clone());
        }
        self.microsteps = config.microsteps;
        self.invert_direction = config.invert_direction;
        self.enable_active_low = config.enable_active_low;
        self
    }

    /// Configure motor and timer from a DriveConfig.
    pub fn from_config(self, config: &DriveConfig) -> Self {
        let mut builder = self.from_motor_config(&config.motor);
        builder.timer_frequency = config.timer.frequency_hz;
        builder
    }

    /// Build the MotionController.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the timer is missing, or the tick
    /// frequency is zero.
    pub fn build(self) -> Result<MotionController<PUL, DIR, EN, TIM>> {
        let pulse_pin = self
            .pulse_pin
            .ok_or(Error::Config(ConfigError::MissingField("pulse_pin")))?;
        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingField("dir_pin")))?;
        let enable_pin = self
            .enable_pin
            .ok_or(Error::Config(ConfigError::MissingField("enable_pin")))?;
        let timer = self
            .timer
            .ok_or(Error::Config(ConfigError::MissingField("timer")))?;

        if self.timer_frequency == 0 {
            return Err(Error::Config(ConfigError::InvalidTimerFrequency(0)));
        }

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("motor").unwrap_or_default());

        Ok(MotionController::new(
            pulse_pin,
            dir_pin,
            enable_pin,
            timer,
            name,
            self.microsteps,
            self.timer_frequency,
            self.invert_direction,
            self.enable_active_low,
        ))
    }
}
