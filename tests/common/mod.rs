//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use spta_motion::{PeriodicTimer, TickEvent};

/// Pulse pin that records its level and counts edges.
#[derive(Debug, Default)]
pub struct PulseProbe {
    pub high: bool,
    pub rising: u32,
    pub falling: u32,
}

impl ErrorType for PulseProbe {
    type Error = Infallible;
}

impl OutputPin for PulseProbe {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.rising += 1;
        }
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high {
            self.falling += 1;
        }
        self.high = false;
        Ok(())
    }
}

/// Pin that accepts anything.
#[derive(Debug, Default)]
pub struct NoopPin;

impl ErrorType for NoopPin {
    type Error = Infallible;
}

impl OutputPin for NoopPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Timer that records how the controller arms it.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    pub running: bool,
    pub interrupt_enabled: bool,
    pub starts: u32,
    pub stops: u32,
}

impl PeriodicTimer for RecordingTimer {
    fn start(&mut self, interrupt_enabled: bool) {
        self.running = true;
        self.interrupt_enabled = interrupt_enabled;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }
}

/// Call `on_tick` until a move completes or `limit` ticks pass.
///
/// Returns the number of ticks taken, or `None` if the limit was hit.
pub fn run_until_complete(
    mut on_tick: impl FnMut() -> spta_motion::Result<TickEvent>,
    limit: u64,
) -> Option<u64> {
    for n in 1..=limit {
        if on_tick().expect("tick failed").completed {
            return Some(n);
        }
    }
    None
}
