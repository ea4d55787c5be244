//! Controller cell shared between thread mode and the timer interrupt.
//!
//! ```ignore
//! static MOTOR: SharedController<Controller> = SharedController::new();
//!
//! #[interrupt]
//! fn TIM2() {
//!     timer.clear_update_flag();
//!     let _ = MOTOR.on_interrupt();
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

use crate::error::Result;
use crate::motion::TickEvent;
use crate::timer::PeriodicTimer;

use super::driver::MotionController;

/// A controller slot guarded by a critical section.
///
/// Every access, including the tick handler, runs with interrupts masked, so
/// commands and ticks never interleave.
pub struct SharedController<C> {
    inner: Mutex<RefCell<Option<C>>>,
}

impl<C> SharedController<C> {
    /// Create an empty slot, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Place a controller in the slot, returning the previous one.
    pub fn install(&self, controller: C) -> Option<C> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(controller))
    }

    /// Remove the controller from the slot.
    pub fn take(&self) -> Option<C> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Run `f` on the controller inside a critical section.
    ///
    /// Returns `None` if the slot is empty.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<C> Default for SharedController<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<PUL, DIR, EN, TIM> SharedController<MotionController<PUL, DIR, EN, TIM>>
where
    PUL: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    TIM: PeriodicTimer,
{
    /// Tick handler body. `None` if no controller is installed.
    pub fn on_interrupt(&self) -> Option<Result<TickEvent>> {
        self.with(|controller| controller.on_tick())
    }
}
