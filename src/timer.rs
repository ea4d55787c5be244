//! Periodic timer capability.
//!
//! The timer is configured by the board support code; the controller only
//! arms and disarms it. While armed, the board's interrupt handler must call
//! [`MotionController::on_tick`](crate::MotionController::on_tick) (or
//! [`SharedController::on_interrupt`](crate::SharedController::on_interrupt))
//! once per period and clear its own pending flag.

/// A fixed-period timer that drives the tick engine.
pub trait PeriodicTimer {
    /// Start counting; with `interrupt_enabled` the update interrupt fires every period.
    fn start(&mut self, interrupt_enabled: bool);

    /// Stop counting and disable the update interrupt.
    fn stop(&mut self);
}

impl<T: PeriodicTimer + ?Sized> PeriodicTimer for &mut T {
    #[inline]
    fn start(&mut self, interrupt_enabled: bool) {
        (**self).start(interrupt_enabled)
    }

    #[inline]
    fn stop(&mut self) {
        (**self).stop()
    }
}
