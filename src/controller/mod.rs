//! Motion controller and its hardware bindings.
//!
//! - [`MotionController`]: command layer driving the pulse, direction and
//!   enable pins from timer ticks
//! - [`MotionControllerBuilder`]: construction from pins, timer and config
//! - [`SharedController`]: interrupt-safe slot for the controller
//! - [`Position`]: absolute position tracking

mod builder;
mod driver;
mod position;
mod shared;

pub use builder::MotionControllerBuilder;
pub use driver::MotionController;
pub use position::Position;
pub use shared::SharedController;
