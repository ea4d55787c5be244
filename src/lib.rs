//! # spta-motion
//!
//! Stepper pulse generation with trapezoidal ramps, computed by fixed-point
//! accumulators on a fixed-rate timer interrupt (SPTA). Built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Tick-driven**: one constant-rate interrupt; speed comes from pulse density
//! - **Integer-only hot path**: additions and carries, no division or floats per tick
//! - **Position and velocity modes**: fixed-distance moves or run-until-stopped
//! - **Trapezoidal / triangular profiles**: chosen automatically from the move length
//! - **embedded-hal 1.0**: `OutputPin` for PULSE/DIR/ENABLE
//! - **no_std compatible**: core library works without standard library
//! - **Configuration-driven**: motor, timer and move presets from TOML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spta_motion::{MotionController, SharedController};
//!
//! let config = spta_motion::load_config("drive.toml")?;
//!
//! let mut motor = MotionController::builder()
//!     .from_config(&config)
//!     .pulse_pin(pul)
//!     .dir_pin(dir)
//!     .enable_pin(en)
//!     .timer(tim2)
//!     .build()?;
//!
//! motor.set_enabled(true)?;
//! motor.move_by_steps(200, 50, 1)?;
//!
//! // In the timer interrupt:
//! motor.on_tick()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod controller;
pub mod error;
pub mod motion;
pub mod timer;

// Re-exports for ergonomic API
pub use config::{validate_config, DriveConfig, MotorConfig, MoveConfig, TimerConfig};
pub use controller::{MotionController, MotionControllerBuilder, Position, SharedController};
pub use error::{Error, Result};
pub use motion::{
    load_value_to_velocity, tick, velocity_to_load_value, Direction, Mode, MovePlan, Phase,
    ProfileShape, ProfileState, TickEvent,
};
pub use timer::PeriodicTimer;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Microsteps, PulsesPerSec, PulsesPerSecSquared};
