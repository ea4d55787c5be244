//! Motion module for spta-motion.
//!
//! Fixed-point ramp generation: the profile state, the per-tick decision
//! engine, and move planning.

pub mod engine;
pub mod fixed;
pub mod plan;
mod state;

pub use engine::{tick, TickEvent};
pub use fixed::{load_value_to_velocity, quantum, velocity_to_load_value};
pub use plan::{MovePlan, ProfileShape};
pub use state::{Direction, Mode, Phase, ProfileState};
