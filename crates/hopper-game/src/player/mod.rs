//! Player controller module
//!
//! Provides 2D platformer movement: walking with sprint, variable-height
//! jumps and the movement-mode state machine.

mod controller;
mod jump;
mod movement;
mod state;

pub use controller::PlayerController;
pub use jump::{JumpCharge, JumpInput};
pub use movement::{accelerate, decelerate, ConfigError, MovementConfig};
pub use state::{MovementState, PlayerState, TickInput};
