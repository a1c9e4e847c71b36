//! Hopper Game - Game logic and systems
//!
//! Provides the player controller, input handling, and level layout.

pub mod input;
pub mod level;
pub mod player;

pub use input::{InputAction, InputBindings, InputHandler, InputState};
pub use level::{LevelError, LevelLayout, Platform};
pub use player::{
    ConfigError, JumpCharge, MovementConfig, MovementState, PlayerController, PlayerState,
    TickInput,
};
