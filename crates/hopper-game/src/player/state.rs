//! Player movement state machine
//!
//! `MovementState` is pure data plus arithmetic: it never touches the physics
//! world, so every tick can be driven from plain values.

use glam::Vec2;
use hopper_core::Facing;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::jump::{JumpCharge, JumpInput};
use super::movement::{accelerate, decelerate};
use super::MovementConfig;
use crate::input::{InputAction, InputState};

/// Movement mode the player is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Walking,
    Swimming,
    Climbing,
}

/// Everything the movement code reads for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1]
    pub direction: f32,
    /// Sprint modifier held
    pub sprint: bool,
    /// Jump edges
    pub jump: JumpInput,
    /// Standing on a floor after the previous move
    pub on_floor: bool,
}

impl TickInput {
    /// Sample the action state; `on_floor` comes from the physics body
    pub fn from_input(input: &InputState, on_floor: bool) -> Self {
        Self {
            direction: input.axis(InputAction::MoveLeft, InputAction::MoveRight),
            sprint: input.is_held(InputAction::Sprint),
            jump: JumpInput {
                pressed: input.is_just_pressed(InputAction::Jump),
                released: input.is_just_released(InputAction::Jump),
            },
            on_floor,
        }
    }
}

/// Velocity, mode, jump charge and facing of the player
#[derive(Debug, Clone, Default)]
pub struct MovementState {
    /// Current velocity
    pub velocity: Vec2,
    /// Current mode
    pub state: PlayerState,
    /// Jump charge in progress
    pub jump: JumpCharge,
    /// Which way the sprite faces
    pub facing: Facing,
}

impl MovementState {
    /// Create a walking state at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the update for the current mode.
    ///
    /// Returns the velocity to hand to the physics body, or `None` when the
    /// mode has no movement of its own and the body should stay put.
    pub fn step(&mut self, config: &MovementConfig, input: TickInput, dt: f32) -> Option<Vec2> {
        match self.state {
            PlayerState::Walking => Some(self.update_walking(config, input, dt)),
            // No swimming or climbing movement yet
            PlayerState::Swimming | PlayerState::Climbing => None,
        }
    }

    /// Switch mode. Enter/exit logic for new modes hooks in here.
    ///
    /// Switching to the mode already active does nothing, so enter logic
    /// never re-runs for the current mode.
    pub fn switch_state(&mut self, new_state: PlayerState) {
        if new_state == self.state {
            return;
        }
        debug!("Player state {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
    }

    /// Walking: horizontal accel/friction, jump charge, gravity, facing.
    ///
    /// Facing is taken from the velocity committed by the previous tick (after
    /// collision), so it trails the input by one tick.
    pub fn update_walking(&mut self, config: &MovementConfig, input: TickInput, dt: f32) -> Vec2 {
        let up = config.up();
        let mut velocity = self.velocity;

        let max_speed = config.max_speed(input.sprint);

        // Only the horizontal part goes through accel/friction
        let mut horizontal = Vec2::new(velocity.x, 0.0);
        horizontal = accelerate(
            horizontal,
            Vec2::new(input.direction, 0.0),
            max_speed,
            config.acceleration(input.on_floor),
            dt,
        );
        horizontal = decelerate(
            horizontal,
            config.deceleration(input.on_floor),
            config.stop_speed,
            dt,
        );
        velocity.x = horizontal.x;

        velocity = self.jump.update(config, velocity, input.jump, input.on_floor, dt);

        velocity -= up * config.gravity * dt;

        self.facing = Facing::from_velocity_x(self.velocity.x, self.facing);
        self.velocity = velocity;
        velocity
    }

    /// Store the velocity the physics body resolved
    pub fn commit(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }
}
