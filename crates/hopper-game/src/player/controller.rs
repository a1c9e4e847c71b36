//! Player controller tying input, movement state and the physics body together

use glam::Vec2;
use hopper_core::Facing;
use hopper_physics::{CharacterBody, PhysicsError, PhysicsWorld};

use crate::input::InputState;

use super::{MovementConfig, MovementState, PlayerState, TickInput};

/// Player controller handling input, movement, and physics
pub struct PlayerController {
    /// Movement configuration
    pub config: MovementConfig,
    /// Physics character body
    pub body: CharacterBody,
    /// Velocity, mode, jump and facing
    movement: MovementState,
}

impl PlayerController {
    /// Create a new player controller
    pub fn new() -> Self {
        Self::with_config(MovementConfig::default())
    }

    /// Create a player controller with custom config
    pub fn with_config(config: MovementConfig) -> Self {
        Self {
            config,
            body: CharacterBody::new(),
            movement: MovementState::new(),
        }
    }

    /// Spawn the player in the world with its feet at `position`
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec2) {
        self.body.spawn(physics, position);
        self.movement.velocity = Vec2::ZERO;
        self.movement.jump.cancel();
    }

    /// Get the player's current position (feet)
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Get the player's current velocity
    pub fn velocity(&self) -> Vec2 {
        self.movement.velocity
    }

    /// Current movement mode
    pub fn state(&self) -> PlayerState {
        self.movement.state
    }

    /// Which way the sprite faces
    pub fn facing(&self) -> Facing {
        self.movement.facing
    }

    /// Whether the sprite should be drawn mirrored
    pub fn flip_h(&self) -> bool {
        self.movement.facing.flip_h()
    }

    /// Whether a jump charge is being applied
    pub fn is_jumping(&self) -> bool {
        self.movement.jump.jumping
    }

    /// Check if the player is on a floor
    pub fn is_on_floor(&self) -> bool {
        self.body.is_on_floor()
    }

    /// Switch movement mode
    pub fn switch_state(&mut self, new_state: PlayerState) {
        self.movement.switch_state(new_state);
    }

    /// Update the player for one physics tick
    pub fn physics_process(
        &mut self,
        physics: &mut PhysicsWorld,
        input: &InputState,
        dt: f32,
    ) -> Result<(), PhysicsError> {
        let tick = TickInput::from_input(input, self.body.is_on_floor());

        if let Some(velocity) = self.movement.step(&self.config, tick, dt) {
            let resolved = self.body.move_and_slide(physics, velocity, dt)?;
            self.movement.commit(resolved);
        }

        Ok(())
    }

    /// Teleport the player to a position
    pub fn teleport(&mut self, physics: &mut PhysicsWorld, position: Vec2) {
        self.body.set_position(physics, position);
        self.movement.velocity = Vec2::ZERO;
        self.movement.jump.cancel();
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}
