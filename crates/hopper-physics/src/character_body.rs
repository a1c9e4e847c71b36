//! Kinematic character body using rapier2d's character controller
//!
//! `position` is the bottom center of the body (the feet); the collider sits
//! `half_extents.y` above it along the up direction.

use glam::Vec2;
use nalgebra::Unit;
use rapier2d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier2d::prelude::*;
use tracing::warn;

use crate::{PhysicsError, PhysicsWorld};

/// Tolerance used to decide whether a movement component was blocked
const BLOCK_EPSILON: f32 = 1.0e-3;

/// Character body configuration (lengths in world units, pixels by default)
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Half width and half height of the box shape (default: 6 x 12)
    pub half_extents: Vec2,
    /// Unit "up" vector; floors are surfaces whose normal points along it
    pub up_direction: Vec2,
    /// Maximum walkable slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing small ledges (default: 4)
    pub step_height: f32,
    /// Gap kept between the shape and obstacles (default: 0.5)
    pub skin_width: f32,
    /// Whether to snap to ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(6.0, 12.0),
            up_direction: Vec2::Y,
            max_slope_angle: 45.0,
            step_height: 4.0,
            skin_width: 0.5,
            snap_to_ground: true,
            ground_snap_distance: 2.0,
        }
    }
}

/// Character body for player movement with collision
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Current position (feet)
    pub position: Vec2,
    /// The collider handle for this body
    pub collider_handle: Option<ColliderHandle>,
    on_floor: bool,
    on_wall: bool,
    on_ceiling: bool,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl CharacterBody {
    /// Create a new character body with default config
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    /// Create a new character body with custom config
    pub fn with_config(config: CharacterBodyConfig) -> Self {
        let up = config.up_direction.try_normalize().unwrap_or(Vec2::Y);

        let mut controller = KinematicCharacterController::default();
        controller.up = Unit::new_normalize(vector![up.x, up.y]);
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: false,
        });
        controller.snap_to_ground = if config.snap_to_ground {
            Some(CharacterLength::Absolute(config.ground_snap_distance))
        } else {
            None
        };
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config: CharacterBodyConfig {
                up_direction: up,
                ..config
            },
            position: Vec2::ZERO,
            collider_handle: None,
            on_floor: false,
            on_wall: false,
            on_ceiling: false,
            controller,
        }
    }

    fn center_of(&self, feet: Vec2) -> Vec2 {
        feet + self.config.up_direction * self.config.half_extents.y
    }

    /// Spawn the body in the physics world with its feet at `position`
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec2) -> ColliderHandle {
        self.position = position;
        self.on_floor = false;
        self.on_wall = false;
        self.on_ceiling = false;

        let center = self.center_of(position);
        let collider = ColliderBuilder::cuboid(
            self.config.half_extents.x,
            self.config.half_extents.y,
        )
        .translation(vector![center.x, center.y])
        .friction(0.0)
        .restitution(0.0)
        .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        physics.update_queries();
        handle
    }

    /// Move by `velocity * dt`, sliding along whatever blocks the way.
    ///
    /// Returns the velocity after collision: the component pushing into the
    /// floor or ceiling is removed, and blocked sideways motion is reduced to
    /// what the body actually travelled.
    pub fn move_and_slide(
        &mut self,
        physics: &mut PhysicsWorld,
        velocity: Vec2,
        dt: f32,
    ) -> Result<Vec2, PhysicsError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PhysicsError::InvalidDelta(dt));
        }
        let handle = self.collider_handle.ok_or(PhysicsError::NotSpawned)?;
        let collider = physics
            .collider_set
            .get(handle)
            .ok_or(PhysicsError::ColliderMissing(handle))?;

        let center = self.center_of(self.position);
        let current_pos = Isometry::translation(center.x, center.y);
        let desired = velocity * dt;

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            physics.query_pipeline(),
            collider.shape(),
            &current_pos,
            vector![desired.x, desired.y],
            QueryFilter::default().exclude_collider(handle),
            |_| {},
        );

        let effective = Vec2::new(movement.translation.x, movement.translation.y);
        self.position += effective;

        let center = self.center_of(self.position);
        match physics.collider_set.get_mut(handle) {
            Some(collider) => collider.set_translation(vector![center.x, center.y]),
            None => warn!("Character collider {:?} vanished during move", handle),
        }

        let up = self.config.up_direction;
        let desired_up = desired.dot(up);
        let effective_up = effective.dot(up);
        let desired_side = desired - up * desired_up;
        let effective_side = effective - up * effective_up;

        self.on_floor = movement.grounded;
        self.on_ceiling = desired_up > BLOCK_EPSILON && effective_up < desired_up - BLOCK_EPSILON;
        self.on_wall = desired_side.length() > BLOCK_EPSILON
            && effective_side.length() < desired_side.length() - BLOCK_EPSILON;

        let mut vertical = velocity.dot(up);
        let mut side = velocity - up * vertical;
        if (self.on_floor && vertical < 0.0) || (self.on_ceiling && vertical > 0.0) {
            vertical = 0.0;
        }
        if self.on_wall {
            side = effective_side / dt;
        }

        Ok(side + up * vertical)
    }

    /// Set the body's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec2) {
        self.position = position;
        self.on_floor = false;

        if let Some(handle) = self.collider_handle {
            let center = self.center_of(position);
            if let Some(collider) = physics.collider_set.get_mut(handle) {
                collider.set_translation(vector![center.x, center.y]);
            }
            physics.update_queries();
        }
    }

    /// Whether the last move ended standing on a floor
    pub fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    /// Whether the last move was blocked sideways
    pub fn is_on_wall(&self) -> bool {
        self.on_wall
    }

    /// Whether the last move was blocked going up
    pub fn is_on_ceiling(&self) -> bool {
        self.on_ceiling
    }

    /// Center of the box shape
    pub fn center_position(&self) -> Vec2 {
        self.center_of(self.position)
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self::new()
    }
}
