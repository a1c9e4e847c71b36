//! Hopper Physics - 2D collision world using rapier2d
//!
//! Provides static level geometry and a kinematic character body with
//! move-and-slide resolution.

mod character_body;
mod error;

pub use character_body::{CharacterBody, CharacterBodyConfig};
pub use error::PhysicsError;
pub use rapier2d::prelude::ColliderHandle;

use glam::Vec2;
use rapier2d::prelude::*;

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector for dynamic bodies (default: -490 on Y axis, in pixels).
    /// Kinematic character bodies ignore it and apply their own gravity.
    pub gravity: Vec2,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -490.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for shape casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation. Only dynamic rigid bodies are integrated;
    /// a world holding just static geometry and character bodies needs
    /// [`PhysicsWorld::update_queries`] instead.
    pub fn step(&mut self) {
        let gravity = vector![self.config.gravity.x, self.config.gravity.y];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.query_pipeline.update(&self.collider_set);
    }

    /// Refresh the query pipeline without stepping (after adding geometry)
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, platforms)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Create a static axis-aligned box collider centered at `position`
    pub fn create_static_box(&mut self, half_extents: Vec2, position: Vec2) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![position.x, position.y])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }

    pub(crate) fn query_pipeline(&self) -> &QueryPipeline {
        &self.query_pipeline
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
