use rapier2d::prelude::ColliderHandle;

/// Errors raised by the character body.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhysicsError {
    #[error("character body has not been spawned into a physics world")]
    NotSpawned,

    #[error("collider {0:?} is missing from the physics world")]
    ColliderMissing(ColliderHandle),

    #[error("invalid tick delta: {0}")]
    InvalidDelta(f32),
}
