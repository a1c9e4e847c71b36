//! Core types used throughout Hopper

use serde::{Deserialize, Serialize};

/// Horizontal direction a 2D sprite is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal velocity.
    ///
    /// Zero velocity keeps the current facing so a stopped character does not
    /// snap back to the right.
    pub fn from_velocity_x(velocity_x: f32, current: Facing) -> Self {
        if velocity_x < 0.0 {
            Facing::Left
        } else if velocity_x > 0.0 {
            Facing::Right
        } else {
            current
        }
    }

    /// Whether a sprite authored facing right must be mirrored horizontally
    pub fn flip_h(&self) -> bool {
        matches!(self, Facing::Left)
    }
}
