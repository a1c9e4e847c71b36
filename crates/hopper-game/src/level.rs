//! Level layout: static platforms and the player spawn point
//!
//! Layouts are stored as JSON, e.g.
//!
//! ```json
//! {
//!   "spawn": [0.0, 40.0],
//!   "platforms": [{ "center": [0.0, -10.0], "half_extents": [400.0, 10.0] }]
//! }
//! ```

use std::path::Path;

use glam::Vec2;
use hopper_physics::{ColliderHandle, PhysicsWorld};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// An axis-aligned solid box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Platform {
    /// Platform whose top surface spans `left..right` at height `top`
    pub fn from_top(left: f32, right: f32, top: f32, thickness: f32) -> Self {
        let half_extents = Vec2::new((right - left) * 0.5, thickness * 0.5);
        Self {
            center: Vec2::new((left + right) * 0.5, top - half_extents.y),
            half_extents,
        }
    }

    /// Height of the top surface
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }
}

/// Errors that can occur while loading a level
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("platform {index} has invalid extents {half_extents}")]
    InvalidPlatform { index: usize, half_extents: Vec2 },

    #[error("level has no platforms")]
    Empty,
}

/// Where the player starts and what it can stand on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Player spawn point (feet)
    pub spawn: Vec2,
    /// Static geometry
    pub platforms: Vec<Platform>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(0.0, 40.0),
            platforms: vec![
                // Ground
                Platform::from_top(-400.0, 400.0, 0.0, 20.0),
                // Low ledge, reachable with a tapped jump
                Platform::from_top(80.0, 160.0, 24.0, 8.0),
                // High ledge, needs a held jump
                Platform::from_top(200.0, 280.0, 56.0, 8.0),
                // Walls at both ends
                Platform::from_top(-420.0, -400.0, 200.0, 200.0),
                Platform::from_top(400.0, 420.0, 200.0, 200.0),
            ],
        }
    }
}

impl LevelLayout {
    /// Parse and validate a layout from JSON text
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let layout: LevelLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load and validate a layout from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let layout = Self::from_json(&json)?;
        info!("Loaded level from {:?} ({} platforms)", path, layout.platforms.len());
        Ok(layout)
    }

    /// Check every platform has a positive, finite size
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.platforms.is_empty() {
            return Err(LevelError::Empty);
        }
        for (index, platform) in self.platforms.iter().enumerate() {
            let extents = platform.half_extents;
            if !extents.is_finite()
                || !platform.center.is_finite()
                || extents.x <= 0.0
                || extents.y <= 0.0
            {
                return Err(LevelError::InvalidPlatform {
                    index,
                    half_extents: extents,
                });
            }
        }
        Ok(())
    }

    /// Insert every platform as a static collider
    pub fn build(&self, physics: &mut PhysicsWorld) -> Vec<ColliderHandle> {
        let handles: Vec<_> = self
            .platforms
            .iter()
            .map(|p| physics.create_static_box(p.half_extents, p.center))
            .collect();
        physics.update_queries();
        debug!("Built {} platform colliders", handles.len());
        handles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_top() {
        let platform = Platform::from_top(-10.0, 30.0, 5.0, 4.0);
        assert_eq!(platform.center, Vec2::new(10.0, 3.0));
        assert_eq!(platform.half_extents, Vec2::new(20.0, 2.0));
        assert_eq!(platform.top(), 5.0);
    }

    #[test]
    fn test_default_layout_is_valid() {
        let layout = LevelLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.platforms[0].top(), 0.0);
        assert!(layout.spawn.y > layout.platforms[0].top());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "spawn": [0.0, 40.0],
            "platforms": [
                { "center": [0.0, -10.0], "half_extents": [400.0, 10.0] }
            ]
        }"#;
        let layout = LevelLayout::from_json(json).unwrap();
        assert_eq!(layout.platforms.len(), 1);
        assert_eq!(layout.platforms[0].top(), 0.0);
    }

    #[test]
    fn test_rejects_bad_levels() {
        let empty = r#"{ "spawn": [0.0, 0.0], "platforms": [] }"#;
        assert!(matches!(LevelLayout::from_json(empty), Err(LevelError::Empty)));

        let flat = r#"{
            "spawn": [0.0, 0.0],
            "platforms": [
                { "center": [0.0, 0.0], "half_extents": [10.0, 10.0] },
                { "center": [0.0, 0.0], "half_extents": [10.0, 0.0] }
            ]
        }"#;
        assert!(matches!(
            LevelLayout::from_json(flat),
            Err(LevelError::InvalidPlatform { index: 1, .. })
        ));

        assert!(matches!(
            LevelLayout::from_json("not json"),
            Err(LevelError::Parse(_))
        ));
    }

    #[test]
    fn test_build_inserts_colliders() {
        let mut physics = PhysicsWorld::new();
        let layout = LevelLayout::default();
        let handles = layout.build(&mut physics);
        assert_eq!(handles.len(), layout.platforms.len());
        assert!(handles.iter().all(|h| physics.get_collider(*h).is_some()));
    }
}
