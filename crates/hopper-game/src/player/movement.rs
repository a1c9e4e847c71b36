//! Movement configuration and the acceleration/friction helpers

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Maximum horizontal speed while walking (pixels per second)
    pub max_walk_speed: f32,
    /// Maximum horizontal speed while sprinting
    pub max_sprint_speed: f32,
    /// How fast the horizontal speed climbs towards the max
    pub walk_acceleration: f32,
    /// Friction rate applied every tick
    pub walk_deceleration: f32,
    /// Friction never works from a speed lower than this, so slow motion
    /// reaches zero instead of creeping
    pub stop_speed: f32,
    /// Upward acceleration the jump charge starts at
    pub max_jump_force: f32,
    /// Exponential decay rate of the jump charge while held
    pub jump_force_decay: f32,
    /// Multiplier on acceleration and friction while airborne
    pub air_control: f32,
    /// Constant downward acceleration
    pub gravity: f32,
    /// Unit "up" vector; gravity pulls against it and jumps push along it
    pub up_direction: Vec2,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_walk_speed: 70.0,
            max_sprint_speed: 140.0,
            walk_acceleration: 500.0,
            walk_deceleration: 4.0,
            stop_speed: 20.0,
            max_jump_force: 4000.0,
            jump_force_decay: 15.0,
            air_control: 0.5,
            gravity: 9.8 * 50.0,
            up_direction: Vec2::Y,
        }
    }
}

/// Rejected movement tuning
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    OutOfRange { field: &'static str, value: f32 },

    #[error("max_sprint_speed ({sprint}) is lower than max_walk_speed ({walk})")]
    SprintSlowerThanWalk { walk: f32, sprint: f32 },

    #[error("up_direction must be a non-zero finite vector")]
    InvalidUpDirection,
}

impl MovementConfig {
    /// Check every field is usable by the movement code
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_walk_speed", self.max_walk_speed),
            ("max_sprint_speed", self.max_sprint_speed),
            ("walk_acceleration", self.walk_acceleration),
            ("walk_deceleration", self.walk_deceleration),
            ("stop_speed", self.stop_speed),
            ("max_jump_force", self.max_jump_force),
            ("jump_force_decay", self.jump_force_decay),
            ("air_control", self.air_control),
            ("gravity", self.gravity),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if self.max_sprint_speed < self.max_walk_speed {
            return Err(ConfigError::SprintSlowerThanWalk {
                walk: self.max_walk_speed,
                sprint: self.max_sprint_speed,
            });
        }

        if !self.up_direction.is_finite() || self.up_direction.length_squared() == 0.0 {
            return Err(ConfigError::InvalidUpDirection);
        }

        Ok(())
    }

    /// Get the current max speed based on sprint state
    pub fn max_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.max_sprint_speed
        } else {
            self.max_walk_speed
        }
    }

    /// Get the current acceleration based on grounded state
    pub fn acceleration(&self, grounded: bool) -> f32 {
        if grounded {
            self.walk_acceleration
        } else {
            self.walk_acceleration * self.air_control
        }
    }

    /// Get the current deceleration based on grounded state
    pub fn deceleration(&self, grounded: bool) -> f32 {
        if grounded {
            self.walk_deceleration
        } else {
            self.walk_deceleration * self.air_control
        }
    }

    /// Normalized up direction
    pub fn up(&self) -> Vec2 {
        self.up_direction.try_normalize().unwrap_or(Vec2::Y)
    }
}

/// Add speed along `direction` without letting the speed pass `max_speed`.
///
/// The amount added in one tick is capped at `acceleration * dt`, and at
/// whatever gap is left between the current speed and `max_speed`.
pub fn accelerate(
    velocity: Vec2,
    direction: Vec2,
    max_speed: f32,
    acceleration: f32,
    dt: f32,
) -> Vec2 {
    let speed = velocity.length();
    let add_speed = (max_speed - speed).clamp(0.0, (acceleration * dt).max(0.0));
    velocity + direction * add_speed
}

/// Friction: shrink `velocity` towards zero, keeping its direction.
///
/// Speeds below `stop_speed` lose speed as if they were moving at
/// `stop_speed`, which brings them to a full stop in finite time.
pub fn decelerate(velocity: Vec2, deceleration: f32, stop_speed: f32, dt: f32) -> Vec2 {
    let speed = velocity.length();
    if speed == 0.0 {
        return velocity;
    }

    let control = stop_speed.max(speed);
    let drop = control * deceleration * dt;
    velocity * ((speed - drop).max(0.0) / speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_default_config_is_valid() {
        let config = MovementConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_speed(false), 70.0);
        assert_eq!(config.max_speed(true), 140.0);
        assert!((config.gravity - 490.0).abs() < 0.001);
    }

    #[test]
    fn test_air_rates_are_scaled() {
        let config = MovementConfig::default();
        assert_eq!(config.acceleration(true), 500.0);
        assert_eq!(config.acceleration(false), 250.0);
        assert_eq!(config.deceleration(true), 4.0);
        assert_eq!(config.deceleration(false), 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = MovementConfig {
            stop_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "stop_speed",
                value: -1.0
            })
        );

        let config = MovementConfig {
            max_sprint_speed: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SprintSlowerThanWalk { .. })
        ));

        let config = MovementConfig {
            up_direction: Vec2::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidUpDirection));
    }

    #[test]
    fn test_accelerate_from_rest() {
        let v = accelerate(Vec2::ZERO, Vec2::X, 70.0, 500.0, DT);
        assert!((v.x - 500.0 * DT).abs() < 1e-4);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_accelerate_clamped_to_max_speed() {
        let v = accelerate(Vec2::new(68.0, 0.0), Vec2::X, 70.0, 500.0, DT);
        assert!((v.x - 70.0).abs() < 1e-4);

        // Already at or past the max: nothing is added
        let v = accelerate(Vec2::new(80.0, 0.0), Vec2::X, 70.0, 500.0, DT);
        assert_eq!(v.x, 80.0);
    }

    #[test]
    fn test_accelerate_never_exceeds_max() {
        let mut v = Vec2::ZERO;
        for _ in 0..600 {
            v = accelerate(v, Vec2::NEG_X, 140.0, 500.0, DT);
            assert!(v.length() <= 140.0 + 1e-3);
        }
        assert!((v.x + 140.0).abs() < 1e-3);
    }

    #[test]
    fn test_accelerate_zero_direction_is_noop() {
        let v = accelerate(Vec2::new(12.0, 0.0), Vec2::ZERO, 70.0, 500.0, DT);
        assert_eq!(v, Vec2::new(12.0, 0.0));
    }

    #[test]
    fn test_decelerate_zero_velocity() {
        assert_eq!(decelerate(Vec2::ZERO, 4.0, 20.0, DT), Vec2::ZERO);
    }

    #[test]
    fn test_decelerate_fast_speed() {
        // Above stop speed: drop = speed * decel * dt
        let v = decelerate(Vec2::new(60.0, 0.0), 4.0, 20.0, DT);
        let expected = 60.0 - 60.0 * 4.0 * DT;
        assert!((v.x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_decelerate_uses_stop_speed_floor() {
        // Below stop speed: drop = stop_speed * decel * dt
        let v = decelerate(Vec2::new(5.0, 0.0), 4.0, 20.0, DT);
        let expected = 5.0 - 20.0 * 4.0 * DT;
        assert!((v.x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_decelerate_reaches_zero_without_flipping() {
        let mut v = Vec2::new(-30.0, 0.0);
        let mut ticks = 0;
        while v.x != 0.0 {
            let next = decelerate(v, 4.0, 20.0, DT);
            assert!(next.x <= 0.0);
            assert!(next.length() < v.length());
            v = next;
            ticks += 1;
            assert!(ticks < 1000, "friction never came to a stop");
        }
    }
}
