//! Variable-height jump
//!
//! Takeoff loads the charge with the full jump force. While the button stays
//! down the charge pushes the player up and decays towards zero, so a short
//! tap gives a low hop and a held button a full jump.

use glam::Vec2;
use tracing::debug;

use super::MovementConfig;

/// Jump edges read from input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpInput {
    /// Jump went down this tick
    pub pressed: bool,
    /// Jump went up this tick
    pub released: bool,
}

/// Stored jump charge
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpCharge {
    /// Remaining upward acceleration
    pub force: f32,
    /// Whether the charge is still being applied
    pub jumping: bool,
}

impl JumpCharge {
    /// Apply one tick of jump handling to `velocity`.
    pub fn update(
        &mut self,
        config: &MovementConfig,
        velocity: Vec2,
        input: JumpInput,
        on_floor: bool,
        dt: f32,
    ) -> Vec2 {
        let mut velocity = velocity;

        if input.pressed && on_floor {
            self.force = config.max_jump_force;
            self.jumping = true;
            debug!("Jump started with force {}", self.force);
        }
        if input.released {
            self.jumping = false;
        }

        if self.jumping {
            velocity += config.up() * self.force * dt;
            let t = (dt * config.jump_force_decay).clamp(0.0, 1.0);
            self.force += (0.0 - self.force) * t;
        }

        velocity
    }

    /// Drop any charge in progress
    pub fn cancel(&mut self) {
        self.force = 0.0;
        self.jumping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    const PRESS: JumpInput = JumpInput {
        pressed: true,
        released: false,
    };
    const HOLD: JumpInput = JumpInput {
        pressed: false,
        released: false,
    };
    const RELEASE: JumpInput = JumpInput {
        pressed: false,
        released: true,
    };

    #[test]
    fn test_jump_requires_floor() {
        let config = MovementConfig::default();
        let mut charge = JumpCharge::default();

        let v = charge.update(&config, Vec2::ZERO, PRESS, false, DT);
        assert_eq!(v, Vec2::ZERO);
        assert!(!charge.jumping);
    }

    #[test]
    fn test_takeoff_applies_force_and_decays() {
        let config = MovementConfig::default();
        let mut charge = JumpCharge::default();

        let v = charge.update(&config, Vec2::ZERO, PRESS, true, DT);
        assert!(charge.jumping);
        assert!((v.y - 4000.0 * DT).abs() < 1e-3);
        // lerp towards zero with t = 15 * dt = 0.25
        assert!((charge.force - 3000.0).abs() < 1e-2);
    }

    #[test]
    fn test_held_jump_keeps_pushing_with_less_force() {
        let config = MovementConfig::default();
        let mut charge = JumpCharge::default();
        let mut v = charge.update(&config, Vec2::ZERO, PRESS, true, DT);

        let mut last_gain = v.y;
        for _ in 0..30 {
            let before = v.y;
            v = charge.update(&config, v, HOLD, false, DT);
            let gain = v.y - before;
            assert!(gain > 0.0);
            assert!(gain < last_gain);
            last_gain = gain;
        }
        assert!(charge.force >= 0.0);
        assert!(charge.force < 1.0);
    }

    #[test]
    fn test_release_stops_charge() {
        let config = MovementConfig::default();
        let mut charge = JumpCharge::default();
        let v = charge.update(&config, Vec2::ZERO, PRESS, true, DT);

        let after = charge.update(&config, v, RELEASE, false, DT);
        assert!(!charge.jumping);
        assert_eq!(after, v);
    }

    #[test]
    fn test_large_delta_never_reverses_force() {
        let config = MovementConfig::default();
        let mut charge = JumpCharge::default();
        charge.update(&config, Vec2::ZERO, PRESS, true, 0.25);
        assert_eq!(charge.force, 0.0);
    }

    #[test]
    fn test_jump_follows_up_direction() {
        let config = MovementConfig {
            up_direction: Vec2::NEG_Y,
            ..Default::default()
        };
        let mut charge = JumpCharge::default();
        let v = charge.update(&config, Vec2::ZERO, PRESS, true, DT);
        assert!(v.y < 0.0);
    }

    #[test]
    fn test_cancel() {
        let config = MovementConfig::default();
        let mut charge = JumpCharge::default();
        charge.update(&config, Vec2::ZERO, PRESS, true, DT);
        charge.cancel();
        assert_eq!(charge, JumpCharge::default());
    }
}
