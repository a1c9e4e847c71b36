//! Time system for Hopper
//!
//! Handles frame delta time and the fixed timestep accumulator that drives
//! the physics tick.

use serde::{Deserialize, Serialize};

/// Rejected time configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeConfigError {
    #[error("{field} must be a finite, positive number (got {value})")]
    NotPositive { field: &'static str, value: f32 },
}

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

impl TimeConfig {
    /// Check every field can drive the fixed-step loop
    pub fn validate(&self) -> Result<(), TimeConfigError> {
        let fields = [
            ("time_scale", self.time_scale),
            ("fixed_timestep", self.fixed_timestep),
            ("max_delta_time", self.max_delta_time),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimeConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since game start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Number of fixed ticks run so far
    pub tick_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            tick_count: 0,
            fixed_accumulator: 0.0,
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.min(self.config.max_delta_time).max(0.0);
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        self.tick_count += steps as u64;
        steps
    }

    /// Length of one physics tick in seconds
    pub fn fixed_delta(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}
