//! Hopper Core - Core types and utilities for Hopper
//!
//! This crate provides the foundational types shared by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Sprite facing for 2D characters
//! - Fixed timestep bookkeeping for the physics tick

pub mod time;
pub mod types;

pub use glam::Vec2;
pub use time::{GameTime, TimeConfig, TimeConfigError};
pub use types::Facing;
