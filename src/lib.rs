//! Trench Run - A pseudo-3D rail shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generator, physics, collisions, game state)
//! - `renderer`: Renderer boundary (depth-sorted sprite packets, HUD values)
//! - `platform`: Input and clock abstraction
//! - `game`: Frame scheduler tying input, simulation and frame output together
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Reference simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest step ever fed to the simulation, however long a frame took
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;
    /// Smallest depth the projection divides by
    pub const MIN_PROJECTION_DEPTH: f32 = 1.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Inverse of [`lerp`], clamped to [0, 1]. Degenerate ranges map to 0.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    let span = b - a;
    if span.abs() < f32::EPSILON {
        return 0.0;
    }
    ((value - a) / span).clamp(0.0, 1.0)
}
