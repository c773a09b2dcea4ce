//! Corridor geometry
//!
//! `Corridor::half_width_at` is the single source of truth for how wide the
//! trench is at a depth. Ship clamping, spawn placement, pipe attachment and
//! the renderer's wall outline all go through it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{inverse_lerp, lerp};

/// Trench shape for the current round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    /// Half-width at the ship's depth
    pub near_half_width: f32,
    /// Half-width at the render horizon
    pub far_half_width: f32,
    /// Vertical half-extent (y ranges over ±half_height)
    pub half_height: f32,
    /// Depth of the ship
    pub ship_z: f32,
    /// Depth of the render horizon
    pub far_z: f32,
}

impl Corridor {
    /// Half-width of the trench at depth `z`.
    ///
    /// Linear from near (at `ship_z`) to far (at `far_z`), held constant
    /// outside that range.
    #[inline]
    pub fn half_width_at(&self, z: f32) -> f32 {
        corridor_half_width(
            z,
            self.ship_z,
            self.far_z,
            self.near_half_width,
            self.far_half_width,
        )
    }

    /// Lateral limit for a body of `padding` radius at depth `z`
    #[inline]
    pub fn lateral_limit(&self, z: f32, padding: f32) -> f32 {
        (self.half_width_at(z) - padding).max(0.0)
    }

    /// Vertical limit for a body of `padding` radius
    #[inline]
    pub fn vertical_limit(&self, padding: f32) -> f32 {
        (self.half_height - padding).max(0.0)
    }

    /// Clamp a lateral/vertical offset into the corridor at depth `z`
    pub fn clamp(&self, pos: Vec2, z: f32, padding: f32) -> Vec2 {
        let lx = self.lateral_limit(z, padding);
        let ly = self.vertical_limit(padding);
        Vec2::new(pos.x.clamp(-lx, lx), pos.y.clamp(-ly, ly))
    }

    /// Whether an offset lies inside the corridor at depth `z`
    pub fn contains(&self, pos: Vec2, z: f32, padding: f32) -> bool {
        pos.x.abs() <= self.lateral_limit(z, padding) && pos.y.abs() <= self.vertical_limit(padding)
    }
}

/// Free-function form of [`Corridor::half_width_at`]
#[inline]
pub fn corridor_half_width(z: f32, ship_z: f32, far_z: f32, near: f32, far: f32) -> f32 {
    lerp(near, far, inverse_lerp(ship_z, far_z, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Corridor {
        Corridor {
            near_half_width: 260.0,
            far_half_width: 90.0,
            half_height: 120.0,
            ship_z: 60.0,
            far_z: 2000.0,
        }
    }

    #[test]
    fn test_endpoints() {
        let c = corridor();
        assert_eq!(c.half_width_at(60.0), 260.0);
        assert_eq!(c.half_width_at(2000.0), 90.0);
        // Held constant outside the range
        assert_eq!(c.half_width_at(0.0), 260.0);
        assert_eq!(c.half_width_at(5000.0), 90.0);
    }

    #[test]
    fn test_narrows_with_depth() {
        let c = corridor();
        let mut last = f32::INFINITY;
        let mut z = c.ship_z;
        while z <= c.far_z {
            let w = c.half_width_at(z);
            assert!(w <= last);
            last = w;
            z += 17.0;
        }
    }

    #[test]
    fn test_clamp_respects_padding() {
        let c = corridor();
        let clamped = c.clamp(Vec2::new(1000.0, -1000.0), c.ship_z, 18.0);
        assert_eq!(clamped.x, 242.0);
        assert_eq!(clamped.y, -102.0);
        assert!(c.contains(clamped, c.ship_z, 18.0));
    }

    #[test]
    fn test_padding_larger_than_corridor() {
        let c = corridor();
        assert_eq!(c.lateral_limit(c.ship_z, 1000.0), 0.0);
        let clamped = c.clamp(Vec2::new(50.0, 50.0), c.ship_z, 1000.0);
        assert_eq!(clamped, Vec2::ZERO);
    }
}
