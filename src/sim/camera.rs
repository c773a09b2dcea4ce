//! Perspective camera
//!
//! Maps world space (lateral x, vertical y, forward depth z) to screen space.
//! A `Camera` is snapshotted once per frame so every entity in that frame is
//! projected with identical parameters.

use glam::Vec2;

use super::state::World;
use crate::consts::MIN_PROJECTION_DEPTH;
use crate::tuning::ViewportTuning;

/// Result of projecting a world point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Perspective scale, 1 at z = 0 shrinking toward 0 with depth
    pub scale: f32,
}

/// Frame camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub width: f32,
    pub height: f32,
    pub horizon_y: f32,
    pub fov: f32,
    pub vertical_exaggeration: f32,
    /// Tilt in screen pixels; far geometry shifts by up to this much
    pub pitch: f32,
}

impl Camera {
    pub fn new(viewport: &ViewportTuning, pitch: f32) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            horizon_y: viewport.horizon_y,
            fov: viewport.fov.max(MIN_PROJECTION_DEPTH),
            vertical_exaggeration: viewport.vertical_exaggeration,
            pitch,
        }
    }

    /// Snapshot the camera for the current world state.
    ///
    /// Pitch follows the ship's vertical offset: climbing tilts the view
    /// so the far end of the trench drops.
    pub fn snapshot(world: &World) -> Self {
        let viewport = &world.tuning.viewport;
        Self::new(viewport, world.ship.pos.y * viewport.pitch_factor)
    }

    /// Perspective scale at depth `z` (depth floored first)
    #[inline]
    pub fn scale_at(&self, z: f32) -> f32 {
        let z = z.max(MIN_PROJECTION_DEPTH);
        self.fov / (z + self.fov)
    }

    /// Project a world point to screen space
    pub fn project(&self, x: f32, y: f32, z: f32) -> Projected {
        let scale = self.scale_at(z);
        let sx = self.width * 0.5 + x * scale;
        let sy = self.horizon_y + scale * (self.height - self.horizon_y)
            - y * scale * self.vertical_exaggeration
            + self.pitch * (1.0 - scale);
        Projected {
            screen: Vec2::new(sx, sy),
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(pitch: f32) -> Camera {
        Camera::new(&ViewportTuning::default(), pitch)
    }

    #[test]
    fn test_scale_decreases_with_depth() {
        let cam = camera(0.0);
        let mut last = f32::INFINITY;
        for z in [1.0, 10.0, 100.0, 1000.0, 10_000.0] {
            let s = cam.scale_at(z);
            assert!(s < last);
            assert!(s > 0.0 && s < 1.0);
            last = s;
        }
    }

    #[test]
    fn test_depth_is_floored() {
        let cam = camera(0.0);
        assert_eq!(cam.scale_at(-50.0), cam.scale_at(MIN_PROJECTION_DEPTH));
        assert!(cam.project(10.0, 10.0, -1e9).scale.is_finite());
    }

    #[test]
    fn test_center_line_projects_to_screen_center() {
        let cam = camera(0.0);
        let p = cam.project(0.0, 0.0, 500.0);
        assert!((p.screen.x - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_far_points_approach_horizon() {
        let cam = camera(0.0);
        let p = cam.project(0.0, 0.0, 1e7);
        assert!((p.screen.y - cam.horizon_y).abs() < 0.1);
    }

    #[test]
    fn test_pitch_shifts_far_more_than_near() {
        let flat = camera(0.0);
        let tilted = camera(40.0);
        let near_shift = tilted.project(0.0, 0.0, 10.0).screen.y - flat.project(0.0, 0.0, 10.0).screen.y;
        let far_shift = tilted.project(0.0, 0.0, 2000.0).screen.y - flat.project(0.0, 0.0, 2000.0).screen.y;
        assert!(far_shift > near_shift);
        assert!(far_shift <= 40.0);
    }

    #[test]
    fn test_higher_y_is_higher_on_screen() {
        let cam = camera(0.0);
        let low = cam.project(0.0, -50.0, 300.0);
        let high = cam.project(0.0, 50.0, 300.0);
        assert!(high.screen.y < low.screen.y);
    }
}
