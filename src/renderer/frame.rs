//! Per-frame render packet
//!
//! Projects every live entity with one camera snapshot and sorts the result
//! farthest first, so a renderer can paint in order without any game logic.

use glam::Vec2;

use super::sprite::{Sprite, SpriteKind};
use crate::consts::MIN_PROJECTION_DEPTH;
use crate::sim::{Camera, GamePhase, World};

/// Number of depth slices in the trench outline
pub const TRENCH_SLICES: usize = 16;

/// Cross-section of the trench at one depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrenchSlice {
    pub depth: f32,
    /// Bottom-left, bottom-right, top-right, top-left
    pub corners: [Vec2; 4],
}

/// Scalar values for the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub round: u32,
    pub missiles: u32,
    pub speed: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub camera: Camera,
    /// Painter's order: farthest first
    pub sprites: Vec<Sprite>,
    /// Near to far
    pub trench: Vec<TrenchSlice>,
    pub hud: Hud,
}

impl RenderFrame {
    /// Build the frame for `world` as seen by `camera`
    pub fn build(world: &World, camera: &Camera) -> Self {
        let mut sprites = Vec::with_capacity(world.entity_count() + 1);
        let corridor = &world.corridor;
        let visible = |z: f32| (MIN_PROJECTION_DEPTH..=corridor.far_z).contains(&z);
        let mut push = |kind: SpriteKind, id: u32, x: f32, y: f32, z: f32, half: Vec2| {
            if !visible(z) {
                return;
            }
            let p = camera.project(x, y, z);
            sprites.push(Sprite {
                position: p.screen.to_array(),
                extent: [half.x * p.scale, half.y * p.scale * camera.vertical_exaggeration],
                scale: p.scale,
                depth: z,
                kind: kind as u32,
                id,
            });
        };

        for pipe in &world.pipes {
            let (min_x, max_x) = pipe.span_at_depth(corridor);
            let half = Vec2::new((max_x - min_x) * 0.5, pipe.thickness * 0.5);
            push(SpriteKind::Pipe, pipe.id, (min_x + max_x) * 0.5, pipe.y, pipe.z, half);
        }
        let enemy_half = Vec2::splat(world.tuning.enemy_hit_radius);
        for enemy in &world.enemies {
            push(SpriteKind::Enemy, enemy.id, enemy.pos.x, enemy.pos.y, enemy.pos.z, enemy_half);
        }
        for shot in &world.enemy_shots {
            let p = shot.pos;
            push(SpriteKind::EnemyLaser, shot.id, p.x, p.y, p.z, Vec2::splat(shot.radius));
        }
        for shot in &world.player_shots {
            let kind = match shot.kind {
                crate::sim::ShotKind::Missile => SpriteKind::Missile,
                _ => SpriteKind::Laser,
            };
            let p = shot.pos;
            push(kind, shot.id, p.x, p.y, p.z, Vec2::splat(shot.radius));
            let len = shot.trail.len().max(1) as f32;
            for (i, t) in shot.trail.iter().enumerate().skip(1) {
                let fade = 1.0 - i as f32 / len;
                push(SpriteKind::MissileTrail, 0, t.x, t.y, t.z, Vec2::splat(shot.radius * fade));
            }
        }
        let ship = world.ship_position();
        if world.phase != GamePhase::Title {
            push(SpriteKind::Ship, 0, ship.x, ship.y, ship.z, Vec2::splat(world.ship.hit_radius));
        }

        sort_painter(&mut sprites);

        Self {
            camera: *camera,
            sprites,
            trench: trench_outline(world, camera),
            hud: Hud {
                phase: world.phase,
                score: world.score,
                lives: world.lives,
                round: world.round,
                missiles: world.missiles,
                speed: world.scroll_speed,
            },
        }
    }

    /// Raw bytes of the sprite list, ready for an instance buffer
    pub fn sprite_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }
}

/// Farthest first; ties broken by kind then id so the order is stable
pub fn sort_painter(sprites: &mut [Sprite]) {
    sprites.sort_by(|a, b| {
        b.depth
            .total_cmp(&a.depth)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Project trench cross-sections from the ship out to the horizon, using
/// the same half-width the ship is clamped against
pub fn trench_outline(world: &World, camera: &Camera) -> Vec<TrenchSlice> {
    let corridor = &world.corridor;
    let h = corridor.half_height;
    (0..TRENCH_SLICES)
        .map(|i| {
            let t = i as f32 / (TRENCH_SLICES - 1) as f32;
            let z = crate::lerp(corridor.ship_z, corridor.far_z, t);
            let w = corridor.half_width_at(z);
            let corner = |x: f32, y: f32| camera.project(x, y, z).screen;
            TrenchSlice {
                depth: z,
                corners: [corner(-w, -h), corner(w, -h), corner(w, h), corner(-w, h)],
            }
        })
        .collect()
}
