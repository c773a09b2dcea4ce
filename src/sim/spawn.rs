//! Procedural trench generator
//!
//! Re-seeds per round, pre-seeds a few enemies so the trench is never empty on
//! entry, then drips enemies and pipes in from beyond the horizon on
//! independent timers.

use glam::{Vec2, Vec3};

use super::rng::round_seed;
use super::state::{Enemy, GameEvent, Pipe, SpawnTimers, World};
use crate::tuning::Tuning;

/// Difficulty parameters derived from the round number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub scroll_speed: f32,
    pub near_half_width: f32,
    /// Multiplier on spawn and fire intervals (1 at round 1, shrinking)
    pub interval_scale: f32,
}

impl Difficulty {
    /// Difficulty for a 1-based round, clamped to the tuning caps
    pub fn for_round(round: u32, tuning: &Tuning) -> Self {
        let steps = round.saturating_sub(1) as f32;
        let scroll_speed = (tuning.scroll_speed_initial + steps * tuning.scroll_speed_step)
            .min(tuning.scroll_speed_max)
            .max(tuning.scroll_speed_initial);
        let near_half_width = (tuning.near_half_width - steps * tuning.near_half_width_step)
            .max(tuning.near_half_width_floor)
            .min(tuning.near_half_width)
            .max(tuning.far_half_width);
        let interval_scale = 1.0 / (1.0 + steps * tuning.spawn_pressure_per_round);
        Self {
            scroll_speed,
            near_half_width,
            interval_scale,
        }
    }

    /// Scale applied to enemy fire cooldowns (never below half)
    pub fn fire_scale(&self) -> f32 {
        self.interval_scale.max(0.5)
    }
}

/// Depth at which new entities appear, always past the horizon
#[inline]
pub fn spawn_depth(tuning: &Tuning) -> f32 {
    tuning.far_z + tuning.spawn_margin.max(1.0)
}

/// Sample the next interval from `[min, max]`, tightened for the round and
/// held at or above `floor`
pub fn sample_interval(world: &mut World, min: f32, max: f32, floor: f32) -> f32 {
    let scale = Difficulty::for_round(world.round, &world.tuning).interval_scale;
    (world.rng.range(min, max) * scale).max(floor)
}

/// Start (or restart) the current round.
///
/// Re-seeds the stream, clears every entity, re-centers the ship, applies the
/// round's difficulty and pre-seeds enemies. Calling it twice in a row leaves
/// the same state both times.
pub fn reset_round(world: &mut World) {
    let seed = round_seed(world.tuning.seed_base, world.tuning.seed_multiplier, world.round);
    world.rng.reseed(seed);
    world.clear_entities();
    world.ship.recenter();

    let difficulty = Difficulty::for_round(world.round, &world.tuning);
    world.scroll_speed = difficulty.scroll_speed;
    world.corridor.near_half_width = difficulty.near_half_width;

    world.round_time = 0.0;
    world.round_distance = 0.0;
    world.laser_cooldown = 0.0;

    let tuning = &world.tuning;
    let enemy_timer = sample_interval_raw(
        world.rng.next(),
        tuning.enemy_interval_min,
        tuning.enemy_interval_max,
        tuning.enemy_interval_floor,
        difficulty.interval_scale,
    );
    world.spawn_timers = SpawnTimers {
        enemy: enemy_timer,
        pipe: tuning.pipe_first_delay.max(0.0),
    };

    let nearest = world.corridor.ship_z + world.tuning.behind_margin;
    let depths = world.tuning.preseed_depths.clone();
    for z in depths {
        spawn_enemy(world, z.max(nearest));
    }

    log::info!(
        "Round {} start: seed={} scroll={} near_width={}",
        world.round,
        seed,
        world.scroll_speed,
        world.corridor.near_half_width
    );
    world.events.push(GameEvent::RoundStarted { round: world.round });
}

fn sample_interval_raw(roll: f32, min: f32, max: f32, floor: f32, scale: f32) -> f32 {
    ((min + roll * (max - min)) * scale).max(floor)
}

/// Random lateral/vertical offset inside the corridor at depth `z`
fn sample_offset(world: &mut World, z: f32, padding: f32) -> Vec2 {
    let lx = world
        .corridor
        .lateral_limit(z, world.tuning.spawn_margin_lateral + padding);
    let ly = world
        .corridor
        .vertical_limit(world.tuning.spawn_margin_vertical + padding);
    let x = world.rng.signed() * lx;
    let y = world.rng.signed() * ly;
    Vec2::new(x, y)
}

/// Spawn one enemy at depth `z`
pub fn spawn_enemy(world: &mut World, z: f32) -> u32 {
    let radius = world.tuning.enemy_hit_radius;
    let offset = sample_offset(world, z, radius);
    let difficulty = Difficulty::for_round(world.round, &world.tuning);
    let fire_cooldown =
        (world.tuning.enemy_fire_base + world.rng.next() * world.tuning.enemy_fire_jitter) * difficulty.fire_scale();
    let id = world.next_entity_id();
    world.enemies.push(Enemy {
        id,
        pos: offset.extend(z),
        vel: Vec3::new(0.0, 0.0, -world.tuning.enemy_forward_speed),
        hp: world.tuning.enemy_hp,
        fire_cooldown,
        last_z: z,
    });
    log::debug!("spawn enemy {} at ({:.1}, {:.1}, {:.1})", id, offset.x, offset.y, z);
    id
}

/// Spawn one wall pipe past the horizon
pub fn spawn_pipe(world: &mut World) -> u32 {
    let z = spawn_depth(&world.tuning);
    let side = world.rng.sign();
    let tuning = &world.tuning;
    let (ly, p_min, p_max, t_min, t_max) = (
        world.corridor.vertical_limit(tuning.spawn_margin_vertical),
        tuning.pipe_protrude_min,
        tuning.pipe_protrude_max,
        tuning.pipe_thickness_min,
        tuning.pipe_thickness_max,
    );
    let y = world.rng.signed() * ly;
    // Reach is measured against the width the pipe will have at the ship
    let reach = world.corridor.half_width_at(world.corridor.ship_z);
    let protrude = world.rng.range(p_min, p_max) * reach;
    let thickness = world.rng.range(t_min, t_max);
    let id = world.next_entity_id();
    world.pipes.push(Pipe {
        id,
        side,
        z,
        y,
        protrude,
        thickness,
        last_z: z,
    });
    log::debug!("spawn pipe {} side={} y={:.1} protrude={:.1}", id, side, y, protrude);
    id
}

/// Count down the spawn timers and spawn whatever came due
pub fn update_spawners(world: &mut World, dt: f32) {
    world.spawn_timers.enemy -= dt;
    if world.spawn_timers.enemy <= 0.0 {
        let z = spawn_depth(&world.tuning);
        spawn_enemy(world, z);
        let (min, max, floor) = (
            world.tuning.enemy_interval_min,
            world.tuning.enemy_interval_max,
            world.tuning.enemy_interval_floor,
        );
        world.spawn_timers.enemy = sample_interval(world, min, max, floor);
    }

    world.spawn_timers.pipe -= dt;
    if world.spawn_timers.pipe <= 0.0 {
        spawn_pipe(world);
        let (min, max, floor) = (
            world.tuning.pipe_interval_min,
            world.tuning.pipe_interval_max,
            world.tuning.pipe_interval_floor,
        );
        world.spawn_timers.pipe = sample_interval(world, min, max, floor);
    }
}
