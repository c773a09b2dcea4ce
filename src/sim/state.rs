//! World state and entity types
//!
//! Everything the simulation mutates lives in [`World`]. Each entity kind has
//! its own collection, kept in spawn (id) order for deterministic iteration.

use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::rng::{TrenchRng, round_seed};
use super::spawn::Difficulty;
use super::trench::Corridor;
use crate::tuning::Tuning;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command
    Title,
    /// Active gameplay; the only phase in which the world advances
    Playing,
    /// Frozen world, still rendered
    Paused,
    /// Lives exhausted
    GameOver,
}

/// Projectile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotKind {
    Laser,
    Missile,
    EnemyLaser,
}

impl ShotKind {
    /// Damage dealt to an enemy
    pub fn damage(self) -> i32 {
        match self {
            ShotKind::Laser => 1,
            ShotKind::Missile => 2,
            ShotKind::EnemyLaser => 0,
        }
    }

    /// Player shots travel away from the ship, enemy shots toward it
    pub fn is_player(self) -> bool {
        !matches!(self, ShotKind::EnemyLaser)
    }
}

/// The player ship. Depth is fixed at `Corridor::ship_z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Lateral (x) and vertical (y) offset
    pub pos: Vec2,
    pub vel: Vec2,
    pub hit_radius: f32,
}

impl Ship {
    pub fn new(hit_radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            hit_radius,
        }
    }

    /// Back to the corridor center, at rest
    pub fn recenter(&mut self) {
        self.pos = Vec2::ZERO;
        self.vel = Vec2::ZERO;
    }
}

/// Enemy interceptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    pub hp: i32,
    pub fire_cooldown: f32,
    /// Depth at the start of the current tick (for swept hit tests)
    pub last_z: f32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// A projectile, fired by the player or an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: u32,
    pub pos: Vec3,
    pub kind: ShotKind,
    pub speed: f32,
    pub radius: f32,
    pub age: f32,
    pub alive: bool,
    pub last_z: f32,
    /// Recent positions (newest first), missiles only
    #[serde(skip)]
    pub trail: VecDeque<Vec3>,
}

impl Shot {
    pub fn new(id: u32, kind: ShotKind, pos: Vec3, speed: f32, radius: f32) -> Self {
        Self {
            id,
            pos,
            kind,
            speed,
            radius,
            age: 0.0,
            alive: true,
            last_z: pos.z,
            trail: VecDeque::new(),
        }
    }

    /// Push the current position onto the trail, dropping the oldest past `cap`
    pub fn record_trail(&mut self, cap: usize) {
        if cap == 0 {
            return;
        }
        self.trail.push_front(self.pos);
        self.trail.truncate(cap);
    }

    /// Depth range swept during the last tick
    pub fn swept_depth(&self) -> (f32, f32) {
        (self.pos.z.min(self.last_z), self.pos.z.max(self.last_z))
    }
}

/// Wall obstacle sticking out of one side of the trench
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// -1 = left wall, +1 = right wall
    pub side: i8,
    pub z: f32,
    pub y: f32,
    /// How far the pipe reaches in from its wall
    pub protrude: f32,
    /// Vertical thickness
    pub thickness: f32,
    pub last_z: f32,
}

impl Pipe {
    /// Lateral interval `[min, max]` covered by the pipe when its wall sits at
    /// `half_width`
    pub fn lateral_span(&self, half_width: f32) -> (f32, f32) {
        let wall = self.side as f32 * half_width;
        let tip = wall - self.side as f32 * self.protrude;
        (wall.min(tip), wall.max(tip))
    }

    /// Span at the pipe's own depth. Reach is sampled against the width at
    /// the ship, so it shrinks in proportion as the corridor narrows.
    pub fn span_at_depth(&self, corridor: &Corridor) -> (f32, f32) {
        let here = corridor.half_width_at(self.z);
        let at_ship = corridor.half_width_at(corridor.ship_z);
        let ratio = if at_ship > 0.0 { here / at_ship } else { 1.0 };
        let scaled = Pipe {
            protrude: self.protrude * ratio,
            ..self.clone()
        };
        scaled.lateral_span(here)
    }
}

/// Notable things that happened during a tick (for audio and HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    RoundAdvanced { round: u32 },
    ShotFired { kind: ShotKind },
    EnemyHit { id: u32 },
    EnemyDestroyed { id: u32 },
    LifeLost { lives_left: u32 },
    GameOver { score: u64 },
}

/// Independent countdowns for each spawn category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy: f32,
    pub pipe: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// 1-based round number
    pub round: u32,
    pub score: u64,
    pub lives: u32,
    pub missiles: u32,
    pub scroll_speed: f32,
    pub corridor: Corridor,
    pub rng: TrenchRng,
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Shot>,
    pub enemy_shots: Vec<Shot>,
    pub pipes: Vec<Pipe>,
    pub spawn_timers: SpawnTimers,
    /// Seconds since the current round (re)started
    pub round_time: f32,
    /// Distance scrolled since the current round (re)started
    pub round_distance: f32,
    /// Seconds of active play this game
    pub play_time: f32,
    pub laser_cooldown: f32,
    /// Fractional survival points not yet credited to `score`
    pub survival_carry: f32,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Fresh world on the title screen. Tuning is sanitized on the way in.
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let difficulty = Difficulty::for_round(1, &tuning);
        let corridor = Corridor {
            near_half_width: difficulty.near_half_width,
            far_half_width: tuning.far_half_width,
            half_height: tuning.half_height,
            ship_z: tuning.ship_z,
            far_z: tuning.far_z,
        };
        Self {
            phase: GamePhase::Title,
            round: 1,
            score: 0,
            lives: tuning.start_lives,
            missiles: tuning.start_missiles,
            scroll_speed: difficulty.scroll_speed,
            corridor,
            rng: TrenchRng::new(round_seed(tuning.seed_base, tuning.seed_multiplier, 1)),
            ship: Ship::new(tuning.ship_hit_radius),
            enemies: Vec::new(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            pipes: Vec::new(),
            spawn_timers: SpawnTimers::default(),
            round_time: 0.0,
            round_distance: 0.0,
            play_time: 0.0,
            laser_cooldown: 0.0,
            survival_carry: 0.0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Seed the current round was generated from
    pub fn round_seed(&self) -> u32 {
        round_seed(self.tuning.seed_base, self.tuning.seed_multiplier, self.round)
    }

    /// Total number of live entities (ship excluded)
    pub fn entity_count(&self) -> usize {
        self.enemies.len() + self.player_shots.len() + self.enemy_shots.len() + self.pipes.len()
    }

    /// Drop every entity collection
    pub fn clear_entities(&mut self) {
        self.enemies.clear();
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.pipes.clear();
    }

    /// Current ship position in world space
    pub fn ship_position(&self) -> Vec3 {
        self.ship.pos.extend(self.corridor.ship_z)
    }
}
