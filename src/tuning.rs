//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance can be tweaked from a JSON
//! file without recompiling. Missing keys fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Screen-space camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportTuning {
    pub width: f32,
    pub height: f32,
    /// Screen row of the vanishing horizon
    pub horizon_y: f32,
    /// Field of view constant (depth at which scale halves)
    pub fov: f32,
    pub vertical_exaggeration: f32,
    /// Camera tilt per unit of ship vertical offset
    pub pitch_factor: f32,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            horizon_y: 200.0,
            fov: 300.0,
            vertical_exaggeration: 1.0,
            pitch_factor: 0.5,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Seeding ===
    pub seed_base: u32,
    pub seed_multiplier: u32,

    // === Depth layout ===
    /// Fixed depth of the player ship
    pub ship_z: f32,
    /// Render horizon depth
    pub far_z: f32,
    /// Spawns happen this far beyond the horizon
    pub spawn_margin: f32,
    /// Shots retire this far past the horizon
    pub shot_far_margin: f32,
    /// Anything this far behind the ship is retired
    pub behind_margin: f32,

    // === Corridor ===
    pub near_half_width: f32,
    pub near_half_width_floor: f32,
    pub near_half_width_step: f32,
    pub far_half_width: f32,
    pub half_height: f32,

    // === Scroll ===
    pub scroll_speed_initial: f32,
    pub scroll_speed_max: f32,
    pub scroll_speed_step: f32,

    // === Ship ===
    pub ship_accel: f32,
    /// Exponential velocity damping rate (1/s)
    pub ship_damping: f32,
    pub ship_max_speed: f32,
    pub ship_hit_radius: f32,
    pub start_lives: u32,
    pub start_missiles: u32,
    pub missile_cap: u32,
    pub missile_refill: u32,

    // === Weapons ===
    pub laser_speed: f32,
    pub laser_radius: f32,
    pub laser_cooldown: f32,
    pub missile_speed: f32,
    pub missile_radius: f32,
    pub missile_trail_len: usize,
    pub enemy_laser_speed: f32,
    pub enemy_laser_radius: f32,

    // === Enemies ===
    pub enemy_hp: i32,
    pub enemy_forward_speed: f32,
    pub enemy_steer_gain: f32,
    pub enemy_max_accel: f32,
    pub enemy_damping: f32,
    pub enemy_jitter: f32,
    pub enemy_fire_base: f32,
    pub enemy_fire_jitter: f32,
    /// Enemies fire only beyond `ship_z + enemy_fire_min_distance`
    pub enemy_fire_min_distance: f32,
    pub enemy_fire_max_z: f32,
    /// Seconds after a round (re)starts before any enemy may fire
    pub round_intro: f32,

    // === Generator ===
    pub enemy_interval_min: f32,
    pub enemy_interval_max: f32,
    pub enemy_interval_floor: f32,
    pub pipe_interval_min: f32,
    pub pipe_interval_max: f32,
    pub pipe_interval_floor: f32,
    pub pipe_first_delay: f32,
    /// Fractional spawn-rate increase per round past the first
    pub spawn_pressure_per_round: f32,
    pub preseed_depths: Vec<f32>,
    pub spawn_margin_lateral: f32,
    pub spawn_margin_vertical: f32,
    pub pipe_protrude_min: f32,
    pub pipe_protrude_max: f32,
    pub pipe_thickness_min: f32,
    pub pipe_thickness_max: f32,

    // === Collision ===
    pub pipe_hit_window: f32,
    pub enemy_shot_hit_window: f32,
    pub player_shot_hit_window: f32,
    /// Fraction of the ship radius used against enemy shots
    pub enemy_shot_forgiveness: f32,
    pub enemy_hit_radius: f32,

    // === Scoring ===
    pub score_laser_hit: u64,
    pub score_missile_hit: u64,
    pub score_kill_bonus: u64,
    /// Survival points per second, multiplied by round
    pub survival_rate: f32,
    /// Distance to scroll before the round advances (None = external trigger only)
    pub round_distance: Option<f32>,

    // === Frame ===
    pub max_frame_dt: f32,
    pub viewport: ViewportTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed_base: 1337,
            seed_multiplier: 7764,

            ship_z: 60.0,
            far_z: 2000.0,
            spawn_margin: 200.0,
            shot_far_margin: 200.0,
            behind_margin: 100.0,

            near_half_width: 260.0,
            near_half_width_floor: 160.0,
            near_half_width_step: 15.0,
            far_half_width: 90.0,
            half_height: 120.0,

            scroll_speed_initial: 600.0,
            scroll_speed_max: 1200.0,
            scroll_speed_step: 75.0,

            ship_accel: 2400.0,
            ship_damping: 6.0,
            ship_max_speed: 420.0,
            ship_hit_radius: 18.0,
            start_lives: 3,
            start_missiles: 3,
            missile_cap: 6,
            missile_refill: 2,

            laser_speed: 2200.0,
            laser_radius: 6.0,
            laser_cooldown: 0.14,
            missile_speed: 1700.0,
            missile_radius: 10.0,
            missile_trail_len: 12,
            enemy_laser_speed: 700.0,
            enemy_laser_radius: 8.0,

            enemy_hp: 2,
            enemy_forward_speed: 120.0,
            enemy_steer_gain: 1.6,
            enemy_max_accel: 260.0,
            enemy_damping: 1.5,
            enemy_jitter: 40.0,
            enemy_fire_base: 1.6,
            enemy_fire_jitter: 1.2,
            enemy_fire_min_distance: 800.0,
            enemy_fire_max_z: 1800.0,
            round_intro: 4.5,

            enemy_interval_min: 1.2,
            enemy_interval_max: 2.6,
            enemy_interval_floor: 0.35,
            pipe_interval_min: 1.6,
            pipe_interval_max: 3.2,
            pipe_interval_floor: 0.5,
            pipe_first_delay: 2.0,
            spawn_pressure_per_round: 0.15,
            preseed_depths: vec![900.0, 1300.0, 1700.0],
            spawn_margin_lateral: 30.0,
            spawn_margin_vertical: 20.0,
            pipe_protrude_min: 0.35,
            pipe_protrude_max: 0.9,
            pipe_thickness_min: 20.0,
            pipe_thickness_max: 40.0,

            pipe_hit_window: 24.0,
            enemy_shot_hit_window: 20.0,
            player_shot_hit_window: 40.0,
            enemy_shot_forgiveness: 0.6,
            enemy_hit_radius: 26.0,

            score_laser_hit: 10,
            score_missile_hit: 25,
            score_kill_bonus: 100,
            survival_rate: 10.0,
            round_distance: Some(60_000.0),

            max_frame_dt: crate::consts::MAX_FRAME_DT,
            viewport: ViewportTuning::default(),
        }
    }
}

/// Clamp `value` into `[min, max]`, warning when it moved
fn clamp_logged(name: &str, value: f32, min: f32, max: f32) -> f32 {
    let clamped = value.max(min).min(max);
    if clamped != value {
        log::warn!("tuning: {} = {} out of range, using {}", name, value, clamped);
    }
    clamped
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp every value into a range the simulation can run with.
    ///
    /// Keeps corridor widths positive with `far <= floor <= near`, speeds and
    /// spawn intervals ordered, and the horizon beyond the ship.
    pub fn sanitized(mut self) -> Self {
        self.ship_z = clamp_logged("ship_z", self.ship_z, 1.0, 1000.0);
        self.far_z = clamp_logged("far_z", self.far_z, self.ship_z + 100.0, 100_000.0);
        self.spawn_margin = clamp_logged("spawn_margin", self.spawn_margin, 1.0, 10_000.0);

        self.far_half_width = clamp_logged("far_half_width", self.far_half_width, 1.0, 10_000.0);
        self.near_half_width_floor = clamp_logged(
            "near_half_width_floor",
            self.near_half_width_floor,
            self.far_half_width,
            10_000.0,
        );
        self.near_half_width = clamp_logged(
            "near_half_width",
            self.near_half_width,
            self.near_half_width_floor,
            10_000.0,
        );
        self.near_half_width_step =
            clamp_logged("near_half_width_step", self.near_half_width_step, 0.0, 10_000.0);
        self.half_height = clamp_logged("half_height", self.half_height, 1.0, 10_000.0);

        self.scroll_speed_initial =
            clamp_logged("scroll_speed_initial", self.scroll_speed_initial, 1.0, 100_000.0);
        self.scroll_speed_max = clamp_logged(
            "scroll_speed_max",
            self.scroll_speed_max,
            self.scroll_speed_initial,
            100_000.0,
        );
        self.scroll_speed_step = clamp_logged("scroll_speed_step", self.scroll_speed_step, 0.0, 100_000.0);

        self.ship_hit_radius = clamp_logged("ship_hit_radius", self.ship_hit_radius, 0.0, 1000.0);
        self.ship_damping = clamp_logged("ship_damping", self.ship_damping, 0.0, 100.0);
        self.missile_trail_len = self.missile_trail_len.min(256);
        self.start_missiles = self.start_missiles.min(self.missile_cap);
        self.start_lives = self.start_lives.max(1);
        self.enemy_hp = self.enemy_hp.max(1);

        self.enemy_interval_floor = clamp_logged("enemy_interval_floor", self.enemy_interval_floor, 0.05, 60.0);
        self.enemy_interval_min = clamp_logged(
            "enemy_interval_min",
            self.enemy_interval_min,
            self.enemy_interval_floor,
            60.0,
        );
        self.enemy_interval_max = clamp_logged(
            "enemy_interval_max",
            self.enemy_interval_max,
            self.enemy_interval_min,
            60.0,
        );
        self.pipe_interval_floor = clamp_logged("pipe_interval_floor", self.pipe_interval_floor, 0.05, 60.0);
        self.pipe_interval_min = clamp_logged(
            "pipe_interval_min",
            self.pipe_interval_min,
            self.pipe_interval_floor,
            60.0,
        );
        self.pipe_interval_max = clamp_logged(
            "pipe_interval_max",
            self.pipe_interval_max,
            self.pipe_interval_min,
            60.0,
        );
        self.spawn_pressure_per_round =
            clamp_logged("spawn_pressure_per_round", self.spawn_pressure_per_round, 0.0, 10.0);

        self.pipe_protrude_min = clamp_logged("pipe_protrude_min", self.pipe_protrude_min, 0.0, 2.0);
        self.pipe_protrude_max =
            clamp_logged("pipe_protrude_max", self.pipe_protrude_max, self.pipe_protrude_min, 2.0);
        self.pipe_thickness_min = clamp_logged("pipe_thickness_min", self.pipe_thickness_min, 1.0, 1000.0);
        self.pipe_thickness_max = clamp_logged(
            "pipe_thickness_max",
            self.pipe_thickness_max,
            self.pipe_thickness_min,
            1000.0,
        );

        self.max_frame_dt = clamp_logged("max_frame_dt", self.max_frame_dt, 0.001, 0.25);
        self.viewport.fov = clamp_logged("viewport.fov", self.viewport.fov, 1.0, 100_000.0);
        self
    }
}
