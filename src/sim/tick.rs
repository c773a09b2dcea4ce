//! Simulation tick
//!
//! Game state machine plus the per-tick phase order while playing:
//! input, weapons, spawning, motion, retirement, collisions, scoring.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::physics::{retire, update_enemies, update_pipes, update_shots, update_ship, update_weapons};
use super::spawn::{reset_round, update_spawners};
use super::state::{GameEvent, GamePhase, World};
use crate::platform::input::{Action, ActionQueue};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Discrete steering, each axis in {-1, 0, 1}
    pub steer: Vec2,
    /// Primary fire held (auto-fire)
    pub fire_primary: bool,
    /// One-shot actions, drained by the systems that use them
    pub actions: ActionQueue,
}

/// Start a new game from the title or game-over screen
pub fn start_game(world: &mut World) {
    world.round = 1;
    world.score = 0;
    world.lives = world.tuning.start_lives;
    world.missiles = world.tuning.start_missiles;
    world.play_time = 0.0;
    world.survival_carry = 0.0;
    world.phase = GamePhase::Playing;
    log::info!("New game");
    reset_round(world);
}

/// Take a life. Resets the current round, or ends the game on the last life.
pub fn lose_life(world: &mut World) {
    world.lives = world.lives.saturating_sub(1);
    world.events.push(GameEvent::LifeLost {
        lives_left: world.lives,
    });
    if world.lives == 0 {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::GameOver { score: world.score });
        log::info!("Game over: score={} round={}", world.score, world.round);
    } else {
        log::info!("Life lost, {} left; restarting round {}", world.lives, world.round);
        reset_round(world);
    }
}

/// Move to the next round: harder, missiles topped up, fresh layout.
///
/// Only meaningful while a game is running; returns false otherwise.
pub fn advance_round(world: &mut World) -> bool {
    if !matches!(world.phase, GamePhase::Playing | GamePhase::Paused) {
        return false;
    }
    world.round = world.round.saturating_add(1);
    world.missiles = (world.missiles + world.tuning.missile_refill).min(world.tuning.missile_cap);
    log::info!("Advancing to round {}", world.round);
    reset_round(world);
    world.events.push(GameEvent::RoundAdvanced { round: world.round });
    true
}

/// Advance the world by one step of `dt` seconds
pub fn tick(world: &mut World, input: &mut TickInput, dt: f32) {
    world.events.clear();
    let dt = dt.max(0.0).min(world.tuning.max_frame_dt);

    match world.phase {
        GamePhase::Title => {
            if input.actions.take(Action::Confirm) {
                start_game(world);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.actions.take(Action::Confirm) {
                start_game(world);
            } else if input.actions.take(Action::Pause) {
                world.phase = GamePhase::Title;
            }
            return;
        }
        GamePhase::Paused => {
            if input.actions.take(Action::Pause) {
                world.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {
            if input.actions.take(Action::Pause) {
                world.phase = GamePhase::Paused;
                return;
            }
        }
    }

    world.round_time += dt;
    world.play_time += dt;

    update_ship(world, input.steer, dt);
    let fire_missile = input.actions.take(Action::FireMissile);
    update_weapons(world, input.fire_primary, fire_missile, dt);

    update_spawners(world, dt);

    update_enemies(world, dt);
    update_shots(world, dt);
    update_pipes(world, dt);
    retire(world);

    if resolve_collisions(world).ship_hit() {
        lose_life(world);
        return;
    }

    // Survival bonus
    world.survival_carry += world.tuning.survival_rate * world.round as f32 * dt;
    let whole = world.survival_carry.floor();
    if whole >= 1.0 {
        world.score += whole as u64;
        world.survival_carry -= whole;
    }

    world.round_distance += world.scroll_speed * dt;
    if let Some(goal) = world.tuning.round_distance
        && world.round_distance >= goal
    {
        advance_round(world);
    }
}
