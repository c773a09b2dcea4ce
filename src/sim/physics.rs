//! Entity motion and lifecycle
//!
//! World scroll is subtracted from every entity's depth each tick on top of
//! its own motion, so even stationary obstacles approach the ship.

use glam::{Vec2, Vec3};

use super::spawn::Difficulty;
use super::state::{GameEvent, Shot, ShotKind, World};

/// Integrate ship velocity from discrete steering input and clamp it to the
/// corridor. The clamp is the only wall collision the ship has.
pub fn update_ship(world: &mut World, steer: Vec2, dt: f32) {
    let tuning = &world.tuning;
    let ship = &mut world.ship;

    ship.vel += steer * tuning.ship_accel * dt;
    ship.vel *= (-tuning.ship_damping * dt).exp();
    ship.vel = ship.vel.clamp_length_max(tuning.ship_max_speed);
    ship.pos += ship.vel * dt;

    let clamped = world
        .corridor
        .clamp(ship.pos, world.corridor.ship_z, ship.hit_radius);
    if clamped.x != ship.pos.x {
        ship.vel.x = 0.0;
    }
    if clamped.y != ship.pos.y {
        ship.vel.y = 0.0;
    }
    ship.pos = clamped;
}

/// Steer enemies toward the ship, advance them and let them fire
pub fn update_enemies(world: &mut World, dt: f32) {
    let target = world.ship.pos;
    let scroll = world.scroll_speed;
    let tuning = &world.tuning;
    let fire_scale = Difficulty::for_round(world.round, tuning).fire_scale();
    let can_fire = world.round_time >= tuning.round_intro;
    let fire_near = world.corridor.ship_z + tuning.enemy_fire_min_distance;
    let fire_far = tuning.enemy_fire_max_z;

    // Deferred so the enemy list isn't borrowed while shots are spawned
    let mut shots_to_fire: Vec<Vec3> = Vec::new();

    for enemy in world.enemies.iter_mut() {
        enemy.last_z = enemy.pos.z;

        let offset = enemy.pos.truncate();
        let jitter = Vec2::new(world.rng.signed(), world.rng.signed()) * tuning.enemy_jitter;
        let accel = ((target - offset) * tuning.enemy_steer_gain + jitter)
            .clamp_length_max(tuning.enemy_max_accel);

        let mut lateral = enemy.vel.truncate() + accel * dt;
        lateral *= (-tuning.enemy_damping * dt).exp();
        enemy.vel = lateral.extend(enemy.vel.z);

        enemy.pos.z += (enemy.vel.z - scroll) * dt;
        let moved = offset + lateral * dt;
        let clamped = world
            .corridor
            .clamp(moved, enemy.pos.z, tuning.enemy_hit_radius);
        enemy.pos = clamped.extend(enemy.pos.z);

        enemy.fire_cooldown -= dt;
        let in_band = enemy.pos.z >= fire_near && enemy.pos.z <= fire_far;
        if can_fire && in_band && enemy.fire_cooldown <= 0.0 {
            shots_to_fire.push(enemy.pos);
            enemy.fire_cooldown =
                (tuning.enemy_fire_base + world.rng.next() * tuning.enemy_fire_jitter) * fire_scale;
        }
    }

    for pos in shots_to_fire {
        let id = world.next_entity_id();
        let shot = Shot::new(
            id,
            ShotKind::EnemyLaser,
            pos,
            world.tuning.enemy_laser_speed,
            world.tuning.enemy_laser_radius,
        );
        world.enemy_shots.push(shot);
        world.events.push(GameEvent::ShotFired {
            kind: ShotKind::EnemyLaser,
        });
    }
}

/// Advance every shot along the depth axis
pub fn update_shots(world: &mut World, dt: f32) {
    let scroll = world.scroll_speed;
    let trail_len = world.tuning.missile_trail_len;

    for shot in world.player_shots.iter_mut() {
        shot.last_z = shot.pos.z;
        shot.pos.z += (shot.speed - scroll) * dt;
        shot.age += dt;
        if shot.kind == ShotKind::Missile {
            shot.record_trail(trail_len);
        }
    }

    for shot in world.enemy_shots.iter_mut() {
        shot.last_z = shot.pos.z;
        shot.pos.z -= (shot.speed + scroll) * dt;
        shot.age += dt;
    }
}

/// Scroll pipes toward the ship
pub fn update_pipes(world: &mut World, dt: f32) {
    let scroll = world.scroll_speed;
    for pipe in world.pipes.iter_mut() {
        pipe.last_z = pipe.z;
        pipe.z -= scroll * dt;
    }
}

/// Remove dead entities and anything outside the live depth range
pub fn retire(world: &mut World) {
    let behind = world.corridor.ship_z - world.tuning.behind_margin;
    let beyond = world.corridor.far_z + world.tuning.shot_far_margin;

    world
        .player_shots
        .retain(|s| s.alive && s.pos.z >= behind && s.pos.z <= beyond);
    world
        .enemy_shots
        .retain(|s| s.alive && s.pos.z >= behind && s.pos.z <= beyond);
    world.enemies.retain(|e| e.is_alive() && e.pos.z >= behind);
    world.pipes.retain(|p| p.z >= behind);
}

/// Launch a player shot from the ship's nose
pub fn fire_player_shot(world: &mut World, kind: ShotKind) -> u32 {
    let (speed, radius) = match kind {
        ShotKind::Missile => (world.tuning.missile_speed, world.tuning.missile_radius),
        _ => (world.tuning.laser_speed, world.tuning.laser_radius),
    };
    let pos = world.ship_position();
    let id = world.next_entity_id();
    world.player_shots.push(Shot::new(id, kind, pos, speed, radius));
    world.events.push(GameEvent::ShotFired { kind });
    id
}

/// Handle weapon input: auto-fire lasers while held, one missile per press
pub fn update_weapons(world: &mut World, fire_primary: bool, fire_missile: bool, dt: f32) {
    world.laser_cooldown = (world.laser_cooldown - dt).max(0.0);
    if fire_primary && world.laser_cooldown <= 0.0 {
        fire_player_shot(world, ShotKind::Laser);
        world.laser_cooldown = world.tuning.laser_cooldown;
    }

    if fire_missile && world.missiles > 0 {
        world.missiles -= 1;
        fire_player_shot(world, ShotKind::Missile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::reset_round;
    use crate::sim::state::{Enemy, Pipe};
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    fn world() -> World {
        let mut world = World::new(Tuning::default());
        world.phase = GamePhase::Playing;
        reset_round(&mut world);
        world.clear_entities();
        world
    }

    #[test]
    fn test_ship_clamped_to_corridor() {
        let mut world = world();
        for _ in 0..600 {
            update_ship(&mut world, Vec2::new(1.0, 1.0), 1.0 / 60.0);
        }
        let limit = world.corridor.lateral_limit(world.corridor.ship_z, world.ship.hit_radius);
        assert!(world.ship.pos.x <= limit + 1e-4);
        assert!((world.ship.pos.x - limit).abs() < 1e-3);
        assert!(world.ship.pos.y <= world.corridor.vertical_limit(world.ship.hit_radius) + 1e-4);
    }

    #[test]
    fn test_ship_damps_to_rest() {
        let mut world = world();
        world.ship.vel = Vec2::new(300.0, 0.0);
        for _ in 0..300 {
            update_ship(&mut world, Vec2::ZERO, 1.0 / 60.0);
        }
        assert!(world.ship.vel.length() < 1.0);
    }

    #[test]
    fn test_shots_move_in_opposite_directions() {
        let mut world = world();
        fire_player_shot(&mut world, ShotKind::Laser);
        world.enemy_shots.push(Shot::new(99, ShotKind::EnemyLaser, Vec3::new(0.0, 0.0, 1000.0), 700.0, 8.0));
        update_shots(&mut world, 0.1);
        assert!(world.player_shots[0].pos.z > world.corridor.ship_z);
        // 1000 - (700 + 600) * 0.1
        assert!((world.enemy_shots[0].pos.z - 870.0).abs() < 1e-3);
    }

    #[test]
    fn test_missile_trail_recorded() {
        let mut world = world();
        fire_player_shot(&mut world, ShotKind::Missile);
        for _ in 0..30 {
            update_shots(&mut world, 1.0 / 60.0);
        }
        assert_eq!(world.player_shots[0].trail.len(), world.tuning.missile_trail_len);
    }

    #[test]
    fn test_pipes_scroll_and_retire() {
        let mut world = world();
        world.pipes.push(Pipe {
            id: 1,
            side: 1,
            z: 100.0,
            y: 0.0,
            protrude: 50.0,
            thickness: 30.0,
            last_z: 100.0,
        });
        update_pipes(&mut world, 0.1);
        assert!((world.pipes[0].z - 40.0).abs() < 1e-3);
        update_pipes(&mut world, 0.2);
        retire(&mut world);
        assert!(world.pipes.is_empty());
    }

    #[test]
    fn test_shots_retire_past_horizon() {
        let mut world = world();
        let far = world.corridor.far_z + world.tuning.shot_far_margin + 1.0;
        world
            .player_shots
            .push(Shot::new(1, ShotKind::Laser, Vec3::new(0.0, 0.0, far), 2200.0, 6.0));
        retire(&mut world);
        assert!(world.player_shots.is_empty());
    }

    #[test]
    fn test_enemy_pursues_ship() {
        let mut world = world();
        world.ship.pos = Vec2::new(150.0, 0.0);
        world.enemies.push(Enemy {
            id: 1,
            pos: Vec3::new(-100.0, 0.0, 1500.0),
            vel: Vec3::new(0.0, 0.0, -120.0),
            hp: 2,
            fire_cooldown: 10.0,
            last_z: 1500.0,
        });
        for _ in 0..60 {
            update_enemies(&mut world, 1.0 / 60.0);
        }
        assert!(world.enemies[0].pos.x > -100.0);
        assert!(world.enemies[0].pos.z < 1500.0);
    }

    #[test]
    fn test_enemies_hold_fire_during_intro() {
        let mut world = world();
        world.enemies.push(Enemy {
            id: 1,
            pos: Vec3::new(0.0, 0.0, 1500.0),
            vel: Vec3::ZERO,
            hp: 2,
            fire_cooldown: 0.0,
            last_z: 1500.0,
        });
        world.round_time = 0.0;
        update_enemies(&mut world, 1.0 / 60.0);
        assert!(world.enemy_shots.is_empty());

        world.round_time = world.tuning.round_intro;
        update_enemies(&mut world, 1.0 / 60.0);
        assert_eq!(world.enemy_shots.len(), 1);
        assert!(world.enemies[0].fire_cooldown > 0.0);
    }

    #[test]
    fn test_missiles_are_limited() {
        let mut world = world();
        world.missiles = 1;
        update_weapons(&mut world, false, true, 1.0 / 60.0);
        update_weapons(&mut world, false, true, 1.0 / 60.0);
        assert_eq!(world.missiles, 0);
        assert_eq!(world.player_shots.len(), 1);
    }

    #[test]
    fn test_laser_cooldown() {
        let mut world = world();
        for _ in 0..6 {
            update_weapons(&mut world, true, false, 1.0 / 60.0);
        }
        // 0.1 s of fire with a 0.14 s cooldown
        assert_eq!(world.player_shots.len(), 1);
    }
}
