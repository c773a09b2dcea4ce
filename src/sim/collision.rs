//! Hit tests and collision resolution
//!
//! Full 3D volume tests are replaced by a depth window plus a 2D overlap in
//! the lateral/vertical plane. Depth tests are swept over the distance an
//! entity covered this tick so fast movers can't tunnel past the ship.

use super::state::{Enemy, GameEvent, Pipe, Shot, ShotKind, Ship, World};
use super::trench::Corridor;

/// Outcome of a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Nothing cost the player a life
    Clear,
    /// The ship was hit by a pipe; remaining tests were skipped
    PipeHit { pipe_id: u32 },
    /// The ship was hit by an enemy shot; remaining tests were skipped
    ShotHit { shot_id: u32 },
}

impl CollisionOutcome {
    pub fn ship_hit(self) -> bool {
        !matches!(self, CollisionOutcome::Clear)
    }
}

/// Whether `target` lies within `window` of the depth span `[a, b]` (either order)
#[inline]
pub fn depth_overlap(a: f32, b: f32, target: f32, window: f32) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    target >= lo - window && target <= hi + window
}

/// Pipe versus ship: depth window, lateral overlap with the protrusion, and
/// vertical proximity
pub fn pipe_hits_ship(pipe: &Pipe, ship: &Ship, corridor: &Corridor, window: f32) -> bool {
    if !depth_overlap(pipe.last_z, pipe.z, corridor.ship_z, window) {
        return false;
    }
    let (min_x, max_x) = pipe.lateral_span(corridor.half_width_at(corridor.ship_z));
    let r = ship.hit_radius;
    let lateral = ship.pos.x + r >= min_x && ship.pos.x - r <= max_x;
    let vertical = (ship.pos.y - pipe.y).abs() <= pipe.thickness * 0.5 + r;
    lateral && vertical
}

/// Enemy shot versus ship, using a reduced ship radius
pub fn enemy_shot_hits_ship(shot: &Shot, ship: &Ship, ship_z: f32, window: f32, forgiveness: f32) -> bool {
    if !shot.alive || !depth_overlap(shot.last_z, shot.pos.z, ship_z, window) {
        return false;
    }
    let reach = ship.hit_radius * forgiveness + shot.radius;
    shot.pos.truncate().distance_squared(ship.pos) <= reach * reach
}

/// Player shot versus enemy
pub fn shot_hits_enemy(shot: &Shot, enemy: &Enemy, window: f32, enemy_radius: f32) -> bool {
    if !shot.alive || !enemy.is_alive() {
        return false;
    }
    if !depth_overlap(shot.last_z, shot.pos.z, enemy.pos.z, window) {
        return false;
    }
    let reach = enemy_radius + shot.radius;
    shot.pos.truncate().distance_squared(enemy.pos.truncate()) <= reach * reach
}

/// Score for one hit with `kind` in `round`
pub fn hit_score(world: &World, kind: ShotKind) -> u64 {
    let base = match kind {
        ShotKind::Missile => world.tuning.score_missile_hit,
        _ => world.tuning.score_laser_hit,
    };
    base * world.round as u64
}

/// Run every collision test for this tick, in order.
///
/// Pipe hits come first, then enemy shots; either one stops the pass. Player
/// shots then damage enemies, each shot resolving at most once.
pub fn resolve_collisions(world: &mut World) -> CollisionOutcome {
    let tuning = &world.tuning;

    if let Some(pipe) = world
        .pipes
        .iter()
        .find(|p| pipe_hits_ship(p, &world.ship, &world.corridor, tuning.pipe_hit_window))
    {
        return CollisionOutcome::PipeHit { pipe_id: pipe.id };
    }

    if let Some(shot) = world.enemy_shots.iter().find(|s| {
        enemy_shot_hits_ship(
            s,
            &world.ship,
            world.corridor.ship_z,
            tuning.enemy_shot_hit_window,
            tuning.enemy_shot_forgiveness,
        )
    }) {
        return CollisionOutcome::ShotHit { shot_id: shot.id };
    }

    let laser_score = hit_score(world, ShotKind::Laser);
    let missile_score = hit_score(world, ShotKind::Missile);
    let kill_bonus = tuning.score_kill_bonus * world.round as u64;
    let window = tuning.player_shot_hit_window;
    let enemy_radius = tuning.enemy_hit_radius;

    for shot in world.player_shots.iter_mut() {
        if !shot.alive {
            continue;
        }
        let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| shot_hits_enemy(shot, e, window, enemy_radius))
        else {
            continue;
        };

        shot.alive = false;
        enemy.hp -= shot.kind.damage();
        world.score += match shot.kind {
            ShotKind::Missile => missile_score,
            _ => laser_score,
        };
        world.events.push(GameEvent::EnemyHit { id: enemy.id });
        if !enemy.is_alive() {
            world.score += kill_bonus;
            world.events.push(GameEvent::EnemyDestroyed { id: enemy.id });
            log::debug!("enemy {} destroyed by {:?}", enemy.id, shot.kind);
        }
    }

    world.player_shots.retain(|s| s.alive);
    world.enemies.retain(|e| e.is_alive());
    CollisionOutcome::Clear
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::sim::spawn::reset_round;
    use crate::tuning::Tuning;
    use glam::{Vec2, Vec3};

    fn world() -> World {
        let mut world = World::new(Tuning::default());
        world.phase = GamePhase::Playing;
        reset_round(&mut world);
        world.clear_entities();
        world
    }

    fn enemy(id: u32, pos: Vec3) -> Enemy {
        Enemy {
            id,
            pos,
            vel: Vec3::ZERO,
            hp: 2,
            fire_cooldown: 10.0,
            last_z: pos.z,
        }
    }

    fn pipe(side: i8, z: f32, protrude: f32) -> Pipe {
        Pipe {
            id: 7,
            side,
            z,
            y: 0.0,
            protrude,
            thickness: 30.0,
            last_z: z,
        }
    }

    #[test]
    fn test_depth_overlap_is_swept() {
        // Moved from 200 to 10 in one tick, skipping straight over 60
        assert!(depth_overlap(200.0, 10.0, 60.0, 0.0));
        assert!(!depth_overlap(200.0, 150.0, 60.0, 24.0));
        assert!(depth_overlap(90.0, 80.0, 60.0, 24.0));
    }

    #[test]
    fn test_pipe_hits_centered_ship() {
        let world = world();
        let p = pipe(1, world.corridor.ship_z, 400.0);
        assert!(pipe_hits_ship(&p, &world.ship, &world.corridor, 24.0));
    }

    #[test]
    fn test_short_pipe_misses_centered_ship() {
        let world = world();
        let p = pipe(-1, world.corridor.ship_z, 60.0);
        assert!(!pipe_hits_ship(&p, &world.ship, &world.corridor, 24.0));
    }

    #[test]
    fn test_pipe_vertical_clearance() {
        let mut world = world();
        world.ship.pos = Vec2::new(0.0, 90.0);
        let p = pipe(1, world.corridor.ship_z, 400.0);
        assert!(!pipe_hits_ship(&p, &world.ship, &world.corridor, 24.0));
    }

    #[test]
    fn test_enemy_shot_forgiving_radius() {
        let world = world();
        let ship_z = world.corridor.ship_z;
        let mut shot = Shot::new(1, ShotKind::EnemyLaser, Vec3::new(0.0, 0.0, ship_z), 700.0, 8.0);
        assert!(enemy_shot_hits_ship(&shot, &world.ship, ship_z, 20.0, 0.6));
        // Grazes the full radius but not the forgiving one
        shot.pos.x = 24.0;
        assert!(!enemy_shot_hits_ship(&shot, &world.ship, ship_z, 20.0, 0.6));
    }

    #[test]
    fn test_pipe_short_circuits_other_tests() {
        let mut world = world();
        world.pipes.push(pipe(1, world.corridor.ship_z, 400.0));
        world.enemies.push(enemy(2, Vec3::new(0.0, 0.0, 500.0)));
        let mut shot = Shot::new(3, ShotKind::Laser, Vec3::new(0.0, 0.0, 500.0), 2200.0, 6.0);
        shot.last_z = 480.0;
        world.player_shots.push(shot);

        let outcome = resolve_collisions(&mut world);
        assert_eq!(outcome, CollisionOutcome::PipeHit { pipe_id: 7 });
        assert!(world.player_shots[0].alive);
        assert_eq!(world.enemies[0].hp, 2);
    }

    #[test]
    fn test_enemy_shot_short_circuits_player_shots() {
        let mut world = world();
        let ship_z = world.corridor.ship_z;
        world
            .enemy_shots
            .push(Shot::new(5, ShotKind::EnemyLaser, Vec3::new(0.0, 0.0, ship_z), 700.0, 8.0));
        world.enemies.push(enemy(2, Vec3::new(0.0, 0.0, 500.0)));
        world
            .player_shots
            .push(Shot::new(3, ShotKind::Laser, Vec3::new(0.0, 0.0, 500.0), 2200.0, 6.0));

        let outcome = resolve_collisions(&mut world);
        assert_eq!(outcome, CollisionOutcome::ShotHit { shot_id: 5 });
        assert!(outcome.ship_hit());
        // Player shots were never resolved this pass
        assert!(world.player_shots[0].alive);
        assert_eq!(world.enemies[0].hp, 2);
        assert_eq!(world.score, 0);
        assert!(!world.events.iter().any(|e| matches!(e, GameEvent::EnemyHit { .. })));
    }

    #[test]
    fn test_laser_damages_and_missile_kills() {
        let mut world = world();
        world.enemies.push(enemy(2, Vec3::new(0.0, 0.0, 500.0)));
        world
            .player_shots
            .push(Shot::new(3, ShotKind::Laser, Vec3::new(5.0, 0.0, 500.0), 2200.0, 6.0));

        assert_eq!(resolve_collisions(&mut world), CollisionOutcome::Clear);
        assert_eq!(world.enemies[0].hp, 1);
        assert_eq!(world.score, 10);
        assert!(world.player_shots.is_empty());

        world.enemies[0].hp = 2;
        world
            .player_shots
            .push(Shot::new(4, ShotKind::Missile, Vec3::new(0.0, 5.0, 500.0), 1700.0, 10.0));
        resolve_collisions(&mut world);
        assert!(world.enemies.is_empty());
        assert_eq!(world.score, 10 + 25 + 100);
        assert!(world.events.contains(&GameEvent::EnemyDestroyed { id: 2 }));
    }

    #[test]
    fn test_shot_resolves_once() {
        let mut world = world();
        world.enemies.push(enemy(2, Vec3::new(0.0, 0.0, 500.0)));
        world.enemies.push(enemy(3, Vec3::new(0.0, 0.0, 505.0)));
        world
            .player_shots
            .push(Shot::new(4, ShotKind::Laser, Vec3::new(0.0, 0.0, 500.0), 2200.0, 6.0));
        resolve_collisions(&mut world);
        let total_hp: i32 = world.enemies.iter().map(|e| e.hp).sum();
        assert_eq!(total_hp, 3);
        assert_eq!(world.score, 10);
    }

    #[test]
    fn test_score_scales_with_round() {
        let mut world = world();
        world.round = 3;
        assert_eq!(hit_score(&world, ShotKind::Laser), 30);
        assert_eq!(hit_score(&world, ShotKind::Missile), 75);
    }
}
