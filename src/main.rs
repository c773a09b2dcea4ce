//! Trench Run entry point
//!
//! Headless native runner: drives the simulation with a scripted autopilot
//! on a fixed clock and logs what happens. Rendering and real input belong
//! to a platform shell.
//!
//! Usage: `trench-run [TUNING.json] [SECONDS]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use trench_run::platform::{Clock, Control, InputSource, ManualClock};
    use trench_run::sim::{GameEvent, GamePhase};
    use trench_run::{Game, Tuning};

    /// Weaves across the trench firing lasers, with a missile now and then
    pub struct Autopilot {
        pub frame: u64,
    }

    impl InputSource for Autopilot {
        fn is_held(&self, control: Control) -> bool {
            let f = self.frame;
            match control {
                Control::Confirm => f == 0,
                Control::Left => (f / 90) % 2 == 0,
                Control::Right => (f / 90) % 2 == 1,
                Control::Up => (f / 150) % 2 == 0,
                Control::Down => (f / 150) % 2 == 1,
                Control::FirePrimary => true,
                Control::FireSecondary => f % 240 == 120,
                Control::Pause => false,
            }
        }
    }

    fn load_tuning(path: Option<&str>) -> Tuning {
        match path {
            Some(path) => match Tuning::load(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("{} - using default tuning", e);
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        }
    }

    pub fn run() {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let tuning = load_tuning(args.first().map(String::as_str));
        let seconds: f64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(60.0);

        let mut game = Game::new(tuning);
        let clock = ManualClock::new(0.0);
        let step = trench_run::consts::SIM_DT as f64;
        let frames = (seconds / step).ceil() as u64;

        let mut pilot = Autopilot { frame: 0 };
        let mut kills = 0u32;
        for frame in 0..frames {
            pilot.frame = frame;
            let packet = game.frame_with_clock(&clock, &pilot);
            clock.advance(step);

            for event in &game.world.events {
                match event {
                    GameEvent::EnemyDestroyed { .. } => kills += 1,
                    GameEvent::LifeLost { lives_left } => {
                        log::info!("t={:.2}s life lost ({} left)", clock.now(), lives_left)
                    }
                    GameEvent::RoundAdvanced { round } => {
                        log::info!("t={:.2}s reached round {}", clock.now(), round)
                    }
                    _ => {}
                }
            }
            if frame % 600 == 0 {
                log::debug!(
                    "frame {}: {} sprites, score {}",
                    frame,
                    packet.sprites.len(),
                    packet.hud.score
                );
            }
            if game.world.phase == GamePhase::GameOver {
                break;
            }
        }

        let world = &game.world;
        log::info!(
            "Finished after {} frames: phase={:?} round={} score={} lives={} kills={}",
            game.frames,
            world.phase,
            world.round,
            world.score,
            world.lives,
            kills
        );
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Trench Run (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web shells drive `trench_run::Game` directly
}
