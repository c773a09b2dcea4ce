//! Frame scheduler
//!
//! One call per display frame: poll input, clamp the elapsed time, run the
//! simulation tick to completion, then snapshot the camera and build the
//! render packet. Pausing only freezes the tick; frames keep coming.

use crate::platform::{Clock, HeldControls, InputLatch, InputSource};
use crate::renderer::RenderFrame;
use crate::sim::{Camera, World, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub world: World,
    latch: InputLatch,
    last_time: Option<f64>,
    /// Step fed to the simulation on the most recent frame
    pub last_dt: f32,
    pub frames: u64,
}

impl Game {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            world: World::new(tuning),
            latch: InputLatch::new(),
            last_time: None,
            last_dt: 0.0,
            frames: 0,
        }
    }

    /// Seconds since the previous frame, clamped to the max step. The first
    /// frame steps by zero.
    pub fn clamp_elapsed(&mut self, now: f64) -> f32 {
        let elapsed = match self.last_time {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now);
        (elapsed as f32).min(self.world.tuning.max_frame_dt)
    }

    /// Run one frame at time `now` (seconds, monotonic)
    pub fn frame(&mut self, now: f64, source: &dyn InputSource) -> RenderFrame {
        let mut input = self.latch.poll(HeldControls::poll(source));
        let dt = self.clamp_elapsed(now);
        tick(&mut self.world, &mut input, dt);
        if !input.actions.is_empty() {
            log::trace!("unconsumed actions this frame: {:?}", input.actions);
        }

        self.last_dt = dt;
        self.frames += 1;

        let camera = Camera::snapshot(&self.world);
        RenderFrame::build(&self.world, &camera)
    }

    /// Run one frame reading time from `clock`
    pub fn frame_with_clock(&mut self, clock: &dyn Clock, source: &dyn InputSource) -> RenderFrame {
        self.frame(clock.now(), source)
    }
}
