//! Platform abstraction layer
//!
//! Boundary contracts the simulation consumes:
//! - Input polling (held controls in, queued actions out)
//! - Monotonic time

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{Action, ActionQueue, Control, HeldControls, InputLatch, InputSource};
