//! Control polling and edge detection
//!
//! The shell exposes "is control X held"; once per frame the latch turns
//! fresh presses into queued actions. Edge-triggered systems drain their
//! action from the queue, so one press fires once no matter how long the key
//! stays down.

use glam::Vec2;

/// Fixed control vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    FirePrimary,
    FireSecondary,
    Pause,
    Confirm,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::Left,
        Control::Right,
        Control::Up,
        Control::Down,
        Control::FirePrimary,
        Control::FireSecondary,
        Control::Pause,
        Control::Confirm,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Anything that can answer "is this control held right now"
pub trait InputSource {
    fn is_held(&self, control: Control) -> bool;
}

/// Held-set snapshot, also usable as a scripted input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldControls {
    bits: u8,
}

impl HeldControls {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn with(mut self, control: Control) -> Self {
        self.set(control, true);
        self
    }

    pub fn set(&mut self, control: Control, held: bool) {
        if held {
            self.bits |= control.bit();
        } else {
            self.bits &= !control.bit();
        }
    }

    pub fn contains(&self, control: Control) -> bool {
        self.bits & control.bit() != 0
    }

    /// Snapshot any input source
    pub fn poll(source: &dyn InputSource) -> Self {
        let mut held = Self::new();
        for control in Control::ALL {
            held.set(control, source.is_held(control));
        }
        held
    }
}

impl InputSource for HeldControls {
    fn is_held(&self, control: Control) -> bool {
        self.contains(control)
    }
}

/// One-shot actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Pause,
    Confirm,
    FireMissile,
}

/// Pending one-shot actions for the current frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionQueue {
    pending: Vec<Action>,
}

impl ActionQueue {
    pub fn push(&mut self, action: Action) {
        self.pending.push(action);
    }

    /// Consume `action` if it is pending
    pub fn take(&mut self, action: Action) -> bool {
        match self.pending.iter().position(|a| *a == action) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, action: Action) -> bool {
        self.pending.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Turns held-state snapshots into steering, fire level and queued actions
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    previous: HeldControls,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll once per frame. Actions appear only on the frame their control
    /// goes down.
    pub fn poll(&mut self, held: HeldControls) -> crate::sim::TickInput {
        let pressed = |c: Control| held.contains(c) && !self.previous.contains(c);

        let mut actions = ActionQueue::default();
        if pressed(Control::Pause) {
            actions.push(Action::Pause);
        }
        if pressed(Control::Confirm) {
            actions.push(Action::Confirm);
        }
        if pressed(Control::FireSecondary) {
            actions.push(Action::FireMissile);
        }

        let axis = |neg: Control, pos: Control| {
            held.contains(pos) as i32 as f32 - held.contains(neg) as i32 as f32
        };
        let steer = Vec2::new(
            axis(Control::Left, Control::Right),
            axis(Control::Down, Control::Up),
        );

        self.previous = held;
        crate::sim::TickInput {
            steer,
            fire_primary: held.contains(Control::FirePrimary),
            actions,
        }
    }
}
