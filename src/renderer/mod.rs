//! Renderer boundary
//!
//! The simulation hands a backend one `RenderFrame` per display frame:
//! depth-sorted sprites, the trench outline and HUD scalars. Drawing them is
//! the backend's job; no gameplay logic lives on that side.

pub mod frame;
pub mod sprite;

pub use frame::{Hud, RenderFrame, TrenchSlice, sort_painter, trench_outline};
pub use sprite::{Sprite, SpriteKind};
