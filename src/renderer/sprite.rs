//! GPU-ready sprite instances

use bytemuck::{Pod, Zeroable};

/// What a sprite depicts
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKind {
    Pipe = 0,
    Enemy = 1,
    EnemyLaser = 2,
    MissileTrail = 3,
    Missile = 4,
    Laser = 5,
    Ship = 6,
}

impl SpriteKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(SpriteKind::Pipe),
            1 => Some(SpriteKind::Enemy),
            2 => Some(SpriteKind::EnemyLaser),
            3 => Some(SpriteKind::MissileTrail),
            4 => Some(SpriteKind::Missile),
            5 => Some(SpriteKind::Laser),
            6 => Some(SpriteKind::Ship),
            _ => None,
        }
    }
}

/// One projected entity, laid out for direct upload as an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Sprite {
    /// Screen-space center
    pub position: [f32; 2],
    /// Screen-space half extents
    pub extent: [f32; 2],
    /// Perspective scale
    pub scale: f32,
    /// World depth (larger = farther)
    pub depth: f32,
    /// `SpriteKind` discriminant
    pub kind: u32,
    /// Entity id (0 for the ship and trail points)
    pub id: u32,
}

impl Sprite {
    pub fn kind(&self) -> Option<SpriteKind> {
        SpriteKind::from_u32(self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Sprite>(), 32);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [SpriteKind::Pipe, SpriteKind::Enemy, SpriteKind::Ship, SpriteKind::MissileTrail] {
            assert_eq!(SpriteKind::from_u32(kind as u32), Some(kind));
        }
        assert_eq!(SpriteKind::from_u32(42), None);
    }

    #[test]
    fn test_cast_to_bytes() {
        let sprites = [Sprite::zeroed(); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&sprites);
        assert_eq!(bytes.len(), 96);
    }
}
