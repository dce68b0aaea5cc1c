//! Axis-aligned hit tests.
//!
//! Two boxes collide only when they overlap strictly on both axes, so boxes
//! that merely share an edge do not touch.  Bomb explosions use a circular
//! test instead, see [`crate::entities::BombExplosion::contains`].

use crate::entities::{Bullet, BulletOwner, Enemy, Item, Player};

pub const PLAYER_SIZE: f32 = 10.0;
/// Inset of the slow-mode hitbox from the normal one, per side.
pub const PLAYER_SLOW_INSET: (f32, f32) = (2.0, 1.0);
pub const ENEMY_SIZE: f32 = 15.0;
pub const ITEM_SIZE: f32 = 10.0;
pub const ENEMY_BULLET_SIZE: f32 = 5.0;
pub const PLAYER_BULLET_OFFSET: f32 = 3.0;
pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
pub const PLAYER_BULLET_HEIGHT: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, x + size, y + size)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Anything that takes part in box collisions.
pub trait Hitbox {
    fn hitbox(&self) -> Rect;
}

pub fn collides(a: &impl Hitbox, b: &impl Hitbox) -> bool {
    a.hitbox().overlaps(&b.hitbox())
}

impl Hitbox for Player {
    fn hitbox(&self) -> Rect {
        if self.slow {
            // [x+2, x+9] × [y+2, y+9]
            let (near, far) = PLAYER_SLOW_INSET;
            Rect::new(
                self.x + near,
                self.y + near,
                self.x + PLAYER_SIZE - far,
                self.y + PLAYER_SIZE - far,
            )
        } else {
            Rect::square(self.x, self.y, PLAYER_SIZE)
        }
    }
}

impl Hitbox for Enemy {
    fn hitbox(&self) -> Rect {
        Rect::square(self.x, self.y, ENEMY_SIZE)
    }
}

impl Hitbox for Bullet {
    fn hitbox(&self) -> Rect {
        match self.owner {
            // Thin upright streak centred on the player's box.
            BulletOwner::Player => Rect::new(
                self.x + PLAYER_BULLET_OFFSET,
                self.y,
                self.x + PLAYER_BULLET_OFFSET + PLAYER_BULLET_WIDTH,
                self.y + PLAYER_BULLET_HEIGHT,
            ),
            BulletOwner::Enemy => Rect::square(self.x, self.y, ENEMY_BULLET_SIZE),
        }
    }
}

impl Hitbox for Item {
    fn hitbox(&self) -> Rect {
        Rect::square(self.x, self.y, ITEM_SIZE)
    }
}
