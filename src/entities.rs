//! Game entity types and the small operations each one owns.
//!
//! Positions are `f32` pixels in play-field space with the origin at the
//! top-left corner and y growing downward.  `(x, y)` is always the top-left
//! anchor of an entity's shape.

use std::f32::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{EnemyConfig, GameConfig, PlayerConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Lunatic,
}

impl Difficulty {
    /// Tiers in number-key order (`1` → `Easy` … `4` → `Lunatic`).
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Lunatic,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

impl BulletOwner {
    /// Enemy bullets hurt the player; player bullets hurt enemies.
    pub fn targets_player(self) -> bool {
        matches!(self, BulletOwner::Enemy)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    /// Fixed at creation.
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32, owner: BulletOwner) -> Self {
        Self { x, y, dx, dy, owner }
    }

    /// Move by the bullet's own velocity plus the scene scroll.
    pub fn advance(&mut self, scroll_dx: f32, scroll_dy: f32) {
        self.x += self.dx + scroll_dx;
        self.y += self.dy + scroll_dy;
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub hp: u32,
    pub bombs: u32,
    pub speed: f32,
    /// Slow (focus) mode: lower speed and a smaller hitbox.
    pub slow: bool,
    pub score: u32,
    pub shoot_cooldown_counter: u32,
    pub hit_cooldown_counter: u32,
    /// Set while the bomb key is held so one press fires one bomb.
    pub bomb_latch: bool,
}

impl Player {
    pub fn new(x: f32, y: f32, config: &PlayerConfig) -> Self {
        Self {
            x,
            y,
            hp: config.hp,
            bombs: config.bombs,
            speed: config.speed_normal,
            slow: false,
            score: 0,
            shoot_cooldown_counter: 0,
            hit_cooldown_counter: 0,
            bomb_latch: false,
        }
    }

    /// `dx`/`dy` are unit steps; the distance covered is scaled by speed.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.x += self.speed * dx;
        self.y += self.speed * dy;
    }

    pub fn set_slow(&mut self, slow: bool, config: &PlayerConfig) {
        self.slow = slow;
        self.speed = if slow {
            config.speed_slow
        } else {
            config.speed_normal
        };
    }

    pub fn shoot(&self, bullet_speed: f32) -> Bullet {
        Bullet::new(self.x, self.y, 0.0, -bullet_speed, BulletOwner::Player)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.hit_cooldown_counter > 0
    }

    /// Take one point of damage unless still inside the invulnerability
    /// window.  Returns whether HP actually dropped.
    pub fn apply_damage(&mut self, hit_cooldown: u32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.hp = self.hp.saturating_sub(1);
        self.hit_cooldown_counter = hit_cooldown;
        true
    }

    /// Edge-triggered bomb: returns `true` once per press while charges
    /// remain, consuming one charge.
    pub fn try_bomb(&mut self, held: bool) -> bool {
        if !held {
            self.bomb_latch = false;
            return false;
        }
        if self.bomb_latch {
            return false;
        }
        self.bomb_latch = true;
        if self.bombs == 0 {
            return false;
        }
        self.bombs -= 1;
        true
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// How an enemy picks the direction of its next shot.  Directions are in
/// half-turns: `0` is straight down, `±0.5` sideways, `±1` straight up.
#[derive(Clone, Debug, PartialEq)]
pub enum Aim {
    /// A fresh uniformly random direction in `[-1, 1]` for every shot.
    Spray,
    /// Persistent angle advanced by `angular_speed` after every shot.
    Sweep { angle: f32, angular_speed: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub hp: u32,
    pub speed: f32,
    pub fire_cooldown: u32,
    pub fire_counter: u32,
    pub aim: Aim,
    /// Hit by a player bullet during the current tick.
    pub hit_flash: bool,
}

impl Enemy {
    pub fn plain(x: f32, y: f32, fire_cooldown: u32, config: &EnemyConfig) -> Self {
        Self {
            x,
            y,
            hp: config.hp,
            speed: config.speed,
            fire_cooldown,
            fire_counter: 0,
            aim: Aim::Spray,
            hit_flash: false,
        }
    }

    pub fn rotating(
        x: f32,
        y: f32,
        fire_cooldown: u32,
        start_angle: f32,
        angular_speed: f32,
        config: &EnemyConfig,
    ) -> Self {
        Self {
            aim: Aim::Sweep {
                angle: start_angle,
                angular_speed,
            },
            ..Self::plain(x, y, fire_cooldown, config)
        }
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.aim, Aim::Sweep { .. })
    }

    /// Fire one bullet from the enemy's position, advancing the sweep angle
    /// for rotating enemies.
    pub fn shoot(&mut self, rng: &mut impl Rng) -> Bullet {
        let direction = match &mut self.aim {
            Aim::Spray => rng.gen_range(-1.0f32..=1.0),
            Aim::Sweep {
                angle,
                angular_speed,
            } => {
                let current = *angle;
                *angle += *angular_speed;
                current
            }
        };
        let dx = self.speed * (direction * PI).sin();
        let dy = self.speed * (direction * PI).cos();
        Bullet::new(self.x, self.y, dx, dy, BulletOwner::Enemy)
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemKind {
    /// +1 HP.
    Life,
    /// +1 bomb charge.
    Bomb,
}

impl ItemKind {
    pub fn apply(self, player: &mut Player) {
        match self {
            ItemKind::Life => player.hp += 1,
            ItemKind::Bomb => player.bombs += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub fall_speed: f32,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(x: f32, y: f32, fall_speed: f32, kind: ItemKind) -> Self {
        Self {
            x,
            y,
            fall_speed,
            kind,
        }
    }

    pub fn fall(&mut self) {
        self.y += self.fall_speed;
    }
}

// ── Bomb explosions ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct BombExplosion {
    /// Centre of the blast.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Ticks left before the explosion disappears.
    pub lifetime: u32,
}

impl BombExplosion {
    pub fn new(x: f32, y: f32, radius: f32, lifetime: u32) -> Self {
        Self {
            x,
            y,
            radius,
            lifetime,
        }
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (x - self.x).hypot(y - self.y)
    }

    /// Circular test, unlike every other hit check in the game.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.distance_to(x, y) < self.radius
    }

    /// Pull the centre toward `(tx, ty)`.  The pull fades exponentially with
    /// the distance to the target.
    pub fn drift_toward(&mut self, tx: f32, ty: f32, gain: f32, falloff: f32) {
        let distance = self.distance_to(tx, ty);
        let factor = gain * (-distance / falloff).exp();
        self.x += (tx - self.x) * factor;
        self.y += (ty - self.y) * factor;
    }

    /// Count down one tick.  Returns `false` once the explosion has expired.
    pub fn tick(&mut self) -> bool {
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }
}

// ── Per-tick notifications ────────────────────────────────────────────────────

/// Things that happened during the last tick, for the renderer to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    EnemyHit { x: f32, y: f32 },
    EnemyKilled { x: f32, y: f32 },
    PlayerHit { hp: u32 },
    ItemDropped(ItemKind),
    ItemCollected(ItemKind),
    BombDetonated { x: f32, y: f32 },
    GameOver { score: u32 },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One game session.  Cloneable so the update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Player and enemy bullets, in creation order.
    pub bullets: Vec<Bullet>,
    pub items: Vec<Item>,
    pub explosions: Vec<BombExplosion>,
    /// Written only by the input phase of the update loop.
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub paused: bool,
    pub frame: u64,
    /// Events produced by the most recent tick.
    pub events: Vec<GameEvent>,
    pub config: GameConfig,
}

impl GameState {
    /// An empty session: player centred, nothing else on the field.
    pub fn empty(config: GameConfig) -> Self {
        let player = Player::new(config.width / 2.0, config.height / 2.0, &config.player);
        Self {
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            items: Vec::new(),
            explosions: Vec::new(),
            difficulty: config.starting_difficulty,
            status: GameStatus::Playing,
            paused: false,
            frame: 0,
            events: Vec::new(),
            config,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing && !self.paused
    }
}
