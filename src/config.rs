//! Tunable gameplay constants.
//!
//! Everything the update loop reads lives in [`GameConfig`], which can be
//! loaded from a JSON file.  Missing fields fall back to the defaults below,
//! so a file only needs to mention what it overrides.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::Difficulty;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// One preset parameter set, selected at runtime with the number keys.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyParams {
    pub label: &'static str,
    /// Probability of a spawn attempt on any given tick.
    pub spawn_chance: f64,
    /// Spawning stops while this many enemies are alive.
    pub max_enemies: usize,
    pub rotating_fire_cooldown: u32,
    pub plain_fire_cooldown: u32,
}

impl Difficulty {
    pub fn params(self) -> DifficultyParams {
        match self {
            Difficulty::Easy => DifficultyParams {
                label: "EASY",
                spawn_chance: 0.05,
                max_enemies: 5,
                rotating_fire_cooldown: 8,
                plain_fire_cooldown: 30,
            },
            Difficulty::Normal => DifficultyParams {
                label: "NORMAL",
                spawn_chance: 0.1,
                max_enemies: 8,
                rotating_fire_cooldown: 5,
                plain_fire_cooldown: 20,
            },
            Difficulty::Hard => DifficultyParams {
                label: "HARD",
                spawn_chance: 0.15,
                max_enemies: 12,
                rotating_fire_cooldown: 4,
                plain_fire_cooldown: 14,
            },
            Difficulty::Lunatic => DifficultyParams {
                label: "LUNATIC",
                spawn_chance: 0.2,
                max_enemies: 16,
                rotating_fire_cooldown: 3,
                plain_fire_cooldown: 10,
            },
        }
    }
}

// ── Config sections ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub hp: u32,
    pub bombs: u32,
    pub speed_normal: f32,
    pub speed_slow: f32,
    /// Ticks between shots while the fire key is held.
    pub shoot_cooldown: u32,
    /// Invulnerability ticks after taking a hit.
    pub hit_cooldown: u32,
    pub bullet_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hp: 5,
            bombs: 3,
            speed_normal: 6.0,
            speed_slow: 3.0,
            shoot_cooldown: 5,
            hit_cooldown: 20,
            bullet_speed: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub hp: u32,
    /// Also the speed of every bullet the enemy fires.
    pub speed: f32,
    pub kill_reward: u32,
    /// Share of spawns that are rotating (spiral) shooters.
    pub rotating_share: f64,
    /// Half-turns added to a rotating enemy's aim after each shot.
    pub angular_speed: f32,
    /// Aim of a freshly spawned rotating enemy, in half-turns (`1` = up).
    pub sweep_start_angle: f32,
    /// Plain enemies placed in the top third when a session starts.
    pub opening_wave: usize,
    pub opening_fire_cooldown: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            hp: 2,
            speed: 2.0,
            kill_reward: 100,
            rotating_share: 0.8,
            angular_speed: 0.1,
            sweep_start_angle: 1.0,
            opening_wave: 5,
            opening_fire_cooldown: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Chance that a destroyed enemy leaves an item behind.
    pub drop_chance: f64,
    /// Share of drops that are life items; the rest are bombs.
    pub life_share: f64,
    pub fall_speed: f32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            drop_chance: 0.2,
            life_share: 0.3,
            fall_speed: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    pub radius: f32,
    /// Ticks an explosion stays on the field.
    pub lifetime: u32,
    /// When set, explosions drift toward the player while they last.
    pub follow_player: bool,
    pub drift_gain: f32,
    /// Distance at which the drift has decayed to 1/e of `drift_gain`.
    pub drift_falloff: f32,
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            lifetime: 30,
            follow_player: true,
            drift_gain: 0.1,
            drift_falloff: 200.0,
        }
    }
}

// ── Top-level config ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub fps: u32,
    /// Downward drift applied to bullets and enemies every tick.
    pub scroll_speed: f32,
    pub starting_difficulty: Difficulty,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub item: ItemConfig,
    pub bomb: BombConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
            fps: 20,
            scroll_speed: 1.0,
            starting_difficulty: Difficulty::Normal,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            item: ItemConfig::default(),
            bomb: BombConfig::default(),
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> io::Result<Self> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the update loop cannot work with.
    pub fn validate(&self) -> io::Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(invalid("play field must have a positive size"));
        }
        if self.enemy.hp == 0 || self.player.hp == 0 {
            return Err(invalid("player and enemy hp must be at least 1"));
        }
        if self.fps == 0 {
            return Err(invalid("fps must be positive"));
        }
        let chances = [
            ("enemy.rotating_share", self.enemy.rotating_share),
            ("item.drop_chance", self.item.drop_chance),
            ("item.life_share", self.item.life_share),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(&format!("{name} must be within [0, 1], got {p}")));
            }
        }
        if self.bomb.radius < 0.0 || self.bomb.drift_falloff <= 0.0 {
            return Err(invalid("bomb radius and drift falloff must be positive"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.max(1) as u64)
    }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}
