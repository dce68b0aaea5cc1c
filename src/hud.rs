//! HUD text.  The renderer decides where and in which colour these go.

use crate::entities::Difficulty;

pub const HP_GLYPH: &str = "★ ";
pub const BOMB_GLYPH: &str = "◆ ";

/// `Score: 000001200`
pub fn score_text(score: u32) -> String {
    format!("Score: {:09}", score)
}

/// One star per hit point.
pub fn hp_text(hp: u32) -> String {
    format!("Player: {}", HP_GLYPH.repeat(hp as usize))
}

pub fn bomb_text(bombs: u32) -> String {
    format!("Bomb: {}", BOMB_GLYPH.repeat(bombs as usize))
}

pub fn difficulty_text(difficulty: Difficulty) -> String {
    format!("[ {} ]", difficulty.params().label)
}
