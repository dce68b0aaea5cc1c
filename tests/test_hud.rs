use danmaku::entities::Difficulty;
use danmaku::hud::*;

#[test]
fn score_is_zero_padded_to_nine_digits() {
    assert_eq!(score_text(0), "Score: 000000000");
    assert_eq!(score_text(1200), "Score: 000001200");
}

#[test]
fn hp_is_one_glyph_per_point() {
    assert_eq!(hp_text(3), "Player: ★ ★ ★ ");
    assert_eq!(hp_text(0), "Player: ");
}

#[test]
fn bombs_and_difficulty_labels() {
    assert_eq!(bomb_text(2), "Bomb: ◆ ◆ ");
    assert_eq!(difficulty_text(Difficulty::Easy), "[ EASY ]");
    assert_eq!(difficulty_text(Difficulty::Lunatic), "[ LUNATIC ]");
}
