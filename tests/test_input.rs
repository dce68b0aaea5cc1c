use danmaku::entities::Difficulty;
use danmaku::input::*;

#[test]
fn keysyms_map_to_keys() {
    assert_eq!(Key::from_keysym("a"), Some(Key::Left));
    assert_eq!(Key::from_keysym("A"), Some(Key::Left));
    assert_eq!(Key::from_keysym("Left"), Some(Key::Left));
    assert_eq!(Key::from_keysym("D"), Some(Key::Right));
    assert_eq!(Key::from_keysym("w"), Some(Key::Up));
    assert_eq!(Key::from_keysym("Down"), Some(Key::Down));
    assert_eq!(Key::from_keysym("space"), Some(Key::Fire));
    assert_eq!(Key::from_keysym("Shift_L"), Some(Key::Slow));
    assert_eq!(Key::from_keysym("x"), Some(Key::Bomb));
    assert_eq!(Key::from_keysym("P"), Some(Key::Pause));
    assert_eq!(Key::from_keysym("Return"), Some(Key::Confirm));
    assert_eq!(Key::from_keysym("3"), Some(Key::Tier(Difficulty::Hard)));
}

#[test]
fn unknown_keysyms_are_ignored() {
    assert_eq!(Key::from_keysym("F13"), None);
    assert_eq!(Key::from_keysym("5"), None);
    assert_eq!(Key::from_keysym(""), None);

    let mut input = InputState::new();
    assert_eq!(input.press("Hyper_L", 1), None);
    input.release("Hyper_L");
    assert_eq!(input, InputState::new());
}

#[test]
fn held_set_tracks_down_and_up() {
    let mut input = InputState::new();
    assert_eq!(input.key_down(Key::Fire), None);
    input.key_down(Key::Left);
    assert!(input.is_held(Key::Fire));
    assert!(input.is_held(Key::Left));

    input.key_up(Key::Fire);
    assert!(!input.is_held(Key::Fire));
    assert!(input.is_held(Key::Left));

    input.key_up(Key::Left);
    assert!(!input.is_held(Key::Left));
}

#[test]
fn aliases_share_one_held_key() {
    let mut input = InputState::new();
    input.press("a", 1);
    input.press("A", 1);
    input.press("Left", 1);
    assert!(input.is_held(Key::Left));
    input.release("a");
    assert!(!input.is_held(Key::Left));
}

#[test]
fn pause_and_confirm_are_one_shot_actions() {
    let mut input = InputState::new();
    assert_eq!(input.press("p", 1), Some(InputAction::TogglePause));
    assert_eq!(input.press("Return", 1), Some(InputAction::Restart));
    assert_eq!(input.press("space", 1), None);
}

#[test]
fn auto_repeat_does_not_repeat_actions() {
    let mut input = InputState::new();
    assert_eq!(input.press("p", 1), Some(InputAction::TogglePause));
    for tick in [10, 12, 14, 16] {
        input.expire(tick);
        assert_eq!(input.press("p", tick), None);
    }

    // A fresh press after release toggles again
    input.release("p");
    assert_eq!(input.press("p", 17), Some(InputAction::TogglePause));
}

#[test]
fn key_outlives_the_delay_before_the_first_repeat() {
    let mut input = InputState::new();
    input.press("x", 1);
    input.expire(1 + FIRST_HOLD_WINDOW);
    assert!(input.is_held(Key::Bomb));

    // Once repeating, silence expires the key after the short window
    input.press("x", 10);
    input.expire(10 + HOLD_WINDOW);
    assert!(input.is_held(Key::Bomb));
    input.expire(11 + HOLD_WINDOW);
    assert!(!input.is_held(Key::Bomb));
}

#[test]
fn unrepeated_press_expires_after_first_window() {
    let mut input = InputState::new();
    input.press("space", 5);
    input.expire(6 + FIRST_HOLD_WINDOW);
    assert!(!input.is_held(Key::Fire));

    // Expired keys start a new hold
    assert_eq!(input.press("p", 30), Some(InputAction::TogglePause));
    input.expire(31 + FIRST_HOLD_WINDOW);
    assert_eq!(input.press("p", 32 + FIRST_HOLD_WINDOW), Some(InputAction::TogglePause));
}

#[test]
fn highest_held_tier_wins() {
    let mut input = InputState::new();
    assert_eq!(input.selected_tier(), None);

    input.press("4", 1);
    input.press("1", 1);
    assert_eq!(input.selected_tier(), Some(Difficulty::Lunatic));

    input.release("4");
    assert_eq!(input.selected_tier(), Some(Difficulty::Easy));
}
