//! Key symbols → held-key set.
//!
//! The update loop never sees raw events; it only asks whether a key is
//! currently held.  Pause and restart are one-shot actions reported by
//! [`InputState::key_down`] so the driver can apply them immediately.
//!
//! Terminals without release events only report presses and OS auto-repeats.
//! For those, [`InputState::press`] remembers the tick each key was last seen
//! and [`InputState::expire`] lets go of keys that went quiet.

use std::collections::{HashMap, HashSet};

use crate::entities::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    /// Focus mode: slower movement, smaller hitbox.
    Slow,
    Bomb,
    Pause,
    /// Restart confirmation after game over.
    Confirm,
    Tier(Difficulty),
}

impl Key {
    /// Translate a key symbol (`"a"`, `"Left"`, `"space"`, `"Shift_L"`, …).
    /// Unknown symbols map to `None` and are ignored by the caller.
    pub fn from_keysym(sym: &str) -> Option<Key> {
        let key = match sym {
            "a" | "A" | "Left" => Key::Left,
            "d" | "D" | "Right" => Key::Right,
            "w" | "W" | "Up" => Key::Up,
            "s" | "S" | "Down" => Key::Down,
            "space" | " " => Key::Fire,
            "Shift_L" | "Shift_R" => Key::Slow,
            "x" | "X" | "b" | "B" => Key::Bomb,
            "p" | "P" => Key::Pause,
            "Return" => Key::Confirm,
            "1" => Key::Tier(Difficulty::Easy),
            "2" => Key::Tier(Difficulty::Normal),
            "3" => Key::Tier(Difficulty::Hard),
            "4" => Key::Tier(Difficulty::Lunatic),
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
    TogglePause,
    Restart,
}

/// Ticks a key stays held after its latest auto-repeat.  Repeats arrive at
/// 15 Hz or faster, well inside 3 ticks at the default 20 FPS.
pub const HOLD_WINDOW: u64 = 3;

/// Ticks a key stays held after its first press.  The OS waits up to about
/// 600 ms before the first auto-repeat.
pub const FIRST_HOLD_WINDOW: u64 = 14;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Seen {
    tick: u64,
    repeated: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    held: HashSet<Key>,
    seen: HashMap<Key, Seen>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) -> Option<InputAction> {
        self.held.insert(key);
        match key {
            Key::Pause => Some(InputAction::TogglePause),
            Key::Confirm => Some(InputAction::Restart),
            _ => None,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// A press or auto-repeat of `sym` seen at `tick`.  Only the first press
    /// of a hold goes through [`key_down`](Self::key_down); later ones just
    /// keep the key alive, so one-shot actions fire once per hold.
    pub fn press(&mut self, sym: &str, tick: u64) -> Option<InputAction> {
        let key = Key::from_keysym(sym)?;
        if let Some(seen) = self.seen.get_mut(&key) {
            seen.tick = tick;
            seen.repeated = true;
            return None;
        }
        self.seen.insert(
            key,
            Seen {
                tick,
                repeated: false,
            },
        );
        self.key_down(key)
    }

    pub fn release(&mut self, sym: &str) {
        if let Some(key) = Key::from_keysym(sym) {
            self.seen.remove(&key);
            self.key_up(key);
        }
    }

    /// Let go of every key that has been quiet for longer than its window.
    pub fn expire(&mut self, tick: u64) {
        let held = &mut self.held;
        self.seen.retain(|key, seen| {
            let window = if seen.repeated {
                HOLD_WINDOW
            } else {
                FIRST_HOLD_WINDOW
            };
            let live = tick.saturating_sub(seen.tick) <= window;
            if !live {
                held.remove(key);
            }
            live
        });
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// The last held tier key in `1..=4` order, if any.
    pub fn selected_tier(&self) -> Option<Difficulty> {
        Difficulty::ALL
            .iter()
            .copied()
            .filter(|&tier| self.is_held(Key::Tier(tier)))
            .last()
    }
}
