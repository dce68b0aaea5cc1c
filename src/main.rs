mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use danmaku::compute::{init_state, restart, tick, toggle_pause};
use danmaku::config::GameConfig;
use danmaku::entities::GameState;
use danmaku::input::{InputAction, InputState};

// ── Key translation ───────────────────────────────────────────────────────────

/// crossterm key code → key symbol understood by `Key::from_keysym`.
fn keysym(code: &KeyCode) -> Option<String> {
    let sym = match code {
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Enter => "Return".to_string(),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Modifier(ModifierKeyCode::LeftShift) => "Shift_L".to_string(),
        KeyCode::Modifier(ModifierKeyCode::RightShift) => "Shift_R".to_string(),
        _ => return None,
    };
    Some(sym)
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: held keys live in an [`InputState`].  Terminals with the
/// keyboard-enhancement protocol report `Release` events and keys are
/// dropped on release.  Classic terminals report auto-repeats as `Press`, so
/// keys also expire once they stop repeating.  Holding Shift on such
/// terminals is only visible as a modifier on other keys, which counts as
/// holding the slow key.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let interval = state.config.tick_interval();

    let mut input = InputState::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            if kind == KeyEventKind::Press && is_quit(&code, modifiers) {
                return Ok(());
            }
            let Some(sym) = keysym(&code) else {
                continue;
            };

            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        input.press("Shift_L", frame);
                    }
                    match input.press(&sym, frame) {
                        Some(InputAction::TogglePause) => state = toggle_pause(&state),
                        Some(InputAction::Restart) => state = restart(&state, &mut rng),
                        None => {}
                    }
                }
                KeyEventKind::Release => input.release(&sym),
            }
        }

        input.expire(frame);

        state = tick(&state, &input, &mut rng);

        let (cols, rows) = terminal::size()?;
        display::render(out, &state, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Optional first argument: path to a JSON tunables file.
fn load_config() -> std::io::Result<GameConfig> {
    match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    }
}

fn main() -> std::io::Result<()> {
    let config = load_config()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events and bare modifier presses (Shift) from the
    // terminal.  kitty-protocol terminals support this; others fall back to
    // the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let state = init_state(config, &mut thread_rng());
    let result = game_loop(&mut out, state, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
