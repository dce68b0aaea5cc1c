/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// play-field coordinates into terminal cells and state into terminal
/// commands.

use std::f32::consts::TAU;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use danmaku::entities::{
    BombExplosion, Bullet, BulletOwner, Difficulty, Enemy, GameState, GameStatus, Item, ItemKind,
};
use danmaku::hud;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_HP: Color = Color::Red;
const C_HUD_BOMB: Color = Color::Cyan;
const C_PLAYER: Color = Color::Red;
const C_PLAYER_HIT: Color = Color::Cyan;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_HIT: Color = Color::Magenta;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::White;
const C_ITEM_LIFE: Color = Color::Magenta;
const C_ITEM_BOMB: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

/// Points sampled along an explosion's rim.
const EXPLOSION_RIM_POINTS: usize = 32;

// ── Play-field → terminal mapping ─────────────────────────────────────────────

/// The bordered play area occupies rows `2..rows-2` and columns `1..cols-1`.
struct Viewport {
    cols: u16,
    rows: u16,
    width: f32,
    height: f32,
}

impl Viewport {
    fn new(state: &GameState, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            width: state.config.width,
            height: state.config.height,
        }
    }

    fn inner_cols(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn inner_rows(&self) -> u16 {
        self.rows.saturating_sub(4).max(1)
    }

    /// `None` when the point lies outside the play field.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..=self.width).contains(&x) || !(0.0..=self.height).contains(&y) {
            return None;
        }
        let col = (x / self.width * (self.inner_cols() - 1) as f32).round() as u16;
        let row = (y / self.height * (self.inner_rows() - 1) as f32).round() as u16;
        Some((1 + col, 2 + row))
    }

    /// Like [`cell`](Self::cell), but pinned to the nearest field edge.  The
    /// player may stand a step past the border.
    fn pinned_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let x = x.clamp(0.0, self.width);
        let y = y.clamp(0.0, self.height);
        self.cell(x, y).unwrap_or((1, 2))
    }
}

fn put<W: Write>(out: &mut W, cell: (u16, u16), color: Color, glyph: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(cell.0, cell.1))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols × rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let view = Viewport::new(state, cols, rows);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, state, &view)?;

    for explosion in &state.explosions {
        draw_explosion(out, explosion, &view)?;
    }
    for item in &state.items {
        draw_item(out, item, &view)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, enemy, &view)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet, &view)?;
    }

    draw_player(out, state, &view)?;
    draw_footer(out, state, &view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, &view)?;
    } else if state.paused {
        draw_centered(out, &view, &[("Press P to Resume", Color::White)])?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Normal => Color::Yellow,
        Difficulty::Hard => Color::Red,
        Difficulty::Lunatic => Color::Magenta,
    }
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    put(out, (1, 0), C_HUD_SCORE, &hud::score_text(state.player.score))?;

    let label = hud::difficulty_text(state.difficulty);
    let lx = (view.cols / 2).saturating_sub(label.chars().count() as u16 / 2);
    put(out, (lx, 0), difficulty_color(state.difficulty), &label)?;

    let hp = hud::hp_text(state.player.hp);
    let rx = view.cols.saturating_sub(hp.chars().count() as u16 + 1);
    put(out, (rx, 0), C_HUD_HP, &hp)?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let p = &state.player;
    let cell = view.pinned_cell(p.x, p.y);
    let color = if p.is_invulnerable() { C_PLAYER_HIT } else { C_PLAYER };
    let glyph = if p.slow { "▴" } else { "▲" };
    put(out, cell, color, glyph)
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let Some(cell) = view.cell(enemy.x, enemy.y) else {
        return Ok(());
    };
    let color = if enemy.hit_flash { C_ENEMY_HIT } else { C_ENEMY };
    let glyph = if enemy.is_rotating() { "✣" } else { "■" };
    put(out, cell, color, glyph)
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet, view: &Viewport) -> std::io::Result<()> {
    let Some(cell) = view.cell(bullet.x, bullet.y) else {
        return Ok(());
    };
    match bullet.owner {
        BulletOwner::Player => put(out, cell, C_BULLET_PLAYER, "║"),
        BulletOwner::Enemy => put(out, cell, C_BULLET_ENEMY, "•"),
    }
}

fn draw_item<W: Write>(out: &mut W, item: &Item, view: &Viewport) -> std::io::Result<()> {
    let Some(cell) = view.cell(item.x, item.y) else {
        return Ok(());
    };
    match item.kind {
        ItemKind::Life => put(out, cell, C_ITEM_LIFE, "♥"),
        ItemKind::Bomb => put(out, cell, C_ITEM_BOMB, "B"),
    }
}

fn draw_explosion<W: Write>(
    out: &mut W,
    explosion: &BombExplosion,
    view: &Viewport,
) -> std::io::Result<()> {
    for i in 0..EXPLOSION_RIM_POINTS {
        let angle = TAU * i as f32 / EXPLOSION_RIM_POINTS as f32;
        let x = explosion.x + explosion.radius * angle.cos();
        let y = explosion.y + explosion.radius * angle.sin();
        if let Some(cell) = view.cell(x, y) {
            put(out, cell, C_EXPLOSION, "·")?;
        }
    }
    Ok(())
}

// ── Footer (last row): bombs + controls ───────────────────────────────────────

fn draw_footer<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let row = view.rows.saturating_sub(1);
    let bombs = hud::bomb_text(state.player.bombs);
    put(out, (1, row), C_HUD_BOMB, &bombs)?;

    let hint = "WASD/←↑↓→ Move  SPACE Shoot  SHIFT Slow  X Bomb  P Pause  1-4 Level  Q Quit";
    let col = (bombs.chars().count() as u16 + 3).min(view.cols.saturating_sub(1));
    put(out, (col, row), C_HINT, hint)
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        put(out, (col, row), *color, msg)?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final {}", hud::score_text(state.player.score));
    draw_centered(
        out,
        view,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║    GAME  OVER    ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            ("Press Enter to Restart", Color::White),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use danmaku::compute::tick;
    use danmaku::config::GameConfig;
    use danmaku::input::{InputState, Key};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frame(state: &GameState) -> String {
        let mut out = Vec::new();
        render(&mut out, state, 60, 40).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn player_past_the_edge_stays_on_screen() {
        let mut state = GameState::empty(GameConfig::default());
        let mut input = InputState::new();
        input.key_down(Key::Right);
        let mut rng = StdRng::seed_from_u64(7);
        state.player.hp = 1000;
        for _ in 0..60 {
            state = tick(&state, &input, &mut rng);
        }
        assert_eq!(state.player.x, 404.0);

        let view = Viewport::new(&state, 60, 40);
        assert_eq!(view.pinned_cell(state.player.x, state.player.y).0, 58);
        assert!(frame(&state).contains('▲'));
    }

    #[test]
    fn pinned_cell_matches_cell_inside_the_field() {
        let state = GameState::empty(GameConfig::default());
        let view = Viewport::new(&state, 60, 40);
        assert_eq!(Some(view.pinned_cell(200.0, 300.0)), view.cell(200.0, 300.0));
        assert_eq!(view.pinned_cell(-4.0, -4.0), (1, 2));
    }
}
