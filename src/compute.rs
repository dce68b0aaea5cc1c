/// Game-logic functions.
///
/// The session-level functions (`init_state`, `tick`, `toggle_pause`,
/// `restart`) take an immutable reference to the current `GameState` and
/// return a brand-new one.  The individual update phases are exposed as
/// `&mut GameState` helpers so each can be driven on its own.  All randomness
/// comes through an injected RNG.

use rand::Rng;

use crate::collision::collides;
use crate::config::GameConfig;
use crate::entities::{
    BombExplosion, Bullet, BulletOwner, Enemy, GameEvent, GameState, GameStatus, Item, ItemKind,
};
use crate::input::{InputState, Key};

/// Bullets survive until they are this far down, as a multiple of the
/// play-field height.
const BULLET_BOTTOM_MARGIN: f32 = 1.5;

// ── Session ──────────────────────────────────────────────────────────────────

/// Build a fresh session: player centred, an opening wave of plain enemies
/// scattered over the top third of the field.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> GameState {
    let mut state = GameState::empty(config);
    let max_x = (state.config.width as i32 - 10).max(0);
    let max_y = (state.config.height as i32 / 3 - 10).max(0);

    for _ in 0..state.config.enemy.opening_wave {
        let x = rng.gen_range(0..=max_x) as f32;
        let y = rng.gen_range(0..=max_y) as f32;
        let cooldown = state.config.enemy.opening_fire_cooldown;
        state
            .enemies
            .push(Enemy::plain(x, y, cooldown, &state.config.enemy));
    }
    state
}

/// Flip the pause flag.  Has no effect once the game is over.
pub fn toggle_pause(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    GameState {
        paused: !state.paused,
        ..state.clone()
    }
}

/// Throw the session away and start over from the same config.  Only
/// honoured after game over.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    init_state(state.config.clone(), rng)
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the simulation by one tick.  Paused or finished sessions are
/// returned unchanged.
pub fn tick(state: &GameState, input: &InputState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if !state.is_running() {
        return next;
    }
    next.frame += 1;
    next.events.clear();

    select_difficulty(&mut next, input);
    move_player(&mut next, input);
    player_actions(&mut next, input);
    cool_down(&mut next);
    shoot_enemy_bullets(&mut next, rng);
    spawn_enemy(&mut next, rng);
    advance_entities(&mut next);
    resolve_bullet_collisions(&mut next, rng);
    resolve_body_collisions(&mut next);
    resolve_bomb_collisions(&mut next);
    update_explosions(&mut next);
    update_items(&mut next);
    check_game_over(&mut next);

    next
}

// ── 1–4. Player ──────────────────────────────────────────────────────────────

/// Number keys override the tier directly; with several held, the highest
/// wins.
pub fn select_difficulty(state: &mut GameState, input: &InputState) {
    if let Some(tier) = input.selected_tier() {
        state.difficulty = tier;
    }
}

/// One unit step per held direction key.  Diagonals are not normalised.
pub fn move_player(state: &mut GameState, input: &InputState) {
    let (width, height) = (state.config.width, state.config.height);
    let player = &mut state.player;
    player.set_slow(input.is_held(Key::Slow), &state.config.player);

    if input.is_held(Key::Left) && player.x > 0.0 {
        player.move_by(-1.0, 0.0);
    }
    if input.is_held(Key::Right) && player.x < width {
        player.move_by(1.0, 0.0);
    }
    if input.is_held(Key::Up) && player.y > 0.0 {
        player.move_by(0.0, -1.0);
    }
    if input.is_held(Key::Down) && player.y < height {
        player.move_by(0.0, 1.0);
    }
}

/// Fire (rate-limited by the shoot cooldown) and bomb (one per key press).
pub fn player_actions(state: &mut GameState, input: &InputState) {
    let config = &state.config;
    let player = &mut state.player;

    if input.is_held(Key::Fire) && player.shoot_cooldown_counter == 0 {
        state.bullets.push(player.shoot(config.player.bullet_speed));
        player.shoot_cooldown_counter = config.player.shoot_cooldown;
    }

    if player.try_bomb(input.is_held(Key::Bomb)) {
        state.explosions.push(BombExplosion::new(
            player.x,
            player.y,
            config.bomb.radius,
            config.bomb.lifetime,
        ));
        state.events.push(GameEvent::BombDetonated {
            x: player.x,
            y: player.y,
        });
    }
}

pub fn cool_down(state: &mut GameState) {
    let player = &mut state.player;
    player.shoot_cooldown_counter = player.shoot_cooldown_counter.saturating_sub(1);
    player.hit_cooldown_counter = player.hit_cooldown_counter.saturating_sub(1);
}

// ── 5–7. Enemies and movement ────────────────────────────────────────────────

pub fn shoot_enemy_bullets(state: &mut GameState, rng: &mut impl Rng) {
    for enemy in &mut state.enemies {
        if enemy.fire_counter == 0 {
            state.bullets.push(enemy.shoot(rng));
            enemy.fire_counter = enemy.fire_cooldown;
        } else {
            enemy.fire_counter -= 1;
        }
    }
}

/// Roll for a spawn at the top edge.  Rotating shooters are the common case;
/// plain spray shooters fire less often.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) {
    let params = state.difficulty.params();
    if rng.gen::<f64>() >= params.spawn_chance {
        return;
    }
    if state.enemies.len() >= params.max_enemies {
        return;
    }

    let config = &state.config.enemy;
    let x = rng.gen_range(0..=(state.config.width as i32 - 10).max(0)) as f32;
    let enemy = if rng.gen_bool(config.rotating_share) {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        Enemy::rotating(
            x,
            0.0,
            params.rotating_fire_cooldown,
            config.sweep_start_angle,
            sign * config.angular_speed,
            config,
        )
    } else {
        Enemy::plain(x, 0.0, params.plain_fire_cooldown, config)
    };
    state.enemies.push(enemy);
}

/// Scroll bullets and enemies, dropping whatever left the field.
pub fn advance_entities(state: &mut GameState) {
    let scroll = state.config.scroll_speed;
    let height = state.config.height;

    for bullet in &mut state.bullets {
        bullet.advance(0.0, scroll);
    }
    state
        .bullets
        .retain(|b| b.y >= 0.0 && b.y <= BULLET_BOTTOM_MARGIN * height);

    for enemy in &mut state.enemies {
        enemy.move_by(0.0, scroll);
    }
    state.enemies.retain(|e| e.y <= height);
}

// ── 8–10. Collisions ─────────────────────────────────────────────────────────

/// Bullets against their targets.  Removals are collected during the pass and
/// applied afterwards, so no entity is skipped.
pub fn resolve_bullet_collisions(state: &mut GameState, rng: &mut impl Rng) {
    for enemy in &mut state.enemies {
        enemy.hit_flash = false;
    }
    let hit_cooldown = state.config.player.hit_cooldown;
    let mut spent = vec![false; state.bullets.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        match bullet.owner {
            BulletOwner::Player => {
                // First live enemy in collection order takes the hit.
                let target = state
                    .enemies
                    .iter()
                    .position(|e| e.hp > 0 && collides(bullet, e));
                if let Some(ei) = target {
                    let enemy = &mut state.enemies[ei];
                    enemy.hp -= 1;
                    enemy.hit_flash = true;
                    state.events.push(GameEvent::EnemyHit {
                        x: enemy.x,
                        y: enemy.y,
                    });
                    spent[bi] = true;
                }
            }
            BulletOwner::Enemy => {
                if collides(bullet, &state.player) {
                    spent[bi] = true;
                    if state.player.apply_damage(hit_cooldown) {
                        state.events.push(GameEvent::PlayerHit {
                            hp: state.player.hp,
                        });
                    }
                }
            }
        }
    }

    state.bullets = sweep(std::mem::take(&mut state.bullets), &spent);

    let fallen: Vec<(f32, f32)> = state
        .enemies
        .iter()
        .filter(|e| e.hp == 0)
        .map(|e| (e.x, e.y))
        .collect();
    state.enemies.retain(|e| e.hp > 0);
    for (x, y) in fallen {
        state.player.score += state.config.enemy.kill_reward;
        state.events.push(GameEvent::EnemyKilled { x, y });
        roll_item_drop(state, x, y, rng);
    }
}

/// Contact damage from enemy bodies, behind the same invulnerability gate as
/// bullet damage.
pub fn resolve_body_collisions(state: &mut GameState) {
    let touching = state.enemies.iter().any(|e| collides(e, &state.player));
    if touching && state.player.apply_damage(state.config.player.hit_cooldown) {
        state.events.push(GameEvent::PlayerHit {
            hp: state.player.hp,
        });
    }
}

/// Enemies and enemy bullets inside any explosion radius are destroyed.
/// Bomb kills score like bullet kills but never drop items.
pub fn resolve_bomb_collisions(state: &mut GameState) {
    if state.explosions.is_empty() {
        return;
    }
    let explosions = &state.explosions;
    let in_blast = |x: f32, y: f32| explosions.iter().any(|b| b.contains(x, y));

    let mut destroyed = Vec::new();
    state.enemies.retain(|e| {
        let hit = in_blast(e.x, e.y);
        if hit {
            destroyed.push((e.x, e.y));
        }
        !hit
    });
    state
        .bullets
        .retain(|b| !(b.owner.targets_player() && in_blast(b.x, b.y)));

    for (x, y) in destroyed {
        state.player.score += state.config.enemy.kill_reward;
        state.events.push(GameEvent::EnemyKilled { x, y });
    }
}

// ── 11–13. Explosions, items, game over ──────────────────────────────────────

pub fn update_explosions(state: &mut GameState) {
    let (px, py) = (state.player.x, state.player.y);
    let bomb = &state.config.bomb;

    state.explosions.retain_mut(|explosion| {
        if bomb.follow_player {
            explosion.drift_toward(px, py, bomb.drift_gain, bomb.drift_falloff);
        }
        explosion.tick()
    });
}

/// Items fall; touching the player applies them, crossing the bottom edge
/// loses them.
pub fn update_items(state: &mut GameState) {
    let height = state.config.height;
    for item in &mut state.items {
        item.fall();
    }

    let player = &state.player;
    let mut collected = Vec::new();
    state.items.retain(|item| {
        if collides(item, player) {
            collected.push(item.kind);
            return false;
        }
        item.y <= height
    });

    for kind in collected {
        kind.apply(&mut state.player);
        state.events.push(GameEvent::ItemCollected(kind));
    }
}

pub fn check_game_over(state: &mut GameState) {
    if state.player.hp == 0 && state.status == GameStatus::Playing {
        state.status = GameStatus::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.player.score,
        });
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn sweep(bullets: Vec<Bullet>, spent: &[bool]) -> Vec<Bullet> {
    bullets
        .into_iter()
        .zip(spent)
        .filter(|&(_, &gone)| !gone)
        .map(|(b, _)| b)
        .collect()
}

fn roll_item_drop(state: &mut GameState, x: f32, y: f32, rng: &mut impl Rng) {
    let config = &state.config.item;
    if !rng.gen_bool(config.drop_chance) {
        return;
    }
    let kind = if rng.gen_bool(config.life_share) {
        ItemKind::Life
    } else {
        ItemKind::Bomb
    };
    state.items.push(Item::new(x, y, config.fall_speed, kind));
    state.events.push(GameEvent::ItemDropped(kind));
}
