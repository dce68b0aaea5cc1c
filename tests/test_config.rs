use std::io::ErrorKind;
use std::time::Duration;

use danmaku::config::*;
use danmaku::entities::Difficulty;

#[test]
fn defaults_match_the_classic_game() {
    let c = GameConfig::default();
    assert_eq!((c.width, c.height), (400.0, 600.0));
    assert_eq!(c.fps, 20);
    assert_eq!(c.player.hp, 5);
    assert_eq!(c.player.hit_cooldown, 20);
    assert_eq!(c.player.shoot_cooldown, 5);
    assert_eq!(c.enemy.kill_reward, 100);
    assert_eq!(c.bomb.radius, 200.0);
    assert_eq!(c.starting_difficulty, Difficulty::Normal);
    assert!(c.validate().is_ok());
}

#[test]
fn tick_interval_follows_fps() {
    let c = GameConfig::default();
    assert_eq!(c.tick_interval(), Duration::from_millis(50));
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = GameConfig::from_json(
        r#"{ "fps": 30, "player": { "hp": 8 }, "starting_difficulty": "Lunatic" }"#,
    )
    .unwrap();
    assert_eq!(c.fps, 30);
    assert_eq!(c.player.hp, 8);
    assert_eq!(c.player.bombs, 3);
    assert_eq!(c.starting_difficulty, Difficulty::Lunatic);
    assert_eq!(c.enemy, EnemyConfig::default());
}

#[test]
fn empty_object_is_the_default_config() {
    assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
}

#[test]
fn config_survives_serialization() {
    let mut c = GameConfig::default();
    c.bomb.follow_player = false;
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(GameConfig::from_json(&json).unwrap(), c);
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = GameConfig::from_json("{ fps: ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn out_of_range_probability_is_rejected() {
    let err = GameConfig::from_json(r#"{ "item": { "drop_chance": 1.5 } }"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert!(err.to_string().contains("item.drop_chance"));
}

#[test]
fn zero_fps_and_zero_hp_are_rejected() {
    let mut c = GameConfig::default();
    c.fps = 0;
    assert!(c.validate().is_err());

    let mut c = GameConfig::default();
    c.enemy.hp = 0;
    assert!(c.validate().is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameConfig::load("/definitely/not/here/danmaku.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn tiers_get_harder() {
    let tiers: Vec<DifficultyParams> = Difficulty::ALL.iter().map(|d| d.params()).collect();
    for w in tiers.windows(2) {
        assert!(w[1].spawn_chance > w[0].spawn_chance);
        assert!(w[1].max_enemies > w[0].max_enemies);
        assert!(w[1].rotating_fire_cooldown <= w[0].rotating_fire_cooldown);
        assert!(w[1].plain_fire_cooldown < w[0].plain_fire_cooldown);
    }
    assert_eq!(Difficulty::Normal.params().max_enemies, 8);
}
