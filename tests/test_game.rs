use std::io;

use bullet_rain::clock::ManualClock;
use bullet_rain::compute::init_state;
use bullet_rain::config::GameConfig;
use bullet_rain::display::{hud_lines, Font, Surface, C_ENEMY_BOSS, C_PLAYER};
use bullet_rain::entities::*;
use bullet_rain::game::Game;
use bullet_rain::input::{Action, KeyInput};

use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Remembers every drawing command of the most recent frame.
#[derive(Default)]
struct Recorder {
    rects: Vec<(Rect, Color)>,
    texts: Vec<(String, Font)>,
    frames: usize,
}

impl Surface for Recorder {
    fn clear(&mut self) -> io::Result<()> {
        self.rects.clear();
        self.texts.clear();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        self.rects.push((rect, color));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, font: Font) -> io::Result<()> {
        self.texts.push((text.to_string(), font));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }
}

fn new_game(clock: &ManualClock) -> Game<ManualClock, StdRng> {
    Game::new(GameConfig::default(), clock.clone(), StdRng::seed_from_u64(7))
}

fn game_with(state: GameState, config: GameConfig, clock: &ManualClock) -> Game<ManualClock, StdRng> {
    Game::with_state(state, config, clock.clone(), StdRng::seed_from_u64(7))
}

fn enemy_at(x: f32, y: f32, health: i32) -> Enemy {
    Enemy { x, y, width: 50.0, height: 50.0, speed: 3.0, health, kind: EnemyKind::Normal }
}

// ── timers ────────────────────────────────────────────────────────────────────

#[test]
fn fire_timer_shoots_every_interval() {
    let clock = ManualClock::new(0);
    let mut game = new_game(&clock);
    assert_eq!(game.fire_period_ms(), Some(500));
    assert_eq!(game.spawn_period_ms(), Some(1000));

    clock.set(499);
    assert_eq!(game.pump_timers(), 0);
    assert!(game.state().bullets.is_empty());

    clock.set(500);
    assert_eq!(game.pump_timers(), 1);
    assert_eq!(game.state().bullets.len(), 1);
}

#[test]
fn spawn_timer_adds_an_enemy_each_second() {
    let clock = ManualClock::new(0);
    let mut game = new_game(&clock);
    clock.set(1000);
    // fire at 500 and 1000, spawn at 1000
    assert_eq!(game.pump_timers(), 3);
    assert_eq!(game.state().enemies.len(), 1);
    assert_eq!(game.state().bullets.len(), 2);
}

#[test]
fn speed_item_rearms_fire_timer_without_double_fire() {
    let clock = ManualClock::new(0);
    let cfg = GameConfig { spawn_interval_ms: 60_000, ..GameConfig::default() };
    let mut state = init_state(&cfg);
    // sitting on the player, so it is collected on the next frame
    state.items.push(Item {
        x: state.player.x + 10.0,
        y: state.player.y + 10.0,
        width: 20.0,
        height: 20.0,
        speed: 3.0,
        kind: ItemKind::Speed { expires_at_ms: 5000 },
    });
    let mut game = game_with(state, cfg, &clock);
    let mut surface = Recorder::default();

    clock.set(300);
    game.frame(&mut surface).unwrap();
    assert!(game.state().items.is_empty());
    assert_eq!(game.state().player.fire_interval_ms, 450);
    assert_eq!(game.fire_period_ms(), Some(450));

    // the old 500 ms deadline is gone
    clock.set(500);
    assert_eq!(game.pump_timers(), 0);
    clock.set(749);
    assert_eq!(game.pump_timers(), 0);
    assert!(game.state().bullets.is_empty());

    clock.set(750);
    assert_eq!(game.pump_timers(), 1);
    assert_eq!(game.state().bullets.len(), 1);

    clock.set(1200);
    assert_eq!(game.pump_timers(), 1);
}

#[test]
fn level_up_rearms_fire_timer() {
    let clock = ManualClock::new(0);
    let cfg = GameConfig { item_drop_chance: 0.0, ..GameConfig::default() };
    let mut state = init_state(&cfg);
    state.player.score = 4;
    state.enemies.push(enemy_at(100.0, 100.0, 1));
    state.bullets.push(Bullet { x: 120.0, y: 130.0, width: 10.0, height: 20.0, speed: 7.0 });
    let mut game = game_with(state, cfg, &clock);

    game.frame(&mut Recorder::default()).unwrap();
    assert_eq!(game.state().player.level, 2);
    assert_eq!(game.fire_period_ms(), Some(450));
}

// ── input ─────────────────────────────────────────────────────────────────────

#[test]
fn movement_keys_drive_the_player() {
    let clock = ManualClock::new(0);
    let mut game = new_game(&clock);
    let mut surface = Recorder::default();

    game.handle_input(KeyInput::Pressed(Action::MoveRight));
    game.frame(&mut surface).unwrap();
    assert_eq!(game.state().player.x, 220.0);

    game.handle_input(KeyInput::Pressed(Action::MoveLeft));
    game.frame(&mut surface).unwrap();
    game.frame(&mut surface).unwrap();
    assert_eq!(game.state().player.x, 210.0);

    // releasing either key stops the player
    game.handle_input(KeyInput::Released(Action::MoveRight));
    game.frame(&mut surface).unwrap();
    assert_eq!(game.state().player.x, 210.0);
}

// ── rendering ─────────────────────────────────────────────────────────────────

#[test]
fn frame_draws_entities_and_hud() {
    let clock = ManualClock::new(0);
    let mut state = init_state(&GameConfig::default());
    state.enemies.push(Enemy { kind: EnemyKind::Boss, ..enemy_at(10.0, 10.0, 20) });
    let mut game = game_with(state, GameConfig::default(), &clock);
    let mut surface = Recorder::default();

    game.frame(&mut surface).unwrap();

    assert_eq!(surface.frames, 1);
    assert_eq!(surface.rects.len(), 2);
    assert_eq!(surface.rects[0].1, C_PLAYER);
    assert_eq!(surface.rects[1].1, C_ENEMY_BOSS);

    let texts: Vec<&str> = surface.texts.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Health: 3",
            "Level: 1",
            "Score: 0",
            "Bullet Speed: 500ms",
            "Bullet Size: 10x20",
            "Attack Power: 1",
        ]
    );
    assert!(surface.texts.iter().all(|(_, f)| *f == Font::Hud));
}

#[test]
fn hud_tracks_player_stats() {
    let mut state = init_state(&GameConfig::default());
    state.player.bullet_width = 12.0;
    state.player.bullet_height = 24.0;
    state.player.fire_interval_ms = 450;
    let lines = hud_lines(&state);
    assert_eq!(lines[3], "Bullet Speed: 450ms");
    assert_eq!(lines[4], "Bullet Size: 12x24");
}

// ── game over ─────────────────────────────────────────────────────────────────

#[test]
fn collision_on_last_health_is_terminal() {
    let clock = ManualClock::new(0);
    let mut state = init_state(&GameConfig::default());
    state.player.health = 1;
    state.enemies.push(enemy_at(215.0, 570.0, 4));
    let mut game = game_with(state, GameConfig::default(), &clock);
    let mut surface = Recorder::default();

    game.frame(&mut surface).unwrap();
    assert!(game.is_over());
    assert_eq!(game.state().player.health, 0);

    // only the message from now on
    game.frame(&mut surface).unwrap();
    assert!(surface.rects.is_empty());
    assert_eq!(surface.texts, vec![("Game Over".to_string(), Font::Banner)]);

    // the state is frozen
    let frozen = game.state().clone();
    game.handle_input(KeyInput::Pressed(Action::MoveLeft));
    game.frame(&mut surface).unwrap();
    assert_eq!(game.state(), &frozen);
}

#[test]
fn timers_do_nothing_after_game_over() {
    let clock = ManualClock::new(0);
    let mut state = init_state(&GameConfig::default());
    state.status = GameStatus::GameOver;
    let mut game = game_with(state, GameConfig::default(), &clock);

    clock.set(5000);
    // tasks still come due, but their handlers are inert
    assert!(game.pump_timers() > 0);
    assert!(game.state().bullets.is_empty());
    assert!(game.state().enemies.is_empty());
}

#[test]
fn escaping_boss_ends_the_game() {
    let clock = ManualClock::new(0);
    let mut state = init_state(&GameConfig::default());
    state.boss_spawned = true;
    state.enemies.push(Enemy {
        x: 10.0,
        y: 640.0,
        width: 100.0,
        height: 50.0,
        speed: 1.0,
        health: 20,
        kind: EnemyKind::Boss,
    });
    let mut game = game_with(state, GameConfig::default(), &clock);
    game.frame(&mut Recorder::default()).unwrap();
    assert!(game.is_over());
}
