use bullet_rain::clock::ManualClock;
use bullet_rain::compute::collision::{apply_pickup, Pickup};
use bullet_rain::compute::init_state;
use bullet_rain::compute::progression::level_up;
use bullet_rain::config::GameConfig;
use bullet_rain::display::{Font, Surface};
use bullet_rain::entities::{EnemyKind, GameStatus, Rect};
use bullet_rain::game::Game;
use bullet_rain::input::{Action, KeyInput};

use crossterm::style::Color;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) -> std::io::Result<()> {
        Ok(())
    }
    fn fill_rect(&mut self, _rect: Rect, _color: Color) -> std::io::Result<()> {
        Ok(())
    }
    fn draw_text(&mut self, _text: &str, _x: f32, _y: f32, _font: Font) -> std::io::Result<()> {
        Ok(())
    }
    fn present(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn key_for(code: u8) -> Option<KeyInput> {
    match code {
        1 => Some(KeyInput::Pressed(Action::MoveLeft)),
        2 => Some(KeyInput::Pressed(Action::MoveRight)),
        3 => Some(KeyInput::Released(Action::MoveLeft)),
        _ => None,
    }
}

proptest! {
    #[test]
    fn simulation_invariants_hold(
        seed in any::<u64>(),
        keys in prop::collection::vec(0u8..5, 1..300),
    ) {
        let clock = ManualClock::new(0);
        let cfg = GameConfig::default();
        let mut game = Game::new(cfg.clone(), clock.clone(), StdRng::seed_from_u64(seed));
        let mut surface = NullSurface;
        let mut last_score = 0;
        let mut was_over = false;

        for code in keys {
            if let Some(input) = key_for(code) {
                game.handle_input(input);
            }
            clock.advance(16);
            game.pump_timers();
            game.frame(&mut surface).unwrap();

            let s = game.state();
            let p = &s.player;
            prop_assert!(p.x >= 0.0 && p.x <= cfg.field_width - p.width);
            prop_assert!(p.y >= 0.0 && p.y <= cfg.field_height - p.height);
            prop_assert!(p.fire_interval_ms >= 50);
            prop_assert!(p.bullet_width <= 50.0);
            prop_assert!(p.bullet_height <= 100.0);
            prop_assert!(p.health >= 0);
            prop_assert!(p.score >= last_score);
            prop_assert!(s.enemies.iter().filter(|e| e.kind == EnemyKind::Boss).count() <= 1);
            if was_over {
                prop_assert_eq!(s.status, GameStatus::GameOver);
            }
            last_score = p.score;
            was_over = s.status == GameStatus::GameOver;
        }
    }

    #[test]
    fn stat_caps_survive_any_upgrade_order(upgrades in prop::collection::vec(any::<bool>(), 0..200)) {
        let cfg = GameConfig::default();
        let mut state = init_state(&cfg);
        for is_level_up in upgrades {
            if is_level_up {
                level_up(&mut state.player, &cfg);
            } else {
                apply_pickup(&mut state, Pickup::Speed, &cfg, &mut Vec::new());
            }
            prop_assert!(state.player.fire_interval_ms >= 50);
            prop_assert!(state.player.bullet_width <= 50.0);
            prop_assert!(state.player.bullet_height <= 100.0);
            prop_assert_eq!(state.player.health, state.player.max_health);
        }
    }
}
