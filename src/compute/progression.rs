use crate::config::GameConfig;
use crate::entities::Player;

use super::GameEvent;

/// One step faster, never below the configured floor.
pub fn shorten_fire_interval(interval_ms: u64, config: &GameConfig) -> u64 {
    interval_ms
        .saturating_sub(config.fire_interval_step_ms)
        .max(config.fire_interval_floor_ms)
}

/// Level up once if the score has reached the threshold.  A single call
/// advances at most one level, however far past the threshold the score is.
pub fn check_level_up(player: &mut Player, config: &GameConfig, events: &mut Vec<GameEvent>) -> bool {
    if player.score < player.next_level_threshold {
        return false;
    }
    level_up(player, config);
    events.push(GameEvent::LevelUp { level: player.level });
    events.push(GameEvent::FireIntervalChanged {
        interval_ms: player.fire_interval_ms,
    });
    true
}

/// Unconditional level-up: full heal, faster and bigger bullets, +1 attack.
pub fn level_up(player: &mut Player, config: &GameConfig) {
    player.level += 1;
    player.next_level_threshold += config.level_threshold_step;
    player.health = player.max_health;
    player.fire_interval_ms = shorten_fire_interval(player.fire_interval_ms, config);
    player.bullet_width = (player.bullet_width + config.bullet_width_step).min(config.bullet_width_cap);
    player.bullet_height =
        (player.bullet_height + config.bullet_height_step).min(config.bullet_height_cap);
    player.attack_power += 1;
}
