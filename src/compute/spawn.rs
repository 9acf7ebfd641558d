use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Enemy, EnemyKind, GameState, Item, ItemKind, PermanentItem, PermanentKind};

use super::GameEvent;

/// One tick of the spawn timer: a regular enemy somewhere along the top
/// edge, plus a boss on boss levels when none is alive.
pub fn spawn_enemies(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let level = state.player.level;

    let kind = if rng.gen_bool(config.special_chance) {
        EnemyKind::Special
    } else {
        EnemyKind::Normal
    };
    let bonus = match kind {
        EnemyKind::Special => config.special_bonus_health,
        _ => config.normal_bonus_health,
    };
    state.enemies.push(Enemy {
        x: random_x(rng, state.width, config.enemy_size),
        y: 0.0,
        width: config.enemy_size,
        height: config.enemy_size,
        speed: config.enemy_speed,
        health: level as i32 + bonus,
        kind,
    });

    if is_boss_level(level, config) && !state.boss_spawned {
        state.boss_spawned = true;
        state.enemies.push(Enemy {
            x: random_x(rng, state.width, config.boss_width),
            y: 0.0,
            width: config.boss_width,
            height: config.boss_height,
            speed: config.boss_speed,
            health: level as i32 * config.boss_health_per_level,
            kind: EnemyKind::Boss,
        });
        events.push(GameEvent::BossSpawned);
    }
}

pub fn is_boss_level(level: u32, config: &GameConfig) -> bool {
    config.boss_level_period > 0 && level % config.boss_level_period == 0
}

/// Left edge in `[0, field_width - width)`; pinned to 0 on fields narrower
/// than the entity.
fn random_x(rng: &mut impl Rng, field_width: f32, width: f32) -> f32 {
    let span = field_width - width;
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

/// Roll the drop chance for a fallen regular enemy; on success a random
/// temporary item appears where it died.
pub fn roll_item_drop(
    state: &mut GameState,
    x: f32,
    y: f32,
    now_ms: u64,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    if rng.gen_bool(config.item_drop_chance) {
        let kind = random_item_kind(rng, now_ms, config);
        spawn_item(state, x, y, kind, config);
    }
}

/// Uniform over speed / power / destroy-all.  Speed items carry their
/// expiry, stamped from `now_ms`.
pub fn random_item_kind(rng: &mut impl Rng, now_ms: u64, config: &GameConfig) -> ItemKind {
    match rng.gen_range(0..3) {
        0 => ItemKind::Speed {
            expires_at_ms: now_ms + config.speed_item_lifetime_ms,
        },
        1 => ItemKind::Power,
        _ => ItemKind::DestroyAll,
    }
}

pub fn spawn_item(state: &mut GameState, x: f32, y: f32, kind: ItemKind, config: &GameConfig) {
    state.items.push(Item {
        x,
        y,
        width: config.item_size,
        height: config.item_size,
        speed: config.item_speed,
        kind,
    });
}

/// Boss loot, always dropped.
pub fn spawn_permanent_item(state: &mut GameState, x: f32, y: f32, config: &GameConfig) {
    state.permanent_items.push(PermanentItem {
        x,
        y,
        width: config.permanent_item_size,
        height: config.permanent_item_size,
        kind: PermanentKind::Power,
    });
}
