use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{GameOverCause, GameState, ItemKind, PermanentKind};

use super::progression::{check_level_up, shorten_fire_interval};
use super::spawn::{roll_item_drop, spawn_permanent_item};
use super::{compact, end_game, GameEvent};

/// Every pickup effect in the game.  Temporary and permanent items both
/// funnel through `apply_pickup`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pickup {
    Speed,
    Power,
    DestroyAll,
    PermanentPower,
}

impl From<ItemKind> for Pickup {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Speed { .. } => Pickup::Speed,
            ItemKind::Power => Pickup::Power,
            ItemKind::DestroyAll => Pickup::DestroyAll,
        }
    }
}

impl From<PermanentKind> for Pickup {
    fn from(kind: PermanentKind) -> Self {
        match kind {
            PermanentKind::Power => Pickup::PermanentPower,
        }
    }
}

/// The four collision passes, in order.
pub fn resolve_all(
    state: &mut GameState,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    bullets_vs_enemies(state, config, now_ms, rng, events);
    items_vs_player(state, config, events);
    permanent_items_vs_player(state, config, events);
    enemies_vs_player(state, events);
}

// ── Bullet ↔ enemy ───────────────────────────────────────────────────────────

/// Each bullet is spent on the first live enemy it overlaps.  An enemy can
/// soak several bullets in one tick until its health runs out; after that
/// it no longer counts as a target.
pub fn bullets_vs_enemies(
    state: &mut GameState,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let mut spent_bullets = vec![false; state.bullets.len()];
    let mut dead_enemies = vec![false; state.enemies.len()];

    for bi in 0..state.bullets.len() {
        let bullet_rect = state.bullets[bi].rect();
        let target = state
            .enemies
            .iter()
            .enumerate()
            .position(|(ei, e)| !dead_enemies[ei] && bullet_rect.overlaps(&e.rect()));
        let Some(ei) = target else {
            continue;
        };

        spent_bullets[bi] = true;
        let enemy = &mut state.enemies[ei];
        enemy.health -= state.player.attack_power;
        if enemy.health > 0 {
            continue;
        }

        enemy.health = 0;
        dead_enemies[ei] = true;
        let (x, y, boss) = (enemy.x, enemy.y, enemy.is_boss());

        if boss {
            state.boss_spawned = false;
            spawn_permanent_item(state, x, y, config);
        }
        state.player.score += 1;
        debug!("enemy down at ({x:.0}, {y:.0}), score {}", state.player.score);
        events.push(GameEvent::EnemyKilled { boss });
        check_level_up(&mut state.player, config, events);
        if !boss {
            roll_item_drop(state, x, y, now_ms, config, rng);
        }
    }

    compact(&mut state.bullets, &spent_bullets);
    compact(&mut state.enemies, &dead_enemies);
}

// ── Pickups ──────────────────────────────────────────────────────────────────

pub fn items_vs_player(state: &mut GameState, config: &GameConfig, events: &mut Vec<GameEvent>) {
    let player_rect = state.player.rect();
    let mut taken = vec![false; state.items.len()];

    for ii in 0..state.items.len() {
        if player_rect.overlaps(&state.items[ii].rect()) {
            taken[ii] = true;
            let pickup = Pickup::from(state.items[ii].kind);
            apply_pickup(state, pickup, config, events);
        }
    }

    compact(&mut state.items, &taken);
}

pub fn permanent_items_vs_player(
    state: &mut GameState,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) {
    let player_rect = state.player.rect();
    let mut taken = vec![false; state.permanent_items.len()];

    for pi in 0..state.permanent_items.len() {
        if player_rect.overlaps(&state.permanent_items[pi].rect()) {
            taken[pi] = true;
            let pickup = Pickup::from(state.permanent_items[pi].kind);
            apply_pickup(state, pickup, config, events);
        }
    }

    compact(&mut state.permanent_items, &taken);
}

/// Apply one pickup to the state.  A wipe removes bosses too, without
/// score or loot, and leaves `boss_spawned` alone.
pub fn apply_pickup(
    state: &mut GameState,
    pickup: Pickup,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) {
    let player = &mut state.player;
    match pickup {
        Pickup::Speed => {
            player.fire_interval_ms = shorten_fire_interval(player.fire_interval_ms, config);
            events.push(GameEvent::FireIntervalChanged {
                interval_ms: player.fire_interval_ms,
            });
        }
        Pickup::Power => player.attack_power += 1,
        Pickup::DestroyAll => state.enemies.clear(),
        Pickup::PermanentPower => player.attack_power += config.permanent_power_bonus,
    }
}

// ── Enemy ↔ player ───────────────────────────────────────────────────────────

/// Ramming costs one health and removes the enemy with no reward.
pub fn enemies_vs_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_rect = state.player.rect();
    let before = state.enemies.len();
    state.enemies.retain(|e| !player_rect.overlaps(&e.rect()));
    let hits = (before - state.enemies.len()) as i32;

    if hits == 0 {
        return;
    }
    state.player.health = (state.player.health - hits).max(0);
    if state.player.health == 0 {
        end_game(state, GameOverCause::HealthDepleted, events);
    }
}
