use crate::entities::{GameOverCause, GameState, Player};

use super::{end_game, GameEvent};

/// Run every movement pass in a fixed order.
pub fn move_all(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    move_player(&mut state.player, state.width, state.height);
    move_bullets(state);
    move_enemies(state, events);
    move_items(state, now_ms);
    prune_permanent_items(state);
}

/// Apply the velocity intent, then clamp so the player's whole box stays
/// inside the field.
pub fn move_player(player: &mut Player, field_width: f32, field_height: f32) {
    player.x += player.dx;
    player.y += player.dy;

    let max_x = (field_width - player.width).max(0.0);
    let max_y = (field_height - player.height).max(0.0);
    player.x = player.x.clamp(0.0, max_x);
    player.y = player.y.clamp(0.0, max_y);
}

/// Bullets climb; once wholly above the top edge they are gone.
pub fn move_bullets(state: &mut GameState) {
    state.bullets.retain_mut(|b| {
        b.y -= b.speed;
        b.y + b.height >= 0.0
    });
}

/// Enemies descend.  A regular enemy past the bottom edge just leaves; a
/// boss that gets there ends the game and stays on the field.
pub fn move_enemies(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let height = state.height;
    let mut boss_escaped = false;

    state.enemies.retain_mut(|e| {
        e.y += e.speed;
        if e.y <= height {
            return true;
        }
        if e.is_boss() {
            boss_escaped = true;
            true
        } else {
            false
        }
    });

    if boss_escaped {
        end_game(state, GameOverCause::BossEscaped, events);
    }
}

/// Items descend and vanish past the bottom edge or, for speed items,
/// once their lifetime is over.
pub fn move_items(state: &mut GameState, now_ms: u64) {
    let height = state.height;
    state.items.retain_mut(|item| {
        item.y += item.speed;
        item.y <= height && !item.is_expired(now_ms)
    });
}

/// Permanent items never move; this only discards any that sit below the
/// field.
pub fn prune_permanent_items(state: &mut GameState) {
    let height = state.height;
    state.permanent_items.retain(|item| item.y <= height);
}
