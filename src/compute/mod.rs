/// Pure game-logic functions.
///
/// Every public function here takes an immutable reference to the current
/// `GameState` (plus the session `GameConfig` and, where needed, an RNG
/// handle and the current time) and returns a brand-new `GameState`.
/// Side effects are limited to the injected RNG.  The submodules hold the
/// individual passes, which work in place on the copy being built.
pub mod collision;
pub mod movement;
pub mod progression;
pub mod spawn;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, GameOverCause, GameState, GameStatus, Player};

/// Something the orchestrator may need to react to (re-arm a timer) or
/// report (log).  Returned alongside the new state by each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    EnemyKilled { boss: bool },
    BossSpawned,
    LevelUp { level: u32 },
    /// The fire timer must be re-armed at this period.
    FireIntervalChanged { interval_ms: u64 },
    GameOver { cause: GameOverCause },
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for the configured field.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        player: Player {
            x: config.field_width / 2.0 - config.player_size / 2.0,
            y: config.field_height - config.player_start_offset,
            width: config.player_size,
            height: config.player_size,
            speed: config.player_speed,
            dx: 0.0,
            dy: 0.0,
            health: config.player_health,
            max_health: config.player_health,
            level: 1,
            score: 0,
            next_level_threshold: config.first_level_threshold,
            fire_interval_ms: config.fire_interval_ms,
            bullet_width: config.bullet_width,
            bullet_height: config.bullet_height,
            attack_power: config.attack_power,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        items: Vec::new(),
        permanent_items: Vec::new(),
        boss_spawned: false,
        status: GameStatus::Running,
        width: config.field_width,
        height: config.field_height,
    }
}

// ── Timer-driven transitions ─────────────────────────────────────────────────

/// Fire one bullet from the centre of the player's top edge, sized by the
/// player's current bullet dimensions.
pub fn fire_bullet(state: &GameState, config: &GameConfig) -> GameState {
    let p = &state.player;
    let bullet = Bullet {
        x: p.x + p.width / 2.0 - p.bullet_width / 2.0,
        y: p.y,
        width: p.bullet_width,
        height: p.bullet_height,
        speed: config.bullet_speed,
    };
    let mut next = state.clone();
    next.bullets.push(bullet);
    next
}

/// Spawn one enemy (and possibly a boss) at the top of the field.
pub fn spawn_wave(
    state: &GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (GameState, Vec<GameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    spawn::spawn_enemies(&mut next, config, rng, &mut events);
    (next, events)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one display tick: movement, then the four
/// collision passes.  A finished game is returned unchanged.
///
/// `now_ms` is only consulted for item expiry and for stamping new speed
/// items, so callers control time exactly as they control randomness.
pub fn tick(
    state: &GameState,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
) -> (GameState, Vec<GameEvent>) {
    if state.status == GameStatus::GameOver {
        return (state.clone(), Vec::new());
    }

    let mut next = state.clone();
    let mut events = Vec::new();

    movement::move_all(&mut next, now_ms, &mut events);
    collision::resolve_all(&mut next, config, now_ms, rng, &mut events);

    (next, events)
}

/// Flip to `GameOver`, reporting only the first cause.
pub(crate) fn end_game(state: &mut GameState, cause: GameOverCause, events: &mut Vec<GameEvent>) {
    if state.status == GameStatus::Running {
        state.status = GameStatus::GameOver;
        events.push(GameEvent::GameOver { cause });
    }
}

/// Drop every element whose slot is marked in `removed`.  Used by the
/// collision passes, which mark while scanning and compact afterwards.
pub(crate) fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed[index];
        index += 1;
        keep
    });
}
