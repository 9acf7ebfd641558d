/// Game loop orchestration.
///
/// `Game` owns the simulation state together with its collaborators: the
/// clock, the timer scheduler and the RNG.  The host calls `frame` once per
/// display refresh and `pump_timers` as often as it likes; both are plain
/// synchronous calls, so nothing ever runs inside another.

use std::io;

use log::info;
use rand::Rng;

use crate::clock::{Clock, Scheduler, TimerHandle, TimerTask};
use crate::compute::{fire_bullet, init_state, spawn_wave, tick, GameEvent};
use crate::config::GameConfig;
use crate::display::{render_frame, render_game_over, Surface};
use crate::entities::{GameState, GameStatus};
use crate::input::{apply_input, KeyInput};

pub struct Game<C: Clock, R: Rng> {
    state: GameState,
    config: GameConfig,
    clock: C,
    rng: R,
    scheduler: Scheduler,
    fire_timer: TimerHandle,
    spawn_timer: TimerHandle,
}

impl<C: Clock, R: Rng> Game<C, R> {
    /// Start a fresh game with both timers armed from the clock's current
    /// time.
    pub fn new(config: GameConfig, clock: C, rng: R) -> Self {
        let state = init_state(&config);
        Self::with_state(state, config, clock, rng)
    }

    /// Resume from an arbitrary state.  The fire timer takes the player's
    /// current interval.
    pub fn with_state(state: GameState, config: GameConfig, clock: C, rng: R) -> Self {
        let now = clock.now_ms();
        let mut scheduler = Scheduler::new();
        let fire_timer =
            scheduler.schedule_repeating(TimerTask::Fire, state.player.fire_interval_ms, now);
        let spawn_timer =
            scheduler.schedule_repeating(TimerTask::SpawnEnemy, config.spawn_interval_ms, now);
        info!(
            "game started: field {}x{}, fire every {}ms",
            state.width, state.height, state.player.fire_interval_ms
        );
        Game {
            state,
            config,
            clock,
            rng,
            scheduler,
            fire_timer,
            spawn_timer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_over(&self) -> bool {
        self.state.status == GameStatus::GameOver
    }

    pub fn fire_period_ms(&self) -> Option<u64> {
        self.scheduler.period_ms(self.fire_timer)
    }

    pub fn spawn_period_ms(&self) -> Option<u64> {
        self.scheduler.period_ms(self.spawn_timer)
    }

    pub fn handle_input(&mut self, input: KeyInput) {
        if self.is_over() {
            return;
        }
        self.state = apply_input(&self.state, input);
    }

    /// One display refresh: draw, move, collide.  Once the game is over
    /// this only redraws the game-over message.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> io::Result<()> {
        if self.is_over() {
            return render_game_over(surface, &self.state);
        }

        render_frame(surface, &self.state)?;

        let now = self.clock.now_ms();
        let (next, events) = tick(&self.state, &self.config, now, &mut self.rng);
        self.state = next;
        self.handle_events(&events, now);
        Ok(())
    }

    /// Run every timer task that has fallen due, oldest first.  Returns
    /// how many ran.
    pub fn pump_timers(&mut self) -> usize {
        let now = self.clock.now_ms();
        let due = self.scheduler.due(now);
        for task in &due {
            self.run_task(*task, now);
        }
        due.len()
    }

    /// Timer callbacks do nothing after game over, so no bullets or
    /// enemies appear behind the final message.
    fn run_task(&mut self, task: TimerTask, now: u64) {
        if self.is_over() {
            return;
        }
        match task {
            TimerTask::Fire => {
                self.state = fire_bullet(&self.state, &self.config);
            }
            TimerTask::SpawnEnemy => {
                let (next, events) = spawn_wave(&self.state, &self.config, &mut self.rng);
                self.state = next;
                self.handle_events(&events, now);
            }
        }
    }

    fn handle_events(&mut self, events: &[GameEvent], now: u64) {
        for event in events {
            match *event {
                GameEvent::FireIntervalChanged { interval_ms } => {
                    self.scheduler.reschedule(self.fire_timer, interval_ms, now);
                    info!("fire timer re-armed at {interval_ms}ms");
                }
                GameEvent::LevelUp { level } => {
                    info!("level up: now level {level}, score {}", self.state.player.score);
                }
                GameEvent::BossSpawned => {
                    info!("boss spawned at level {}", self.state.player.level);
                }
                GameEvent::EnemyKilled { boss: true } => {
                    info!("boss destroyed, score {}", self.state.player.score);
                }
                GameEvent::EnemyKilled { boss: false } => {}
                GameEvent::GameOver { cause } => {
                    info!(
                        "game over ({cause:?}): level {}, score {}",
                        self.state.player.level, self.state.player.score
                    );
                }
            }
        }
    }
}
