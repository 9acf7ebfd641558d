/// Time sources and the repeating-timer scheduler.
///
/// The scheduler never sleeps or spawns anything: the host asks it which
/// tasks are due at a given instant, so tests can drive it with a
/// `ManualClock` and no wall-clock waits.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds since some fixed origin.  Only differences matter.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock for the real front end.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock.  Clones share the same time, so a test can keep one
/// handle while the game owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        ManualClock {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── Scheduler ────────────────────────────────────────────────────────────────

/// The game's two recurring jobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTask {
    Fire,
    SpawnEnemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct Timer {
    handle: TimerHandle,
    task: TimerTask,
    period_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// First run is one full period after `now_ms`.  A zero period is
    /// bumped to 1 ms so `due` always terminates.
    pub fn schedule_repeating(&mut self, task: TimerTask, period_ms: u64, now_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let period_ms = period_ms.max(1);
        self.timers.push(Timer {
            handle,
            task,
            period_ms,
            next_due_ms: now_ms + period_ms,
        });
        handle
    }

    /// Returns whether a timer was actually removed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Cancel-and-reinstall in one step: the handle keeps its task, takes
    /// the new period, and restarts its phase from `now_ms`.  Any run that
    /// was pending under the old period is dropped, so nothing fires twice
    /// across the swap.
    pub fn reschedule(&mut self, handle: TimerHandle, period_ms: u64, now_ms: u64) -> bool {
        match self.timers.iter_mut().find(|t| t.handle == handle) {
            Some(timer) => {
                timer.period_ms = period_ms.max(1);
                timer.next_due_ms = now_ms + timer.period_ms;
                true
            }
            None => false,
        }
    }

    pub fn period_ms(&self, handle: TimerHandle) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.period_ms)
    }

    pub fn next_due_ms(&self, handle: TimerHandle) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.next_due_ms)
    }

    /// Every run that fell due at or before `now_ms`, oldest first.  A host
    /// that stalled for several periods gets one entry per missed period.
    pub fn due(&mut self, now_ms: u64) -> Vec<TimerTask> {
        let mut fired: Vec<(u64, u64, TimerTask)> = Vec::new();
        for timer in &mut self.timers {
            while timer.next_due_ms <= now_ms {
                fired.push((timer.next_due_ms, timer.handle.0, timer.task));
                timer.next_due_ms += timer.period_ms;
            }
        }
        fired.sort_by_key(|&(at, id, _)| (at, id));
        fired.into_iter().map(|(_, _, task)| task).collect()
    }
}
