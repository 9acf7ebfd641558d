/// All game entity types: pure data, no logic beyond geometry helpers.
///
/// Coordinates are field pixels with the origin at the top-left corner;
/// `y` grows downward.

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Axis-aligned overlap: each near edge strictly before the other's far
    /// edge on both axes.  Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

// ── Status ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    HealthDepleted,
    BossEscaped,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick applied while a movement key is held.
    pub speed: f32,
    /// Horizontal velocity intent: `-speed`, `0` or `+speed`.
    pub dx: f32,
    pub dy: f32,
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub score: u32,
    pub next_level_threshold: u32,
    pub fire_interval_ms: u64,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub attack_power: i32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Upward speed in pixels per tick.
    pub speed: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    /// Tougher variant: two extra points of health.
    Special,
    /// Large, slow, at most one alive.  Escaping the bottom ends the game.
    Boss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }
}

// ── Items ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Shortens the fire interval.  Vanishes once `expires_at_ms` has passed.
    Speed { expires_at_ms: u64 },
    /// +1 attack power.
    Power,
    /// Wipes every enemy on the field, with no score or loot.
    DestroyAll,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: ItemKind,
}

impl Item {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.kind {
            ItemKind::Speed { expires_at_ms } => now_ms > expires_at_ms,
            ItemKind::Power | ItemKind::DestroyAll => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermanentKind {
    /// +5 attack power, forever.
    Power,
}

/// Boss loot.  Stays where the boss fell until the player walks over it.
#[derive(Clone, Debug, PartialEq)]
pub struct PermanentItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PermanentKind,
}

impl PermanentItem {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so the compute functions can
/// return a new copy without mutating the caller's.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub permanent_items: Vec<PermanentItem>,
    /// Set when a boss spawns, cleared only when a bullet kills it.
    pub boss_spawned: bool,
    pub status: GameStatus,
    pub width: f32,
    pub height: f32,
}
