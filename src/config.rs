/// Tuning knobs for one game session.
///
/// `GameConfig::default()` reproduces the stock arcade balance; tests build
/// variants with struct-update syntax.

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    // ── Field ────────────────────────────────────────────────────────────────
    pub field_width: f32,
    pub field_height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_size: f32,
    /// Distance from the bottom edge to the player's top edge at start.
    pub player_start_offset: f32,
    pub player_speed: f32,
    pub player_health: i32,
    pub first_level_threshold: u32,
    /// Score gap between consecutive level-ups.
    pub level_threshold_step: u32,
    pub fire_interval_ms: u64,
    pub fire_interval_floor_ms: u64,
    pub fire_interval_step_ms: u64,
    pub attack_power: i32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_width_step: f32,
    pub bullet_height_step: f32,
    pub bullet_width_cap: f32,
    pub bullet_height_cap: f32,
    pub bullet_speed: f32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub spawn_interval_ms: u64,
    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub special_chance: f64,
    pub normal_bonus_health: i32,
    pub special_bonus_health: i32,
    /// A boss joins the wave whenever the level is a multiple of this.
    pub boss_level_period: u32,
    pub boss_width: f32,
    pub boss_height: f32,
    pub boss_speed: f32,
    pub boss_health_per_level: i32,

    // ── Items ────────────────────────────────────────────────────────────────
    pub item_drop_chance: f64,
    pub item_size: f32,
    pub item_speed: f32,
    pub speed_item_lifetime_ms: u64,
    pub permanent_item_size: f32,
    pub permanent_power_bonus: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: 480.0,
            field_height: 640.0,

            player_size: 50.0,
            player_start_offset: 60.0,
            player_speed: 5.0,
            player_health: 3,
            first_level_threshold: 5,
            level_threshold_step: 5,
            fire_interval_ms: 500,
            fire_interval_floor_ms: 50,
            fire_interval_step_ms: 50,
            attack_power: 1,

            bullet_width: 10.0,
            bullet_height: 20.0,
            bullet_width_step: 2.0,
            bullet_height_step: 4.0,
            bullet_width_cap: 50.0,
            bullet_height_cap: 100.0,
            bullet_speed: 7.0,

            spawn_interval_ms: 1000,
            enemy_size: 50.0,
            enemy_speed: 3.0,
            special_chance: 0.1,
            normal_bonus_health: 3,
            special_bonus_health: 5,
            boss_level_period: 10,
            boss_width: 100.0,
            boss_height: 50.0,
            boss_speed: 1.0,
            boss_health_per_level: 2,

            item_drop_chance: 0.2,
            item_size: 20.0,
            item_speed: 3.0,
            speed_item_lifetime_ms: 5000,
            permanent_item_size: 30.0,
            permanent_power_bonus: 5,
        }
    }
}

impl GameConfig {
    /// Same balance on a differently sized field.
    pub fn with_field(width: f32, height: f32) -> Self {
        GameConfig {
            field_width: width,
            field_height: height,
            ..GameConfig::default()
        }
    }
}
