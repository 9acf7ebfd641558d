/// Rendering layer.
///
/// The game draws through the `Surface` trait: filled rectangles and text
/// in field-pixel coordinates.  Nothing here mutates game state; these
/// functions only translate state into drawing commands.
pub mod terminal;

use std::io;

use crossterm::style::Color;

use crate::entities::{EnemyKind, GameState, ItemKind, PermanentKind, Rect};

// ── Colour palette ───────────────────────────────────────────────────────────

pub const C_PLAYER: Color = Color::Green;
pub const C_BULLET: Color = Color::Red;
pub const C_ENEMY_NORMAL: Color = Color::Blue;
pub const C_ENEMY_SPECIAL: Color = Color::Rgb { r: 255, g: 165, b: 0 }; // orange
pub const C_ENEMY_BOSS: Color = Color::DarkRed;
pub const C_ITEM_SPEED: Color = Color::Yellow;
pub const C_ITEM_POWER: Color = Color::Magenta;
pub const C_ITEM_DESTROY_ALL: Color = Color::Grey;
pub const C_PERMANENT_POWER: Color = Color::Cyan;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// Status lines, 20 px.
    Hud,
    /// Game-over message, 40 px.
    Banner,
}

impl Font {
    pub fn size_px(self) -> u16 {
        match self {
            Font::Hud => 20,
            Font::Banner => 40,
        }
    }
}

/// Something the game can draw on.  Coordinates are field pixels; text is
/// positioned by its baseline, as on a canvas.
pub trait Surface {
    fn clear(&mut self) -> io::Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: Font) -> io::Result<()>;
    /// Called once the frame is complete.
    fn present(&mut self) -> io::Result<()>;
}

// ── Public entry points ──────────────────────────────────────────────────────

/// Render one complete running frame: every entity, then the HUD.
pub fn render_frame<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    surface.clear()?;

    surface.fill_rect(state.player.rect(), C_PLAYER)?;
    for bullet in &state.bullets {
        surface.fill_rect(bullet.rect(), C_BULLET)?;
    }
    for enemy in &state.enemies {
        surface.fill_rect(enemy.rect(), enemy_color(enemy.kind))?;
    }
    for item in &state.items {
        surface.fill_rect(item.rect(), item_color(item.kind))?;
    }
    for item in &state.permanent_items {
        surface.fill_rect(item.rect(), permanent_color(item.kind))?;
    }

    for (i, line) in hud_lines(state).iter().enumerate() {
        let baseline = (i as f32 + 1.0) * Font::Hud.size_px() as f32;
        surface.draw_text(line, 10.0, baseline, Font::Hud)?;
    }

    surface.present()
}

/// The terminal frame: a blank field and one message near the centre.
pub fn render_game_over<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    surface.clear()?;
    surface.draw_text(
        "Game Over",
        state.width / 2.0 - 100.0,
        state.height / 2.0,
        Font::Banner,
    )?;
    surface.present()
}

/// HUD text, top to bottom.
pub fn hud_lines(state: &GameState) -> Vec<String> {
    let p = &state.player;
    vec![
        format!("Health: {}", p.health),
        format!("Level: {}", p.level),
        format!("Score: {}", p.score),
        format!("Bullet Speed: {}ms", p.fire_interval_ms),
        format!("Bullet Size: {}x{}", p.bullet_width, p.bullet_height),
        format!("Attack Power: {}", p.attack_power),
    ]
}

pub fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Normal => C_ENEMY_NORMAL,
        EnemyKind::Special => C_ENEMY_SPECIAL,
        EnemyKind::Boss => C_ENEMY_BOSS,
    }
}

pub fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Speed { .. } => C_ITEM_SPEED,
        ItemKind::Power => C_ITEM_POWER,
        ItemKind::DestroyAll => C_ITEM_DESTROY_ALL,
    }
}

pub fn permanent_color(kind: PermanentKind) -> Color {
    match kind {
        PermanentKind::Power => C_PERMANENT_POWER,
    }
}
