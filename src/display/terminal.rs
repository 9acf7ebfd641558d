/// Crossterm backend for `Surface`.
///
/// The field is scaled onto the terminal grid: every rectangle covers at
/// least one cell, and text lines never overwrite an earlier line of the
/// same frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};

use super::{Font, Surface};
use crate::entities::Rect;

const C_TEXT: Color = Color::White;

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    field_width: f32,
    field_height: f32,
    /// Lowest row used by text so far this frame.
    text_floor: Option<u16>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, field_width: f32, field_height: f32) -> Self {
        TerminalSurface {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
            field_width,
            field_height,
            text_floor: None,
        }
    }

    /// Follow a terminal resize.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn col_of(&self, x: f32) -> u16 {
        scale(x, self.field_width, self.cols)
    }

    fn row_of(&self, y: f32) -> u16 {
        scale(y, self.field_height, self.rows)
    }
}

/// Field coordinate → cell index, clamped to the grid.
fn scale(v: f32, extent: f32, cells: u16) -> u16 {
    if extent <= 0.0 {
        return 0;
    }
    let cell = (v / extent * cells as f32).floor();
    cell.clamp(0.0, (cells - 1) as f32) as u16
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.text_floor = None;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> std::io::Result<()> {
        // Entirely off-field: nothing to draw
        if rect.x + rect.w < 0.0
            || rect.y + rect.h < 0.0
            || rect.x > self.field_width
            || rect.y > self.field_height
        {
            return Ok(());
        }

        let c0 = self.col_of(rect.x);
        let c1 = self.col_of(rect.x + rect.w).max(c0);
        let r0 = self.row_of(rect.y);
        let r1 = self.row_of(rect.y + rect.h).max(r0);
        let span = "█".repeat((c1 - c0 + 1) as usize);

        self.out.queue(style::SetForegroundColor(color))?;
        for row in r0..=r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&span))?;
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: Font) -> std::io::Result<()> {
        let mut row = self.row_of(y - font.size_px() as f32);
        if let Some(floor) = self.text_floor {
            row = row.max(floor + 1).min(self.rows - 1);
        }
        self.text_floor = Some(row);

        self.out.queue(cursor::MoveTo(self.col_of(x), row))?;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        if font == Font::Banner {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.out.queue(Print(text))?;
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows - 1))?;
        self.out.flush()
    }
}
