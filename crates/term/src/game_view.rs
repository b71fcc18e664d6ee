//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::effects::Effects;
use crate::fb::{CellStyle, FrameBuffer, Glyph};
use crate::types::{Rgb, BOARD_HEIGHT, BOARD_WIDTH};

const PLAYFIELD_BG: Rgb = Rgb::new(26, 26, 46);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const FLASH_BG: Rgb = Rgb::new(255, 255, 255);
const PREVIEW_CELLS: u16 = 4;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board frame position and size in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// Renders the playfield, side panel and overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        effects: &Effects,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        };

        draw_border(
            fb,
            layout.x,
            layout.y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );
        self.draw_board(fb, layout, snap, effects);

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::new(ghost.kind.color(), PLAYFIELD_BG).dim();
            self.draw_piece_cells(fb, layout, &ghost, '░', style);
        }
        if let Some(current) = snap.current {
            let style = CellStyle::new(current.kind.color(), PLAYFIELD_BG).bold();
            self.draw_piece_cells(fb, layout, &current, '█', style);
        }

        self.draw_side_panel(fb, layout, snap, viewport);

        if snap.game_over {
            draw_centered(fb, layout, layout.frame_h / 2, "GAME OVER", overlay_style());
            draw_centered(fb, layout, layout.frame_h / 2 + 1, "R restart", overlay_style());
        } else if snap.paused {
            draw_centered(fb, layout, layout.frame_h / 2, "PAUSED", overlay_style());
        }

        if let Some(notice) = effects.banner() {
            let style = overlay_style();
            let row = layout.frame_h / 3;
            draw_centered(fb, layout, row, notice.label, style);

            let mut digits = [0u8; 11];
            let text = points_text(notice.points, &mut digits);
            draw_centered(fb, layout, row + 1, text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, effects: &Effects, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, effects, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, layout: Layout, snap: &GameSnapshot, effects: &Effects) {
        let empty = CellStyle::new(Rgb::new(70, 70, 90), PLAYFIELD_BG).dim();
        for (y, row) in snap.board.iter().enumerate() {
            let flashing = effects.is_flashing(y);
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match (*cell, flashing) {
                    (_, true) => ('█', CellStyle::new(FLASH_BG, FLASH_BG)),
                    (Some(kind), false) => ('█', CellStyle::new(kind.color(), PLAYFIELD_BG)),
                    (None, false) => ('·', empty),
                };
                self.fill_board_cell(fb, layout, x as u16, y as u16, ch, style);
            }
        }
    }

    /// Cells above the visible board are skipped.
    fn draw_piece_cells(&self, fb: &mut FrameBuffer, layout: Layout, piece: &Piece, ch: char, style: CellStyle) {
        for (x, y) in piece.board_cells() {
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                self.fill_board_cell(fb, layout, x as u16, y as u16, ch, style);
            }
        }
    }

    fn fill_board_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = layout.x + 1 + x * self.cell_w;
        let py = layout.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, layout: Layout, snap: &GameSnapshot, viewport: Viewport) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x.saturating_add(PREVIEW_CELLS * self.cell_w) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next, false);
        }
        y = y.saturating_add(PREVIEW_CELLS + 1);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        if let Some(held) = snap.held {
            self.draw_preview(fb, panel_x, y, &held, !snap.can_hold);
        }
    }

    /// Previews use one terminal row per shape row regardless of `cell_h`.
    /// A held piece that can't be swapped back yet is drawn dim.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece, dim: bool) {
        let mut style = CellStyle::new(piece.kind.color(), PANEL_BG);
        if dim {
            style = style.dim();
        }
        for (dx, dy) in piece.shape.cells() {
            let px = x + dx as u16 * self.cell_w;
            let py = y + dy as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }
}

fn overlay_style() -> CellStyle {
    CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold()
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, layout: Layout, row: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = layout.x + layout.frame_w.saturating_sub(text_w) / 2;
    fb.put_str(x, layout.y.saturating_add(row), text, style);
}

/// Format `+points` into `buf` without allocating.
fn points_text(points: u32, buf: &mut [u8; 11]) -> &str {
    let mut v = points;
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    start -= 1;
    buf[start] = b'+';
    std::str::from_utf8(&buf[start..]).unwrap_or("")
}
