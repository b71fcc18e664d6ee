//! TerminalRenderer: flushes a framebuffer to the real terminal.
//!
//! The first frame and every resize are full redraws; after that only runs
//! of changed glyphs are rewritten.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Glyph};
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor, focus reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        encode_enter_into(&mut self.buf)?;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        encode_exit_into(&mut self.buf)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    pub fn draw(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        match &self.prev {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_changes_into(prev, frame, &mut self.buf)?
            }
            _ => encode_full_into(frame, &mut self.buf)?,
        }
        self.flush_buf()?;

        match &mut self.prev {
            Some(prev) => prev.clone_from(frame),
            None => self.prev = Some(frame.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Setup sequence written by [`TerminalRenderer::enter`].
pub fn encode_enter_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::EnterAlternateScreen)?;
    out.queue(cursor::Hide)?;
    out.queue(terminal::DisableLineWrap)?;
    // FocusLost events drive the auto-pause.
    out.queue(event::EnableFocusChange)?;
    Ok(())
}

/// Teardown sequence written by [`TerminalRenderer::exit`].
pub fn encode_exit_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(event::DisableFocusChange)?;
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Encode a full-screen redraw into `out` without touching stdout.
pub fn encode_full_into(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut style = None;
    for y in 0..frame.height() {
        let Some(row) = frame.row(y) else { break };
        out.queue(cursor::MoveTo(0, y))?;
        print_glyphs(out, row, &mut style)?;
    }

    reset_into(out)
}

/// Encode only the glyphs that differ from `prev`. Both frames must have the
/// same size.
pub fn encode_changes_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for y in 0..next.height() {
        let (Some(old), Some(new)) = (prev.row(y), next.row(y)) else {
            break;
        };
        for_each_changed_run(old, new, |start, end| {
            out.queue(cursor::MoveTo(start as u16, y))?;
            print_glyphs(out, &new[start..end], &mut style)
        })?;
    }

    reset_into(out)
}

fn print_glyphs(out: &mut Vec<u8>, glyphs: &[Glyph], current: &mut Option<CellStyle>) -> Result<()> {
    for g in glyphs {
        if *current != Some(g.style) {
            apply_style_into(out, g.style)?;
            *current = Some(g.style);
        }
        out.queue(Print(g.ch))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn reset_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Calls `f(start, end)` for each maximal run of differing glyphs in a row.
fn for_each_changed_run(
    old: &[Glyph],
    new: &[Glyph],
    mut f: impl FnMut(usize, usize) -> Result<()>,
) -> Result<()> {
    let len = old.len().min(new.len());
    let mut x = 0;
    while x < len {
        if old[x] == new[x] {
            x += 1;
            continue;
        }
        let start = x;
        while x < len && old[x] != new[x] {
            x += 1;
        }
        f(start, x)?;
    }
    Ok(())
}
