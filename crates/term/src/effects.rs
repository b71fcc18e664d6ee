//! Short-lived visual effects driven by engine events.
//!
//! Banners show spin and TETRIS labels for two seconds; cleared rows flash
//! for half a second. Both run on the caller's clock.

use crate::types::EngineEvent;

pub const NOTIFICATION_MS: u32 = 2000;
pub const ROW_FLASH_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub label: &'static str,
    pub points: u32,
    remaining_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowFlash {
    row: usize,
    remaining_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    notices: Vec<Notice>,
    flashes: Vec<RowFlash>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::LinesCleared { rows } => {
                self.flashes.extend(rows.iter().map(|&row| RowFlash {
                    row,
                    remaining_ms: ROW_FLASH_MS,
                }));
            }
            EngineEvent::Notification { label, points } => self.notices.push(Notice {
                label: *label,
                points: *points,
                remaining_ms: NOTIFICATION_MS,
            }),
        }
    }

    /// Age every effect and drop the expired ones.
    pub fn update(&mut self, elapsed_ms: u32) {
        for n in &mut self.notices {
            n.remaining_ms = n.remaining_ms.saturating_sub(elapsed_ms);
        }
        for f in &mut self.flashes {
            f.remaining_ms = f.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.notices.retain(|n| n.remaining_ms > 0);
        self.flashes.retain(|f| f.remaining_ms > 0);
    }

    /// Most recent live banner.
    pub fn banner(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn is_flashing(&self, row: usize) -> bool {
        self.flashes.iter().any(|f| f.row == row)
    }
}
