//! Key-repeat state machine for held movement keys.
//!
//! The engine only ever sees discrete commands. This handler turns "key is
//! held" into repeated commands: the first press fires immediately, repeats
//! start once the delay has passed and then fire at a fixed rate.
//!
//! Time is driven by the caller through `update(elapsed_ms)`, so the handler
//! is deterministic. Terminals that never report key releases are covered by
//! an idle timeout that releases keys not refreshed by a press.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Without key-release events, a short timeout keeps a single tap from
/// turning into a held key.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Keys that auto-repeat while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKey {
    Left,
    Right,
    Down,
}

impl RepeatKey {
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(RepeatKey::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(RepeatKey::Right),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(RepeatKey::Down),
            _ => None,
        }
    }

    pub fn action(self) -> GameAction {
        match self {
            RepeatKey::Left => GameAction::MoveLeft,
            RepeatKey::Right => GameAction::MoveRight,
            RepeatKey::Down => GameAction::SoftDrop,
        }
    }
}

/// Delay and rate bookkeeping for one held key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RepeatTimer {
    held_ms: u32,
    accumulator: u32,
}

impl RepeatTimer {
    /// Advance by `elapsed_ms`; returns how many repeats are due.
    fn advance(&mut self, elapsed_ms: u32, delay: u32, rate: u32) -> u32 {
        let prev = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < delay {
            return 0;
        }

        let excess = if prev < delay {
            self.held_ms - delay
        } else {
            elapsed_ms
        };
        self.accumulator = self.accumulator.saturating_add(excess);

        let rate = rate.max(1);
        let due = self.accumulator / rate;
        self.accumulator %= rate;
        due
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Tracks held movement keys and emits repeats.
///
/// Left and right share one slot: the most recent press wins. Soft drop
/// repeats independently.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Option<RepeatKey>,
    horizontal_timer: RepeatTimer,
    down_held: bool,
    down_timer: RepeatTimer,
    /// Time since the last movement-key press.
    idle_ms: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: None,
            horizontal_timer: RepeatTimer::default(),
            down_held: false,
            down_timer: RepeatTimer::default(),
            idle_ms: 0,
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Register a key press. Returns the immediate action for a newly held
    /// movement key; presses of an already-held key only refresh it.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let key = RepeatKey::from_code(code)?;
        self.idle_ms = 0;

        match key {
            RepeatKey::Left | RepeatKey::Right => {
                if self.horizontal == Some(key) {
                    return None;
                }
                self.horizontal = Some(key);
                self.horizontal_timer.reset();
            }
            RepeatKey::Down => {
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_timer.reset();
            }
        }
        Some(key.action())
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match RepeatKey::from_code(code) {
            Some(key @ (RepeatKey::Left | RepeatKey::Right)) => {
                if self.horizontal == Some(key) {
                    self.release_horizontal();
                }
            }
            Some(RepeatKey::Down) => self.release_down(),
            None => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = None;
        self.horizontal_timer.reset();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_timer.reset();
    }

    /// Advance time and collect the repeats that came due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.release_horizontal();
            self.release_down();
        }

        if let Some(key) = self.horizontal {
            let due = self
                .horizontal_timer
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..due {
                let _ = actions.try_push(key.action());
            }
        }

        if self.down_held {
            let due = self
                .down_timer
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..due {
                let _ = actions.try_push(GameAction::SoftDrop);
            }
        }

        actions
    }

    /// Forget every held key (e.g. when a new game starts).
    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
