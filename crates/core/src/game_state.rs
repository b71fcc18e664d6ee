//! Game state module - the engine that owns one game session
//!
//! This module ties together the board, the piece catalog, spin detection and
//! scoring. Every command is a total function over the state: moves that would
//! collide are silently rejected, and game over is a terminal flag rather than
//! an error.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::pieces::{kick_offsets, Piece};
use crate::rng::PieceRng;
use crate::scoring::{calculate_level, calculate_score, drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::spin;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    held: Option<Piece>,
    /// Landing projection of `current`; recomputed after every change to it.
    ghost: Option<Piece>,
    rng: PieceRng,
    /// Renderer events not yet drained by `take_events`.
    events: Vec<EngineEvent>,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    paused: bool,
    game_over: bool,
    started: bool,
    can_hold: bool,
    last_rotation_was_kick: bool,
    /// Spin classification of the lock being scored; reset after scoring.
    pending_spin: SpinKind,
}

impl GameState {
    /// Create an idle game; pieces are drawn from an RNG seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: None,
            held: None,
            ghost: None,
            rng: PieceRng::new(seed),
            events: Vec::new(),
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: INITIAL_DROP_INTERVAL_MS,
            drop_timer_ms: 0,
            paused: false,
            game_over: false,
            started: false,
            can_hold: true,
            last_rotation_was_kick: false,
            pending_spin: SpinKind::None,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        debug!(seed = self.rng.seed(), "game started");
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn held(&self) -> Option<Piece> {
        self.held
    }

    pub fn ghost(&self) -> Option<Piece> {
        self.ghost
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            if let Some(cells) = self.board.row(y) {
                row.copy_from_slice(cells);
            }
        }
        out.current = self.current;
        out.ghost = self.ghost;
        out.next = self.next;
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Drain the renderer events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Movement, rotation, drops, hold and gravity all require this.
    fn accepts_commands(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Promote the queued piece to current and queue a fresh one.
    ///
    /// Returns false if the game ended because the new piece could not be
    /// placed at row 0 or row -1.
    pub(crate) fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        self.last_rotation_was_kick = false;
        self.pending_spin = SpinKind::None;

        let mut piece = match self.next.take() {
            Some(piece) => piece,
            None => self.rng.next_piece(),
        };
        piece.x = piece.centered_x();

        self.next = Some(self.rng.next_piece());
        self.can_hold = true;

        self.place_new_current(piece)
    }

    /// Put a piece at the top of the board, allowing it to poke one row above
    /// the visible area; ends the game if neither row fits.
    fn place_new_current(&mut self, mut piece: Piece) -> bool {
        piece.y = 0;
        if self.board.collides(&piece.shape, piece.x, piece.y) {
            piece.y = -1;
            if self.board.collides(&piece.shape, piece.x, piece.y) {
                self.end_game();
                return false;
            }
        }

        trace!(kind = piece.kind.name(), x = piece.x, y = piece.y, "spawned");
        self.current = Some(piece);
        self.refresh_ghost();
        true
    }

    fn end_game(&mut self) {
        self.game_over = true;
        self.current = None;
        self.ghost = None;
        info!(
            score = self.score,
            lines = self.lines,
            level = self.level,
            "game over"
        );
    }

    /// Lowest row the piece can reach by falling straight down.
    fn landing_y(&self, piece: &Piece) -> i8 {
        let mut y = piece.y;
        while !self.board.collides(&piece.shape, piece.x, y + 1) {
            y += 1;
        }
        y
    }

    fn refresh_ghost(&mut self) {
        let ghost = self.current.map(|piece| Piece {
            y: self.landing_y(&piece),
            ..piece
        });
        self.ghost = ghost;
    }

    /// Try to move the current piece by (dx, dy).
    ///
    /// A blocked downward move means the piece has landed and locks it.
    /// Offsets outside dx ∈ {-1, 0, 1}, dy ∈ {0, 1} are ignored.
    /// Returns true if the piece moved.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepts_commands() || !(-1..=1).contains(&dx) || !(0..=1).contains(&dy) {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        if self.board.collides(&piece.shape, piece.x + dx, piece.y + dy) {
            if dy > 0 {
                self.lock_piece();
            }
            return false;
        }

        self.current = Some(Piece {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        });

        // Moving after a kick forfeits spin eligibility.
        if dx != 0 || dy != 0 {
            self.last_rotation_was_kick = false;
        }

        self.refresh_ghost();
        true
    }

    /// Rotate the current piece 90° clockwise, trying wall kicks in order.
    ///
    /// If every kick collides the piece is left untouched. Returns true if the
    /// rotation was applied.
    pub fn rotate_piece(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let rotated = piece.shape.rotate_cw();
        self.last_rotation_was_kick = false;

        let kick = kick_offsets(piece.kind)
            .iter()
            .copied()
            .find(|&(dx, dy)| !self.board.collides(&rotated, piece.x + dx, piece.y + dy));

        let applied = match kick {
            Some((dx, dy)) => {
                self.current = Some(Piece {
                    shape: rotated,
                    x: piece.x + dx,
                    y: piece.y + dy,
                    ..piece
                });
                if piece.kind == PieceKind::T && (dx, dy) != (0, 0) {
                    trace!(dx, dy, "T rotation kicked");
                    self.last_rotation_was_kick = true;
                }
                true
            }
            None => false,
        };

        self.refresh_ghost();
        applied
    }

    /// Drop the current piece to its landing row and lock it immediately.
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        self.current = Some(Piece {
            y: self.landing_y(&piece),
            ..piece
        });
        self.lock_piece();
        true
    }

    /// Stash the current piece, once per piece lifetime.
    ///
    /// With an empty hold slot the next piece spawns; otherwise the held piece
    /// comes back centered at the top like a fresh spawn.
    pub fn hold(&mut self) -> bool {
        if !self.accepts_commands() || !self.can_hold {
            return false;
        }
        let Some(mut current) = self.current else {
            return false;
        };
        current.x = 0;
        current.y = 0;

        match self.held.replace(current) {
            None => {
                self.spawn_piece();
            }
            Some(mut held) => {
                held.x = held.centered_x();
                self.last_rotation_was_kick = false;
                self.place_new_current(held);
            }
        }

        debug!(held = current.kind.name(), "hold");
        self.can_hold = false;
        true
    }

    /// Commit the current piece to the board, score any clear and spawn the next.
    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        self.ghost = None;

        // Corners are judged against the board before the piece is written.
        let spin = spin::detect(&self.board, &piece, self.last_rotation_was_kick);
        self.board.lock_piece(&piece);
        self.pending_spin = spin;
        debug!(
            kind = piece.kind.name(),
            x = piece.x,
            y = piece.y,
            spin = ?spin,
            "piece locked"
        );

        self.clear_lines();
        self.spawn_piece();
    }

    /// Remove completed rows and score them.
    ///
    /// Uses the pending spin classification, which is reset afterwards whether
    /// or not anything was cleared. Returns the number of rows removed.
    pub(crate) fn clear_lines(&mut self) -> usize {
        let cleared = self.board.clear_full_rows();
        let count = cleared.len();

        if count > 0 {
            self.events.push(EngineEvent::LinesCleared {
                rows: cleared.to_vec(),
            });

            self.lines += count as u32;

            // Points use the level the clear happened at.
            let result = calculate_score(count, self.level, self.pending_spin);
            self.score = self.score.saturating_add(result.points);
            if let Some(label) = result.label {
                self.events.push(EngineEvent::Notification {
                    label,
                    points: result.points,
                });
            }

            self.level = calculate_level(self.lines);
            self.drop_interval_ms = drop_interval_ms(self.level);

            debug!(
                lines = count,
                points = result.points,
                spin = ?self.pending_spin,
                level = self.level,
                "lines cleared"
            );
        }

        self.pending_spin = SpinKind::None;
        count
    }

    /// Toggle pause; ignored before start and after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        true
    }

    /// Pause a running game, e.g. when the terminal loses focus. Returns
    /// false if there was nothing to pause.
    pub fn pause(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        self.paused = true;
        debug!("paused on focus loss");
        true
    }

    /// Advance the gravity timer by `elapsed_ms` of driving time.
    ///
    /// Once the accumulated time exceeds the drop interval the piece moves down
    /// one row (locking if it has landed) and the timer restarts. Returns true
    /// if a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.accepts_commands() || self.current.is_none() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.drop_interval_ms {
            self.drop_timer_ms = 0;
            self.move_piece(0, 1);
            return true;
        }
        false
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1, 0),
            GameAction::MoveRight => self.move_piece(1, 0),
            GameAction::SoftDrop => self.move_piece(0, 1),
            GameAction::RotateCw => self.rotate_piece(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
