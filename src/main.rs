//! Terminal runner (default binary).
//!
//! Ticks the engine roughly every 16 ms with the real time elapsed, feeds it
//! keyboard commands and draws its snapshot every frame. Losing terminal
//! focus pauses the game.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{info, warn};

use neo_tetris::core::{GameSnapshot, GameState};
use neo_tetris::input::{handle_key_event, should_quit, should_restart, InputHandler, RepeatKey};
use neo_tetris::term::{Effects, FrameBuffer, GameView, TerminalRenderer, Viewport};
use neo_tetris::types::TICK_MS;
use neo_tetris::{logger, Config};

fn main() -> Result<()> {
    logger::init()?;
    let config = Config::from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(error = %err, "failed to restore terminal");
    }
    result
}

/// Everything that is thrown away on restart.
struct Session {
    game: GameState,
    input: InputHandler,
    effects: Effects,
}

impl Session {
    fn new(config: &Config) -> Self {
        let seed = config.game_seed();
        info!(seed, "new game");

        let mut game = GameState::new(seed);
        game.start();
        Self {
            game,
            input: InputHandler::with_config(config.das_ms, config.arr_ms),
            effects: Effects::new(),
        }
    }

    /// Route a key press. Movement keys go through the repeat handler so a
    /// held key isn't applied twice.
    fn press(&mut self, key: KeyEvent) {
        let action = if RepeatKey::from_code(key.code).is_some() {
            self.input.handle_key_press(key.code)
        } else {
            handle_key_event(key)
        };
        if let Some(action) = action {
            self.game.apply_action(action);
        }
    }

    fn step(&mut self, elapsed_ms: u32) {
        for action in self.input.update(elapsed_ms) {
            self.game.apply_action(action);
        }
        self.game.tick(elapsed_ms);
        self.effects.update(elapsed_ms);
    }

    /// The terminal lost focus: pause and drop held keys, since their
    /// releases will never arrive.
    fn focus_lost(&mut self) {
        if self.game.pause() {
            info!("auto-paused");
        }
        self.input.reset();
    }

    fn collect_events(&mut self) {
        for event in self.game.take_events() {
            self.effects.push(&event);
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let view = GameView::default();
    let mut session = Session::new(config);
    let mut snapshot = GameSnapshot::default();
    let mut frame = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        session.game.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, &session.effects, Viewport::new(w, h), &mut frame);
        term.draw(&frame)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!(score = session.game.score(), "quit");
                            return Ok(());
                        }
                        if should_restart(key) {
                            session = Session::new(config);
                            continue;
                        }
                        session.press(key);
                    }
                    // Repeats come from the handler, not the terminal.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => session.input.handle_key_release(key.code),
                },
                Event::FocusLost => session.focus_lost(),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            session.step(elapsed_ms(elapsed));
        }
        session.collect_events();
    }
}

/// Whole milliseconds, saturating at `u32::MAX`.
fn elapsed_ms(elapsed: Duration) -> u32 {
    u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX)
}
