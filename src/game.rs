//! Core game state and logic
//!
//! `Game` owns the board and both pieces and is the only thing that writes to
//! them. Front ends drive it with commands plus a frequent `tick()`, read
//! copies through `snapshot()` and react to `drain_events()`.

use crate::board::{Board, Grid};
use crate::clock::{Clock, SystemClock};
use crate::piece::Piece;
use crate::randomizer::{Randomizer, UniformRandomizer};
use crate::score::Score;
use crate::snapshot::GameSnapshot;
use crate::tetromino::TetrominoType;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Full rows stay on the board this long before they are removed
pub const LINE_CLEAR_DELAY: Duration = Duration::from_millis(300);

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    /// Start when idle, otherwise pause/resume
    Pause,
    Reset,
    Quit,
}

/// Things that happened inside the engine, for front ends to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece was committed to the board with its anchor at (x, y)
    PieceLanded {
        piece_type: TetrominoType,
        x: i32,
        y: i32,
    },
    /// These rows are full and will be removed after the clear delay
    RowsClearing { rows: Vec<usize> },
    /// Delayed removal done; totals after the clear
    RowsCleared {
        count: usize,
        score: u64,
        level: u32,
        drop_interval_ms: u64,
    },
    GameOver { score: u64 },
}

/// Full rows waiting for removal
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingClear {
    rows: Vec<usize>,
    ready_at: Instant,
}

/// The main game struct
pub struct Game {
    board: Board,
    /// Falling piece; None before start and while a clear is pending
    current_piece: Option<Piece>,
    /// Preview piece, spawned next
    next_piece: Option<Piece>,
    score: Score,
    state: GameState,
    pending_clear: Option<PendingClear>,
    /// Reference point for automatic drops
    last_drop: Instant,
    paused_at: Option<Instant>,
    randomizer: Box<dyn Randomizer>,
    clock: Box<dyn Clock>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Game with an entropy-seeded randomizer and the wall clock
    pub fn new() -> Self {
        Self::with_parts(Box::new(UniformRandomizer::new()), Box::new(SystemClock))
    }

    /// Game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_parts(
            Box::new(UniformRandomizer::with_seed(seed)),
            Box::new(SystemClock),
        )
    }

    /// Game with explicit piece source and time source
    pub fn with_parts(randomizer: Box<dyn Randomizer>, clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            board: Board::new(),
            current_piece: None,
            next_piece: None,
            score: Score::new(),
            state: GameState::NotStarted,
            pending_clear: None,
            last_drop: now,
            paused_at: None,
            randomizer,
            clock,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u64 {
        self.score.points
    }

    pub fn level(&self) -> u32 {
        self.score.level
    }

    pub fn lines(&self) -> u32 {
        self.score.lines
    }

    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.score.drop_interval_ms())
    }

    pub fn current_piece(&self) -> Option<Piece> {
        self.current_piece
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.next_piece
    }

    /// Copy of the settled blocks
    pub fn board_cells(&self) -> Grid {
        self.board.cells()
    }

    /// Rows currently waiting for delayed removal
    pub fn clearing_rows(&self) -> &[usize] {
        self.pending_clear
            .as_ref()
            .map(|pending| pending.rows.as_slice())
            .unwrap_or(&[])
    }

    /// Copy of everything needed to draw a frame
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.cells(),
            current: self.current_piece,
            next: self.next_piece,
            score: self.score.points,
            level: self.score.level,
            lines: self.score.lines,
            drop_interval_ms: self.score.drop_interval_ms(),
            state: self.state,
            clearing_rows: self.clearing_rows().to_vec(),
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::SoftDrop => self.soft_drop(),
            Action::Rotate => self.rotate(),
            Action::Pause => match self.state {
                GameState::NotStarted | GameState::GameOver => self.start(),
                GameState::Running | GameState::Paused => self.toggle_pause(),
            },
            Action::Reset => self.reset(),
            Action::Quit => {
                // Handled by the application
            }
        }
    }

    /// Begin a fresh session. Only valid before the first start or after game over.
    pub fn start(&mut self) {
        if !matches!(self.state, GameState::NotStarted | GameState::GameOver) {
            return;
        }

        self.clear_session();
        self.state = GameState::Running;
        self.last_drop = self.clock.now();
        info!("Game started");
        self.spawn_piece();
    }

    /// Back to a fresh, not-started session from any state
    pub fn reset(&mut self) {
        self.clear_session();
        self.events.clear();
        self.state = GameState::NotStarted;
        info!("Game reset");
    }

    pub fn pause(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        self.state = GameState::Paused;
        self.paused_at = Some(self.clock.now());
        debug!("Paused");
    }

    /// Resume from pause. Time spent paused counts toward neither the next
    /// automatic drop nor a pending line clear.
    pub fn resume(&mut self) {
        if self.state != GameState::Paused {
            return;
        }
        let now = self.clock.now();
        let paused_at = self.paused_at.take();
        if let (Some(paused_at), Some(pending)) = (paused_at, self.pending_clear.as_mut()) {
            pending.ready_at += now.saturating_duration_since(paused_at);
        }
        self.last_drop = now;
        self.state = GameState::Running;
        debug!("Resumed");
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Running => self.pause(),
            GameState::Paused => self.resume(),
            GameState::NotStarted | GameState::GameOver => {}
        }
    }

    pub fn move_left(&mut self) {
        self.attempt_move(-1, 0);
    }

    pub fn move_right(&mut self) {
        self.attempt_move(1, 0);
    }

    /// Move down one row right away, landing if blocked
    pub fn soft_drop(&mut self) {
        self.attempt_move(0, 1);
    }

    /// Rotate clockwise in place. A rotation that would collide is dropped;
    /// there are no wall kicks.
    pub fn rotate(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        let Some(piece) = self.current_piece else {
            return;
        };
        let rotated = piece.rotated();
        if !self.board.check_collision(&rotated, 0, 0) {
            self.current_piece = Some(rotated);
        }
    }

    /// Move the current piece by (dx, dy). A blocked downward move lands the
    /// piece; any other blocked move does nothing. Returns whether it moved.
    pub fn attempt_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = self.current_piece else {
            return false;
        };

        if !self.board.check_collision(&piece, dx, dy) {
            self.current_piece = Some(piece.translated(dx, dy));
            return true;
        }

        if dy > 0 {
            self.land(piece);
        }
        false
    }

    /// Advance timers (call every frame)
    pub fn tick(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        let now = self.clock.now();

        if let Some(pending) = &self.pending_clear {
            if now >= pending.ready_at {
                self.finish_clear(now);
            }
            return;
        }

        if now.saturating_duration_since(self.last_drop) > self.drop_interval() {
            self.attempt_move(0, 1);
            self.last_drop = now;
        }
    }

    fn clear_session(&mut self) {
        self.board = Board::new();
        self.score = Score::new();
        self.current_piece = None;
        self.next_piece = None;
        self.pending_clear = None;
        self.paused_at = None;
    }

    /// Commit the piece, then either schedule a line clear or bring in the next piece
    fn land(&mut self, piece: Piece) {
        self.current_piece = None;
        self.board.commit(&piece);
        debug!(piece = piece.piece_type.name(), x = piece.x, y = piece.y, "Piece landed");
        self.events.push(GameEvent::PieceLanded {
            piece_type: piece.piece_type,
            x: piece.x,
            y: piece.y,
        });

        let rows = self.board.find_full_rows();
        if rows.is_empty() {
            self.spawn_piece();
            return;
        }

        debug!(?rows, "Rows full, clearing after delay");
        self.events.push(GameEvent::RowsClearing { rows: rows.clone() });
        self.pending_clear = Some(PendingClear {
            rows,
            ready_at: self.clock.now() + LINE_CLEAR_DELAY,
        });
    }

    /// Remove the pending rows, score them, and continue with the next piece
    fn finish_clear(&mut self, now: Instant) {
        let Some(pending) = self.pending_clear.take() else {
            return;
        };

        self.board.clear_rows(&pending.rows);
        let previous_level = self.score.level;
        let awarded = self.score.add_clear(pending.rows.len());
        info!(
            rows = pending.rows.len(),
            awarded,
            score = self.score.points,
            lines = self.score.lines,
            "Rows cleared"
        );
        if self.score.level != previous_level {
            info!(level = self.score.level, "Level up");
        }

        self.events.push(GameEvent::RowsCleared {
            count: pending.rows.len(),
            score: self.score.points,
            level: self.score.level,
            drop_interval_ms: self.score.drop_interval_ms(),
        });

        self.last_drop = now;
        self.spawn_piece();
    }

    /// Promote the preview piece (or draw one on the very first spawn), refill
    /// the preview, and end the game if the new piece has no room.
    fn spawn_piece(&mut self) {
        let piece = match self.next_piece.take() {
            Some(next) => next,
            None => Piece::spawn(self.randomizer.next_type()),
        };
        self.next_piece = Some(Piece::spawn(self.randomizer.next_type()));
        self.current_piece = Some(piece);

        if self.board.check_collision(&piece, 0, 0) {
            self.game_over();
        } else {
            debug!(piece = piece.piece_type.name(), "Spawned");
        }
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        info!(
            score = self.score.points,
            lines = self.score.lines,
            level = self.score.level,
            "Game over"
        );
        self.events.push(GameEvent::GameOver {
            score: self.score.points,
        });
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
