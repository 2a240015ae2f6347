//! BLOCKFALL - a falling-block puzzle game engine
//!
//! The engine (`game` and the modules under it) is pure game logic: a 10x20
//! board, uniformly random pieces, naive clockwise rotation, delayed line
//! clears and level-based gravity. `input`, `settings` and `ui` are the
//! terminal front end used by the binary.

pub mod board;
pub mod clock;
pub mod game;
pub mod input;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod tetromino;
pub mod ui;

pub use board::{Board, Cell, Grid, BOARD_HEIGHT, BOARD_WIDTH};
pub use clock::{Clock, ManualClock, SystemClock};
pub use game::{Action, Game, GameEvent, GameState};
pub use piece::Piece;
pub use randomizer::{Randomizer, SequenceRandomizer, UniformRandomizer};
pub use snapshot::GameSnapshot;
pub use tetromino::{Shape, TetrominoType};
