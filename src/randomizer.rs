//! Piece randomizers
//!
//! Pieces are drawn independently and uniformly from the 7 types, so the
//! same piece can come up many times in a row and droughts are possible.
//! The source is a trait object so tests and replays can script it.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of upcoming piece types
pub trait Randomizer: Send {
    fn next_type(&mut self) -> TetrominoType;
}

/// Uniform, independent draws from a seedable ChaCha stream
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: ChaCha8Rng,
    seed: u64,
}

impl UniformRandomizer {
    /// Randomizer seeded from OS entropy
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Randomizer with a fixed seed (same seed, same sequence)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for UniformRandomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer for UniformRandomizer {
    fn next_type(&mut self) -> TetrominoType {
        let types = TetrominoType::all();
        types[self.rng.gen_range(0..types.len())]
    }
}

/// Replays a fixed list of piece types, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceRandomizer {
    pieces: Vec<TetrominoType>,
    index: usize,
}

impl SequenceRandomizer {
    /// `pieces` must not be empty
    pub fn new(pieces: Vec<TetrominoType>) -> Self {
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, index: 0 }
    }
}

impl Randomizer for SequenceRandomizer {
    fn next_type(&mut self) -> TetrominoType {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}
