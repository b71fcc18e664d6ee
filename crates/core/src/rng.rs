//! RNG module - uniform random piece selection
//!
//! Every draw is independent: any of the seven kinds can follow any other,
//! including itself. There is no bag.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Seeded piece generator
#[derive(Debug, Clone)]
pub struct PieceRng {
    seed: u64,
    rng: SmallRng,
}

impl PieceRng {
    /// Create a generator; the same seed yields the same piece sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a kind uniformly from the catalog
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Draw a fresh piece at the origin
    pub fn next_piece(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }
}
