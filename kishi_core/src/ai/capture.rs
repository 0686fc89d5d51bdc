use rand::SeedableRng as _;
use rand::rngs::StdRng;

use crate::ai::random::pick_from;
use crate::ai::rng::RandomSource;
use crate::ai::types::{Ai, SelectError};
use crate::engine::{Move, Position};

/// 駒を取る手があればその中から、無ければ合法手全体からランダムに選ぶAI。
#[derive(Debug)]
#[non_exhaustive]
pub struct Agent<R> {
    /// 乱数源。
    rng: R,
}

impl<R> Agent<R> {
    /// 乱数源を指定して初期化する。
    #[inline]
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Agent<StdRng> {
    /// `seed` を用いて初期化する（決定的に再現可能）。
    #[inline]
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Ai for Agent<R> {
    #[inline]
    fn select_move(&mut self, position: &Position) -> Result<Move, SelectError> {
        choose(position, &mut self.rng)
    }
}

/// 取る手を優先して一様ランダムに1手選ぶ。
///
/// # Errors
///
/// 合法手が無い場合、`SelectError::NoLegalMoves` を返す。
///
#[inline]
pub fn choose<R: RandomSource + ?Sized>(
    position: &Position,
    rng: &mut R,
) -> Result<Move, SelectError> {
    let moves = position.legal_moves();
    let captures: Vec<Move> = moves
        .iter()
        .filter(|mv| position.is_capture(mv))
        .cloned()
        .collect();

    if captures.is_empty() {
        return pick_from(&moves, rng);
    }

    tracing::trace!(captures = captures.len(), "choosing among captures");
    pick_from(&captures, rng)
}
