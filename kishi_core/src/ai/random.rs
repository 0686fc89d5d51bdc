use rand::SeedableRng as _;
use rand::rngs::StdRng;

use crate::ai::rng::RandomSource;
use crate::ai::types::{Ai, SelectError};
use crate::engine::{Move, Position};

/// 合法手からランダムに1手を選択するAI。
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

/// 合法手全体から一様ランダムに1手選ぶ。
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
    pick_from(&position.legal_moves(), rng)
}

/// `moves` から一様ランダムに1手選ぶ。
pub(super) fn pick_from<R: RandomSource + ?Sized>(
    moves: &[Move],
    rng: &mut R,
) -> Result<Move, SelectError> {
    let last = moves.len().checked_sub(1).ok_or(SelectError::NoLegalMoves)?;
    let index = rng.pick(moves.len()).min(last);
    moves.get(index).cloned().ok_or(SelectError::NoLegalMoves)
}
