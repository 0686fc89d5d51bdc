use rand::SeedableRng as _;
use rand::rngs::StdRng;

use crate::ai::rng::RandomSource;
use crate::ai::select_move;
use crate::ai::types::{Ai, Difficulty, SelectError};
use crate::engine::{Move, Position};

/// 難易度と乱数源を持ち、難易度に応じたAIで手を選ぶ対局相手。
///
/// 難易度は対局中に変更できる。局面は保持しない。
#[derive(Debug)]
pub struct Opponent<R> {
    /// 現在の難易度。
    difficulty: Difficulty,
    /// easy/medium で使う乱数源。
    rng: R,
}

impl<R> Opponent<R> {
    /// 現在の難易度を返す。
    #[inline]
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// 難易度と乱数源を指定して初期化する。
    #[inline]
    #[must_use]
    pub const fn new(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    /// 難易度を変更する。
    #[inline]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            tracing::info!(from = %self.difficulty, to = %difficulty, "difficulty changed");
        }
        self.difficulty = difficulty;
    }
}

impl Opponent<StdRng> {
    /// OS の乱数で初期化する。
    #[inline]
    #[must_use]
    pub fn from_entropy(difficulty: Difficulty) -> Self {
        Self::new(difficulty, StdRng::from_os_rng())
    }

    /// `seed` を用いて初期化する（決定的に再現可能）。
    #[inline]
    #[must_use]
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Ai for Opponent<R> {
    #[inline]
    fn select_move(&mut self, position: &Position) -> Result<Move, SelectError> {
        select_move(position, self.difficulty, &mut self.rng)
    }
}
