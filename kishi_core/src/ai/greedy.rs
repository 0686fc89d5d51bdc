use crate::ai::eval::{Score, evaluate_for};
use crate::ai::types::{Ai, SelectError};
use crate::engine::{Move, Position};

/// 1手だけ読み、駒得が最大になる手を選ぶAI。
///
/// 同点の場合は合法手の生成順で最初の手を選ぶ（乱数は使わない）。
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Agent;

impl Agent {
    /// 初期化する。
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Ai for Agent {
    #[inline]
    fn select_move(&mut self, position: &Position) -> Result<Move, SelectError> {
        choose(position)
    }
}

/// 合法手ごとに、指した後の局面の駒得（手番側視点）を生成順に返す。
///
/// 各手は局面のコピーに適用するので、`position` は変更されない。
#[inline]
#[must_use]
pub fn scored_moves(position: &Position) -> Vec<(Move, Score)> {
    let side = position.side_to_move();
    position
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let score = evaluate_for(&position.apply_unchecked(&mv), side);
            tracing::trace!(mv = %Position::uci(&mv), score, "evaluated");
            (mv, score)
        })
        .collect()
}

/// 駒得が最大になる手を選ぶ。同点なら先に生成された手。
///
/// 白番では `evaluate` が最大になる手そのものになる。
///
/// # Errors
///
/// 合法手が無い場合、`SelectError::NoLegalMoves` を返す。
///
#[inline]
pub fn choose(position: &Position) -> Result<Move, SelectError> {
    let mut best: Option<(Move, Score)> = None;

    for (mv, score) in scored_moves(position) {
        let is_better = best
            .as_ref()
            .is_none_or(|&(_, best_score)| score > best_score);
        if is_better {
            best = Some((mv, score));
        }
    }

    let (mv, score) = best.ok_or(SelectError::NoLegalMoves)?;
    tracing::debug!(mv = %Position::uci(&mv), score, "greedy choice");
    Ok(mv)
}
