/// 合法手のうち駒を取る手を優先してランダムに選ぶAI（medium）。
pub mod capture;
/// 駒得による静的評価。
pub mod eval;
/// 1手読みで駒得が最大になる手を選ぶAI（hard）。
pub mod greedy;
/// 難易度に応じてAIを切り替える対局相手。
pub mod opponent;
/// 合法手からランダムに1手選ぶAI（easy）。
pub mod random;
/// 乱数源の抽象化。
pub mod rng;
pub mod types;


pub use opponent::Opponent;
pub use types::Ai;
pub type Difficulty = types::Difficulty;
pub type SelectError = types::SelectError;

use crate::engine::{Move, Position};
use rng::RandomSource;

/// 難易度に応じた方針で、`position` の合法手から1手を選ぶ。
///
/// `position` は変更しない。
///
/// # Errors
///
/// 合法手が無い場合、`SelectError::NoLegalMoves` を返す。
/// 終局判定は呼び出し側の責務で、選択前に済ませておくこと。
///
#[inline]
pub fn select_move<R: RandomSource + ?Sized>(
    position: &Position,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Move, SelectError> {
    let mv = match difficulty {
        Difficulty::Easy => random::choose(position, rng),
        Difficulty::Medium => capture::choose(position, rng),
        Difficulty::Hard => greedy::choose(position),
    }?;

    tracing::debug!(%difficulty, mv = %Position::uci(&mv), "opponent move selected");
    Ok(mv)
}
