use core::fmt;
use core::str::FromStr;

use crate::engine::{Move, Position};

/// コンピュータ側の強さ。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Difficulty {
    /// 合法手から一様ランダム。
    #[default]
    Easy,
    /// 1手読みで駒得最大。
    Hard,
    /// 取る手があればその中から一様ランダム。
    Medium,
}

impl Difficulty {
    /// すべての難易度（弱い順）。
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// 小文字の名前を返す。
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
            Self::Medium => "medium",
        }
    }
}

impl fmt::Display for Difficulty {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SelectError;

    /// 大文字小文字と前後の空白は無視する。未知の名前は既定値に寄せずエラーにする。
    #[inline]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let name = text.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| SelectError::InvalidDifficulty(name.to_owned()))
    }
}

/// 手の選択に失敗した理由。
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SelectError {
    /// 認識できない難易度が指定された。
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    InvalidDifficulty(String),
    /// 合法手が無い（すでに終局している）。
    #[error("no legal moves in this position")]
    NoLegalMoves,
}

/// 手を選択するAI。
pub trait Ai {
    /// 現在局面から次の手を選択する。
    ///
    /// # Errors
    ///
    /// 合法手が無い場合、`SelectError::NoLegalMoves` を返す。
    ///
    fn select_move(&mut self, position: &Position) -> Result<Move, SelectError>;
}
