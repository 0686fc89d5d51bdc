use core::fmt;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Piece, Position as _, Role, Square,
};

/// 盤の一辺の長さ。
const BOARD_LEN: usize = 8;

/// FEN のうち手数カウンタを除いたフィールド数（配置・手番・キャスリング・アンパッサン）。
const REPETITION_FIELDS: usize = 4;

/// 局面（駒配置＋手番＋キャスリング権/アンパッサン＋手数）。
///
/// ルールの判定はすべて `shakmaty::Chess` に委譲する。
/// 着手の適用は常に新しい局面を返し、元の局面は変更しない。
#[derive(Clone, Debug, Default)]
pub struct Position {
    /// ルールエンジン側の局面。
    chess: Chess,
}

/// 着手の適用に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ApplyMoveError {
    /// 指定された手が合法手ではない。
    #[error("move is not legal in this position")]
    IllegalMove,
}

/// FEN から局面を生成できなかった理由。
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PositionError {
    /// 盤面としては読めたが、ルール上ありえない配置。
    #[error("illegal setup: {0}")]
    IllegalSetup(String),
    /// FEN として解釈できない。
    #[error("invalid fen: {0}")]
    InvalidFen(String),
}

impl Position {
    /// 着手を適用した新しい局面を返す。
    ///
    /// # Errors
    ///
    /// 指定された手が合法手でない場合、`ApplyMoveError::IllegalMove` を返す。
    ///
    #[inline]
    pub fn apply_move(&self, mv: &Move) -> Result<Self, ApplyMoveError> {
        if !self.chess.is_legal(mv) {
            return Err(ApplyMoveError::IllegalMove);
        }

        Ok(self.apply_unchecked(mv))
    }

    /// 合法性を確認せずに着手を適用した新しい局面を返す。
    ///
    /// `mv` は `legal_moves()` から得た手であること。
    #[inline]
    #[must_use]
    pub fn apply_unchecked(&self, mv: &Move) -> Self {
        let mut chess = self.chess.clone();
        chess.play_unchecked(mv);
        Self { chess }
    }

    /// FEN 文字列を返す。
    #[inline]
    #[must_use]
    pub fn fen(&self) -> String {
        Fen::from_position(self.chess.clone(), EnPassantMode::Legal).to_string()
    }

    /// `from` から `to` へ動かす合法手を探す。
    ///
    /// キャスリングはキングの移動（例: `e1g1`）として指定する。
    /// `promotion` が `None` で昇格が必要な場合はクイーンに昇格する手を返す。
    #[inline]
    #[must_use]
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<Move> {
        let wanted = promotion.map_or_else(
            || [None, Some(Role::Queen)],
            |role| [Some(role), Some(role)],
        );

        wanted.into_iter().find_map(|promo| {
            let target = UciMove::Normal {
                from,
                to,
                promotion: promo,
            };
            self.legal_moves()
                .into_iter()
                .find(|mv| UciMove::from_standard(mv) == target)
        })
    }

    /// FEN 文字列から局面を生成する。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PositionError::InvalidFen`: FEN として解釈できない場合
    /// - `PositionError::IllegalSetup`: 標準チェスとしてありえない配置の場合
    ///
    #[inline]
    pub fn from_fen(text: &str) -> Result<Self, PositionError> {
        let fen = text
            .trim()
            .parse::<Fen>()
            .map_err(|err| PositionError::InvalidFen(err.to_string()))?;
        let chess = fen
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|err| PositionError::IllegalSetup(err.to_string()))?;

        Ok(Self { chess })
    }

    /// 50手ルール用の手数（最後に歩を動かすか駒を取ってからの半手数）を返す。
    #[inline]
    #[must_use]
    pub fn halfmoves(&self) -> u32 {
        self.chess.halfmoves()
    }

    /// 初期局面を返す。
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// 駒を取る手かどうかを返す（アンパッサンを含む）。
    ///
    /// 局面には依存せず、`Move::is_capture` をそのまま返す。
    #[inline]
    #[must_use]
    pub fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    /// 手番側がチェックされているかを返す。
    #[inline]
    #[must_use]
    pub fn is_check(&self) -> bool {
        self.chess.is_check()
    }

    /// 手番側がチェックメイトされているかを返す。
    #[inline]
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.chess.is_checkmate()
    }

    /// 双方とも詰ませる駒が足りないかを返す。
    #[inline]
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        self.chess.is_insufficient_material()
    }

    /// 指定の手が合法手かを返す。
    #[inline]
    #[must_use]
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.chess.is_legal(mv)
    }

    /// ステイルメイトかを返す。
    #[inline]
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.chess.is_stalemate()
    }

    /// 現手番の合法手を生成順に返す。
    #[inline]
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.chess.legal_moves()
    }

    /// UCI 表記の手を現局面の合法手に変換する。
    ///
    /// 昇格先を省略した最終段への歩の移動はクイーン昇格として扱う。
    /// 表記として読めない場合、または合法手に該当しない場合は `None`。
    #[inline]
    #[must_use]
    pub fn parse_uci(&self, text: &str) -> Option<Move> {
        let uci = text.trim().parse::<UciMove>().ok()?;
        match uci {
            UciMove::Normal {
                from,
                to,
                promotion,
            } => self.find_move(from, to, promotion),
            _ => uci.to_move(&self.chess).ok(),
        }
    }

    /// 指定マスの駒を返す。
    #[inline]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.chess.board().piece_at(square)
    }

    /// 駒のあるマスと駒を a1 から h8 の順に返す。
    #[inline]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .into_iter()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// 同一局面の判定に使うキー（FEN から手数カウンタを除いたもの）を返す。
    #[inline]
    #[must_use]
    pub fn repetition_key(&self) -> String {
        self.fen()
            .split_whitespace()
            .take(REPETITION_FIELDS)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 手番を返す。
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.chess.turn()
    }

    /// 手を UCI 表記（例: `e2e4`, `e7e8q`）に変換する。
    #[inline]
    #[must_use]
    pub fn uci(mv: &Move) -> String {
        UciMove::from_standard(mv).to_string()
    }
}

impl PartialEq for Position {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.fen() == other.fen()
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    /// 8段目を上にした盤面を描画する。空きマスは `.`。
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank_index, rank) in Square::ALL.chunks(BOARD_LEN).enumerate().rev() {
            write!(f, "{} ", rank_index.wrapping_add(1))?;
            for square in rank {
                let symbol = self.piece_at(*square).map_or('.', Piece::char);
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
