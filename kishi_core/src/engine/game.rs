use shakmaty::{Color, Move, Square};

use crate::engine::position::Position;

/// 50手ルールで引き分けになる半手数。
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// 千日手（同一局面の繰り返し）で引き分けになる出現回数。
const REPETITION_LIMIT: usize = 3;

/// ゲームの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
    /// チェックメイトで終局。
    Checkmate {
        /// 勝った側。
        winner: Color,
    },
    /// 駒不足・50手ルール・千日手による引き分け。
    Draw,
    /// 進行中。
    InProgress {
        /// 手番側がチェックされているか。
        check: bool,
    },
    /// ステイルメイトによる引き分け。
    Stalemate,
}

impl Status {
    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress { .. })
    }
}

/// 手の適用に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PlayError {
    /// すでに終局している。
    #[error("game is already over")]
    GameOver,
    /// 指定された手が合法手ではない。
    #[error("illegal move")]
    IllegalMove,
    /// 手の表記として読めない。
    #[error("invalid move notation")]
    InvalidNotation,
}

/// 1ゲームの進行を管理する構造体。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    /// これまでの局面（古い順）。`undo` で末尾から戻す。
    history: Vec<Position>,
    /// 現在の局面。
    position: Position,
}

impl Game {
    /// 任意の局面からゲームを開始する。
    #[inline]
    #[must_use]
    pub const fn from_position(position: Position) -> Self {
        Self {
            history: Vec::new(),
            position,
        }
    }

    /// 初期局面からゲームを開始する。
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        Self::from_position(Position::initial())
    }

    /// 現局面が履歴を含めて3回以上現れたかを返す。
    fn is_threefold_repetition(&self) -> bool {
        let key = self.position.repetition_key();
        let repeated = self
            .history
            .iter()
            .filter(|previous| previous.repetition_key() == key)
            .count();
        repeated.saturating_add(1) >= REPETITION_LIMIT
    }

    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status().is_over()
    }

    /// 1手を適用する。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PlayError::GameOver`: すでにゲームが終局している場合
    /// - `PlayError::IllegalMove`: 指定された手が合法手でない場合
    ///
    #[inline]
    pub fn play(&mut self, mv: &Move) -> Result<Status, PlayError> {
        if self.is_game_over() {
            return Err(PlayError::GameOver);
        }

        let next = self
            .position
            .apply_move(mv)
            .map_err(|_err| PlayError::IllegalMove)?;

        tracing::debug!(
            ply = self.ply(),
            side = ?self.position.side_to_move(),
            mv = %Position::uci(mv),
            "move played"
        );

        let previous = core::mem::replace(&mut self.position, next);
        self.history.push(previous);

        let status = self.status();
        if status.is_over() {
            tracing::info!(?status, ply = self.ply(), "game over");
        }
        Ok(status)
    }

    /// 移動元と移動先のマスで1手を適用する。
    ///
    /// 最終段への歩の移動はクイーンに昇格する。キャスリングはキングの移動で指定する。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PlayError::GameOver`: すでにゲームが終局している場合
    /// - `PlayError::IllegalMove`: 該当する合法手がない場合
    ///
    #[inline]
    pub fn play_squares(&mut self, from: Square, to: Square) -> Result<Status, PlayError> {
        if self.is_game_over() {
            return Err(PlayError::GameOver);
        }

        let mv = self
            .position
            .find_move(from, to, None)
            .ok_or(PlayError::IllegalMove)?;
        self.play(&mv)
    }

    /// UCI 表記（例: `e2e4`, `e7e8n`）で1手を適用する。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PlayError::GameOver`: すでにゲームが終局している場合
    /// - `PlayError::InvalidNotation`: UCI 表記として読めない場合
    /// - `PlayError::IllegalMove`: 該当する合法手がない場合
    ///
    #[inline]
    pub fn play_uci(&mut self, text: &str) -> Result<Status, PlayError> {
        if self.is_game_over() {
            return Err(PlayError::GameOver);
        }

        if text.trim().parse::<shakmaty::uci::UciMove>().is_err() {
            return Err(PlayError::InvalidNotation);
        }

        let mv = self
            .position
            .parse_uci(text)
            .ok_or(PlayError::IllegalMove)?;
        self.play(&mv)
    }

    /// これまでに指された手数を返す。
    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// 現在の局面を返す。
    #[inline]
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// 現手番を返す。
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// 現在のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub fn status(&self) -> Status {
        let position = &self.position;
        if position.is_checkmate() {
            return Status::Checkmate {
                winner: position.side_to_move().other(),
            };
        }

        if position.is_stalemate() {
            return Status::Stalemate;
        }

        if position.is_insufficient_material()
            || position.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.is_threefold_repetition()
        {
            return Status::Draw;
        }

        Status::InProgress {
            check: position.is_check(),
        }
    }

    /// 直前の1手を取り消す。
    ///
    /// 取り消した（破棄した）局面を返す。履歴が空なら `None`。
    #[inline]
    pub fn undo(&mut self) -> Option<Position> {
        let previous = self.history.pop()?;
        let discarded = core::mem::replace(&mut self.position, previous);
        tracing::debug!(ply = self.ply(), "move undone");
        Some(discarded)
    }
}

impl Default for Game {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, PlayError, Status};
    use crate::engine::position::Position;
    use shakmaty::{Color, Role, Square};

    fn game_from_fen(fen: &str) -> Game {
        let position = Position::from_fen(fen);
        assert!(position.is_ok(), "test fen must parse: {fen}");
        Game::from_position(position.unwrap_or_else(|_| Position::initial()))
    }

    #[test]
    fn illegal_move_is_rejected_without_changing_state() {
        let mut game = Game::initial();
        let before = game.clone();

        assert_eq!(game.play_uci("e2e5"), Err(PlayError::IllegalMove));
        assert_eq!(game.play_uci("zz"), Err(PlayError::InvalidNotation));
        assert_eq!(
            game.play_squares(Square::E7, Square::E5),
            Err(PlayError::IllegalMove)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn play_squares_promotes_pawn_to_queen() {
        let mut game = game_from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");

        let status = game.play_squares(Square::A7, Square::A8);
        assert!(status.is_ok());
        let promoted = game.position().piece_at(Square::A8);
        assert_eq!(promoted.map(|piece| piece.role), Some(Role::Queen));
        assert_eq!(promoted.map(|piece| piece.color), Some(Color::White));
    }

    #[test]
    fn undo_restores_previous_position_in_lifo_order() {
        let mut game = Game::initial();
        let start = game.position().clone();

        assert!(game.play_uci("e2e4").is_ok());
        let after_e4 = game.position().clone();
        assert!(game.play_uci("e7e5").is_ok());
        assert_eq!(game.ply(), 2);

        assert!(game.undo().is_some());
        assert_eq!(game.position(), &after_e4);
        assert!(game.undo().is_some());
        assert_eq!(game.position(), &start);
        assert!(game.undo().is_none());
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn fools_mate_is_reported_as_checkmate_and_blocks_further_moves() {
        let mut game = Game::initial();
        for text in ["f2f3", "e7e5", "g2g4"] {
            assert!(matches!(
                game.play_uci(text),
                Ok(Status::InProgress { .. })
            ));
        }

        assert_eq!(
            game.play_uci("d8h4"),
            Ok(Status::Checkmate {
                winner: Color::Black
            })
        );
        assert!(game.is_game_over());
        assert_eq!(game.play_uci("a2a3"), Err(PlayError::GameOver));
    }

    #[test]
    fn check_is_reported_while_in_progress() {
        let mut game = game_from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert_eq!(
            game.play_uci("a1a8"),
            Ok(Status::InProgress { check: true })
        );
    }

    #[test]
    fn stalemate_and_insufficient_material_end_the_game() {
        let stalemate = game_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(stalemate.status(), Status::Stalemate);

        let bare_kings = game_from_fen("7k/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(bare_kings.status(), Status::Draw);
        assert!(bare_kings.is_game_over());
    }

    #[test]
    fn fifty_move_rule_ends_the_game() {
        let exhausted = game_from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80");
        assert_eq!(exhausted.status(), Status::Draw);
        assert!(exhausted.is_game_over());

        let mut last_chance = game_from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80");
        assert!(!last_chance.is_game_over());
        assert_eq!(last_chance.play_uci("a1a2"), Ok(Status::Draw));
        assert_eq!(last_chance.play_uci("e8e7"), Err(PlayError::GameOver));
    }

    #[test]
    fn capture_on_the_hundredth_halfmove_resets_the_count() {
        let mut game = game_from_fen("4k3/8/8/8/8/8/r7/R3K3 w - - 99 80");
        assert_eq!(
            game.play_uci("a1a2"),
            Ok(Status::InProgress { check: false })
        );
        assert_eq!(game.position().halfmoves(), 0);
    }

    #[test]
    fn threefold_repetition_ends_the_game() {
        let mut game = Game::initial();
        for text in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            assert!(matches!(game.play_uci(text), Ok(Status::InProgress { .. })));
        }
        // 初期局面が2回目。まだ続く。
        assert!(!game.is_game_over());

        for text in ["g1f3", "g8f6", "f3g1"] {
            assert!(matches!(game.play_uci(text), Ok(Status::InProgress { .. })));
        }
        assert_eq!(game.play_uci("f6g8"), Ok(Status::Draw));
        assert_eq!(game.ply(), 8);
        assert_eq!(game.play_uci("e2e4"), Err(PlayError::GameOver));

        assert!(game.undo().is_some());
        assert!(!game.is_game_over());
    }
}
