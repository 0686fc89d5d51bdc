use core::fmt;

use kishi_core::ai::rng::RandomSource;
use kishi_core::ai::types::Ai as _;
use kishi_core::ai::{Difficulty, Opponent};
use kishi_core::engine::{self, Color, Game, GameStatus, PlayError};

/// 利用者への通知。
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notice {
    /// 手番側がチェックされた。
    Check,
    /// チェックメイトで終局した。
    Checkmate,
    /// 難易度を変更した。
    DifficultyChanged(Difficulty),
    /// 引き分けで終局した。
    Draw,
    /// すでに終局している。
    GameOver,
    /// 指せない手だった。
    IllegalMove,
    /// 手として読めない入力だった。
    InvalidNotation,
    /// 人間の手を受け付けた。
    MoveSuccessful,
    /// 取り消せる手が無い。
    NothingToUndo,
    /// 相手が指した（UCI 表記）。
    OpponentMoved(String),
    /// 相手が手を選べなかった。
    OpponentStuck(String),
    /// 人間の手番ではない。
    NotYourTurn,
    /// 手を取り消した。
    Undone,
}

impl fmt::Display for Notice {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => f.write_str("Check!"),
            Self::Checkmate => f.write_str("Checkmate! Game over!"),
            Self::DifficultyChanged(difficulty) => write!(f, "Difficulty set to {difficulty}."),
            Self::Draw => f.write_str("Draw! Game over!"),
            Self::GameOver => f.write_str("Game over!"),
            Self::IllegalMove => f.write_str("Illegal move!"),
            Self::InvalidNotation => f.write_str("Unrecognised move, use UCI like e2e4 or e7e8q."),
            Self::MoveSuccessful => f.write_str("Move successful!"),
            Self::NothingToUndo => f.write_str("Nothing to undo."),
            Self::OpponentMoved(mv) => write!(f, "Opponent plays {mv}."),
            Self::OpponentStuck(reason) => write!(f, "Opponent cannot move: {reason}"),
            Self::NotYourTurn => f.write_str("Not your turn."),
            Self::Undone => f.write_str("Move taken back."),
        }
    }
}

/// 人間対コンピュータの対局状態。
#[derive(Debug)]
pub struct App<R> {
    /// 対局。
    game: Game,
    /// 人間が持つ色。
    human: Color,
    /// コンピュータ側。
    opponent: Opponent<R>,
}

impl<R: RandomSource> App<R> {
    /// 現在の難易度を返す。
    #[inline]
    pub const fn difficulty(&self) -> Difficulty {
        self.opponent.difficulty()
    }

    /// 対局を返す。
    #[inline]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// 人間の手（UCI 表記）を指す。
    #[inline]
    pub fn human_move(&mut self, text: &str) -> Vec<Notice> {
        if self.game.is_game_over() {
            return vec![Notice::GameOver];
        }
        if !self.is_human_turn() {
            return vec![Notice::NotYourTurn];
        }

        match self.game.play_uci(text) {
            Ok(status) => {
                let mut notices = status_notices(status);
                if !status.is_over() {
                    notices.push(Notice::MoveSuccessful);
                }
                notices
            }
            Err(PlayError::InvalidNotation) => vec![Notice::InvalidNotation],
            Err(PlayError::GameOver) => vec![Notice::GameOver],
            Err(_err) => vec![Notice::IllegalMove],
        }
    }

    /// 人間の手番かどうかを返す。
    #[inline]
    pub fn is_human_turn(&self) -> bool {
        self.game.side_to_move() == self.human
    }

    /// 初期化する。
    #[inline]
    pub const fn new(game: Game, human: Color, opponent: Opponent<R>) -> Self {
        Self {
            game,
            human,
            opponent,
        }
    }

    /// コンピュータの手番なら1手指す。
    #[inline]
    pub fn opponent_turn(&mut self) -> Vec<Notice> {
        if self.game.is_game_over() {
            return vec![Notice::GameOver];
        }
        if self.is_human_turn() {
            return Vec::new();
        }

        let position = self.game.position().clone();
        let mv = match self.opponent.select_move(&position) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%err, fen = %position.fen(), "opponent failed to select a move");
                return vec![Notice::OpponentStuck(err.to_string())];
            }
        };

        match self.game.play(&mv) {
            Ok(status) => {
                let mut notices = vec![Notice::OpponentMoved(engine::Position::uci(&mv))];
                notices.extend(status_notices(status));
                notices
            }
            Err(err) => vec![Notice::OpponentStuck(err.to_string())],
        }
    }

    /// 難易度を変更する。
    #[inline]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<Notice> {
        self.opponent.set_difficulty(difficulty);
        vec![Notice::DifficultyChanged(difficulty)]
    }

    /// 人間の直前の手番を取り消す（相手の応手があればそれも取り消す）。
    #[inline]
    pub fn undo_turn(&mut self) -> Vec<Notice> {
        if self.game.undo().is_none() {
            return vec![Notice::NothingToUndo];
        }
        if !self.is_human_turn() && self.game.ply() > 0 {
            let _discarded = self.game.undo();
        }
        vec![Notice::Undone]
    }
}

/// 手を指した後の状態に応じた通知。
fn status_notices(status: GameStatus) -> Vec<Notice> {
    match status {
        GameStatus::Checkmate { .. } => vec![Notice::Checkmate],
        GameStatus::InProgress { check: true } => vec![Notice::Check],
        GameStatus::InProgress { check: false } => Vec::new(),
        _ => vec![Notice::Draw],
    }
}
