/// 対局進行（手番、履歴、終局判定など）の実装。
pub mod game;
/// 局面（`shakmaty::Chess` のラッパー）の実装。
pub mod position;

pub type Position = position::Position;
pub type Game = game::Game;
pub type GameStatus = game::Status;
pub type PlayError = game::PlayError;
pub type ApplyMoveError = position::ApplyMoveError;
pub type PositionError = position::PositionError;

pub use shakmaty::{Color, Move, Piece, Role, Square};
