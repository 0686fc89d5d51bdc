use core::str::FromStr;

use kishi_core::ai::{Difficulty, SelectError};

/// 1行の入力を解釈したコマンド。
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// 盤面を表示する。
    Board,
    /// 難易度を変更する。
    Difficulty(Difficulty),
    /// 使い方を表示する。
    Help,
    /// UCI 表記の手を指す。
    Move(String),
    /// 終了する。
    Quit,
    /// 直前の1手番（相手の応手と自分の手）を取り消す。
    Undo,
}

/// 入力を解釈できなかった理由。
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// 難易度の名前が不正。
    #[error(transparent)]
    Difficulty(#[from] SelectError),
    /// 空行。
    #[error("empty input")]
    Empty,
    /// `difficulty` の後に名前が無い。
    #[error("usage: difficulty <easy|medium|hard>")]
    MissingDifficulty,
}

impl FromStr for Command {
    type Err = CommandError;

    #[inline]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        match head.to_ascii_lowercase().as_str() {
            "board" => Ok(Self::Board),
            "difficulty" => {
                let name = words.next().ok_or(CommandError::MissingDifficulty)?;
                Ok(Self::Difficulty(name.parse()?))
            }
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "undo" => Ok(Self::Undo),
            _ => Ok(Self::Move(head.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandError};
    use kishi_core::ai::{Difficulty, SelectError};

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!("BOARD".parse::<Command>(), Ok(Command::Board));
        assert_eq!(" undo ".parse::<Command>(), Ok(Command::Undo));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn difficulty_command_requires_a_known_tier() {
        assert_eq!(
            "difficulty Hard".parse::<Command>(),
            Ok(Command::Difficulty(Difficulty::Hard))
        );
        assert_eq!(
            "difficulty".parse::<Command>(),
            Err(CommandError::MissingDifficulty)
        );
        assert_eq!(
            "difficulty insane".parse::<Command>(),
            Err(CommandError::Difficulty(SelectError::InvalidDifficulty(
                "insane".to_owned()
            )))
        );
    }

    #[test]
    fn anything_else_is_a_move() {
        assert_eq!("e2e4".parse::<Command>(), Ok(Command::Move("e2e4".to_owned())));
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
    }
}
