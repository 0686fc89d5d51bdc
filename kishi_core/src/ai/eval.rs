use crate::engine::{Color, Position, Role};

/// 駒得による評価値。正なら白が得。
pub type Score = i32;

/// 駒の価値を返す。キングは取られないので 0。
#[inline]
#[must_use]
pub const fn piece_value(role: Role) -> Score {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}

/// 白視点の駒得を返す（白の駒は加算、黒の駒は減算）。
///
/// 位置・機動力・キングの安全性は考慮しない。
#[inline]
#[must_use]
pub fn evaluate(position: &Position) -> Score {
    position.pieces().fold(0, |total, (_square, piece)| {
        let value = piece_value(piece.role);
        match piece.color {
            Color::White => total.wrapping_add(value),
            Color::Black => total.wrapping_sub(value),
        }
    })
}

/// `color` 視点の駒得を返す。
#[inline]
#[must_use]
pub fn evaluate_for(position: &Position, color: Color) -> Score {
    let score = evaluate(position);
    match color {
        Color::White => score,
        Color::Black => score.wrapping_neg(),
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate, evaluate_for, piece_value};
    use crate::engine::{Color, Position, Role};

    fn position(fen: &str) -> Position {
        let parsed = Position::from_fen(fen);
        assert!(parsed.is_ok(), "test fen must parse: {fen}");
        parsed.unwrap_or_else(|_| Position::initial())
    }

    #[test]
    fn initial_position_is_balanced() {
        assert_eq!(evaluate(&Position::initial()), 0);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let pos = position("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
        assert_eq!(evaluate(&pos), evaluate(&pos));
        assert_eq!(evaluate(&pos), evaluate(&pos.clone()));
    }

    #[test]
    fn missing_black_queen_is_worth_nine_for_white() {
        let pos = position("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(evaluate(&pos), 9);
        assert_eq!(evaluate_for(&pos, Color::White), 9);
        assert_eq!(evaluate_for(&pos, Color::Black), -9);
    }

    #[test]
    fn kings_do_not_count() {
        assert_eq!(piece_value(Role::King), 0);
        assert_eq!(evaluate(&position("7k/8/8/8/8/8/8/K7 w - - 0 1")), 0);
    }

    #[test]
    fn minor_pieces_and_rooks_use_standard_values() {
        // 白: R + N + P = 9、黒: B + B = 6
        let pos = position("4k3/8/3bb3/8/8/8/4P3/R3K1N1 w - - 0 1");
        assert_eq!(evaluate(&pos), 3);
    }
}
