//! Side-to-move normalization: the encoder and the move codec only ever see white to move.

use crate::r#move::Move;
use crate::state::Position;
use crate::utils::Square;

/// How a canonical position relates to the position it was made from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Perspective {
    /// White was to move; nothing changed.
    Identity,
    /// Black was to move; ranks were flipped and colors swapped.
    Mirrored,
}

impl Perspective {
    pub const fn of(position: &Position) -> Perspective {
        match position.is_canonical() {
            true => Perspective::Identity,
            false => Perspective::Mirrored,
        }
    }

    pub const fn is_mirrored(&self) -> bool {
        matches!(self, Perspective::Mirrored)
    }

    /// Maps a canonical square back to the real board.
    pub const fn square(&self, square: Square) -> Square {
        match self {
            Perspective::Identity => square,
            Perspective::Mirrored => square.mirrored(),
        }
    }

    /// Maps a canonical move back to the real board. Mirroring is its own inverse,
    /// so this also takes a real move into the canonical frame.
    pub const fn real_move(&self, mv: Move) -> Move {
        match self {
            Perspective::Identity => mv,
            Perspective::Mirrored => mv.mirrored(),
        }
    }

    /// Converts a result seen from the canonical side to move into the real side to move's terms.
    pub const fn result(&self, result: i8) -> i8 {
        match self {
            Perspective::Identity => result,
            Perspective::Mirrored => -result,
        }
    }
}

/// Returns the white-to-move form of `position` and the perspective that undoes it.
pub fn canonicalize(position: &Position) -> (Position, Perspective) {
    let perspective = Perspective::of(position);
    let canonical = match perspective {
        Perspective::Identity => *position,
        Perspective::Mirrored => position.mirrored(),
    };
    (canonical, perspective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Color, ColoredPiece};

    #[test]
    fn test_white_to_move_is_identity() {
        let position = Position::initial();
        let (canonical, perspective) = canonicalize(&position);
        assert_eq!(canonical, position);
        assert_eq!(perspective, Perspective::Identity);
        assert_eq!(perspective.square(Square::C2), Square::C2);
        assert_eq!(perspective.result(1), 1);
    }

    #[test]
    fn test_black_to_move_is_mirrored() {
        let position = Position::from_fen("r3k2r/8/8/8/3pP3/8/8/4K3 b kq e3 0 1").unwrap();
        let (canonical, perspective) = canonicalize(&position);

        assert!(canonical.is_canonical());
        assert!(perspective.is_mirrored());
        assert!(canonical.castling_rights.has_short(Color::White));
        assert!(!canonical.castling_rights.has_short(Color::Black));
        assert_eq!(canonical.en_passant, Some(Square::E6));
        assert_eq!(canonical.board.get_colored_piece_at(Square::D5), ColoredPiece::WhitePawn);
        assert_eq!(canonical.board.get_colored_piece_at(Square::E1), ColoredPiece::WhiteKing);
        assert_eq!(perspective.square(Square::E6), Square::E3);
        assert_eq!(perspective.result(1), -1);
    }

    #[test]
    fn test_canonicalization_is_an_involution() {
        let position = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 2 2").unwrap();
        let (canonical, _) = canonicalize(&position);
        assert_eq!(canonical.mirrored(), position);
        assert_eq!(canonicalize(&canonical), (canonical, Perspective::Identity));
    }

    #[test]
    fn test_canonical_moves_map_back_to_legal_moves() {
        let position = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 2 2").unwrap();
        let (canonical, perspective) = canonicalize(&position);
        let mut real: Vec<Move> = canonical.legal_moves().into_iter().map(|mv| perspective.real_move(mv)).collect();
        let mut expected = position.legal_moves();
        real.sort_by_key(|mv| mv.value);
        expected.sort_by_key(|mv| mv.value);
        assert_eq!(real, expected);
    }
}
