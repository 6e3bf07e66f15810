//! All Zobrist hashing-related code.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use static_init::dynamic;
use crate::attacks::single_pawn_attacks;
use crate::state::Position;
use crate::utils::{get_squares_from_mask_iter, Bitboard, Color, PieceType, Square};

const ZOBRIST_SEED: u64 = 0x5eed_c0de_2024_0001;

/// Random keys for every position feature that distinguishes transpositions.
struct ZobristTable {
    pieces: [[[Bitboard; 64]; 6]; 2],
    castling: [Bitboard; 16],
    en_passant_file: [Bitboard; 8],
    black_to_move: Bitboard,
}

/// Keys are generated from a fixed seed, so transposition keys are stable across runs.
#[dynamic]
static ZOBRIST_TABLE: ZobristTable = generate_zobrist_table();

fn generate_zobrist_table() -> ZobristTable {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut table = ZobristTable {
        pieces: [[[0; 64]; 6]; 2],
        castling: [0; 16],
        en_passant_file: [0; 8],
        black_to_move: 0,
    };
    for color_keys in table.pieces.iter_mut() {
        for piece_keys in color_keys.iter_mut() {
            for key in piece_keys.iter_mut() {
                *key = rng.gen();
            }
        }
    }
    for key in table.castling.iter_mut() {
        *key = rng.gen();
    }
    for key in table.en_passant_file.iter_mut() {
        *key = rng.gen();
    }
    table.black_to_move = rng.gen();
    table
}

/// Gets the Zobrist key for a piece on a square.
pub fn get_piece_zobrist_hash(color: Color, piece_type: PieceType, square: Square) -> Bitboard {
    ZOBRIST_TABLE.pieces[color as usize][piece_type as usize - 1][square as usize]
}

impl Position {
    /// Whether a pawn of the side to move actually attacks the en-passant square.
    pub fn has_en_passant_capture(&self) -> bool {
        match self.en_passant {
            Some(square) => {
                let pawns = self.board.get_piece_bb(self.side_to_move, PieceType::Pawn);
                single_pawn_attacks(square, self.side_to_move.flip()) & pawns != 0
            }
            None => false
        }
    }

    /// Key identifying positions that are the same for repetition purposes:
    /// placement, side to move, castling rights and a capturable en-passant file.
    /// Move counters are not part of the key.
    pub fn transposition_key(&self) -> Bitboard {
        let mut hash: Bitboard = 0;
        for color in Color::iter() {
            for piece_type in PieceType::iter_pieces() {
                for square in get_squares_from_mask_iter(self.board.get_piece_bb(color, piece_type)) {
                    hash ^= get_piece_zobrist_hash(color, piece_type, square);
                }
            }
        }
        hash ^= ZOBRIST_TABLE.castling[self.castling_rights.0 as usize & 0b1111];
        if self.has_en_passant_capture() {
            if let Some(square) = self.en_passant {
                hash ^= ZOBRIST_TABLE.en_passant_file[square.get_file() as usize];
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST_TABLE.black_to_move;
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use crate::r#move::{Move, MoveFlag};
    use crate::state::Position;
    use crate::utils::Square;

    #[test]
    fn test_transposition_key_ignores_move_order() {
        let mut a = Position::initial();
        for (src, dst) in [(Square::G1, Square::F3), (Square::G8, Square::F6), (Square::B1, Square::C3)] {
            a.apply_move(Move::new(src, dst, MoveFlag::NormalMove));
        }
        let mut b = Position::initial();
        for (src, dst) in [(Square::B1, Square::C3), (Square::G8, Square::F6), (Square::G1, Square::F3)] {
            b.apply_move(Move::new(src, dst, MoveFlag::NormalMove));
        }
        assert_eq!(a.transposition_key(), b.transposition_key());
        assert_ne!(a.transposition_key(), Position::initial().transposition_key());
    }

    #[test]
    fn test_transposition_key_ignores_uncapturable_en_passant() {
        let mut position = Position::initial();
        position.apply_move(Move::new(Square::E2, Square::E4, MoveFlag::NormalMove));
        assert!(!position.has_en_passant_capture());
        let without_en_passant = Position { en_passant: None, ..position };
        assert_eq!(position.transposition_key(), without_en_passant.transposition_key());
    }

    #[test]
    fn test_transposition_key_counts_capturable_en_passant() {
        let position = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        assert!(position.has_en_passant_capture());
        let without_en_passant = Position { en_passant: None, ..position };
        assert_ne!(position.transposition_key(), without_en_passant.transposition_key());
    }

    #[test]
    fn test_side_to_move_changes_key() {
        let position = Position::initial();
        assert_ne!(position.transposition_key(), position.with_null_move().transposition_key());
    }
}
