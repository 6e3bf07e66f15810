//! Contains functions that manually calculate attacks for all pieces

use crate::utils::{Bitboard, Color, Square};
use crate::utils::masks::*;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns a bitboard with all squares attacked by knights indicated by the bits in `knights_mask`
pub fn multi_knight_attacks(knights_mask: Bitboard) -> Bitboard {
    (knights_mask << 17 & !FILE_A) | (knights_mask << 15 & !FILE_H) | (knights_mask << 10 & !FILES_AB) | (knights_mask << 6 & !FILES_GH) |
        (knights_mask >> 17 & !FILE_H) | (knights_mask >> 15 & !FILE_A) | (knights_mask >> 10 & !FILES_GH) | (knights_mask >> 6 & !FILES_AB)
}

/// Returns a bitboard with all squares attacked by kings indicated by the bits in `kings_mask`
pub fn multi_king_attacks(kings_mask: Bitboard) -> Bitboard {
    (kings_mask << 9 & !FILE_A) | (kings_mask << 8) | (kings_mask << 7 & !FILE_H) |
        (kings_mask >> 9 & !FILE_H) | (kings_mask >> 8) | (kings_mask >> 7 & !FILE_A) |
        (kings_mask << 1 & !FILE_A) | (kings_mask >> 1 & !FILE_H)
}

/// Returns a bitboard with all squares attacked by pawns indicated by the bits in `pawns_mask`
pub fn multi_pawn_attacks(pawns_mask: Bitboard, by_color: Color) -> Bitboard {
    match by_color {
        Color::White => (pawns_mask << 9 & !FILE_A) | (pawns_mask << 7 & !FILE_H),
        Color::Black => (pawns_mask >> 7 & !FILE_A) | (pawns_mask >> 9 & !FILE_H)
    }
}

/// Returns a bitboard with all squares that pawns indicated by the bits in `pawns_mask` can move to
pub fn multi_pawn_moves(pawns_mask: Bitboard, by_color: Color) -> Bitboard {
    match by_color {
        Color::White => pawns_mask << 8,
        Color::Black => pawns_mask >> 8
    }
}

/// Walks each ray from `src_square` until the board edge or the first occupied square, inclusive.
fn ray_attacks(src_square: Square, occupied_mask: Bitboard, directions: &[(i8, i8)]) -> Bitboard {
    let mut result: Bitboard = 0;
    for &(rank_step, file_step) in directions {
        let mut rank = src_square.get_rank() as i8 + rank_step;
        let mut file = src_square.get_file() as i8 + file_step;
        while (0..8).contains(&rank) && (0..8).contains(&file) {
            let mask = Square::from_rank_file(rank as u8, file as u8).to_mask();
            result |= mask;
            if occupied_mask & mask != 0 {
                break;
            }
            rank += rank_step;
            file += file_step;
        }
    }
    result
}

/// Returns a bitboard with all squares attacked by a rook on `src_square`
/// with `occupied_mask` as the mask of occupied squares
pub fn manual_single_rook_attacks(src_square: Square, occupied_mask: Bitboard) -> Bitboard {
    ray_attacks(src_square, occupied_mask, &ROOK_DIRECTIONS)
}

/// Returns a bitboard with all squares attacked by a bishop on `src_square`
/// with `occupied_mask` as the mask of occupied squares
pub fn manual_single_bishop_attacks(src_square: Square, occupied_mask: Bitboard) -> Bitboard {
    ray_attacks(src_square, occupied_mask, &BISHOP_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_attacks() {
        assert_eq!(multi_knight_attacks(Square::A1.to_mask()), Square::B3.to_mask() | Square::C2.to_mask());
        assert_eq!(multi_knight_attacks(Square::E4.to_mask()).count_ones(), 8);
        assert_eq!(multi_knight_attacks(Square::H8.to_mask()), Square::G6.to_mask() | Square::F7.to_mask());
    }

    #[test]
    fn test_king_attacks() {
        assert_eq!(multi_king_attacks(Square::A1.to_mask()), Square::A2.to_mask() | Square::B1.to_mask() | Square::B2.to_mask());
        assert_eq!(multi_king_attacks(Square::H4.to_mask()).count_ones(), 5);
        assert_eq!(multi_king_attacks(Square::D5.to_mask()).count_ones(), 8);
    }

    #[test]
    fn test_pawn_attacks() {
        assert_eq!(multi_pawn_attacks(Square::A2.to_mask(), Color::White), Square::B3.to_mask());
        assert_eq!(multi_pawn_attacks(Square::H7.to_mask(), Color::Black), Square::G6.to_mask());
        assert_eq!(multi_pawn_attacks(Square::E4.to_mask(), Color::Black), Square::D3.to_mask() | Square::F3.to_mask());
    }

    #[test]
    fn test_sliding_attacks() {
        assert_eq!(manual_single_rook_attacks(Square::A1, 0).count_ones(), 14);
        assert_eq!(manual_single_bishop_attacks(Square::D4, 0).count_ones(), 13);

        let occupied = Square::A4.to_mask() | Square::D1.to_mask();
        let expected = Square::A2.to_mask() | Square::A3.to_mask() | Square::A4.to_mask()
            | Square::B1.to_mask() | Square::C1.to_mask() | Square::D1.to_mask();
        assert_eq!(manual_single_rook_attacks(Square::A1, occupied), expected);
    }
}
