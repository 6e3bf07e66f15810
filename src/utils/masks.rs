//! Constant bitboards for files, ranks and starting squares.

use crate::utils::Bitboard;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;
pub const FILES_AB: Bitboard = FILE_A | FILE_B;
pub const FILES_GH: Bitboard = FILE_G | FILE_H;

pub const FILES: [Bitboard; 8] = [
    FILE_A, FILE_A << 1, FILE_A << 2, FILE_A << 3,
    FILE_A << 4, FILE_A << 5, FILE_A << 6, FILE_A << 7
];

pub const RANK_1: Bitboard = 0xff;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_3: Bitboard = RANK_1 << 16;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_5: Bitboard = RANK_1 << 32;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

pub const RANKS: [Bitboard; 8] = [
    RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8
];

/// Squares of a1's color.
pub const DARK_SQUARES: Bitboard = 0xaa55_aa55_aa55_aa55;
pub const LIGHT_SQUARES: Bitboard = !DARK_SQUARES;

pub const STARTING_WP: Bitboard = RANK_2;
pub const STARTING_WN: Bitboard = 0x42;
pub const STARTING_WB: Bitboard = 0x24;
pub const STARTING_WR: Bitboard = 0x81;
pub const STARTING_WQ: Bitboard = 0x08;
pub const STARTING_WK: Bitboard = 0x10;

pub const STARTING_BP: Bitboard = RANK_7;
pub const STARTING_BN: Bitboard = STARTING_WN << 56;
pub const STARTING_BB: Bitboard = STARTING_WB << 56;
pub const STARTING_BR: Bitboard = STARTING_WR << 56;
pub const STARTING_BQ: Bitboard = STARTING_WQ << 56;
pub const STARTING_BK: Bitboard = STARTING_WK << 56;

pub const STARTING_WHITE: Bitboard = RANK_1 | RANK_2;
pub const STARTING_BLACK: Bitboard = RANK_7 | RANK_8;
pub const STARTING_ALL: Bitboard = STARTING_WHITE | STARTING_BLACK;

/// Squares strictly between king and rook, indexed by color.
pub const STARTING_KING_ROOK_GAP_SHORT: [Bitboard; 2] = [0x60, 0x60 << 56];
pub const STARTING_KING_ROOK_GAP_LONG: [Bitboard; 2] = [0x0e, 0x0e << 56];

/// Squares the king stands on or passes through while castling, indexed by color.
pub const CASTLING_CHECK_MASK_SHORT: [Bitboard; 2] = [0x70, 0x70 << 56];
pub const CASTLING_CHECK_MASK_LONG: [Bitboard; 2] = [0x1c, 0x1c << 56];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Square;

    #[test]
    fn test_starting_masks() {
        assert_eq!(STARTING_WK, Square::E1.to_mask());
        assert_eq!(STARTING_BQ, Square::D8.to_mask());
        assert_eq!(STARTING_WR, Square::A1.to_mask() | Square::H1.to_mask());
        assert_eq!(STARTING_KING_ROOK_GAP_LONG[1], Square::B8.to_mask() | Square::C8.to_mask() | Square::D8.to_mask());
        assert_eq!(CASTLING_CHECK_MASK_SHORT[0], Square::E1.to_mask() | Square::F1.to_mask() | Square::G1.to_mask());
        assert_eq!(STARTING_ALL.count_ones(), 32);
    }
}
