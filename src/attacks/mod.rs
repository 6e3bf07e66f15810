//! Attack generation for every piece kind.

mod manual;
mod precomputed;

use crate::utils::{Bitboard, Color, Square};

pub fn single_knight_attacks(src_square: Square) -> Bitboard {
    precomputed::precomputed_single_knight_attacks(src_square)
}

pub fn single_king_attacks(src_square: Square) -> Bitboard {
    precomputed::precomputed_single_king_attacks(src_square)
}

pub fn single_pawn_attacks(src_square: Square, by_color: Color) -> Bitboard {
    precomputed::precomputed_single_pawn_attacks(src_square, by_color)
}

pub fn multi_knight_attacks(knights_mask: Bitboard) -> Bitboard {
    manual::multi_knight_attacks(knights_mask)
}

pub fn multi_king_attacks(kings_mask: Bitboard) -> Bitboard {
    manual::multi_king_attacks(kings_mask)
}

pub fn multi_pawn_attacks(pawns_mask: Bitboard, by_color: Color) -> Bitboard {
    manual::multi_pawn_attacks(pawns_mask, by_color)
}

pub fn multi_pawn_moves(pawns_mask: Bitboard, by_color: Color) -> Bitboard {
    manual::multi_pawn_moves(pawns_mask, by_color)
}

pub fn single_rook_attacks(src_square: Square, occupied_mask: Bitboard) -> Bitboard {
    manual::manual_single_rook_attacks(src_square, occupied_mask)
}

pub fn single_bishop_attacks(src_square: Square, occupied_mask: Bitboard) -> Bitboard {
    manual::manual_single_bishop_attacks(src_square, occupied_mask)
}
