//! Precomputed attack tables for non-sliding pieces.

use static_init::dynamic;
use crate::attacks::manual;
use crate::utils::{Bitboard, Color, Square};

/// Precomputed attacks table for kings.
#[dynamic]
static SINGLE_KING_ATTACKS: [Bitboard; 64] = {
    let mut attacks = [0; 64];
    for square in Square::iter_all() {
        attacks[square as usize] = manual::multi_king_attacks(square.to_mask());
    }
    attacks
};

/// Precomputed attacks table for knights.
#[dynamic]
static SINGLE_KNIGHT_ATTACKS: [Bitboard; 64] = {
    let mut attacks = [0; 64];
    for square in Square::iter_all() {
        attacks[square as usize] = manual::multi_knight_attacks(square.to_mask());
    }
    attacks
};

/// Precomputed pawn capture targets, indexed by color then square.
#[dynamic]
static SINGLE_PAWN_ATTACKS: [[Bitboard; 64]; 2] = {
    let mut attacks = [[0; 64]; 2];
    for color in Color::iter() {
        for square in Square::iter_all() {
            attacks[color as usize][square as usize] = manual::multi_pawn_attacks(square.to_mask(), color);
        }
    }
    attacks
};

/// Returns a precomputed bitboard with all squares attacked by a king on `src_square`
pub fn precomputed_single_king_attacks(src_square: Square) -> Bitboard {
    SINGLE_KING_ATTACKS[src_square as usize]
}

/// Returns a precomputed bitboard with all squares attacked by a knight on `src_square`
pub fn precomputed_single_knight_attacks(src_square: Square) -> Bitboard {
    SINGLE_KNIGHT_ATTACKS[src_square as usize]
}

/// Returns a precomputed bitboard with the capture targets of a `by_color` pawn on `src_square`
pub fn precomputed_single_pawn_attacks(src_square: Square, by_color: Color) -> Bitboard {
    SINGLE_PAWN_ATTACKS[by_color as usize][src_square as usize]
}
