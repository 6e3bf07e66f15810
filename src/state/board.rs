//! Piece placement, stored as one bitboard per piece type and one per color.

use std::fmt::Display;
use crate::attacks::{multi_king_attacks, multi_knight_attacks, multi_pawn_attacks, single_bishop_attacks, single_rook_attacks};
use crate::utils::{get_squares_from_mask_iter, mirror_bitboard, Bitboard, Color, ColoredPiece, PieceType, Square};
use crate::utils::masks::*;

/// Piece placement. `piece_type_masks[0]` is the union of every piece.
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub struct Board {
    pub piece_type_masks: [Bitboard; PieceType::LIMIT as usize],
    pub color_masks: [Bitboard; 2],
}

impl Board {
    pub fn initial() -> Board {
        Board {
            piece_type_masks: [
                STARTING_ALL,
                STARTING_WP | STARTING_BP,
                STARTING_WN | STARTING_BN,
                STARTING_WB | STARTING_BB,
                STARTING_WR | STARTING_BR,
                STARTING_WQ | STARTING_BQ,
                STARTING_WK | STARTING_BK
            ],
            color_masks: [
                STARTING_WHITE,
                STARTING_BLACK
            ],
        }
    }

    pub fn blank() -> Board {
        Board {
            piece_type_masks: [0; PieceType::LIMIT as usize],
            color_masks: [0; 2],
        }
    }

    pub const fn occupancy(&self) -> Bitboard {
        self.piece_type_masks[PieceType::AllPieceTypes as usize]
    }

    pub const fn get_colored_piece_bb(&self, colored_piece: ColoredPiece) -> Bitboard {
        let piece_type = colored_piece.get_piece_type();
        let color = colored_piece.get_color();

        self.piece_type_masks[piece_type as usize] & self.color_masks[color as usize]
    }

    pub const fn get_piece_bb(&self, color: Color, piece_type: PieceType) -> Bitboard {
        self.piece_type_masks[piece_type as usize] & self.color_masks[color as usize]
    }

    pub fn get_piece_type_at(&self, square: Square) -> PieceType {
        let square_mask = square.to_mask();
        for piece_type in PieceType::iter_pieces() {
            if self.piece_type_masks[piece_type as usize] & square_mask != 0 {
                return piece_type;
            }
        }
        PieceType::NoPieceType
    }

    pub fn get_colored_piece_at(&self, square: Square) -> ColoredPiece {
        let piece_type = self.get_piece_type_at(square);
        let is_black = self.color_masks[Color::Black as usize] & square.to_mask() != 0;
        ColoredPiece::from(Color::from(is_black), piece_type)
    }

    pub fn put_colored_piece_at(&mut self, colored_piece: ColoredPiece, square: Square) {
        let mask = square.to_mask();
        self.clear_piece_at(mask);
        if colored_piece == ColoredPiece::NoPiece {
            return;
        }
        self.color_masks[colored_piece.get_color() as usize] |= mask;
        self.piece_type_masks[colored_piece.get_piece_type() as usize] |= mask;
        self.piece_type_masks[PieceType::AllPieceTypes as usize] |= mask;
    }

    pub fn clear_piece_at(&mut self, mask: Bitboard) {
        for piece_mask in self.piece_type_masks.iter_mut() {
            *piece_mask &= !mask;
        }
        for color_mask in self.color_masks.iter_mut() {
            *color_mask &= !mask;
        }
    }

    /// Moves whatever stands on `src` to `dst`, removing anything previously on `dst`.
    pub fn move_piece(&mut self, src: Square, dst: Square) {
        let moved = self.get_colored_piece_at(src);
        self.clear_piece_at(src.to_mask());
        self.put_colored_piece_at(moved, dst);
    }

    /// Colors are swapped and ranks flipped, so white's pieces become black's on the mirrored squares.
    pub fn mirrored(&self) -> Board {
        let mut piece_type_masks = [0; PieceType::LIMIT as usize];
        for (mirrored_mask, mask) in piece_type_masks.iter_mut().zip(self.piece_type_masks.iter()) {
            *mirrored_mask = mirror_bitboard(*mask);
        }
        Board {
            piece_type_masks,
            color_masks: [
                mirror_bitboard(self.color_masks[Color::Black as usize]),
                mirror_bitboard(self.color_masks[Color::White as usize])
            ],
        }
    }

    /// Union of every square attacked by `by_color`, kings included.
    pub fn attacks_by(&self, by_color: Color) -> Bitboard {
        let attacking_color_pieces = self.color_masks[by_color as usize];
        let all_occ = self.occupancy();
        let queens_bb = self.piece_type_masks[PieceType::Queen as usize];

        let mut attacks = multi_pawn_attacks(self.piece_type_masks[PieceType::Pawn as usize] & attacking_color_pieces, by_color);
        attacks |= multi_knight_attacks(self.piece_type_masks[PieceType::Knight as usize] & attacking_color_pieces);
        for square in get_squares_from_mask_iter((self.piece_type_masks[PieceType::Bishop as usize] | queens_bb) & attacking_color_pieces) {
            attacks |= single_bishop_attacks(square, all_occ);
        }
        for square in get_squares_from_mask_iter((self.piece_type_masks[PieceType::Rook as usize] | queens_bb) & attacking_color_pieces) {
            attacks |= single_rook_attacks(square, all_occ);
        }
        attacks |= multi_king_attacks(self.piece_type_masks[PieceType::King as usize] & attacking_color_pieces);
        attacks
    }

    pub fn is_mask_attacked(&self, mask: Bitboard, by_color: Color) -> bool {
        self.attacks_by(by_color) & mask != 0
    }

    pub fn is_color_in_check(&self, color: Color) -> bool { // including by king
        self.is_mask_attacked(
            self.get_piece_bb(color, PieceType::King),
            color.flip()
        )
    }

    /// Neither side can ever deliver mate, however the other plays.
    pub fn are_both_sides_insufficient_material(&self) -> bool {
        Color::iter().all(|color| self.is_insufficient_material_for(color))
    }

    /// Whether `color` has no mating material left, counting help from the opponent's pieces.
    pub fn is_insufficient_material_for(&self, color: Color) -> bool {
        let own = self.color_masks[color as usize];
        let opponent = self.color_masks[color.flip() as usize];
        let pawns = self.piece_type_masks[PieceType::Pawn as usize];
        let knights = self.piece_type_masks[PieceType::Knight as usize];
        let bishops = self.piece_type_masks[PieceType::Bishop as usize];
        let heavy = pawns | self.piece_type_masks[PieceType::Rook as usize] | self.piece_type_masks[PieceType::Queen as usize];

        if own & heavy != 0 {
            return false;
        }
        if own & knights != 0 {
            // A lone knight only mates when the defender's own pieces block the king in.
            let blockers = opponent & !self.piece_type_masks[PieceType::King as usize] & !self.piece_type_masks[PieceType::Queen as usize];
            return own.count_ones() <= 2 && blockers == 0;
        }
        if own & bishops != 0 {
            let one_square_color = bishops & DARK_SQUARES == 0 || bishops & LIGHT_SQUARES == 0;
            return one_square_color && pawns == 0 && knights == 0;
        }
        true
    }

    pub fn is_consistent(&self) -> bool {
        let white_bb = self.color_masks[Color::White as usize];
        let black_bb = self.color_masks[Color::Black as usize];
        if white_bb & black_bb != 0 {
            return false;
        }

        let all_occupancy_bb = self.occupancy();
        if (white_bb | black_bb) != all_occupancy_bb {
            return false;
        }

        let mut all_occupancy_bb_reconstructed: Bitboard = 0;
        for piece_type in PieceType::iter_pieces() {
            let piece_bb = self.piece_type_masks[piece_type as usize];
            if piece_bb & all_occupancy_bb_reconstructed != 0 {
                return false;
            }
            all_occupancy_bb_reconstructed |= piece_bb;
        }

        all_occupancy_bb_reconstructed == all_occupancy_bb
    }

    pub const fn has_valid_kings(&self) -> bool {
        let white_bb = self.color_masks[Color::White as usize];
        let kings_bb = self.piece_type_masks[PieceType::King as usize];

        kings_bb.count_ones() == 2 && (white_bb & kings_bb).count_ones() == 1
    }

    pub fn is_valid(&self) -> bool {
        self.is_consistent() && self.has_valid_kings()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let piece = self.get_colored_piece_at(Square::from_rank_file(rank, file));
                let c = match piece {
                    ColoredPiece::NoPiece => '.',
                    _ => piece.to_char()
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
