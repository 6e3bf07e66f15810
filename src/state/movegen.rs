//! Move generation functions for the position struct

use crate::attacks::{multi_pawn_moves, single_bishop_attacks, single_king_attacks, single_knight_attacks, single_pawn_attacks, single_rook_attacks};
use crate::r#move::{Move, MoveFlag};
use crate::state::Position;
use crate::utils::{get_squares_from_mask_iter, Bitboard, Color, PieceType, PromotionPiece, Square};
use crate::utils::masks::{RANK_1, RANK_3, RANK_6, RANK_8};

fn add_pawn_promotion_moves(moves: &mut Vec<Move>, src: Square, dst: Square) {
    for promotion_piece in PromotionPiece::iter() {
        moves.push(Move::new_promotion(src, dst, promotion_piece));
    }
}

fn add_moves_from_mask(moves: &mut Vec<Move>, src: Square, dst_mask: Bitboard) {
    for dst in get_squares_from_mask_iter(dst_mask) {
        moves.push(Move::new(src, dst, MoveFlag::NormalMove));
    }
}

impl Position {
    fn add_pawn_pseudolegal(&self, moves: &mut Vec<Move>) {
        let own_bb = self.board.color_masks[self.side_to_move as usize];
        let opposite_bb = self.board.color_masks[self.side_to_move.flip() as usize];
        let empty_bb = !self.board.occupancy();
        let pawns_bb = self.board.piece_type_masks[PieceType::Pawn as usize] & own_bb;

        let (promotion_rank, single_push_rank) = match self.side_to_move {
            Color::White => (RANK_8, RANK_3),
            Color::Black => (RANK_1, RANK_6)
        };

        for src in get_squares_from_mask_iter(pawns_bb) {
            let captures = single_pawn_attacks(src, self.side_to_move) & opposite_bb;
            for dst in get_squares_from_mask_iter(captures) {
                if dst.to_mask() & promotion_rank != 0 {
                    add_pawn_promotion_moves(moves, src, dst);
                } else {
                    moves.push(Move::new(src, dst, MoveFlag::NormalMove));
                }
            }

            if let Some(en_passant) = self.en_passant {
                if single_pawn_attacks(src, self.side_to_move) & en_passant.to_mask() != 0 {
                    moves.push(Move::new(src, en_passant, MoveFlag::EnPassant));
                }
            }

            let single_push = multi_pawn_moves(src.to_mask(), self.side_to_move) & empty_bb;
            if single_push == 0 {
                continue;
            }
            let single_push_square = unsafe { Square::from(single_push.trailing_zeros() as u8) };
            if single_push & promotion_rank != 0 {
                add_pawn_promotion_moves(moves, src, single_push_square);
                continue;
            }
            moves.push(Move::new(src, single_push_square, MoveFlag::NormalMove));

            if single_push & single_push_rank != 0 {
                let double_push = multi_pawn_moves(single_push, self.side_to_move) & empty_bb;
                if double_push != 0 {
                    let double_push_square = unsafe { Square::from(double_push.trailing_zeros() as u8) };
                    moves.push(Move::new(src, double_push_square, MoveFlag::NormalMove));
                }
            }
        }
    }

    fn add_piece_pseudolegal(&self, moves: &mut Vec<Move>) {
        let own_bb = self.board.color_masks[self.side_to_move as usize];
        let all_occupancy_bb = self.board.occupancy();

        for src in get_squares_from_mask_iter(self.board.get_piece_bb(self.side_to_move, PieceType::Knight)) {
            add_moves_from_mask(moves, src, single_knight_attacks(src) & !own_bb);
        }
        for src in get_squares_from_mask_iter(self.board.get_piece_bb(self.side_to_move, PieceType::Bishop)) {
            add_moves_from_mask(moves, src, single_bishop_attacks(src, all_occupancy_bb) & !own_bb);
        }
        for src in get_squares_from_mask_iter(self.board.get_piece_bb(self.side_to_move, PieceType::Rook)) {
            add_moves_from_mask(moves, src, single_rook_attacks(src, all_occupancy_bb) & !own_bb);
        }
        for src in get_squares_from_mask_iter(self.board.get_piece_bb(self.side_to_move, PieceType::Queen)) {
            let queen_moves = single_rook_attacks(src, all_occupancy_bb) | single_bishop_attacks(src, all_occupancy_bb);
            add_moves_from_mask(moves, src, queen_moves & !own_bb);
        }
        for src in get_squares_from_mask_iter(self.board.get_piece_bb(self.side_to_move, PieceType::King)) {
            add_moves_from_mask(moves, src, single_king_attacks(src) & !own_bb);
        }
    }

    fn add_castling_pseudolegal(&self, moves: &mut Vec<Move>) {
        let king_src_square = match self.side_to_move {
            Color::White => Square::E1,
            Color::Black => Square::E8
        };
        if self.board.get_piece_bb(self.side_to_move, PieceType::King) & king_src_square.to_mask() == 0 {
            return;
        }

        if self.can_legally_castle_short(self.side_to_move) {
            let king_dst_square = unsafe { Square::from(king_src_square as u8 + 2) };
            moves.push(Move::new(king_src_square, king_dst_square, MoveFlag::Castling));
        }
        if self.can_legally_castle_long(self.side_to_move) {
            let king_dst_square = unsafe { Square::from(king_src_square as u8 - 2) };
            moves.push(Move::new(king_src_square, king_dst_square, MoveFlag::Castling));
        }
    }

    /// Returns a vector of pseudolegal moves.
    /// Targets include any enemy piece, the enemy king among them.
    pub fn pseudolegal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = Vec::new();
        self.add_pawn_pseudolegal(&mut moves);
        self.add_piece_pseudolegal(&mut moves);
        self.add_castling_pseudolegal(&mut moves);
        moves
    }

    /// Returns a vector of legal moves.
    /// Each pseudolegal move is applied to a copy and kept if the mover's king is not left attacked.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pseudolegal_moves()
            .into_iter()
            .filter(|mv| {
                let mut position = *self;
                position.apply_move(*mv);
                position.is_probably_valid()
            })
            .collect()
    }

    /// Finds the legal move with the given UCI spelling.
    pub fn find_legal_move(&self, uci: &str) -> Option<Move> {
        self.legal_moves().into_iter().find(|mv| mv.uci() == uci)
    }

    /// Counts the leaf nodes of the legal move tree to the given depth.
    pub fn perft(&self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves.iter()
            .map(|mv| {
                let mut position = *self;
                position.apply_move(*mv);
                position.perft(depth - 1)
            })
            .sum()
    }
}
