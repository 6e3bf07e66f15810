use crate::r#move::{Move, MoveFlag};
use crate::state::Position;
use crate::utils::{Color, ColoredPiece, PieceType, Square};

impl Position {
    /// Plays `mv` in place. The move is trusted to be pseudo-legal for the side to move.
    ///
    /// A king move of two files is played as castling and a pawn landing on the
    /// en-passant square diagonally is played as an en-passant capture, even if
    /// the move was built without the matching flag.
    pub fn apply_move(&mut self, mv: Move) {
        let src = mv.get_source();
        let dst = mv.get_destination();
        let mover = self.side_to_move;
        let moved_piece = self.board.get_piece_type_at(src);
        let captured_piece = self.board.get_piece_type_at(dst);

        let flag = match (mv.get_flag(), moved_piece) {
            (MoveFlag::NormalMove, PieceType::King) if src.get_file().abs_diff(dst.get_file()) == 2 => MoveFlag::Castling,
            (MoveFlag::NormalMove, PieceType::Pawn)
                if Some(dst) == self.en_passant && src.get_file() != dst.get_file() && captured_piece == PieceType::NoPieceType => MoveFlag::EnPassant,
            (flag, _) => flag
        };

        self.halfmove_clock += 1;
        if moved_piece == PieceType::Pawn || captured_piece != PieceType::NoPieceType {
            self.halfmove_clock = 0;
        }
        self.en_passant = None;

        match flag {
            MoveFlag::NormalMove => {
                self.board.move_piece(src, dst);
                if moved_piece == PieceType::Pawn && src.get_rank().abs_diff(dst.get_rank()) == 2 {
                    self.en_passant = Some(Square::from_rank_file((src.get_rank() + dst.get_rank()) / 2, src.get_file()));
                }
            },
            MoveFlag::Promotion => {
                self.board.clear_piece_at(src.to_mask());
                let promotion = match mv.get_promotion() {
                    Some(promotion) => promotion.into(),
                    None => PieceType::Queen
                };
                self.board.put_colored_piece_at(ColoredPiece::from(mover, promotion), dst);
            },
            MoveFlag::EnPassant => {
                self.board.move_piece(src, dst);
                // The captured pawn sits beside the mover, on the source rank.
                let captured_square = Square::from_rank_file(src.get_rank(), dst.get_file());
                self.board.clear_piece_at(captured_square.to_mask());
            },
            MoveFlag::Castling => {
                self.board.move_piece(src, dst);
                let rank = src.get_rank();
                let (rook_src, rook_dst) = match dst.get_file() > src.get_file() {
                    true => (Square::from_rank_file(rank, 7), Square::from_rank_file(rank, 5)),
                    false => (Square::from_rank_file(rank, 0), Square::from_rank_file(rank, 3))
                };
                self.board.move_piece(rook_src, rook_dst);
            }
        }

        if moved_piece == PieceType::King {
            self.castling_rights.revoke_color(mover);
        }
        self.castling_rights.revoke_for_square(src);
        self.castling_rights.revoke_for_square(dst);

        if mover == Color::Black {
            self.fullmove += 1;
        }
        self.side_to_move = mover.flip();
    }

    /// Returns a copy with `mv` applied.
    pub fn after_move(&self, mv: Move) -> Position {
        let mut position = *self;
        position.apply_move(mv);
        position
    }
}
