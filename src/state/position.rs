//! Contains the Position struct, the full game state needed to generate and apply moves.

use crate::state::{Board, CastlingRights};
use crate::utils::{Color, PieceType, Square};
use crate::utils::masks::{CASTLING_CHECK_MASK_LONG, CASTLING_CHECK_MASK_SHORT, STARTING_KING_ROOK_GAP_LONG, STARTING_KING_ROOK_GAP_SHORT};

/// A struct containing all the information needed to represent a position in a chess game.
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    /// Square passed over by the last double pawn push, set after every double push.
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove: u16,
}

impl Position {
    /// Creates a blank position with no pieces on the board.
    pub fn blank() -> Position {
        Position {
            board: Board::blank(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn initial() -> Position {
        Position {
            board: Board::initial(),
            castling_rights: CastlingRights::ALL,
            ..Position::blank()
        }
    }

    /// White to move, as the encoder requires.
    pub const fn is_canonical(&self) -> bool {
        matches!(self.side_to_move, Color::White)
    }

    /// Vertical mirror with colors swapped.
    /// Squares flip rank, sides trade pieces, castling rights and the move.
    pub fn mirrored(&self) -> Position {
        Position {
            board: self.board.mirrored(),
            side_to_move: self.side_to_move.flip(),
            castling_rights: self.castling_rights.mirrored(),
            en_passant: self.en_passant.map(|square| square.mirrored()),
            halfmove_clock: self.halfmove_clock,
            fullmove: self.fullmove,
        }
    }

    /// A copy with the turn handed to the opponent and the en-passant square cleared.
    pub fn with_null_move(&self) -> Position {
        Position {
            side_to_move: self.side_to_move.flip(),
            en_passant: None,
            ..*self
        }
    }

    pub fn is_in_check(&self) -> bool {
        self.board.is_color_in_check(self.side_to_move)
    }

    /// Square of `color`'s king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.board.get_piece_bb(color, PieceType::King);
        if kings == 0 {
            return None;
        }
        Square::try_from_index(kings.trailing_zeros() as u8)
    }

    /// Returns true if the current side to move has no pieces between the king and the rook for short castling.
    const fn has_castling_space_short(&self, color: Color) -> bool {
        STARTING_KING_ROOK_GAP_SHORT[color as usize] & self.board.occupancy() == 0
    }

    const fn has_castling_space_long(&self, color: Color) -> bool {
        STARTING_KING_ROOK_GAP_LONG[color as usize] & self.board.occupancy() == 0
    }

    /// Returns true if `color` may castle short: right held, path empty, and no attacked square under the king.
    pub fn can_legally_castle_short(&self, color: Color) -> bool {
        self.castling_rights.has_short(color)
            && self.has_castling_space_short(color)
            && !self.board.is_mask_attacked(CASTLING_CHECK_MASK_SHORT[color as usize], color.flip())
    }

    pub fn can_legally_castle_long(&self, color: Color) -> bool {
        self.castling_rights.has_long(color)
            && self.has_castling_space_long(color)
            && !self.board.is_mask_attacked(CASTLING_CHECK_MASK_LONG[color as usize], color.flip())
    }

    /// Quick check used after applying pseudo-legal moves: the side that just moved is not left in check.
    pub fn is_probably_valid(&self) -> bool {
        !self.board.is_color_in_check(self.side_to_move.flip())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::initial()
    }
}
