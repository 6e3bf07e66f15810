use crate::r#move::MoveFlag;
use crate::utils::{PromotionPiece, Square};

/// Represents a move in the game.
/// Internally, it is stored as a 16-bit unsigned integer.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// format: {6 bit dest}{6 bit src}{2 bit promotion: knight, bishop, rook, queen}{2 bit MoveFlag value}
    pub value: u16,
}

impl Move {
    /// Promotion bits stored for moves that do not promote.
    const DEFAULT_PROMOTION_BITS: u16 = 0;

    /// Creates a new non-promoting move.
    pub const fn new(src: Square, dst: Square, flag: MoveFlag) -> Move {
        assert!(!matches!(flag, MoveFlag::Promotion), "Promotions must be created with Move::new_promotion");
        Move {
            value: ((dst as u16) << 10) | ((src as u16) << 4) | (Move::DEFAULT_PROMOTION_BITS << 2) | flag as u16
        }
    }

    /// Creates a new promotion move.
    pub const fn new_promotion(src: Square, dst: Square, promotion: PromotionPiece) -> Move {
        let promotion_bits: u16 = match promotion {
            PromotionPiece::Knight => 0,
            PromotionPiece::Bishop => 1,
            PromotionPiece::Rook => 2,
            PromotionPiece::Queen => 3
        };
        Move {
            value: ((dst as u16) << 10) | ((src as u16) << 4) | (promotion_bits << 2) | MoveFlag::Promotion as u16
        }
    }

    /// Gets the destination square of the move.
    pub const fn get_destination(&self) -> Square {
        let dst_int = (self.value >> 10) as u8;
        unsafe { Square::from(dst_int) }
    }

    /// Gets the source square of the move.
    pub const fn get_source(&self) -> Square {
        let src_int = ((self.value & 0b0000001111110000) >> 4) as u8;
        unsafe { Square::from(src_int) }
    }

    /// Gets the flag of the move.
    pub const fn get_flag(&self) -> MoveFlag {
        MoveFlag::from_bits((self.value & 0b0000000000000011) as u8)
    }

    /// Gets the promotion piece of the move, if it promotes.
    pub const fn get_promotion(&self) -> Option<PromotionPiece> {
        if !matches!(self.get_flag(), MoveFlag::Promotion) {
            return None;
        }
        Some(match (self.value & 0b0000000000001100) >> 2 {
            0 => PromotionPiece::Knight,
            1 => PromotionPiece::Bishop,
            2 => PromotionPiece::Rook,
            _ => PromotionPiece::Queen
        })
    }

    /// True for promotions to anything other than a queen.
    pub const fn is_underpromotion(&self) -> bool {
        matches!(self.get_promotion(), Some(PromotionPiece::Knight | PromotionPiece::Bishop | PromotionPiece::Rook))
    }

    /// The same move seen from the other side of the board.
    pub const fn mirrored(&self) -> Move {
        let src = self.get_source().mirrored();
        let dst = self.get_destination().mirrored();
        Move {
            value: ((dst as u16) << 10) | ((src as u16) << 4) | (self.value & 0b1111)
        }
    }

    /// Returns a readable representation of the move.
    pub fn readable(&self) -> String {
        let flag_str = match self.get_promotion() {
            Some(promotion) => self.get_flag().to_readable().replace('?', &promotion.to_char().to_string()),
            None => self.get_flag().to_readable().to_string()
        };
        format!("{}{}{}", self.get_source(), self.get_destination(), flag_str)
    }

    /// Returns the UCI (Universal Chess Interface) representation of the move.
    pub fn uci(&self) -> String {
        let promotion_str = match self.get_promotion() {
            Some(promotion) => promotion.to_char().to_string(),
            None => "".to_string()
        };
        format!("{}{}{}", self.get_source(), self.get_destination(), promotion_str)
    }

    /// Parses a UCI move such as `e2e4` or `d7c8n`.
    /// Non-promoting moves come back as normal moves; castling and en passant are
    /// recognized when the move is applied.
    pub fn from_uci(uci: &str) -> Option<Move> {
        if !uci.is_ascii() || !(4..=5).contains(&uci.len()) {
            return None;
        }
        let src = Square::from_readable(&uci[0..2])?;
        let dst = Square::from_readable(&uci[2..4])?;
        match uci[4..].chars().next() {
            Some(c) => Some(Move::new_promotion(src, dst, PromotionPiece::from_char(c)?)),
            None => Some(Move::new(src, dst, MoveFlag::NormalMove))
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uci())
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.readable())
    }
}
