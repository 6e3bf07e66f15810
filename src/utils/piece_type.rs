use serde::{Deserialize, Serialize};
use subenum::subenum;

/// Piece kinds. `NoPieceType` doubles as the index of the all-pieces occupancy mask.
#[subenum(PromotionPiece)]
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PieceType {
    NoPieceType=0,
    Pawn=1,
    #[subenum(PromotionPiece)]
    Knight=2,
    #[subenum(PromotionPiece)]
    Bishop=3,
    #[subenum(PromotionPiece)]
    Rook=4,
    #[subenum(PromotionPiece)]
    Queen=5,
    King=6
}

const ALL_PIECES: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King
];

const PIECE_CHARS: &[u8; 7] = b" PNBRQK";

const ALL_PROMOTION_PIECES: [PromotionPiece; 4] = [
    PromotionPiece::Knight,
    PromotionPiece::Bishop,
    PromotionPiece::Rook,
    PromotionPiece::Queen
];

impl PieceType {
    pub const LIMIT: u8 = 7;
    pub const AllPieceTypes: PieceType = PieceType::NoPieceType;

    /// # Safety
    /// `piece_type_number` must be below `PieceType::LIMIT`.
    pub const unsafe fn from(piece_type_number: u8) -> PieceType {
        assert!(piece_type_number < PieceType::LIMIT, "Piece type number out of bounds");
        std::mem::transmute::<u8, PieceType>(piece_type_number)
    }

    /// Uppercase FEN letter, or a space for `NoPieceType`.
    pub const fn to_char(&self) -> char {
        PIECE_CHARS[*self as usize] as char
    }

    /// Reads a FEN letter in either case.
    pub const fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None
        }
    }

    pub fn iter_pieces() -> impl Iterator<Item = PieceType> {
        ALL_PIECES.iter().copied()
    }
}

impl PromotionPiece {
    pub fn iter() -> impl Iterator<Item = PromotionPiece> {
        ALL_PROMOTION_PIECES.iter().copied()
    }

    /// Lowercase promotion suffix used in UCI notation.
    pub fn to_char(&self) -> char {
        let piece_type: PieceType = (*self).into();
        piece_type.to_char().to_ascii_lowercase()
    }

    pub fn from_char(c: char) -> Option<PromotionPiece> {
        PieceType::from_char(c)?.try_into().ok()
    }
}
