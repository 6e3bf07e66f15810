use crate::utils::{Color, PieceType};

/// A piece kind paired with its side. The color lives in bit 3, the kind in the low three bits.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColoredPiece {
    NoPiece=0,
    WhitePawn=1, WhiteKnight=2, WhiteBishop=3, WhiteRook=4, WhiteQueen=5, WhiteKing=6,
    BlackPawn=9, BlackKnight=10, BlackBishop=11, BlackRook=12, BlackQueen=13, BlackKing=14
}

impl ColoredPiece {
    pub const fn from(color: Color, piece_type: PieceType) -> ColoredPiece {
        let piece_type_int = piece_type as u8;
        let is_piece = piece_type_int != PieceType::NoPieceType as u8;
        let color_int_shifted = (is_piece as u8 & color as u8) << 3;
        unsafe { std::mem::transmute::<u8, ColoredPiece>(color_int_shifted | piece_type_int) }
    }

    pub const fn get_color(&self) -> Color {
        Color::from(*self as u8 >> 3 != 0)
    }

    pub const fn get_piece_type(&self) -> PieceType {
        unsafe { PieceType::from(*self as u8 & 0b111) }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub const fn from_char(c: char) -> Option<ColoredPiece> {
        match PieceType::from_char(c) {
            Some(piece_type) => Some(ColoredPiece::from(Color::from(c.is_ascii_lowercase()), piece_type)),
            None => None
        }
    }

    pub const fn to_char(&self) -> char {
        let c = self.get_piece_type().to_char();
        match self.get_color() {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase()
        }
    }
}
