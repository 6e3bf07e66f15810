mod square;
mod color;
mod piece_type;
mod colored_piece;
mod bitboard;
pub mod masks;

pub use square::*;
pub use color::*;
pub use piece_type::*;
pub use colored_piece::*;
pub use bitboard::*;
