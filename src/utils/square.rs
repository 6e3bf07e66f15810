use std::fmt::Display;
use crate::utils::Bitboard;
use crate::utils::masks::{FILES, RANKS};

/// Board squares, indexed rank-major from white's side: `a1 = 0`, `h1 = 7`, `a8 = 56`, `h8 = 63`.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Square {
    A1=0, B1=1, C1=2, D1=3, E1=4, F1=5, G1=6, H1=7,
    A2=8, B2=9, C2=10, D2=11, E2=12, F2=13, G2=14, H2=15,
    A3=16, B3=17, C3=18, D3=19, E3=20, F3=21, G3=22, H3=23,
    A4=24, B4=25, C4=26, D4=27, E4=28, F4=29, G4=30, H4=31,
    A5=32, B5=33, C5=34, D5=35, E5=36, F5=37, G5=38, H5=39,
    A6=40, B6=41, C6=42, D6=43, E6=44, F6=45, G6=46, H6=47,
    A7=48, B7=49, C7=50, D7=51, E7=52, F7=53, G7=54, H7=55,
    A8=56, B8=57, C8=58, D8=59, E8=60, F8=61, G8=62, H8=63
}

const SQUARE_NAMES: [&str; 64] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

impl Square {
    /// # Safety
    /// `square_number` must be below 64.
    pub const unsafe fn from(square_number: u8) -> Square {
        assert!(square_number < 64, "Square number out of bounds");
        std::mem::transmute::<u8, Square>(square_number)
    }

    /// Checked conversion from a raw index.
    pub const fn try_from_index(square_number: u8) -> Option<Square> {
        if square_number < 64 {
            Some(unsafe { Square::from(square_number) })
        } else {
            None
        }
    }

    pub const fn from_rank_file(rank: u8, file: u8) -> Square {
        assert!(rank < 8 && file < 8, "Rank or file out of bounds");
        unsafe { Square::from(rank * 8 + file) }
    }

    pub const fn to_mask(&self) -> Bitboard {
        1 << *self as u8
    }

    pub const fn get_file(&self) -> u8 {
        *self as u8 % 8
    }

    pub const fn get_file_mask(&self) -> Bitboard {
        FILES[self.get_file() as usize]
    }

    pub const fn get_rank(&self) -> u8 {
        *self as u8 / 8
    }

    pub const fn get_rank_mask(&self) -> Bitboard {
        RANKS[self.get_rank() as usize]
    }

    pub const fn get_file_char(&self) -> char {
        (b'a' + self.get_file()) as char
    }

    pub const fn get_rank_char(&self) -> char {
        (b'1' + self.get_rank()) as char
    }

    /// Vertical mirror: rank `r` becomes `7 - r`, file unchanged.
    pub const fn mirrored(&self) -> Square {
        unsafe { Square::from(*self as u8 ^ 56) }
    }

    pub const fn readable(&self) -> &'static str {
        SQUARE_NAMES[*self as usize]
    }

    /// Parses a square name such as `"e4"`.
    pub fn from_readable(name: &str) -> Option<Square> {
        let mut chars = name.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => {
                Some(Square::from_rank_file(rank as u8 - b'1', file as u8 - b'a'))
            }
            _ => None
        }
    }

    pub fn iter_all() -> impl Iterator<Item = Square> {
        Square::iter_between(Square::A1, Square::H8)
    }

    pub fn iter_between(first: Square, last: Square) -> impl Iterator<Item = Square> {
        (first as u8..=last as u8).map(|n| unsafe { Square::from(n) })
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.readable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        assert_eq!(Square::A1 as u8, 0);
        assert_eq!(Square::H1 as u8, 7);
        assert_eq!(Square::A8 as u8, 56);
        assert_eq!(Square::H8 as u8, 63);
        assert_eq!(Square::E4.get_rank(), 3);
        assert_eq!(Square::E4.get_file(), 4);
        assert_eq!(Square::E4.to_mask(), 1 << 28);
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(Square::A1.mirrored(), Square::A8);
        assert_eq!(Square::E2.mirrored(), Square::E7);
        for square in Square::iter_all() {
            assert_eq!(square.mirrored().mirrored(), square);
            assert_eq!(square.mirrored().get_rank(), 7 - square.get_rank());
            assert_eq!(square.mirrored().get_file(), square.get_file());
        }
    }

    #[test]
    fn test_readable() {
        for square in Square::iter_all() {
            assert_eq!(Square::from_readable(square.readable()), Some(square));
        }
        assert_eq!(Square::from_readable("i1"), None);
        assert_eq!(Square::from_readable("a9"), None);
        assert_eq!(Square::from_readable("a10"), None);
    }
}
