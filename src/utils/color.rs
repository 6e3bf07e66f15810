use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Color {
    White=0, Black=1
}

impl Color {
    pub const fn from(is_black: bool) -> Color {
        match is_black {
            false => Color::White,
            true => Color::Black
        }
    }

    pub const fn flip(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White
        }
    }

    /// Score sign of this side: `+1` for white, `-1` for black.
    pub const fn sign(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1
        }
    }

    pub fn iter() -> impl Iterator<Item = Color> {
        [Color::White, Color::Black].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color() {
        assert_eq!(Color::White as u8, 0);
        assert_eq!(Color::Black as u8, 1);
        assert_eq!(Color::White.flip(), Color::Black);
        assert_eq!(Color::Black.flip(), Color::White);
        assert_eq!(Color::from(false), Color::White);
        assert_eq!(Color::from(true), Color::Black);
        assert_eq!(Color::White.sign(), 1);
        assert_eq!(Color::Black.sign(), -1);
    }
}
