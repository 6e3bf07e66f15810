use crate::utils::{Bitboard, Color, Square};

/// Castling rights packed into four bits: white short, white long, black short, black long (high to low).
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug, Default)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(0b1111);
    pub const NONE: CastlingRights = CastlingRights(0);

    const fn short_bit(color: Color) -> u8 {
        0b1000 >> (color as u8 * 2)
    }

    const fn long_bit(color: Color) -> u8 {
        0b0100 >> (color as u8 * 2)
    }

    pub const fn has_short(&self, color: Color) -> bool {
        self.0 & CastlingRights::short_bit(color) != 0
    }

    pub const fn has_long(&self, color: Color) -> bool {
        self.0 & CastlingRights::long_bit(color) != 0
    }

    pub fn grant_short(&mut self, color: Color) {
        self.0 |= CastlingRights::short_bit(color);
    }

    pub fn grant_long(&mut self, color: Color) {
        self.0 |= CastlingRights::long_bit(color);
    }

    pub fn revoke_color(&mut self, color: Color) {
        self.0 &= !(CastlingRights::short_bit(color) | CastlingRights::long_bit(color));
    }

    /// Drops the right tied to a rook home square, if `square` is one.
    pub fn revoke_for_square(&mut self, square: Square) {
        match square {
            Square::H1 => self.0 &= !CastlingRights::short_bit(Color::White),
            Square::A1 => self.0 &= !CastlingRights::long_bit(Color::White),
            Square::H8 => self.0 &= !CastlingRights::short_bit(Color::Black),
            Square::A8 => self.0 &= !CastlingRights::long_bit(Color::Black),
            _ => {}
        }
    }

    /// Swaps white's and black's rights.
    pub const fn mirrored(&self) -> CastlingRights {
        CastlingRights(((self.0 & 0b1100) >> 2) | ((self.0 & 0b0011) << 2))
    }

    /// One bit per right, set on the home square of the rook that right refers to.
    pub fn rook_home_mask(&self) -> Bitboard {
        let mut mask = 0;
        if self.has_short(Color::White) {
            mask |= Square::H1.to_mask();
        }
        if self.has_long(Color::White) {
            mask |= Square::A1.to_mask();
        }
        if self.has_short(Color::Black) {
            mask |= Square::H8.to_mask();
        }
        if self.has_long(Color::Black) {
            mask |= Square::A8.to_mask();
        }
        mask
    }

    pub fn to_fen(&self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        "KQkq".chars()
            .enumerate()
            .filter(|(i, _)| self.0 & (0b1000 >> i) != 0)
            .map(|(_, c)| c)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.has_short(Color::White) && rights.has_long(Color::Black));
        rights.revoke_for_square(Square::A8);
        assert!(!rights.has_long(Color::Black));
        assert_eq!(rights.to_fen(), "KQk");
        rights.revoke_color(Color::White);
        assert_eq!(rights.to_fen(), "k");
        assert_eq!(CastlingRights::NONE.to_fen(), "-");
    }

    #[test]
    fn test_mirrored() {
        let rights = CastlingRights(0b1001);
        assert_eq!(rights.mirrored(), CastlingRights(0b0110));
        assert_eq!(rights.mirrored().mirrored(), rights);
        assert_eq!(CastlingRights::ALL.rook_home_mask().count_ones(), 4);
    }
}
