use crate::utils::Square;

/// One bit per square, bit `n` is square `n` (a1 = bit 0).
pub type Bitboard = u64;

#[derive(Debug, Clone)]
pub struct SquaresFromMaskIterator {
    mask: Bitboard,
}

impl From<Bitboard> for SquaresFromMaskIterator {
    fn from(mask: Bitboard) -> Self {
        SquaresFromMaskIterator {
            mask,
        }
    }
}

impl Iterator for SquaresFromMaskIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == 0 {
            return None;
        }

        let square_index = self.mask.trailing_zeros();
        self.mask &= self.mask - 1;  // Clear the least significant set bit

        unsafe {
            Some(Square::from(square_index as u8))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.mask.count_ones() as usize;
        (count, Some(count))
    }
}

/// Iterates the squares of `mask` in ascending index order.
pub fn get_squares_from_mask_iter(mask: Bitboard) -> SquaresFromMaskIterator {
    mask.into()
}

/// Flips a bitboard vertically so that rank `r` lands on rank `7 - r`.
pub const fn mirror_bitboard(mask: Bitboard) -> Bitboard {
    mask.swap_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares_from_mask_iter() {
        let squares: Vec<Square> = get_squares_from_mask_iter(0).collect();
        assert!(squares.is_empty());

        let mask = Square::A1.to_mask() | Square::E4.to_mask() | Square::H8.to_mask();
        let squares: Vec<Square> = get_squares_from_mask_iter(mask).collect();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
    }

    #[test]
    fn test_mirror_bitboard() {
        for square in Square::iter_all() {
            assert_eq!(mirror_bitboard(square.to_mask()), square.mirrored().to_mask());
        }
        let mask = 0x0123_4567_89ab_cdef;
        assert_eq!(mirror_bitboard(mirror_bitboard(mask)), mask);
    }
}
