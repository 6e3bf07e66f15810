/// Enum representing the different types of moves that can be made in a game of chess.
/// Used in the Move struct.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveFlag {
    NormalMove = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3
}

impl MoveFlag {
    /// Converts the low two bits of `value` to a MoveFlag.
    pub const fn from_bits(value: u8) -> MoveFlag {
        match value & 0b11 {
            0 => MoveFlag::NormalMove,
            1 => MoveFlag::Promotion,
            2 => MoveFlag::EnPassant,
            _ => MoveFlag::Castling
        }
    }

    /// Returns a readable representation of the move flag.
    pub const fn to_readable(&self) -> &str {
        match self {
            MoveFlag::NormalMove => "",
            MoveFlag::Promotion => "[P to ?]",
            MoveFlag::EnPassant => "[e.p.]",
            MoveFlag::Castling => "[castling]"
        }
    }
}
