//! The fixed channel layout of an encoded position.

use serde::{Deserialize, Serialize};
use crate::engine::tensor::constants::{COMPACT_NUM_CHANNELS, COMPACT_NUM_LAYERS, NUM_CHANNELS, NUM_LAYERS, NUM_PIECE_TYPE_BITS};
use crate::utils::{Bitboard, PieceType};

/// Bit layers of an encoded position, in channel order.
/// "My" is the side to move of the canonical position, "opponent" the other side.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Layer {
    MyPawn = 0,
    MyRook = 1,
    MyBishop = 2,
    MyKnight = 3,
    MyQueen = 4,
    MyKing = 5,
    OppPawn = 6,
    OppRook = 7,
    OppBishop = 8,
    OppKnight = 9,
    OppQueen = 10,
    OppKing = 11,
    MyLegalFrom = 12,
    MyLegalTo = 13,
    OppLegalFrom = 14,
    OppLegalTo = 15,
    MyCastleRights = 16,
    OppCastleRights = 17,
    OppEnPassant = 18,
}

const ALL_LAYERS: [Layer; NUM_LAYERS] = [
    Layer::MyPawn, Layer::MyRook, Layer::MyBishop, Layer::MyKnight, Layer::MyQueen, Layer::MyKing,
    Layer::OppPawn, Layer::OppRook, Layer::OppBishop, Layer::OppKnight, Layer::OppQueen, Layer::OppKing,
    Layer::MyLegalFrom, Layer::MyLegalTo, Layer::OppLegalFrom, Layer::OppLegalTo,
    Layer::MyCastleRights, Layer::OppCastleRights, Layer::OppEnPassant,
];

impl Layer {
    /// Piece layer for `piece_type`, owned by the side to move when `mine` is set.
    pub const fn piece(mine: bool, piece_type: PieceType) -> Layer {
        let offset = match piece_type {
            PieceType::Pawn => 0,
            PieceType::Rook => 1,
            PieceType::Bishop => 2,
            PieceType::Knight => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
            PieceType::NoPieceType => panic!("No layer for an empty square"),
        };
        let index = match mine {
            true => offset,
            false => offset + NUM_PIECE_TYPE_BITS,
        };
        ALL_LAYERS[index]
    }

    pub fn iter() -> impl Iterator<Item = Layer> {
        ALL_LAYERS.iter().copied()
    }
}

/// Which set of layers is fed to the policy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerScheme {
    /// All 19 bit layers plus the scalar layers.
    #[default]
    Full,
    /// Pieces, en passant and merged castling rights plus the scalar layers. No legal-move layers.
    Compact,
}

impl LayerScheme {
    pub const fn num_layers(&self) -> usize {
        match self {
            LayerScheme::Full => NUM_LAYERS,
            LayerScheme::Compact => COMPACT_NUM_LAYERS,
        }
    }

    pub const fn num_channels(&self) -> usize {
        match self {
            LayerScheme::Full => NUM_CHANNELS,
            LayerScheme::Compact => COMPACT_NUM_CHANNELS,
        }
    }

    /// Selects and orders the bit layers this scheme feeds to the policy.
    pub fn select(&self, layers: &[Bitboard; NUM_LAYERS]) -> Vec<Bitboard> {
        match self {
            LayerScheme::Full => layers.to_vec(),
            LayerScheme::Compact => {
                let mut selected = layers[..Layer::OppKing as usize + 1].to_vec();
                selected.push(layers[Layer::OppEnPassant as usize]);
                selected.push(layers[Layer::MyCastleRights as usize] | layers[Layer::OppCastleRights as usize]);
                selected
            }
        }
    }
}
