//! Turns a canonical position into bit layers and float channels.

use crate::engine::tensor::constants::{NUM_LAYERS, SCALAR_LAYER_SCALE, SQUARES_PER_LAYER};
use crate::engine::tensor::layers::{Layer, LayerScheme};
use crate::r#move::Move;
use crate::state::Position;
use crate::utils::{Bitboard, Color, PieceType};
use crate::utils::masks::{RANK_1, RANK_8};

/// Compact form of an encoded position: one bitboard per layer plus the three counters.
/// This is what training records store; floats are produced only on demand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EncodedPosition {
    pub layers: [Bitboard; NUM_LAYERS],
    pub half_move_count: u32,
    pub repetition_count: u32,
    pub no_progress_count: u32,
}

/// Float input for the policy: `num_channels` planes of 64 values, square-major within a plane.
#[derive(Clone, PartialEq, Debug)]
pub struct EncodedTensor {
    pub scheme: LayerScheme,
    pub data: Vec<f32>,
}

impl EncodedTensor {
    pub fn num_channels(&self) -> usize {
        self.data.len() / SQUARES_PER_LAYER
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.data[index * SQUARES_PER_LAYER..(index + 1) * SQUARES_PER_LAYER]
    }
}

fn from_to_masks(moves: &[Move]) -> (Bitboard, Bitboard) {
    moves.iter().fold((0, 0), |(from, to), mv| {
        (from | mv.get_source().to_mask(), to | mv.get_destination().to_mask())
    })
}

/// Encodes a white-to-move position.
///
/// Panics if the position is not canonical or if a castling bit lies outside the back ranks.
pub fn encode_position(position: &Position, half_move_count: u32, repetition_count: u32) -> EncodedPosition {
    assert!(position.is_canonical(), "Only white-to-move positions can be encoded, canonicalize first");

    let mut layers = [0; NUM_LAYERS];
    let board = &position.board;

    for piece_type in PieceType::iter_pieces() {
        layers[Layer::piece(true, piece_type) as usize] = board.get_piece_bb(Color::White, piece_type);
        layers[Layer::piece(false, piece_type) as usize] = board.get_piece_bb(Color::Black, piece_type);
    }

    let (my_from, my_to) = from_to_masks(&position.legal_moves());
    layers[Layer::MyLegalFrom as usize] = my_from;
    layers[Layer::MyLegalTo as usize] = my_to;

    // Opponent moves from a null-move probe. Captures of my king are kept as an attack signal.
    let (opp_from, opp_to) = from_to_masks(&position.with_null_move().legal_moves());
    layers[Layer::OppLegalFrom as usize] = opp_from;
    layers[Layer::OppLegalTo as usize] = opp_to;

    let castling = position.castling_rights.rook_home_mask();
    assert_eq!(castling & !(RANK_1 | RANK_8), 0, "Castling bit outside the back ranks");
    layers[Layer::MyCastleRights as usize] = castling & RANK_1;
    layers[Layer::OppCastleRights as usize] = castling & RANK_8;

    if let Some(square) = position.en_passant {
        layers[Layer::OppEnPassant as usize] = square.to_mask();
    }

    EncodedPosition {
        layers,
        half_move_count,
        repetition_count,
        no_progress_count: position.halfmove_clock as u32,
    }
}

/// Encodes a white-to-move position straight to the full float tensor.
pub fn encode(position: &Position, half_move_count: u32, repetition_count: u32) -> EncodedTensor {
    encode_position(position, half_move_count, repetition_count).to_tensor(LayerScheme::Full)
}

impl EncodedPosition {
    pub fn layer(&self, layer: Layer) -> Bitboard {
        self.layers[layer as usize]
    }

    /// Expands the selected bit layers to floats and appends the scaled counter planes.
    pub fn to_tensor(&self, scheme: LayerScheme) -> EncodedTensor {
        let mut data = Vec::with_capacity(scheme.num_channels() * SQUARES_PER_LAYER);
        for mask in scheme.select(&self.layers) {
            data.extend((0..SQUARES_PER_LAYER).map(|square| ((mask >> square) & 1) as f32));
        }
        for count in [self.half_move_count, self.repetition_count, self.no_progress_count] {
            let value = count as f32 * SCALAR_LAYER_SCALE;
            data.extend(std::iter::repeat(value).take(SQUARES_PER_LAYER));
        }
        EncodedTensor { scheme, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tensor::constants::NUM_CHANNELS;
    use crate::utils::Square;
    use crate::utils::masks::{RANK_3, RANK_4, RANK_5, RANK_6};

    #[test]
    fn test_initial_position_layers() {
        let encoded = encode_position(&Position::initial(), 0, 1);

        assert_eq!(encoded.layer(Layer::MyPawn).count_ones(), 8);
        assert_eq!(encoded.layer(Layer::OppPawn).count_ones(), 8);
        for (mine, theirs) in [(Layer::MyRook, Layer::OppRook), (Layer::MyKnight, Layer::OppKnight), (Layer::MyBishop, Layer::OppBishop)] {
            assert_eq!(encoded.layer(mine).count_ones(), 2);
            assert_eq!(encoded.layer(theirs).count_ones(), 2);
        }
        assert_eq!(encoded.layer(Layer::MyQueen).count_ones(), 1);
        assert_eq!(encoded.layer(Layer::OppKing).count_ones(), 1);

        assert_eq!(encoded.layer(Layer::MyCastleRights), Square::A1.to_mask() | Square::H1.to_mask());
        assert_eq!(encoded.layer(Layer::OppCastleRights), Square::A8.to_mask() | Square::H8.to_mask());
        assert_eq!(encoded.layer(Layer::OppEnPassant), 0);

        // 8 pawns and 2 knights can move; knight targets overlap the single pushes.
        assert_eq!(encoded.layer(Layer::MyLegalFrom).count_ones(), 10);
        assert_eq!(encoded.layer(Layer::MyLegalTo), RANK_3 | RANK_4);
        assert_eq!(encoded.layer(Layer::OppLegalFrom).count_ones(), 10);
        assert_eq!(encoded.layer(Layer::OppLegalTo), RANK_5 | RANK_6);
    }

    #[test]
    fn test_tensor_shape_and_scalars() {
        let tensor = encode(&Position::initial(), 12, 2);
        assert_eq!(tensor.num_channels(), NUM_CHANNELS);
        assert!(tensor.channel(19).iter().all(|&v| (v - 0.12).abs() < 1e-6));
        assert!(tensor.channel(20).iter().all(|&v| (v - 0.02).abs() < 1e-6));
        assert!(tensor.channel(21).iter().all(|&v| v == 0.0));
        assert_eq!(tensor.channel(Layer::MyKing as usize)[Square::E1 as usize], 1.0);
        assert_eq!(tensor.channel(Layer::OppKing as usize)[Square::E8 as usize], 1.0);
        assert!(tensor.data[..19 * 64].iter().all(|&v| v == 0.0 || v == 1.0));

        let compact = encode_position(&Position::initial(), 12, 2).to_tensor(LayerScheme::Compact);
        assert_eq!(compact.num_channels(), 17);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let position = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 3 10").unwrap();
        assert_eq!(encode_position(&position, 19, 1), encode_position(&position, 19, 1));
        assert_eq!(encode(&position, 19, 1), encode(&position, 19, 1));
        assert_eq!(encode_position(&position, 19, 1).no_progress_count, 3);
    }

    #[test]
    fn test_opponent_probe_does_not_touch_position() {
        let position = Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        let snapshot = position;
        let encoded = encode_position(&position, 4, 1);
        assert_eq!(position, snapshot);
        assert_eq!(encoded.layer(Layer::OppEnPassant), Square::D6.to_mask());
    }

    #[test]
    fn test_opponent_probe_includes_king_capture() {
        // White is in check from the rook, so the opponent layers show the rook reaching e1.
        let position = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        let encoded = encode_position(&position, 0, 1);
        assert_ne!(encoded.layer(Layer::OppLegalTo) & Square::E1.to_mask(), 0);
        assert_ne!(encoded.layer(Layer::OppLegalFrom) & Square::A1.to_mask(), 0);
    }

    #[test]
    #[should_panic]
    fn test_black_to_move_panics() {
        let position = Position::initial().with_null_move();
        encode_position(&position, 0, 1);
    }
}
