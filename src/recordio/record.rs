use serde::{Deserialize, Serialize};
use crate::engine::move_codec::{try_encode_move, MoveIndexScheme};
use crate::engine::selfplay::TrainingRecord;
use crate::engine::tensor::constants::NUM_LAYERS;
use crate::engine::tensor::{EncodedPosition, EncodedTensor, LayerScheme};
use crate::error::{MoveCodecError, RecordIoError};
use crate::r#move::{Move, MoveFlag};
use crate::utils::{Bitboard, PromotionPiece, Square};

/// Wire form of one training sample. Floats are never stored; the tensor is rebuilt
/// from the bit layers when the record is consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub layers: [Bitboard; NUM_LAYERS],
    pub promotion: Option<PromotionPiece>,
    pub half_move_count: u32,
    pub repetition_count: u32,
    pub no_progress_count: u32,
    pub move_from: u8,
    pub move_to: u8,
    pub encoded_move_to: u8,
    /// Result for the side to move of the encoded position: -1, 0 or 1.
    pub game_result: i8,
}

impl PositionRecord {
    /// Wire record for a finished ply. The game result must already be back-filled.
    pub fn from_training(record: &TrainingRecord) -> Result<PositionRecord, RecordIoError> {
        let game_result = record.result.ok_or(RecordIoError::UnresolvedResult)?;
        Ok(PositionRecord {
            layers: record.encoded.layers,
            promotion: record.mv.get_promotion(),
            half_move_count: record.encoded.half_move_count,
            repetition_count: record.encoded.repetition_count,
            no_progress_count: record.encoded.no_progress_count,
            move_from: record.mv.get_source() as u8,
            move_to: record.mv.get_destination() as u8,
            encoded_move_to: record.encoded_move_to,
            game_result,
        })
    }

    pub fn encoded_position(&self) -> EncodedPosition {
        EncodedPosition {
            layers: self.layers,
            half_move_count: self.half_move_count,
            repetition_count: self.repetition_count,
            no_progress_count: self.no_progress_count,
        }
    }

    pub fn to_tensor(&self, scheme: LayerScheme) -> EncodedTensor {
        self.encoded_position().to_tensor(scheme)
    }

    /// The canonical move played from this position.
    pub fn canonical_move(&self) -> Result<Move, MoveCodecError> {
        let from = Square::try_from_index(self.move_from).ok_or(MoveCodecError::IndexOutOfRange(self.move_from as usize))?;
        let to = Square::try_from_index(self.move_to).ok_or(MoveCodecError::IndexOutOfRange(self.move_to as usize))?;
        Ok(match self.promotion {
            Some(promotion) => Move::new_promotion(from, to, promotion),
            None => Move::new(from, to, MoveFlag::NormalMove),
        })
    }

    /// Policy index of the move played, in the given layout.
    pub fn move_index(&self, scheme: MoveIndexScheme) -> Result<usize, MoveCodecError> {
        try_encode_move(self.canonical_move()?, scheme)
    }

    /// Serializes the payload of one frame.
    pub fn to_payload(&self) -> Result<Vec<u8>, RecordIoError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_payload(payload: &[u8]) -> Result<PositionRecord, RecordIoError> {
        Ok(bincode::deserialize(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tensor::{encode_position, Layer};
    use crate::state::Position;
    use crate::utils::Color;

    fn underpromotion_record() -> TrainingRecord {
        let position = Position::from_fen("2r3k1/3P4/8/8/8/8/8/4K3 w - - 3 40").unwrap();
        let mv = position.find_legal_move("d7c8n").unwrap();
        let encoded = encode_position(&position, 78, 2);
        let mut record = TrainingRecord::new(encoded, mv, MoveIndexScheme::Wide73, Color::White).unwrap();
        record.result = Some(1);
        record
    }

    #[test]
    fn test_from_training() {
        let wire = PositionRecord::from_training(&underpromotion_record()).unwrap();
        assert_eq!(wire.promotion, Some(PromotionPiece::Knight));
        assert_eq!((wire.move_from, wire.move_to, wire.encoded_move_to), (51, 58, 68));
        assert_eq!((wire.half_move_count, wire.repetition_count, wire.no_progress_count), (78, 2, 3));
        assert_eq!(wire.game_result, 1);
        assert_eq!(wire.move_index(MoveIndexScheme::Wide73).unwrap(), 51 * 73 + 68);
        assert_eq!(wire.move_index(MoveIndexScheme::Flat64).unwrap(), 68 * 64 + 58);
        assert_eq!(wire.layers[Layer::MyPawn as usize], Square::D7.to_mask());
    }

    #[test]
    fn test_unresolved_result_is_rejected() {
        let mut record = underpromotion_record();
        record.result = None;
        assert!(matches!(PositionRecord::from_training(&record), Err(RecordIoError::UnresolvedResult)));
    }

    #[test]
    fn test_payload_is_fixed_width() {
        let wire = PositionRecord::from_training(&underpromotion_record()).unwrap();
        let payload = wire.to_payload().unwrap();
        // 19 layers, promotion tag and variant, three counters, three squares, result
        assert_eq!(payload.len(), 19 * 8 + 1 + 4 + 3 * 4 + 3 + 1);
        assert_eq!(&payload[..8], &wire.layers[0].to_le_bytes());
        assert_eq!(PositionRecord::from_payload(&payload).unwrap(), wire);

        let tensor = wire.to_tensor(LayerScheme::Full);
        assert_eq!(tensor, wire.encoded_position().to_tensor(LayerScheme::Full));
    }

    #[test]
    fn test_garbage_payload() {
        assert!(matches!(PositionRecord::from_payload(&[1, 2, 3]), Err(RecordIoError::Bincode(_))));
    }
}
