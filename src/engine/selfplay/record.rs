use crate::engine::move_codec::{encoded_move_to, try_encode_move, MoveIndexScheme};
use crate::engine::tensor::EncodedPosition;
use crate::error::MoveCodecError;
use crate::r#move::Move;
use crate::utils::Color;

/// One ply of a game as seen by the side to move.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingRecord {
    pub encoded: EncodedPosition,
    /// The move played, in the canonical frame.
    pub mv: Move,
    pub move_index: usize,
    pub encoded_move_to: u8,
    /// Real color of the side that played `mv`.
    pub mover: Color,
    /// Game result for the mover, unset until the game ends.
    pub result: Option<i8>,
}

impl TrainingRecord {
    pub fn new(encoded: EncodedPosition, mv: Move, scheme: MoveIndexScheme, mover: Color) -> Result<TrainingRecord, MoveCodecError> {
        Ok(TrainingRecord {
            encoded,
            mv,
            move_index: try_encode_move(mv, scheme)?,
            encoded_move_to: encoded_move_to(mv)?,
            mover,
            result: None,
        })
    }
}

/// Sets every record's result from a white-perspective game result,
/// flipping it for records whose mover was black.
pub fn backfill_results(records: &mut [TrainingRecord], white_result: i8) {
    for record in records.iter_mut() {
        record.result = Some(white_result * record.mover.sign());
    }
}
