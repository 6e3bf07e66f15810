//! Bijection between canonical (white-to-move) moves and policy indices.
//!
//! Every move gets a "to code" in `0..73`: the destination square for ordinary moves and
//! queen promotions, or one of nine underpromotion slots. Slots 64, 67 and 70 start the
//! groups for straight pushes (`+8`), left captures (`+7`) and right captures (`+9`);
//! within a group rook, knight and bishop take offsets 0, 1 and 2.

use serde::{Deserialize, Serialize};
use crate::error::MoveCodecError;
use crate::r#move::Move;
use crate::state::Position;
use crate::utils::{PromotionPiece, Square};

pub const NUM_TARGET_SQUARE_POSSIBILITIES: usize = 73; // 64 squares + 9 underpromotions
pub const NUM_OUTPUT_POLICY_MOVES: usize = 64 * NUM_TARGET_SQUARE_POSSIBILITIES; // 4672

const NUM_SQUARES: usize = 64;
const NUM_UNDERPROMOTIONS: u8 = 3;
const UNDERPROMOTION_DELTAS: [i16; 3] = [8, 7, 9];
const UNDERPROMOTION_PIECES: [PromotionPiece; 3] = [PromotionPiece::Rook, PromotionPiece::Knight, PromotionPiece::Bishop];

/// How a (from, to code) pair is laid out in the policy vector.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveIndexScheme {
    /// `from * 73 + to_code`.
    #[default]
    Wide73,
    /// `from * 64 + to` for ordinary moves, `to_code * 64 + to` for underpromotions.
    Flat64,
}

fn underpromotion_offset(promotion: PromotionPiece) -> Option<u8> {
    UNDERPROMOTION_PIECES.iter().position(|&p| p == promotion).map(|offset| offset as u8)
}

/// Policy slot within a source square's 73 targets.
pub fn encoded_move_to(mv: Move) -> Result<u8, MoveCodecError> {
    let from = mv.get_source() as u8;
    let to = mv.get_destination() as u8;
    let offset = match mv.get_promotion().and_then(underpromotion_offset) {
        Some(offset) => offset,
        None => return Ok(to),
    };
    let delta = to as i16 - from as i16;
    let group = UNDERPROMOTION_DELTAS.iter()
        .position(|&d| d == delta)
        .ok_or(MoveCodecError::MalformedUnderpromotion { from, to, delta })?;
    Ok(NUM_SQUARES as u8 + group as u8 * NUM_UNDERPROMOTIONS + offset)
}

/// Destination square and underpromotion piece named by `to_code` for a move leaving `from`.
pub fn decode_move_to(from: Square, to_code: u8) -> Result<(Square, Option<PromotionPiece>), MoveCodecError> {
    if (to_code as usize) < NUM_SQUARES {
        return Ok((unsafe { Square::from(to_code) }, None));
    }
    let slot = to_code - NUM_SQUARES as u8;
    let group = (slot / NUM_UNDERPROMOTIONS) as usize;
    let offset = (slot % NUM_UNDERPROMOTIONS) as usize;
    if group >= UNDERPROMOTION_DELTAS.len() {
        return Err(MoveCodecError::IndexOutOfRange(to_code as usize));
    }
    let to = from as i16 + UNDERPROMOTION_DELTAS[group];
    let to = u8::try_from(to).ok()
        .and_then(Square::try_from_index)
        .ok_or(MoveCodecError::IndexOutOfRange(to_code as usize))?;
    Ok((to, Some(UNDERPROMOTION_PIECES[offset])))
}

/// Policy index of a canonical move.
pub fn try_encode_move(mv: Move, scheme: MoveIndexScheme) -> Result<usize, MoveCodecError> {
    let to_code = encoded_move_to(mv)? as usize;
    let from = mv.get_source() as usize;
    let to = mv.get_destination() as usize;
    Ok(match scheme {
        MoveIndexScheme::Wide73 => from * NUM_TARGET_SQUARE_POSSIBILITIES + to_code,
        MoveIndexScheme::Flat64 if to_code < NUM_SQUARES => from * NUM_SQUARES + to,
        MoveIndexScheme::Flat64 => to_code * NUM_SQUARES + to,
    })
}

/// Policy index of a canonical move in the default layout.
///
/// Panics on an underpromotion that is not a straight push or a diagonal capture.
pub fn encode_move(mv: Move) -> usize {
    match try_encode_move(mv, MoveIndexScheme::Wide73) {
        Ok(index) => index,
        Err(err) => panic!("{}", err),
    }
}

/// Splits a policy index into its source square and to code.
pub fn decode_index(index: usize, scheme: MoveIndexScheme) -> Result<(Square, u8), MoveCodecError> {
    if index >= NUM_OUTPUT_POLICY_MOVES {
        return Err(MoveCodecError::IndexOutOfRange(index));
    }
    match scheme {
        MoveIndexScheme::Wide73 => {
            let from = unsafe { Square::from((index / NUM_TARGET_SQUARE_POSSIBILITIES) as u8) };
            Ok((from, (index % NUM_TARGET_SQUARE_POSSIBILITIES) as u8))
        },
        MoveIndexScheme::Flat64 => {
            let (high, to) = (index / NUM_SQUARES, (index % NUM_SQUARES) as i16);
            if high < NUM_SQUARES {
                return Ok((unsafe { Square::from(high as u8) }, to as u8));
            }
            let to_code = high as u8;
            let group = ((to_code - NUM_SQUARES as u8) / NUM_UNDERPROMOTIONS) as usize;
            let from = u8::try_from(to - UNDERPROMOTION_DELTAS[group]).ok()
                .and_then(Square::try_from_index)
                .ok_or(MoveCodecError::IndexOutOfRange(index))?;
            Ok((from, to_code))
        }
    }
}

/// Resolves a policy index to the legal move it names in `position`.
/// A plain to code that moves a pawn onto the last rank is read as a queen promotion.
pub fn decode_move(index: usize, scheme: MoveIndexScheme, position: &Position) -> Result<Move, MoveCodecError> {
    let (from, to_code) = decode_index(index, scheme)?;
    let (to, underpromotion) = decode_move_to(from, to_code)?;
    position.legal_moves()
        .into_iter()
        .find(|mv| {
            mv.get_source() == from && mv.get_destination() == to && match (underpromotion, mv.get_promotion()) {
                (Some(piece), Some(promotion)) => piece == promotion,
                (None, Some(promotion)) => promotion == PromotionPiece::Queen,
                (None, None) => true,
                (Some(_), None) => false,
            }
        })
        .ok_or(MoveCodecError::NoSuchMove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::r#move::MoveFlag;

    const FENS: [&str; 6] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "1r1q3k/2P1P3/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
    ];

    #[test]
    fn test_codec_bijection() {
        for scheme in [MoveIndexScheme::Wide73, MoveIndexScheme::Flat64] {
            for fen in FENS {
                let position = Position::from_fen(fen).unwrap();
                let moves = position.legal_moves();
                let indices: HashSet<usize> = moves.iter()
                    .map(|mv| try_encode_move(*mv, scheme).unwrap())
                    .collect();
                assert_eq!(indices.len(), moves.len(), "collision in {}", fen);
                for mv in moves {
                    let index = try_encode_move(mv, scheme).unwrap();
                    assert!(index < NUM_OUTPUT_POLICY_MOVES);
                    assert_eq!(decode_move(index, scheme, &position).unwrap(), mv);
                }
            }
        }
    }

    #[test]
    fn test_underpromotion_delta_law() {
        for (delta_index, delta) in UNDERPROMOTION_DELTAS.iter().enumerate() {
            for (offset, piece) in UNDERPROMOTION_PIECES.iter().enumerate() {
                let from = Square::C7;
                let to = unsafe { Square::from((from as i16 + delta) as u8) };
                let mv = Move::new_promotion(from, to, *piece);
                let expected = 64 + 3 * delta_index + offset;
                assert_eq!(encoded_move_to(mv).unwrap() as usize, expected);
                assert_eq!(decode_move_to(from, expected as u8).unwrap(), (to, Some(*piece)));
            }
        }
    }

    #[test]
    fn test_knight_underpromotion_capture_index() {
        let mv = Move::new_promotion(Square::D7, Square::C8, PromotionPiece::Knight);
        assert_eq!(Square::D7 as usize, 51);
        assert_eq!(Square::C8 as usize, 58);
        assert_eq!(encode_move(mv), 51 * 73 + 68);
        assert_eq!(decode_index(51 * 73 + 68, MoveIndexScheme::Wide73).unwrap(), (Square::D7, 68));
    }

    #[test]
    fn test_queen_promotion_uses_destination() {
        let mv = Move::new_promotion(Square::E7, Square::E8, PromotionPiece::Queen);
        assert_eq!(encode_move(mv), Square::E7 as usize * 73 + Square::E8 as usize);
        let plain = Move::new(Square::E2, Square::E4, MoveFlag::NormalMove);
        assert_eq!(try_encode_move(plain, MoveIndexScheme::Flat64).unwrap(), 12 * 64 + 28);
    }

    #[test]
    fn test_malformed_underpromotion() {
        let mv = Move::new_promotion(Square::B7, Square::E8, PromotionPiece::Rook);
        assert_eq!(
            try_encode_move(mv, MoveIndexScheme::Wide73),
            Err(MoveCodecError::MalformedUnderpromotion { from: 49, to: 60, delta: 11 })
        );
        // A black underpromotion seen in the raw frame moves downward.
        let black = Move::new_promotion(Square::B2, Square::B1, PromotionPiece::Knight);
        assert!(try_encode_move(black, MoveIndexScheme::Wide73).is_err());
        assert!(try_encode_move(black.mirrored(), MoveIndexScheme::Wide73).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_encode_move_panics_on_malformed_underpromotion() {
        encode_move(Move::new_promotion(Square::A7, Square::H8, PromotionPiece::Bishop));
    }

    #[test]
    fn test_decode_index_out_of_range() {
        assert_eq!(decode_index(NUM_OUTPUT_POLICY_MOVES, MoveIndexScheme::Wide73), Err(MoveCodecError::IndexOutOfRange(4672)));
        // A right capture landing on a8 would start from below the board.
        assert!(decode_index(72 * 64 + 8, MoveIndexScheme::Flat64).is_err());
        // A right capture from h7 would leave the board.
        assert!(decode_move_to(Square::H7, 72).is_err());
    }
}
