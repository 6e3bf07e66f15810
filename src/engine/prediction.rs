//! Runs a policy on a position and maps its output back onto legal moves.

use serde::{Deserialize, Serialize};
use crate::engine::canonical::{canonicalize, Perspective};
use crate::engine::move_codec::{try_encode_move, MoveIndexScheme};
use crate::engine::policy::{checked_infer, Policy, Prediction};
use crate::engine::tensor::{encode_position, EncodedPosition, LayerScheme};
use crate::error::{MoveCodecError, PredictionError};
use crate::r#move::Move;
use crate::state::Position;

/// The tensor layout and move index layout a policy was trained with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct EncodingSchemes {
    #[serde(default)]
    pub layers: LayerScheme,
    #[serde(default)]
    pub moves: MoveIndexScheme,
}

/// A policy's view of one position, in the canonical frame.
#[derive(Clone, Debug)]
pub struct PolicyView {
    pub canonical: Position,
    pub perspective: Perspective,
    pub encoded: EncodedPosition,
    /// Canonical legal moves in generation order, with the policy's probability for each.
    pub candidates: Vec<(Move, f32)>,
    pub value: f32,
}

/// Looks up each legal move of a canonical position in the policy output.
pub fn move_probabilities(
    prediction: &Prediction,
    canonical: &Position,
    scheme: MoveIndexScheme,
) -> Result<Vec<(Move, f32)>, MoveCodecError> {
    canonical.legal_moves()
        .into_iter()
        .map(|mv| {
            let index = try_encode_move(mv, scheme)?;
            let probability = prediction.move_probabilities.get(index).copied()
                .ok_or(MoveCodecError::IndexOutOfRange(index))?;
            Ok((mv, probability))
        })
        .collect()
}

/// Canonicalizes, encodes and scores `position` with `policy`.
pub fn evaluate_position<P: Policy + ?Sized>(
    policy: &mut P,
    position: &Position,
    half_move_count: u32,
    repetition_count: u32,
    schemes: EncodingSchemes,
) -> Result<PolicyView, PredictionError> {
    let (canonical, perspective) = canonicalize(position);
    let encoded = encode_position(&canonical, half_move_count, repetition_count);
    let prediction = checked_infer(policy, &encoded.to_tensor(schemes.layers))?;
    let candidates = move_probabilities(&prediction, &canonical, schemes.moves)?;
    Ok(PolicyView { canonical, perspective, encoded, candidates, value: prediction.value })
}

/// Legal moves of `position` in its own frame, most probable first.
/// Equal probabilities keep generation order.
pub fn run_policy<P: Policy + ?Sized>(
    policy: &mut P,
    position: &Position,
    half_move_count: u32,
    repetition_count: u32,
    schemes: EncodingSchemes,
) -> Result<Vec<(Move, f32)>, PredictionError> {
    let view = evaluate_position(policy, position, half_move_count, repetition_count, schemes)?;
    let mut ranked: Vec<(Move, f32)> = view.candidates
        .into_iter()
        .map(|(mv, probability)| (view.perspective.real_move(mv), probability))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(ranked)
}

/// Top `limit` moves for the position in `fen`, as UCI strings.
pub fn predict_fen<P: Policy + ?Sized>(
    policy: &mut P,
    fen: &str,
    half_move_count: u32,
    limit: usize,
    schemes: EncodingSchemes,
) -> Result<Vec<(String, f32)>, PredictionError> {
    let position = Position::from_fen(fen)?;
    let ranked = run_policy(policy, &position, half_move_count, 1, schemes)?;
    Ok(ranked.into_iter().take(limit).map(|(mv, probability)| (mv.uci(), probability)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::move_codec::NUM_OUTPUT_POLICY_MOVES;
    use crate::engine::policy::{FnPolicy, UniformPolicy};
    use crate::engine::tensor::EncodedTensor;
    use crate::error::{FenParseError, PolicyError};
    use crate::utils::Square;

    /// Puts all weight on the index a canonical e2-e4 push would take.
    fn king_pawn_policy() -> FnPolicy<impl FnMut(&EncodedTensor) -> Result<Prediction, PolicyError>> {
        FnPolicy(|_: &EncodedTensor| {
            let mut move_probabilities = vec![0.0; NUM_OUTPUT_POLICY_MOVES];
            move_probabilities[Square::E2 as usize * 73 + Square::E4 as usize] = 0.9;
            move_probabilities[Square::D2 as usize * 73 + Square::D4 as usize] = 0.1;
            Ok(Prediction { move_probabilities, value: 0.0 })
        })
    }

    #[test]
    fn test_run_policy_ranks_moves() {
        let ranked = run_policy(&mut king_pawn_policy(), &Position::initial(), 0, 1, EncodingSchemes::default()).unwrap();
        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].0.uci(), "e2e4");
        assert_eq!(ranked[1].0.uci(), "d2d4");
        assert_eq!(ranked[2].1, 0.0);
    }

    #[test]
    fn test_run_policy_unmirrors_black_moves() {
        let position = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        let ranked = run_policy(&mut king_pawn_policy(), &position, 1, 1, EncodingSchemes::default()).unwrap();
        assert_eq!(ranked[0].0.uci(), "e7e5");
        assert_eq!(ranked[1].0.uci(), "d7d5");
        assert!(ranked.iter().all(|(mv, _)| position.legal_moves().contains(mv)));
    }

    #[test]
    fn test_predict_fen() {
        let top = predict_fen(&mut king_pawn_policy(), crate::state::INITIAL_FEN, 0, 2, EncodingSchemes::default()).unwrap();
        assert_eq!(top.iter().map(|(uci, _)| uci.as_str()).collect::<Vec<_>>(), vec!["e2e4", "d2d4"]);

        assert!(matches!(
            predict_fen(&mut UniformPolicy, "not a fen", 0, 2, EncodingSchemes::default()),
            Err(PredictionError::Fen(FenParseError::InvalidFieldCount(3)))
        ));
    }

    #[test]
    fn test_compact_scheme_reaches_policy() {
        let schemes = EncodingSchemes { layers: LayerScheme::Compact, moves: MoveIndexScheme::Flat64 };
        let mut seen = 0;
        let mut policy = FnPolicy(|input: &EncodedTensor| {
            seen = input.num_channels();
            UniformPolicy.infer(input)
        });
        let ranked = run_policy(&mut policy, &Position::initial(), 0, 1, schemes).unwrap();
        assert_eq!(ranked.len(), 20);
        drop(policy);
        assert_eq!(seen, 17);
    }
}
