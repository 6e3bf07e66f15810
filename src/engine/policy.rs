use lazy_static::lazy_static;
use crate::engine::move_codec::NUM_OUTPUT_POLICY_MOVES;
use crate::engine::tensor::EncodedTensor;
use crate::error::PolicyError;

lazy_static! {
    static ref UNIFORM_PROBABILITIES: Vec<f32> = vec![1.0 / NUM_OUTPUT_POLICY_MOVES as f32; NUM_OUTPUT_POLICY_MOVES];
}

/// Raw policy output: one probability per move index, plus a value estimate in [-1, 1]
/// for the side to move of the encoded position.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub move_probabilities: Vec<f32>,
    pub value: f32,
}

/// Anything that can score an encoded, canonical position.
/// A game owns its policies for its whole lifetime; calls are blocking.
pub trait Policy: Send {
    fn infer(&mut self, input: &EncodedTensor) -> Result<Prediction, PolicyError>;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn infer(&mut self, input: &EncodedTensor) -> Result<Prediction, PolicyError> {
        (**self).infer(input)
    }
}

impl<P: Policy + ?Sized> Policy for &mut P {
    fn infer(&mut self, input: &EncodedTensor) -> Result<Prediction, PolicyError> {
        (**self).infer(input)
    }
}

/// Calls `policy` and rejects output whose length is not the policy size.
pub fn checked_infer<P: Policy + ?Sized>(policy: &mut P, input: &EncodedTensor) -> Result<Prediction, PolicyError> {
    let prediction = policy.infer(input)?;
    if prediction.move_probabilities.len() != NUM_OUTPUT_POLICY_MOVES {
        return Err(PolicyError::WrongOutputLength {
            expected: NUM_OUTPUT_POLICY_MOVES,
            actual: prediction.move_probabilities.len(),
        });
    }
    Ok(prediction)
}

/// Equal weight for every move index. The baseline opponent and the default for the binaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPolicy;

impl Policy for UniformPolicy {
    fn infer(&mut self, input: &EncodedTensor) -> Result<Prediction, PolicyError> {
        let expected = input.scheme.num_channels() * 64;
        if input.data.len() != expected {
            return Err(PolicyError::WrongInputLength { expected, actual: input.data.len() });
        }
        Ok(Prediction {
            move_probabilities: UNIFORM_PROBABILITIES.clone(),
            value: 0.0,
        })
    }
}

/// Adapts a closure into a policy.
pub struct FnPolicy<F>(pub F);

impl<F> Policy for FnPolicy<F>
where
    F: FnMut(&EncodedTensor) -> Result<Prediction, PolicyError> + Send,
{
    fn infer(&mut self, input: &EncodedTensor) -> Result<Prediction, PolicyError> {
        (self.0)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tensor::{encode, LayerScheme};
    use crate::state::Position;

    #[test]
    fn test_uniform_policy() {
        let tensor = encode(&Position::initial(), 0, 1);
        let prediction = checked_infer(&mut UniformPolicy, &tensor).unwrap();
        assert_eq!(prediction.move_probabilities.len(), NUM_OUTPUT_POLICY_MOVES);
        let total: f32 = prediction.move_probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-3);

        let truncated = EncodedTensor { scheme: LayerScheme::Full, data: vec![0.0; 10] };
        assert!(matches!(UniformPolicy.infer(&truncated), Err(PolicyError::WrongInputLength { .. })));
    }

    #[test]
    fn test_checked_infer_rejects_short_output() {
        let tensor = encode(&Position::initial(), 0, 1);
        let mut policy = FnPolicy(|_: &EncodedTensor| Ok(Prediction { move_probabilities: vec![0.5; 3], value: 0.0 }));
        assert_eq!(
            checked_infer(&mut policy, &tensor),
            Err(PolicyError::WrongOutputLength { expected: NUM_OUTPUT_POLICY_MOVES, actual: 3 })
        );
    }

    #[test]
    fn test_boxed_policy() {
        let tensor = encode(&Position::initial(), 0, 1);
        let mut boxed: Box<dyn Policy> = Box::new(UniformPolicy);
        assert!(checked_infer(&mut boxed, &tensor).is_ok());
    }
}
