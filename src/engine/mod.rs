//! Everything between a position and a policy: tensors, move indices, canonicalization and self-play.

pub mod tensor;
pub mod move_codec;
pub mod canonical;
pub mod policy;
pub mod prediction;
pub mod selfplay;
