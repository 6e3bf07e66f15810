//! Position encoding for the policy network.

pub mod constants;
mod layers;
mod encoder;

pub use layers::*;
pub use encoder::*;
