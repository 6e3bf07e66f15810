//! Chess position encoding, policy move indexing and self-play record generation.

pub mod attacks;
pub mod engine;
pub mod error;
pub mod r#move;
pub mod recordio;
pub mod state;
pub mod utils;
