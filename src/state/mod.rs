//! This module contains game state related code.

mod board;
mod castling;
mod position;
mod termination;
mod make_move;
mod movegen;
mod zobrist;
mod fen;

pub use board::*;
pub use castling::*;
pub use position::*;
pub use termination::*;
pub use zobrist::*;
pub use fen::*;
