use serde::{Deserialize, Serialize};
use crate::state::Position;
use crate::utils::Color;

/// Half-moves without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug, Serialize, Deserialize)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule
}

impl Termination {
    pub fn is_decisive(&self) -> bool {
        self == &Termination::Checkmate
    }

    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }
}

impl Position {
    /// Rule-based game end for this position, ignoring repetition.
    /// Checkmate and stalemate are reported before the material and fifty-move draws.
    pub fn termination(&self) -> Option<Termination> {
        if self.legal_moves().is_empty() {
            return Some(match self.is_in_check() {
                true => Termination::Checkmate,
                false => Termination::Stalemate
            });
        }
        if self.board.are_both_sides_insufficient_material() {
            return Some(Termination::InsufficientMaterial);
        }
        if self.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
            return Some(Termination::FiftyMoveRule);
        }
        None
    }

    /// Game score from white's perspective once `termination` has ended the game here.
    pub fn white_score(&self, termination: Termination) -> i8 {
        match termination {
            // The side to move is the one mated.
            Termination::Checkmate => -self.side_to_move.sign(),
            _ => 0
        }
    }

    /// Whether `color` delivered mate in this position.
    pub fn is_won_by(&self, color: Color) -> bool {
        self.termination() == Some(Termination::Checkmate) && self.side_to_move != color
    }
}
