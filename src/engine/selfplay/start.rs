use rand::Rng;
use crate::attacks::single_king_attacks;
use crate::engine::selfplay::config::SelfPlayConfig;
use crate::error::FenParseError;
use crate::state::Position;
use crate::utils::{get_squares_from_mask_iter, Bitboard, Color, ColoredPiece, PieceType, Square};

/// Start position of one game, drawn uniformly from `config.start_fens` and
/// `config.random_rook_endgames`. With neither configured the game starts from the initial position.
pub fn choose_start_position<R: Rng + ?Sized>(config: &SelfPlayConfig, rng: &mut R) -> Result<Position, FenParseError> {
    let num_fens = config.start_fens.len();
    let choices = num_fens + config.random_rook_endgames.len();
    if choices == 0 {
        return Ok(Position::initial());
    }
    let choice = rng.gen_range(0..choices);
    match config.start_fens.get(choice) {
        Some(fen) => Position::from_fen(fen),
        None => Ok(random_rook_endgame(config.random_rook_endgames[choice - num_fens], rng)),
    }
}

fn pick_square<R: Rng + ?Sized>(candidates: Bitboard, rng: &mut R) -> Option<Square> {
    match candidates.count_ones() {
        0 => None,
        count => get_squares_from_mask_iter(candidates).nth(rng.gen_range(0..count as usize)),
    }
}

/// Kings on random non-adjacent squares plus up to `rooks_per_side` rooks per side, white to move.
///
/// No rook shares a rank or file with the enemy king, so neither king starts in check.
/// Fewer rooks are placed once no such square is left.
pub fn random_rook_endgame<R: Rng + ?Sized>(rooks_per_side: u8, rng: &mut R) -> Position {
    let mut position = Position::blank();
    let board = &mut position.board;

    let white_king = pick_square(!0, rng).unwrap_or(Square::E1);
    board.put_colored_piece_at(ColoredPiece::WhiteKing, white_king);
    let black_king = pick_square(!(white_king.to_mask() | single_king_attacks(white_king)), rng).unwrap_or(Square::E8);
    board.put_colored_piece_at(ColoredPiece::BlackKing, black_king);

    for color in Color::iter() {
        let enemy_king = match color {
            Color::White => black_king,
            Color::Black => white_king,
        };
        let enemy_lines = enemy_king.get_rank_mask() | enemy_king.get_file_mask();
        for _ in 0..rooks_per_side {
            let Some(square) = pick_square(!(board.occupancy() | enemy_lines), rng) else {
                break;
            };
            board.put_colored_piece_at(ColoredPiece::from(color, PieceType::Rook), square);
        }
    }
    position
}
