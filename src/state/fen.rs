use crate::error::FenParseError;
use crate::state::Position;
use crate::utils::{Color, ColoredPiece, Square};

pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn process_fen_side_to_move(position: &mut Position, fen_side_to_move: &str) -> Result<(), FenParseError> {
    position.side_to_move = match fen_side_to_move {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(FenParseError::InvalidSideToMove(fen_side_to_move.to_string()))
    };
    Ok(())
}

fn process_fen_castle(position: &mut Position, fen_castle: &str) -> Result<(), FenParseError> {
    if fen_castle == "-" {
        return Ok(());
    }
    let invalid = || FenParseError::InvalidCastle(fen_castle.to_string());
    if fen_castle.len() > 4 {
        return Err(invalid());
    }
    const INDEXER: &str = "KQkq";
    let mut already_seen = [false; 4];
    for c in fen_castle.chars() {
        let index = INDEXER.find(c).ok_or_else(invalid)?;
        if already_seen[index] {
            return Err(invalid());
        }
        already_seen[index] = true;
        position.castling_rights.0 |= 1 << (3 - index);
    }
    Ok(())
}

fn process_en_passant_target_square(position: &mut Position, fen_en_passant: &str) -> Result<(), FenParseError> {
    if fen_en_passant == "-" {
        return Ok(());
    }
    let square = Square::from_readable(fen_en_passant)
        .ok_or_else(|| FenParseError::InvalidEnPassantTarget(fen_en_passant.to_string()))?;
    let expected_rank = match position.side_to_move { // expect side_to_move to be set first
        Color::White => 5,
        Color::Black => 2
    };
    if square.get_rank() != expected_rank {
        return Err(FenParseError::InvalidEnPassantTarget(fen_en_passant.to_string()));
    }
    position.en_passant = Some(square);
    Ok(())
}

fn process_fen_halfmove_clock(position: &mut Position, fen_halfmove_clock: &str) -> Result<(), FenParseError> {
    position.halfmove_clock = fen_halfmove_clock.parse::<u16>()
        .map_err(|_| FenParseError::InvalidHalfmoveClock(fen_halfmove_clock.to_string()))?;
    Ok(())
}

fn process_fen_fullmove(position: &mut Position, fen_fullmove: &str) -> Result<(), FenParseError> {
    match fen_fullmove.parse::<u16>() {
        Ok(fullmove) if fullmove >= 1 => {
            position.fullmove = fullmove;
            Ok(())
        },
        _ => Err(FenParseError::InvalidFullmoveCounter(fen_fullmove.to_string()))
    }
}

fn process_fen_board_row(position: &mut Position, rank: u8, row: &str) -> Result<(), FenParseError> {
    let invalid = || FenParseError::InvalidRow(row.to_string());
    let mut file = 0;
    for c in row.chars() {
        if let Some(skip) = c.to_digit(10) {
            if skip == 0 || skip > 8 {
                return Err(invalid());
            }
            file += skip as u8;
        } else {
            let colored_piece = ColoredPiece::from_char(c).ok_or_else(invalid)?;
            if file > 7 {
                return Err(invalid());
            }
            position.board.put_colored_piece_at(colored_piece, Square::from_rank_file(rank, file));
            file += 1;
        }
        if file > 8 {
            return Err(invalid());
        }
    }
    match file {
        8 => Ok(()),
        _ => Err(invalid())
    }
}

fn process_fen_board(position: &mut Position, fen_board: &str) -> Result<(), FenParseError> {
    let rows: Vec<&str> = fen_board.split('/').collect();
    if rows.len() != 8 {
        return Err(FenParseError::InvalidRankCount(rows.len()));
    }
    for (row_from_top, row) in rows.iter().enumerate() {
        process_fen_board_row(position, 7 - row_from_top as u8, row)?;
    }
    Ok(())
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Position, FenParseError> {
        let mut position = Position::blank();

        let fen_parts: Vec<&str> = fen.split_ascii_whitespace().collect();
        let [fen_board, fen_side_to_move, fen_castle, fen_en_passant, fen_halfmove_clock, fen_fullmove] = fen_parts.as_slice() else {
            return Err(FenParseError::InvalidFieldCount(fen_parts.len()));
        };

        process_fen_board(&mut position, fen_board)?;
        process_fen_side_to_move(&mut position, fen_side_to_move)?;
        process_fen_castle(&mut position, fen_castle)?;
        process_en_passant_target_square(&mut position, fen_en_passant)?;
        process_fen_halfmove_clock(&mut position, fen_halfmove_clock)?;
        process_fen_fullmove(&mut position, fen_fullmove)?;

        if !position.board.is_valid() {
            return Err(FenParseError::InvalidState(fen.to_string()));
        }
        if !position.is_probably_valid() {
            return Err(FenParseError::InvalidState(format!("side not to move is in check: {}", fen)));
        }
        Ok(position)
    }

    fn get_fen_board(&self) -> String {
        let mut fen_board = String::new();
        for rank in (0..8).rev() {
            let mut empty_count: u8 = 0;
            for file in 0..8 {
                let colored_piece = self.board.get_colored_piece_at(Square::from_rank_file(rank, file));
                if colored_piece == ColoredPiece::NoPiece {
                    empty_count += 1;
                    continue;
                }
                if empty_count > 0 {
                    fen_board.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                fen_board.push(colored_piece.to_char());
            }
            if empty_count > 0 {
                fen_board.push_str(&empty_count.to_string());
            }
            fen_board.push('/');
        }
        fen_board.pop();
        fen_board
    }

    pub fn to_fen(&self) -> String {
        let side_to_move = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b"
        };
        let en_passant_target = match self.en_passant {
            Some(square) => square.readable().to_string(),
            None => "-".to_string()
        };
        [
            self.get_fen_board(),
            side_to_move.to_string(),
            self.castling_rights.to_fen(),
            en_passant_target,
            self.halfmove_clock.to_string(),
            self.fullmove.to_string()
        ].join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::PieceType;

    #[test]
    fn test_initial_fen() {
        let position = Position::from_fen(INITIAL_FEN).unwrap();
        assert_eq!(position, Position::initial());
        assert_eq!(position.to_fen(), INITIAL_FEN);
    }

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w Kq e6 0 2",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn test_fen_pieces_land_on_a1_indexed_squares() {
        let position = Position::from_fen(INITIAL_FEN).unwrap();
        assert_eq!(position.board.get_piece_type_at(Square::A1), PieceType::Rook);
        assert_eq!(position.board.get_colored_piece_at(Square::E8), ColoredPiece::BlackKing);
    }

    #[test]
    fn test_invalid_fens() {
        assert_eq!(Position::from_fen("8/8/8 w - - 0 1"), Err(FenParseError::InvalidRankCount(3)));
        assert_eq!(Position::from_fen(INITIAL_FEN.replace(" w ", " x ").as_str()), Err(FenParseError::InvalidSideToMove("x".to_string())));
        assert!(matches!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1"), Err(FenParseError::InvalidEnPassantTarget(_))));
        assert!(matches!(Position::from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), Err(FenParseError::InvalidRow(_))));
        assert!(matches!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"), Err(FenParseError::InvalidState(_))));
        assert_eq!(Position::from_fen("a b c"), Err(FenParseError::InvalidFieldCount(3)));
    }
}
