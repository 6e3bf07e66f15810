//! Error types for every fallible operation in the crate.

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum FenParseError {
    #[error("expected 6 FEN fields, found {0}")]
    InvalidFieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    InvalidRankCount(usize),
    #[error("invalid rank: {0}")]
    InvalidRow(String),
    #[error("invalid side to move: {0}")]
    InvalidSideToMove(String),
    #[error("invalid castling rights: {0}")]
    InvalidCastle(String),
    #[error("invalid en passant target: {0}")]
    InvalidEnPassantTarget(String),
    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),
    #[error("invalid fullmove counter: {0}")]
    InvalidFullmoveCounter(String),
    #[error("inconsistent position: {0}")]
    InvalidState(String),
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum MoveCodecError {
    /// Only straight pushes and the two diagonal captures can promote.
    #[error("underpromotion from {from} to {to} has delta {delta}, expected 7, 8 or 9")]
    MalformedUnderpromotion { from: u8, to: u8, delta: i16 },
    #[error("move index {0} is outside the policy space")]
    IndexOutOfRange(usize),
    #[error("move index {0} does not name a move in this position")]
    NoSuchMove(usize),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    #[error("policy returned {actual} move probabilities, expected {expected}")]
    WrongOutputLength { expected: usize, actual: usize },
    #[error("policy rejected a tensor with {actual} values, expected {expected}")]
    WrongInputLength { expected: usize, actual: usize },
    #[error("policy inference failed: {0}")]
    Inference(String),
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Fen(#[from] FenParseError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    MoveCodec(#[from] MoveCodecError),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no legal move to choose from in a non-terminal position ({fen})")]
    NoCandidateMoves { fen: String },
    #[error("policy evaluation failed at ply {ply}: {source}")]
    Policy { ply: usize, source: PredictionError },
    #[error(transparent)]
    MoveCodec(#[from] MoveCodecError),
    #[error("invalid start position: {0}")]
    StartPosition(#[from] FenParseError),
    #[error("game cancelled at ply {0}")]
    Cancelled(usize),
}

#[derive(Debug, Error)]
pub enum RecordIoError {
    #[error("record i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record payload could not be (de)serialized: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("unsupported record stream version {0}")]
    UnsupportedVersion(u8),
    #[error("record stream is empty, the version byte is missing")]
    MissingVersion,
    #[error("record stream truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("record payload of {len} bytes exceeds the {max} byte frame limit")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("record writer refuses appends after a failed write")]
    Poisoned,
    #[error("record game result is unresolved")]
    UnresolvedResult,
}
