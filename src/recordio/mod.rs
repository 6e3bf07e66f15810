//! Versioned, length-prefixed stream of training records.
//!
//! Layout: `[version: u8]` followed by any number of `[len: u32 LE][payload: len bytes]`
//! frames. Each payload is a bincode-encoded [`PositionRecord`].

mod record;
mod writer;
mod reader;

pub use record::*;
pub use writer::*;
pub use reader::*;

pub const FORMAT_VERSION: u8 = 1;

/// Upper bound on a frame's payload. Real payloads are a fixed 173 bytes; anything
/// past this limit is a corrupt length prefix.
pub const MAX_PAYLOAD_LEN: usize = 4096;
