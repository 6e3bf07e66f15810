// Constants for the input tensor
pub const NUM_PIECE_TYPE_BITS: usize = 6; // 6 piece types
pub const NUM_COLOR_BITS: usize = 2; // my pieces, opponent pieces
pub const NUM_BOARD_BITS: usize = NUM_PIECE_TYPE_BITS * NUM_COLOR_BITS; // 12 piece layers

pub const NUM_LEGAL_MOVE_BITS: usize = 4; // from/to for both sides
pub const NUM_CASTLING_BITS: usize = 2; // my rights, opponent rights
pub const NUM_EN_PASSANT_BITS: usize = 1;

pub const NUM_LAYERS: usize = NUM_BOARD_BITS + NUM_LEGAL_MOVE_BITS + NUM_CASTLING_BITS + NUM_EN_PASSANT_BITS; // 19 bit layers
pub const COMPACT_NUM_LAYERS: usize = NUM_BOARD_BITS + NUM_EN_PASSANT_BITS + 1; // 14, castling rights merged

pub const NUM_SCALAR_LAYERS: usize = 3; // half-move count, repetition count, no-progress count
pub const SCALAR_LAYER_SCALE: f32 = 0.01;

pub const NUM_CHANNELS: usize = NUM_LAYERS + NUM_SCALAR_LAYERS; // 22
pub const COMPACT_NUM_CHANNELS: usize = COMPACT_NUM_LAYERS + NUM_SCALAR_LAYERS; // 17

pub const SQUARES_PER_LAYER: usize = 64;
