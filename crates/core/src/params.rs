//! MD5 algorithm parameters
//!
//! Sizes and initial state words from RFC 1321.

/// Block size in bytes consumed by one compression call
pub const BLOCK_SIZE: usize = 64;

/// Number of 32-bit message words per block
pub const WORDS_PER_BLOCK: usize = BLOCK_SIZE / 4;

/// Number of compression rounds per block
pub const ROUNDS: usize = 64;

/// Size of the trailing length field in bytes
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Padding terminator appended right after the input
pub const PADDING_BYTE: u8 = 0x80;

/// Minimum number of bytes padding adds (terminator + length field)
pub const MIN_PADDING: usize = 1 + LENGTH_FIELD_SIZE;

/// MD5 output size in bytes
pub const DIGEST_SIZE: usize = 16;

/// Folded output size in bytes
pub const DIGEST64_SIZE: usize = 8;

/// Initial working state (A, B, C, D)
pub const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];
