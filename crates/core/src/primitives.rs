//! Round tables and the raw MD5 compression function
//!
//! `compress` folds one 64-byte block into the working state. Padding and
//! length encoding live in the engine; this module only ever sees whole blocks.

use crate::params::{BLOCK_SIZE, ROUNDS, WORDS_PER_BLOCK};

/// Per-round left-rotation amounts
pub const S: [u32; ROUNDS] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, // F
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, // G
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, // H
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, // I
];

/// Per-round additive constants, `K[i] = floor(2^32 * |sin(i + 1)|)`
pub const K: [u32; ROUNDS] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee,
    0xf57c_0faf, 0x4787_c62a, 0xa830_4613, 0xfd46_9501,
    0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be,
    0x6b90_1122, 0xfd98_7193, 0xa679_438e, 0x49b4_0821,
    0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa,
    0xd62f_105d, 0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8,
    0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed,
    0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a,
    0xfffa_3942, 0x8771_f681, 0x6d9d_6122, 0xfde5_380c,
    0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70,
    0x289b_7ec6, 0xeaa1_27fa, 0xd4ef_3085, 0x0488_1d05,
    0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665,
    0xf429_2244, 0x432a_ff97, 0xab94_23a7, 0xfc93_a039,
    0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1,
    0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb, 0xeb86_d391,
];

/// Decode a block into sixteen little-endian message words
#[inline(always)]
pub fn load_words(block: &[u8; BLOCK_SIZE]) -> [u32; WORDS_PER_BLOCK] {
    let mut m = [0u32; WORDS_PER_BLOCK];
    for (word, bytes) in m.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    m
}

/// Nonlinear mixing value and message word index for round `j`
#[inline(always)]
pub fn round_mix(j: usize, b: u32, c: u32, d: u32) -> (u32, usize) {
    match j {
        0..16 => ((b & c) | (!b & d), j),
        16..32 => ((d & b) | (!d & c), (5 * j + 1) % 16),
        32..48 => (b ^ c ^ d, (3 * j + 5) % 16),
        _ => (c ^ (b | !d), (7 * j) % 16),
    }
}

/// Run the 64 rounds over one block and accumulate into `state`
#[inline(always)]
pub fn compress(state: &mut [u32; 4], block: &[u8; BLOCK_SIZE]) {
    let m = load_words(block);
    let [mut a, mut b, mut c, mut d] = *state;

    for j in 0..ROUNDS {
        let (f, g) = round_mix(j, b, c, d);
        let f = f.wrapping_add(a).wrapping_add(K[j]).wrapping_add(m[g]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(f.rotate_left(S[j]));
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}
