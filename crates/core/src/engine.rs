//! MD5 digest engine and 64-bit folding
//!
//! The padded message is never materialised. Whole input blocks are compressed
//! straight from the caller's slice; only the tail (at most two blocks, holding
//! the last partial block, the `0x80` terminator and the length field) is
//! assembled in a stack buffer.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;

use crate::params::*;
use crate::primitives::compress;

/// Folded 64-bit digest
pub type Digest64 = u64;

/// Encoding of the trailing bit-length field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthField {
    /// Full little-endian 64-bit bit count (RFC 1321)
    #[default]
    Full64,
    /// Only the low 32 bits of the bit count; the upper four bytes stay zero.
    ///
    /// Matches digests produced by older checksum stores that wrote a 32-bit
    /// counter into the length slot. Identical to `Full64` for inputs shorter
    /// than 512 MiB.
    Truncated32,
}

impl LengthField {
    /// Width of the representable bit count
    pub const fn bits(self) -> u32 {
        match self {
            LengthField::Full64 => 64,
            LengthField::Truncated32 => 32,
        }
    }

    /// Little-endian length field bytes for `bit_len`
    #[inline(always)]
    pub(crate) fn encode(self, bit_len: u64) -> [u8; LENGTH_FIELD_SIZE] {
        match self {
            LengthField::Full64 => bit_len.to_le_bytes(),
            LengthField::Truncated32 => u64::from(bit_len as u32).to_le_bytes(),
        }
    }
}

/// Errors from the strict digest entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DigestError {
    #[error("input of {len} bytes does not fit a {bits}-bit length field")]
    LengthOverflow { len: usize, bits: u32 },
}

/// 128-bit MD5 digest stored as two 64-bit halves
///
/// The low half packs `A | B << 32` and the high half `C | D << 32`. Use
/// [`Digest128::to_bytes`] or the `Display` impl for the conventional RFC 1321
/// byte order and hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Digest128([u64; 2]);

impl Digest128 {
    /// Build a digest from its `(A|B<<32, C|D<<32)` halves
    pub const fn from_halves(low: u64, high: u64) -> Self {
        Self([low, high])
    }

    /// Pack a final working state
    pub const fn from_state(state: [u32; 4]) -> Self {
        Self([
            state[0] as u64 | (state[1] as u64) << 32,
            state[2] as u64 | (state[3] as u64) << 32,
        ])
    }

    /// Parse the RFC 1321 byte representation
    pub fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        let mut low = [0u8; 8];
        let mut high = [0u8; 8];
        low.copy_from_slice(&bytes[..8]);
        high.copy_from_slice(&bytes[8..]);
        Self([u64::from_le_bytes(low), u64::from_le_bytes(high)])
    }

    /// `A | B << 32`
    pub const fn low(&self) -> u64 {
        self.0[0]
    }

    /// `C | D << 32`
    pub const fn high(&self) -> u64 {
        self.0[1]
    }

    /// Both halves in `(A‖B, C‖D)` order
    pub const fn halves(&self) -> (u64, u64) {
        (self.0[0], self.0[1])
    }

    /// XOR of the two halves
    pub const fn fold(&self) -> Digest64 {
        self.0[0] ^ self.0[1]
    }

    /// RFC 1321 byte order (the bytes behind the usual hex string)
    pub fn to_bytes(&self) -> [u8; DIGEST_SIZE] {
        let mut out = [0u8; DIGEST_SIZE];
        out[..8].copy_from_slice(&self.0[0].to_le_bytes());
        out[8..].copy_from_slice(&self.0[1].to_le_bytes());
        out
    }
}

impl fmt::Display for Digest128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Digest128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl From<Digest128> for (u64, u64) {
    fn from(digest: Digest128) -> Self {
        digest.halves()
    }
}

impl From<(u64, u64)> for Digest128 {
    fn from((low, high): (u64, u64)) -> Self {
        Self::from_halves(low, high)
    }
}

impl From<Digest128> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest128) -> Self {
        digest.to_bytes()
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest128 {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Total padded stream length for an input of `len` bytes
///
/// Smallest multiple of [`BLOCK_SIZE`] with room for the input, the `0x80`
/// terminator and the length field.
pub const fn padded_len(len: usize) -> usize {
    (len + MIN_PADDING).div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}

/// Bit length of a `len`-byte input, or an error if `field` cannot hold it
pub fn bit_length(len: usize, field: LengthField) -> Result<u64, DigestError> {
    let overflow = DigestError::LengthOverflow {
        len,
        bits: field.bits(),
    };

    let bits = u64::try_from(len)
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or(overflow)?;

    match field {
        LengthField::Full64 => Ok(bits),
        LengthField::Truncated32 if bits > u64::from(u32::MAX) => Err(overflow),
        LengthField::Truncated32 => Ok(bits),
    }
}

/// MD5 digest engine
///
/// Holds no working state between calls, only the length field encoding, so a
/// single engine can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigestEngine {
    length_field: LengthField,
}

impl DigestEngine {
    /// Engine with the RFC 1321 64-bit length field
    pub const fn new() -> Self {
        Self {
            length_field: LengthField::Full64,
        }
    }

    /// Engine with an explicit length field encoding
    pub const fn with_length_field(length_field: LengthField) -> Self {
        Self { length_field }
    }

    pub const fn length_field(&self) -> LengthField {
        self.length_field
    }

    /// Compute the 128-bit digest of `input`
    ///
    /// Total over all inputs. A bit length wider than the length field wraps
    /// silently; use [`DigestEngine::try_digest`] to reject such inputs.
    pub fn digest(&self, input: &[u8]) -> Digest128 {
        let mut state = INITIAL_STATE;

        let mut blocks = input.chunks_exact(BLOCK_SIZE);
        let mut block = [0u8; BLOCK_SIZE];
        for chunk in &mut blocks {
            block.copy_from_slice(chunk);
            compress(&mut state, &block);
        }

        // Tail: leftover bytes, terminator, zero fill, length field
        let tail = blocks.remainder();
        let tail_len = padded_len(tail.len());
        let mut buffer = [0u8; 2 * BLOCK_SIZE];
        buffer[..tail.len()].copy_from_slice(tail);
        buffer[tail.len()] = PADDING_BYTE;

        let bit_len = (input.len() as u64).wrapping_mul(8);
        buffer[tail_len - LENGTH_FIELD_SIZE..tail_len]
            .copy_from_slice(&self.length_field.encode(bit_len));

        for chunk in buffer[..tail_len].chunks_exact(BLOCK_SIZE) {
            block.copy_from_slice(chunk);
            compress(&mut state, &block);
        }

        Digest128::from_state(state)
    }

    /// Like [`DigestEngine::digest`], but rejects inputs whose bit length the
    /// length field cannot represent
    pub fn try_digest(&self, input: &[u8]) -> Result<Digest128, DigestError> {
        bit_length(input.len(), self.length_field)?;
        Ok(self.digest(input))
    }

    /// Folded 64-bit digest of `input`
    pub fn digest64(&self, input: &[u8]) -> Digest64 {
        self.digest(input).fold()
    }

    /// Digest every input, preserving order
    #[cfg(feature = "parallel")]
    pub fn digest_batch(&self, inputs: &[&[u8]]) -> Vec<Digest128> {
        inputs.par_iter().map(|input| self.digest(input)).collect()
    }

    /// Digest every input, preserving order (sequential fallback)
    #[cfg(not(feature = "parallel"))]
    pub fn digest_batch(&self, inputs: &[&[u8]]) -> Vec<Digest128> {
        inputs.iter().map(|input| self.digest(input)).collect()
    }
}

/// Convenience function for single-shot MD5
///
/// Uses the RFC 1321 64-bit length field.
///
/// # Example
///
/// ```rust
/// use md5fold_core::digest;
///
/// let d = digest(b"abc");
/// assert_eq!(d.to_string(), "900150983cd24fb0d6963f7d28e17f72");
/// ```
pub fn digest(input: &[u8]) -> Digest128 {
    DigestEngine::new().digest(input)
}

/// Strict single-shot MD5, see [`DigestEngine::try_digest`]
pub fn try_digest(input: &[u8]) -> Result<Digest128, DigestError> {
    DigestEngine::new().try_digest(input)
}

/// Folded 64-bit MD5 of `input`
///
/// Half the width of the full digest, so only suitable where 64-bit collision
/// resistance is enough (hash-table keys, quick checksums).
///
/// ```rust
/// use md5fold_core::{digest, digest64, fold};
///
/// assert_eq!(digest64(b"abc"), fold(digest(b"abc")));
/// ```
pub fn digest64(input: &[u8]) -> Digest64 {
    DigestEngine::new().digest64(input)
}

/// XOR the two halves of a 128-bit digest
#[inline(always)]
pub fn fold(digest: Digest128) -> Digest64 {
    digest.fold()
}

/// Digest many independent inputs, on the rayon pool when `parallel` is enabled
pub fn digest_batch(inputs: &[&[u8]]) -> Vec<Digest128> {
    DigestEngine::new().digest_batch(inputs)
}
