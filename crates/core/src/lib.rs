//! # md5fold core
//!
//! MD5 (RFC 1321) over fully buffered inputs, plus a folded 64-bit variant
//! that XORs the two halves of the 128-bit digest.
//!
//! MD5 is broken for collision resistance. Use this crate for compatibility
//! and checksums, never for security.
//!
//! ## Output layout
//!
//! A [`Digest128`] is two `u64` halves built from the final state words:
//!
//! ```text
//! low  = A | B << 32
//! high = C | D << 32
//! ```
//!
//! Writing both halves little-endian gives the usual RFC 1321 byte order, which
//! is what `Display` and [`Digest128::to_bytes`] produce.
//!
//! ## Example
//!
//! ```rust
//! use md5fold_core::{DigestEngine, LengthField, digest, digest64};
//!
//! // Single-shot
//! let d = digest(b"");
//! assert_eq!(d.to_string(), "d41d8cd98f00b204e9800998ecf8427e");
//!
//! // 64-bit checksum
//! let key = digest64(b"some key");
//! assert_eq!(key, digest(b"some key").fold());
//!
//! // Legacy stores that only wrote a 32-bit length
//! let legacy = DigestEngine::with_length_field(LengthField::Truncated32);
//! assert_eq!(legacy.digest(b"abc"), digest(b"abc"));
//! ```
//!
//! ## no_std Support
//!
//! ```toml
//! [dependencies]
//! md5fold-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod engine;
mod params;
mod primitives;

#[cfg(feature = "std")]
mod ffi;

pub use engine::{
    Digest64, Digest128, DigestEngine, DigestError, LengthField, bit_length, digest, digest_batch,
    digest64, fold, padded_len, try_digest,
};
pub use params::*;

#[cfg(test)]
mod tests;
