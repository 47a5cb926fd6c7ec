//! md5fold
//!
//! MD5 digests and folded 64-bit checksums.
//!
//! # Overview
//!
//! The algorithm lives in `md5fold-core` (re-exported here as [`algorithm`]).
//! This crate adds what the `md5fold` binary needs on top: input decoding,
//! output rendering and the RFC 1321 self-test.
//!
//! # Example
//!
//! ```rust
//! use md5fold::algorithm::{digest, digest64};
//!
//! let d = digest(b"abc");
//! assert_eq!(d.to_string(), "900150983cd24fb0d6963f7d28e17f72");
//! assert_eq!(digest64(b"abc"), d.low() ^ d.high());
//! ```

// Re-export the core algorithm
pub use md5fold_core as algorithm;

pub mod input;
pub mod report;
pub mod selftest;

// Convenience re-exports
pub use algorithm::{digest, digest64, fold, Digest128, Digest64, DigestEngine, LengthField};
