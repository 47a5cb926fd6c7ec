//! C FFI bindings
//!
//! Mirrors the classic `md5(input, len)` / `md5_64(input, len)` C surface.
//! Digests come back as two `u64` halves in `(A|B<<32, C|D<<32)` order.

use crate::{DigestEngine, LengthField};
use core::slice;

/// Borrow `len` bytes at `input`, treating a null pointer as empty only when
/// `len == 0`
///
/// # Safety
/// A non-null `input` must be readable for `len` bytes.
unsafe fn input_slice<'a>(input: *const u8, len: usize) -> Option<&'a [u8]> {
    if input.is_null() {
        return (len == 0).then_some(&[][..]);
    }
    Some(unsafe { slice::from_raw_parts(input, len) })
}

fn write_digest(engine: DigestEngine, input: *const u8, len: usize, out: *mut u64) {
    if out.is_null() {
        return;
    }

    unsafe {
        let Some(input) = input_slice(input, len) else {
            return;
        };
        let (low, high) = engine.digest(input).halves();
        let out = slice::from_raw_parts_mut(out, 2);
        out[0] = low;
        out[1] = high;
    }
}

fn folded_digest(engine: DigestEngine, input: *const u8, len: usize) -> u64 {
    match unsafe { input_slice(input, len) } {
        Some(input) => engine.digest64(input),
        None => 0,
    }
}

/// Compute the MD5 of `input`
/// - input: pointer to input bytes (may be null when `len` is 0)
/// - len: length of input
/// - out: pointer to two `u64` for the result
#[unsafe(no_mangle)]
pub extern "C" fn md5fold_digest(input: *const u8, len: usize, out: *mut u64) {
    write_digest(DigestEngine::new(), input, len, out);
}

/// Compute the folded 64-bit MD5 of `input`
/// Returns 0 if `input` is null and `len` is non-zero.
#[unsafe(no_mangle)]
pub extern "C" fn md5fold_digest64(input: *const u8, len: usize) -> u64 {
    folded_digest(DigestEngine::new(), input, len)
}

/// `md5fold_digest` with the legacy 32-bit length field
#[unsafe(no_mangle)]
pub extern "C" fn md5fold_digest_legacy(input: *const u8, len: usize, out: *mut u64) {
    write_digest(
        DigestEngine::with_length_field(LengthField::Truncated32),
        input,
        len,
        out,
    );
}

/// `md5fold_digest64` with the legacy 32-bit length field
#[unsafe(no_mangle)]
pub extern "C" fn md5fold_digest64_legacy(input: *const u8, len: usize) -> u64 {
    folded_digest(
        DigestEngine::with_length_field(LengthField::Truncated32),
        input,
        len,
    )
}

/// Benchmark: digest `iterations` inputs of `size` bytes, return total microseconds
#[unsafe(no_mangle)]
pub extern "C" fn md5fold_benchmark(iterations: u32, size: usize) -> u64 {
    use std::hint::black_box;
    use std::time::Instant;

    let engine = DigestEngine::new();
    let mut data = vec![0x5Au8; size.max(4)];

    let start = Instant::now();
    for i in 0..iterations {
        data[..4].copy_from_slice(&i.to_le_bytes());
        black_box(engine.digest(black_box(&data)));
    }
    let elapsed = start.elapsed();

    elapsed.as_micros() as u64
}

/// Throughput in MB/s for `bytes` processed in `microseconds`
#[unsafe(no_mangle)]
pub extern "C" fn md5fold_throughput(bytes: u64, microseconds: u64) -> f64 {
    if microseconds == 0 {
        return 0.0;
    }
    (bytes as f64 / 1_000_000.0) / (microseconds as f64 / 1_000_000.0)
}
