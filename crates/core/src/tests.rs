//! Tests for the MD5 engine and folding

use crate::primitives::{K, S, compress, load_words, round_mix};
use crate::{
    BLOCK_SIZE, DIGEST_SIZE, Digest128, DigestEngine, DigestError, INITIAL_STATE, LengthField,
    bit_length, digest, digest_batch, digest64, fold, padded_len, try_digest,
};

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// RFC 1321 appendix A.5 test suite
const RFC1321_SUITE: [(&[u8], &str); 7] = [
    (b"", "d41d8cd98f00b204e9800998ecf8427e"),
    (b"a", "0cc175b9c0f1b6a831c399e269772661"),
    (b"abc", "900150983cd24fb0d6963f7d28e17f72"),
    (b"message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
    (
        b"abcdefghijklmnopqrstuvwxyz",
        "c3fcd3d76192e4007dfb496cca67e13b",
    ),
    (
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
        "d174ab98d277d9f5a5611c2c9f419d9f",
    ),
    (
        b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
        "57edf4a22be3c955ac49da2e2107b67a",
    ),
];

/// Reference digest from the RustCrypto `md-5` crate
fn reference(data: &[u8]) -> [u8; DIGEST_SIZE] {
    use md5::{Digest, Md5};
    Md5::digest(data).into()
}

#[test]
fn test_empty_input() {
    let d = digest(b"");
    assert_eq!(d.halves(), (0x04b2_008f_d98c_1dd4, 0x7e42_f8ec_9809_80e9));
    assert_eq!(d.to_string(), "d41d8cd98f00b204e9800998ecf8427e");
}

#[test]
fn test_abc() {
    let d = digest(b"abc");
    assert_eq!(d.low(), 0xb04f_d23c_9850_0190);
    assert_eq!(d.high(), 0x727f_e128_7d3f_96d6);
    assert_eq!(hex::encode(d.to_bytes()), "900150983cd24fb0d6963f7d28e17f72");
}

#[test]
fn test_rfc1321_suite() {
    for (input, expected) in RFC1321_SUITE {
        let d = digest(input);
        assert_eq!(
            hex::encode(d.to_bytes()),
            expected,
            "MD5 mismatch for {:?}",
            String::from_utf8_lossy(input)
        );
        assert_eq!(format!("{:x}", d), expected);
    }
}

#[test]
fn test_padding_boundaries() {
    // (length of 'a' run, expected MD5)
    let vectors = [
        (55, "ef1772b6dff9a122358552954ad0df65"),
        (56, "3b0c8ac703f828b04c6c197006d17218"),
        (57, "652b906d60af96844ebd21b674f35e93"),
        (63, "b06521f39153d618550606be297466d5"),
        (64, "014842d480b571495a4a0363793f7367"),
        (65, "c743a45e0d2e6a95cb859adae0248435"),
        (119, "8a7bd0732ed6a28ce75f6dabc90e1613"),
        (120, "5f61c0ccad4cac44c75ff505e1f1e537"),
        (128, "e510683b3f5ffe4093d021808bc6ff70"),
    ];

    for (len, expected) in vectors {
        let input = vec![b'a'; len];
        assert_eq!(digest(&input).to_string(), expected, "length {}", len);
    }
}

#[test]
fn test_padded_len() {
    assert_eq!(padded_len(0), 64);
    assert_eq!(padded_len(55), 64);
    assert_eq!(padded_len(56), 128);
    assert_eq!(padded_len(63), 128);
    assert_eq!(padded_len(64), 128);
    assert_eq!(padded_len(119), 128);
    assert_eq!(padded_len(120), 192);

    for len in 0..512 {
        let padded = padded_len(len);
        assert_eq!(padded % BLOCK_SIZE, 0);
        assert!(padded >= len + 9);
        assert!(padded - BLOCK_SIZE < len + 9, "not minimal for {}", len);
    }
}

#[test]
fn test_matches_reference_implementation() {
    let mut rng = StdRng::seed_from_u64(0x6d64_3566_6f6c_64);

    for len in 0..=300 {
        let mut input = vec![0u8; len];
        rng.fill(input.as_mut_slice());
        assert_eq!(
            digest(&input).to_bytes(),
            reference(&input),
            "reference mismatch at length {}",
            len
        );
    }
}

#[test]
fn test_large_input() {
    let input = vec![0xABu8; 1 << 20];
    assert_eq!(digest(&input).to_bytes(), reference(&input));
}

#[test]
fn test_digest64_is_fold() {
    for (input, _) in RFC1321_SUITE {
        let d = digest(input);
        assert_eq!(digest64(input), fold(d));
        assert_eq!(fold(d), d.low() ^ d.high());
    }

    assert_eq!(digest64(b""), 0x7af0_f863_4185_9d3d);
    assert_eq!(digest64(b"abc"), 0xc230_3314_e56f_9746);
}

#[test]
fn test_avalanche_effect() {
    let mut rng = StdRng::seed_from_u64(42);
    let samples = 2000;
    let mut total_diff_bits = 0u64;

    for _ in 0..samples {
        let len = rng.gen_range(1..200);
        let mut input = vec![0u8; len];
        rng.fill(input.as_mut_slice());

        let original = digest(&input);
        let bit = rng.gen_range(0..len * 8);
        input[bit / 8] ^= 1u8 << (bit % 8);
        let flipped = digest(&input);

        assert_ne!(original, flipped, "single bit flip left digest unchanged");
        total_diff_bits +=
            u64::from((original.low() ^ flipped.low()).count_ones())
                + u64::from((original.high() ^ flipped.high()).count_ones());
    }

    // Expect ~64 of 128 bits to differ on average
    let mean = total_diff_bits as f64 / samples as f64;
    assert!(
        (60.0..=68.0).contains(&mean),
        "Avalanche effect: mean {} bits differ (expected ~64)",
        mean
    );
}

#[cfg(feature = "std")]
#[test]
fn test_concurrent_matches_sequential() {
    let inputs: Vec<Vec<u8>> = (0..64u32)
        .map(|i| (0..i * 7).map(|b| (b ^ i) as u8).collect())
        .collect();
    let sequential: Vec<Digest128> = inputs.iter().map(|input| digest(input)).collect();

    let concurrent: Vec<Digest128> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || digest(input)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn test_digest_batch_preserves_order() {
    let inputs: Vec<&[u8]> = RFC1321_SUITE.iter().map(|(input, _)| *input).collect();
    let batch = digest_batch(&inputs);

    assert_eq!(batch.len(), inputs.len());
    for (d, (_, expected)) in batch.iter().zip(RFC1321_SUITE) {
        assert_eq!(d.to_string(), expected);
    }
    assert!(digest_batch(&[]).is_empty());
}

#[test]
fn test_legacy_length_field() {
    let legacy = DigestEngine::with_length_field(LengthField::Truncated32);
    assert_eq!(legacy.length_field(), LengthField::Truncated32);
    assert_eq!(DigestEngine::default().length_field(), LengthField::Full64);

    // Below 2^29 bytes both encodings agree
    for (input, expected) in RFC1321_SUITE {
        assert_eq!(legacy.digest(input).to_string(), expected);
        assert_eq!(legacy.digest64(input), digest64(input));
    }

    // 2^29 bytes = 2^32 bits: the legacy field wraps to zero
    let bits = 1u64 << 32;
    assert_eq!(LengthField::Full64.encode(bits), [0, 0, 0, 0, 1, 0, 0, 0]);
    assert_eq!(LengthField::Truncated32.encode(bits), [0; 8]);
    assert_eq!(
        LengthField::Truncated32.encode(bits + 0x1234_5678),
        [0x78, 0x56, 0x34, 0x12, 0, 0, 0, 0]
    );
}

#[test]
fn test_bit_length_limits() {
    assert_eq!(bit_length(0, LengthField::Full64), Ok(0));
    assert_eq!(bit_length(3, LengthField::Full64), Ok(24));
    assert_eq!(
        bit_length((1 << 29) - 1, LengthField::Truncated32),
        Ok(u64::from(u32::MAX) - 7)
    );
    assert_eq!(
        bit_length(1 << 29, LengthField::Truncated32),
        Err(DigestError::LengthOverflow {
            len: 1 << 29,
            bits: 32
        })
    );

    #[cfg(target_pointer_width = "64")]
    {
        assert_eq!(
            bit_length((1 << 61) - 1, LengthField::Full64),
            Ok(u64::MAX - 7)
        );
        assert_eq!(
            bit_length(1 << 61, LengthField::Full64),
            Err(DigestError::LengthOverflow {
                len: 1 << 61,
                bits: 64
            })
        );
    }
}

#[test]
fn test_try_digest() {
    assert_eq!(try_digest(b"abc"), Ok(digest(b"abc")));
    let legacy = DigestEngine::with_length_field(LengthField::Truncated32);
    assert_eq!(legacy.try_digest(b""), Ok(digest(b"")));
}

#[test]
fn test_length_overflow_message() {
    let err = DigestError::LengthOverflow { len: 1 << 29, bits: 32 };
    assert_eq!(
        err.to_string(),
        "input of 536870912 bytes does not fit a 32-bit length field"
    );
}

#[test]
fn test_digest128_conversions() {
    let d = digest(b"message digest");
    let bytes: [u8; DIGEST_SIZE] = d.into();
    assert_eq!(Digest128::from(bytes), d);
    assert_eq!(Digest128::from_bytes(d.to_bytes()), d);

    let halves: (u64, u64) = d.into();
    assert_eq!(Digest128::from(halves), d);
    assert_eq!(Digest128::from_halves(halves.0, halves.1), d);
}

#[test]
fn test_from_state_packing() {
    let d = Digest128::from_state([0x1111_1111, 0x2222_2222, 0x3333_3333, 0x4444_4444]);
    assert_eq!(d.low(), 0x2222_2222_1111_1111);
    assert_eq!(d.high(), 0x4444_4444_3333_3333);
    assert_eq!(d.fold(), 0x6666_6666_2222_2222);
}

#[test]
fn test_round_tables() {
    for (i, k) in K.iter().enumerate() {
        let expected = ((i as f64 + 1.0).sin().abs() * 4_294_967_296.0) as u32;
        assert_eq!(*k, expected, "K[{}]", i);
    }

    let groups = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];
    for (j, s) in S.iter().enumerate() {
        assert_eq!(*s, groups[j / 16][j % 4], "S[{}]", j);
    }
}

#[test]
fn test_round_mix_word_schedule() {
    let indices: Vec<usize> = (0..64).map(|j| round_mix(j, 0, 0, 0).1).collect();

    // Each round group visits every message word exactly once
    for group in indices.chunks(16) {
        let mut seen = [false; 16];
        for &g in group {
            seen[g] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    assert_eq!(&indices[..4], &[0, 1, 2, 3]);
    assert_eq!(&indices[16..20], &[1, 6, 11, 0]);
    assert_eq!(&indices[32..36], &[5, 8, 11, 14]);
    assert_eq!(&indices[48..52], &[0, 7, 14, 5]);
}

#[test]
fn test_load_words_little_endian() {
    let mut block = [0u8; BLOCK_SIZE];
    block[..4].copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
    block[60..].copy_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);

    let m = load_words(&block);
    assert_eq!(m[0], 0x0403_0201);
    assert_eq!(m[15], 0xDDCC_BBAA);
    assert!(m[1..15].iter().all(|&w| w == 0));
}

#[test]
fn test_compress_single_padded_block() {
    // "abc" fits in one block: data, terminator, zeros, bit length
    let mut block = [0u8; BLOCK_SIZE];
    block[..3].copy_from_slice(b"abc");
    block[3] = 0x80;
    block[56..].copy_from_slice(&24u64.to_le_bytes());

    let mut state = INITIAL_STATE;
    compress(&mut state, &block);
    assert_eq!(Digest128::from_state(state), digest(b"abc"));
}

#[cfg(feature = "std")]
#[test]
fn test_ffi_digest() {
    use crate::ffi::*;

    let input = b"abc";
    let mut out = [0u64; 2];
    md5fold_digest(input.as_ptr(), input.len(), out.as_mut_ptr());
    assert_eq!((out[0], out[1]), digest(input).halves());
    assert_eq!(md5fold_digest64(input.as_ptr(), input.len()), digest64(input));

    md5fold_digest_legacy(input.as_ptr(), input.len(), out.as_mut_ptr());
    assert_eq!((out[0], out[1]), digest(input).halves());
    assert_eq!(
        md5fold_digest64_legacy(input.as_ptr(), input.len()),
        digest64(input)
    );
}

#[cfg(feature = "std")]
#[test]
fn test_ffi_null_pointers() {
    use crate::ffi::*;

    // Null with zero length is the empty input
    let mut out = [0u64; 2];
    md5fold_digest(core::ptr::null(), 0, out.as_mut_ptr());
    assert_eq!((out[0], out[1]), digest(b"").halves());
    assert_eq!(md5fold_digest64(core::ptr::null(), 0), digest64(b""));

    // Null with non-zero length leaves the output untouched
    let mut out = [7u64; 2];
    md5fold_digest(core::ptr::null(), 16, out.as_mut_ptr());
    assert_eq!(out, [7, 7]);
    assert_eq!(md5fold_digest64(core::ptr::null(), 16), 0);

    // Null output is ignored
    md5fold_digest(b"abc".as_ptr(), 3, core::ptr::null_mut());
}

#[cfg(feature = "std")]
#[test]
fn test_ffi_throughput() {
    assert_eq!(crate::ffi::md5fold_throughput(1_000_000, 0), 0.0);
    assert_eq!(crate::ffi::md5fold_throughput(2_000_000, 1_000_000), 2.0);
    // Smoke run
    let _ = crate::ffi::md5fold_benchmark(4, 256);
}

proptest! {
    #[test]
    fn prop_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(digest(&data), digest(&data));
    }

    #[test]
    fn prop_digest64_folds_digest(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(digest64(&data), fold(digest(&data)));
    }

    #[test]
    fn prop_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        prop_assert_eq!(digest(&data).to_bytes(), reference(&data));
    }
}

#[test]
#[ignore] // Run with: cargo test timing_breakdown -- --ignored --nocapture
fn timing_breakdown() {
    use std::time::Instant;

    let iterations = 1000;
    for size in [0usize, 55, 64, 1024, 64 * 1024] {
        let input = vec![0x5Au8; size];
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = digest(std::hint::black_box(&input));
        }
        let per_digest = start.elapsed() / iterations;
        let blocks = padded_len(size) / BLOCK_SIZE;
        println!(
            "size {:>6} B | {:>3} blocks | {:?} per digest | {:?} per block",
            size,
            blocks,
            per_digest,
            per_digest / blocks as u32
        );
    }
}
