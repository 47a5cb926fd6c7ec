//! Known-answer self-test
//!
//! Runs the RFC 1321 appendix A.5 suite plus inputs straddling the padding
//! boundary, and checks that folding agrees with the full digest.

use tracing::{debug, warn};

use crate::{fold, DigestEngine};

/// RFC 1321 appendix A.5
const RFC1321_SUITE: [(&str, &str); 7] = [
    ("", "d41d8cd98f00b204e9800998ecf8427e"),
    ("a", "0cc175b9c0f1b6a831c399e269772661"),
    ("abc", "900150983cd24fb0d6963f7d28e17f72"),
    ("message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
    (
        "abcdefghijklmnopqrstuvwxyz",
        "c3fcd3d76192e4007dfb496cca67e13b",
    ),
    (
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
        "d174ab98d277d9f5a5611c2c9f419d9f",
    ),
    (
        "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
        "57edf4a22be3c955ac49da2e2107b67a",
    ),
];

/// Runs of `'a'` around the 56- and 64-byte padding edges
const BOUNDARY_SUITE: [(usize, &str); 5] = [
    (55, "ef1772b6dff9a122358552954ad0df65"),
    (56, "3b0c8ac703f828b04c6c197006d17218"),
    (63, "b06521f39153d618550606be297466d5"),
    (64, "014842d480b571495a4a0363793f7367"),
    (119, "8a7bd0732ed6a28ce75f6dabc90e1613"),
];

/// A single known-answer case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    pub input: Vec<u8>,
    pub expected: &'static str,
}

/// A case whose digest did not match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub name: String,
    pub expected: String,
    pub actual: String,
}

/// Outcome of a self-test run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfTestReport {
    pub passed: usize,
    pub failures: Vec<Failure>,
}

impl SelfTestReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }
}

/// All built-in cases
pub fn cases() -> Vec<Case> {
    let rfc = RFC1321_SUITE.iter().map(|&(input, expected)| Case {
        name: format!("MD5({:?})", input),
        input: input.as_bytes().to_vec(),
        expected,
    });
    let boundary = BOUNDARY_SUITE.iter().map(|&(len, expected)| Case {
        name: format!("MD5(\"a\" x {})", len),
        input: vec![b'a'; len],
        expected,
    });
    rfc.chain(boundary).collect()
}

/// Check `engine` against `cases`
pub fn run_cases(engine: &DigestEngine, cases: &[Case]) -> SelfTestReport {
    let mut report = SelfTestReport::default();

    for case in cases {
        let digest = engine.digest(&case.input);
        let actual = digest.to_string();

        if actual != case.expected {
            warn!(case = %case.name, expected = case.expected, %actual, "digest mismatch");
            report.failures.push(Failure {
                name: case.name.clone(),
                expected: case.expected.to_string(),
                actual,
            });
            continue;
        }

        let folded = engine.digest64(&case.input);
        if folded != fold(digest) {
            warn!(case = %case.name, "digest64 disagrees with folded digest");
            report.failures.push(Failure {
                name: format!("{} (digest64)", case.name),
                expected: format!("{:016x}", fold(digest)),
                actual: format!("{:016x}", folded),
            });
            continue;
        }

        debug!(case = %case.name, md5 = %actual, "ok");
        report.passed += 1;
    }

    report
}

/// Check `engine` against every built-in case
pub fn run(engine: &DigestEngine) -> SelfTestReport {
    run_cases(engine, &cases())
}
