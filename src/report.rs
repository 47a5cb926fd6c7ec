//! Output rendering for digests

use serde::{Deserialize, Serialize};

use crate::{Digest128, Digest64, LengthField};

/// Output format for the full digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DigestFormat {
    /// The two packed 64-bit halves, `0x<A|B<<32> 0x<C|D<<32>`
    Packed,
    /// Conventional RFC 1321 hex string
    #[default]
    Rfc,
    /// JSON report with every representation
    Json,
}

/// Output format for the folded digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Digest64Format {
    /// `0x`-prefixed 16-digit hex
    #[default]
    Packed,
    /// JSON report
    Json,
}

/// Everything known about one digest computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestReport {
    /// Number of input bytes
    pub input_len: usize,
    /// Length field encoding used
    pub length_field: String,
    /// RFC 1321 hex string
    pub md5: String,
    /// `A | B << 32`
    pub low: String,
    /// `C | D << 32`
    pub high: String,
    /// XOR of both halves
    pub digest64: String,
}

impl DigestReport {
    pub fn new(digest: Digest128, input_len: usize, length_field: LengthField) -> Self {
        Self {
            input_len,
            length_field: length_field_name(length_field).to_string(),
            md5: digest.to_string(),
            low: format_u64(digest.low()),
            high: format_u64(digest.high()),
            digest64: format_u64(digest.fold()),
        }
    }
}

/// Folded-digest report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest64Report {
    pub input_len: usize,
    pub length_field: String,
    pub digest64: String,
}

/// Stable name of a length field encoding
pub fn length_field_name(length_field: LengthField) -> &'static str {
    match length_field {
        LengthField::Full64 => "full64",
        LengthField::Truncated32 => "truncated32",
    }
}

/// `0x`-prefixed, zero-padded 16-digit hex
pub fn format_u64(value: u64) -> String {
    format!("0x{:016x}", value)
}

/// Render a full digest in the requested format
pub fn render_digest(
    digest: Digest128,
    input_len: usize,
    length_field: LengthField,
    format: DigestFormat,
) -> serde_json::Result<String> {
    match format {
        DigestFormat::Packed => Ok(format!(
            "{} {}",
            format_u64(digest.low()),
            format_u64(digest.high())
        )),
        DigestFormat::Rfc => Ok(digest.to_string()),
        DigestFormat::Json => {
            serde_json::to_string_pretty(&DigestReport::new(digest, input_len, length_field))
        }
    }
}

/// Render a folded digest in the requested format
pub fn render_digest64(
    digest64: Digest64,
    input_len: usize,
    length_field: LengthField,
    format: Digest64Format,
) -> serde_json::Result<String> {
    match format {
        Digest64Format::Packed => Ok(format_u64(digest64)),
        Digest64Format::Json => serde_json::to_string_pretty(&Digest64Report {
            input_len,
            length_field: length_field_name(length_field).to_string(),
            digest64: format_u64(digest64),
        }),
    }
}
