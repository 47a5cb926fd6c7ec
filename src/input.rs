//! Command-line input decoding

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Turn a command-line argument into the bytes to digest
///
/// With `hex` set, the argument is hex-decoded (an optional `0x` prefix and
/// ASCII whitespace are ignored). Otherwise its UTF-8 bytes are used as-is.
pub fn decode_input(raw: &str, hex: bool) -> Result<Vec<u8>, InputError> {
    if !hex {
        return Ok(raw.as_bytes().to_vec());
    }

    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let compact: String = digits
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    Ok(hex::decode(compact)?)
}
