//! Base64URL encoding/decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate. Token segments are encoded
//! without padding; decoding restores the `=` fill characters first, so
//! segments from encoders that kept or partially stripped padding-aligned
//! lengths still decode.

use crate::error::{Error, Result};
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;

/// Encode bytes to an unpadded Base64URL string.
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode a string to unpadded Base64URL.
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode a Base64URL segment to bytes, restoring stripped padding.
pub fn decode_bytes(input: &str) -> Result<Vec<u8>> {
    URL_SAFE
        .decode(restore_padding(input))
        .map_err(|e| Error::FormatInvalidBase64(e.to_string()))
}

/// Decode a Base64URL segment to a UTF-8 string.
pub fn decode(input: &str) -> Result<String> {
    let bytes = decode_bytes(input)?;
    String::from_utf8(bytes).map_err(|e| Error::FormatInvalidBase64(format!("Invalid UTF-8: {e}")))
}

/// Append `=` fill characters until the length is a multiple of four.
///
/// A remainder of one cannot come from a valid encoding; it is still
/// padded to alignment so the decoder rejects it instead of anything
/// panicking here.
fn restore_padding(input: &str) -> String {
    let fill = match input.len() % 4 {
        0 => 0,
        3 => 1,
        2 => 2,
        _ => 3,
    };
    let mut padded = String::with_capacity(input.len() + fill);
    padded.push_str(input);
    for _ in 0..fill {
        padded.push('=');
    }
    padded
}
