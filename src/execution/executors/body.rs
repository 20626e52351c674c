//! Body decoding stages.
//!
//! A fetched body goes through two strictly ordered stages: UTF-8 decoding,
//! then JSON parsing. A body that fails to decode is never handed to the
//! parser.

use crate::error::FetchError;
use crate::types::JsonValue;
use serde::de::DeserializeOwned;

const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Decode raw body bytes as UTF-8, skipping a leading byte order mark.
///
/// Offsets in the returned [`FetchError::DecodeError`] are relative to the
/// raw body, BOM included.
pub fn decode_body(bytes: &[u8]) -> Result<&str, FetchError> {
    let (offset, rest) = match bytes.strip_prefix(&UTF8_BOM[..]) {
        Some(rest) => (UTF8_BOM.len(), rest),
        None => (0, bytes),
    };
    std::str::from_utf8(rest).map_err(|e| FetchError::DecodeError {
        valid_up_to: offset + e.valid_up_to(),
        error_len: e.error_len(),
    })
}

/// Parse decoded text as a JSON document.
pub fn parse_json_text(text: &str) -> Result<JsonValue, FetchError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode then parse.
pub fn parse_json_body(bytes: &[u8]) -> Result<JsonValue, FetchError> {
    parse_json_text(decode_body(bytes)?)
}

/// Decode, parse and deserialize into `T`. A document of the wrong shape is
/// reported as [`FetchError::ParseError`].
pub fn deserialize_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FetchError> {
    Ok(serde_json::from_str(decode_body(bytes)?)?)
}
