//! String-level cipher suites used by the HTTP DNS request layer.
//!
//! Both suites take UTF-8 content and a key string and produce lowercase hex.
//! The plain `encrypt` / `decrypt` functions collapse every failure to an
//! empty string, as the request layer expects. The `try_` variants report
//! the reason.

pub mod aes;
pub mod des;

use crate::error::NativeError;

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Accepts upper and lower case digits.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, NativeError> {
    Ok(hex::decode(hex_str)?)
}

fn or_empty(suite: &str, op: &str, result: Result<String, NativeError>) -> String {
    result.unwrap_or_else(|err| {
        log::warn!("{} {} failed: {}", suite, op, err);
        String::new()
    })
}
