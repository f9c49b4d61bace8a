//! DES/ECB/PKCS#7 over strings.

use super::{bytes_to_hex, hex_to_bytes, or_empty};
use crate::error::NativeError;
use symmetric_cipher::crypto::des::{DES_KEY_SIZE, des_crypt};
use symmetric_cipher::{CipherError, CryptMode, PaddingMode};

/// The first 8 bytes of the key string; longer keys are cut, shorter ones
/// rejected.
fn des_key(key: &str) -> Result<&[u8], NativeError> {
    key.as_bytes().get(..DES_KEY_SIZE).ok_or_else(|| {
        CipherError::InvalidKeyLength {
            algorithm: "DES",
            expected: "at least 8",
            actual: key.len(),
        }
        .into()
    })
}

/// Empty `content` or `key` yields an empty string.
pub fn try_encrypt(content: &str, key: &str) -> Result<String, NativeError> {
    if content.is_empty() || key.is_empty() {
        return Ok(String::new());
    }
    let encrypted = des_crypt(content.as_bytes(), des_key(key)?, CryptMode::Encrypt, PaddingMode::PKCS7)?;
    Ok(bytes_to_hex(&encrypted))
}

pub fn try_decrypt(content: &str, key: &str) -> Result<String, NativeError> {
    if content.is_empty() || key.is_empty() {
        return Ok(String::new());
    }
    let src = hex_to_bytes(content)?;
    let decrypted = des_crypt(&src, des_key(key)?, CryptMode::Decrypt, PaddingMode::PKCS7)?;
    Ok(String::from_utf8(decrypted)?)
}

pub fn encrypt(content: &str, key: &str) -> String {
    or_empty("DES", "encrypt", try_encrypt(content, key))
}

pub fn decrypt(content: &str, key: &str) -> String {
    or_empty("DES", "decrypt", try_decrypt(content, key))
}
