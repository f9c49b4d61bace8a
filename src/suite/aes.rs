//! AES/CBC/PKCS#7 over strings. The output is `hex(iv || ciphertext)` with a
//! fresh random IV per message.

use super::{bytes_to_hex, hex_to_bytes, or_empty};
use crate::error::NativeError;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rijndael::{AES_BLOCK_SIZE, compute_output_length, crypt_with_key};
use symmetric_cipher::CryptMode;

pub const IV_LEN: usize = AES_BLOCK_SIZE;

/// Minimum key length in characters.
const MIN_KEY_CHARS: usize = 16;
const KEY_FILL: char = '0';

/// Right-pads keys shorter than 16 characters with `'0'`. The result must
/// still be 16, 24 or 32 bytes long to be usable.
pub fn make_key(key: &str) -> String {
    let chars = key.chars().count();
    let mut made = String::from(key);
    made.extend(std::iter::repeat_n(KEY_FILL, MIN_KEY_CHARS.saturating_sub(chars)));
    made
}

fn crypt(src: &[u8], key: &[u8], mode: CryptMode, iv: &[u8]) -> Result<Vec<u8>, NativeError> {
    let mut out = vec![0u8; compute_output_length(src.len(), mode)];
    let written = crypt_with_key(src, &mut out, mode, key, iv)?;
    out.truncate(written);
    Ok(out)
}

pub fn try_encrypt(content: &str, key: &str) -> Result<String, NativeError> {
    if content.is_empty() || key.is_empty() {
        return Ok(String::new());
    }

    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|err| NativeError::RandomSource(err.to_string()))?;

    let key = make_key(key);
    let encrypted = crypt(content.as_bytes(), key.as_bytes(), CryptMode::Encrypt, &iv)?;

    let mut message = Vec::with_capacity(IV_LEN + encrypted.len());
    message.extend_from_slice(&iv);
    message.extend_from_slice(&encrypted);
    Ok(bytes_to_hex(&message))
}

/// Input decoding to fewer than 16 bytes yields an empty string.
pub fn try_decrypt(content: &str, key: &str) -> Result<String, NativeError> {
    if content.is_empty() || key.is_empty() {
        return Ok(String::new());
    }

    let src = hex_to_bytes(content)?;
    if src.len() < IV_LEN {
        return Ok(String::new());
    }
    let (iv, ciphertext) = src.split_at(IV_LEN);

    let key = make_key(key);
    let decrypted = crypt(ciphertext, key.as_bytes(), CryptMode::Decrypt, iv)?;
    Ok(String::from_utf8(decrypted)?)
}

pub fn encrypt(content: &str, key: &str) -> String {
    or_empty("AES", "encrypt", try_encrypt(content, key))
}

pub fn decrypt(content: &str, key: &str) -> String {
    or_empty("AES", "decrypt", try_decrypt(content, key))
}
