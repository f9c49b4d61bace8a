//! Whole-message AES: CBC chaining with PKCS#7 padding.

use crate::rijndael::cipher::{BLOCK_SIZE, Rijndael};
use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_error::CipherError;
use symmetric_cipher::crypto::cipher_types::{CipherMode, CryptMode, PaddingMode};
use symmetric_cipher::crypto::utils::padded_len;

pub const AES_BLOCK_SIZE: usize = BLOCK_SIZE;

/// Size of the buffer `crypt_with_key` needs for `src_len` input bytes.
///
/// Encryption always adds between 1 and 16 bytes of padding, so an empty
/// plaintext still needs one block. For decryption the input length is an
/// upper bound on the plaintext length.
pub fn compute_output_length(src_len: usize, mode: CryptMode) -> usize {
    match mode {
        CryptMode::Encrypt => padded_len(src_len, AES_BLOCK_SIZE, PaddingMode::PKCS7),
        CryptMode::Decrypt => src_len,
    }
}

/// Encrypts or decrypts `src` into `out` and returns the number of bytes
/// written.
///
/// The key schedule is derived from `key` for this call only. `iv` seeds the
/// CBC chain and must be exactly 16 bytes. On decryption the padding is
/// checked and the returned length excludes it.
pub fn crypt_with_key(
    src: &[u8],
    out: &mut [u8],
    mode: CryptMode,
    key: &[u8],
    iv: &[u8],
) -> Result<usize, CipherError> {
    let cipher = Rijndael::with_key(key)?;
    let context = CipherContext::new(
        Box::new(cipher),
        CipherMode::CBC,
        PaddingMode::PKCS7,
        Some(iv.to_vec()),
    )?;
    context.crypt_into(src, mode, out)
}
