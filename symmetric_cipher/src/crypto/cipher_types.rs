use crate::crypto::cipher_error::CipherError;

/// Direction of a transform. The numeric values are the ones used across the
/// managed boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CryptMode {
    Encrypt = 0,
    Decrypt = 1,
}

impl CryptMode {
    pub fn is_encrypt(self) -> bool {
        matches!(self, CryptMode::Encrypt)
    }
}

impl TryFrom<i32> for CryptMode {
    type Error = CipherError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CryptMode::Encrypt),
            1 => Ok(CryptMode::Decrypt),
            other => Err(CipherError::UnsupportedMode(other)),
        }
    }
}

impl From<CryptMode> for i32 {
    fn from(mode: CryptMode) -> Self {
        mode as i32
    }
}

/// Block chaining used by `CipherContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    ECB,
    CBC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaddingMode {
    /// Fill the tail with zero bytes. Aligned input gets no extra block and
    /// trailing zero bytes of the plaintext do not survive decryption.
    Zeros,
    /// PKCS#7 (PKCS#5 for 8-byte blocks). Always appends 1..=block_size bytes.
    #[default]
    PKCS7,
}
