use crate::crypto::cipher_error::CipherError;
use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::cipher_types::{CipherMode, CryptMode, PaddingMode};
use crate::crypto::utils::{apply_padding, padded_len, remove_padding, xor_bytes};

/// A keyed block cipher bound to a chaining mode, a padding scheme and,
/// for CBC, an IV.
///
/// A context owns no state that changes between calls, so one context can
/// serve any number of messages and `&CipherContext` is safe to share.
pub struct CipherContext {
    algorithm: Box<dyn BlockCipher + Send + Sync>,
    mode: CipherMode,
    padding: PaddingMode,
    iv: Option<Vec<u8>>,
}

impl CipherContext {
    pub fn new(
        algorithm: Box<dyn BlockCipher + Send + Sync>,
        mode: CipherMode,
        padding: PaddingMode,
        iv: Option<Vec<u8>>,
    ) -> Result<Self, CipherError> {
        let block_size = algorithm.block_size();

        match (&mode, &iv) {
            (CipherMode::CBC, None) => return Err(CipherError::MissingIv),
            (_, Some(iv)) if iv.len() != block_size => {
                return Err(CipherError::InvalidIvLength {
                    expected: block_size,
                    actual: iv.len(),
                });
            }
            _ => {}
        }

        Ok(Self {
            algorithm,
            mode,
            padding,
            iv,
        })
    }

    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    /// Allocation size for the result of transforming `src_len` bytes.
    ///
    /// Exact for encryption. For decryption it is an upper bound: the real
    /// length is only known once the padding has been checked.
    pub fn output_len(&self, src_len: usize, mode: CryptMode) -> usize {
        match mode {
            CryptMode::Encrypt => padded_len(src_len, self.block_size(), self.padding),
            CryptMode::Decrypt => src_len,
        }
    }

    pub fn crypt(&self, data: &[u8], mode: CryptMode) -> Result<Vec<u8>, CipherError> {
        match mode {
            CryptMode::Encrypt => self.encrypt(data),
            CryptMode::Decrypt => self.decrypt(data),
        }
    }

    /// Transforms `data` into `out` and returns the number of bytes written.
    /// `out` must hold at least `output_len(data.len(), mode)` bytes.
    pub fn crypt_into(
        &self,
        data: &[u8],
        mode: CryptMode,
        out: &mut [u8],
    ) -> Result<usize, CipherError> {
        let required = self.output_len(data.len(), mode);
        if out.len() < required {
            return Err(CipherError::OutputTooSmall {
                required,
                actual: out.len(),
            });
        }

        let result = self.crypt(data, mode)?;
        out[..result.len()].copy_from_slice(&result);
        Ok(result.len())
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        let block_size = self.block_size();
        let padded = apply_padding(data.to_vec(), block_size, self.padding);
        let mut result = Vec::with_capacity(padded.len());

        match self.mode {
            CipherMode::ECB => {
                for block in padded.chunks(block_size) {
                    result.extend(self.algorithm.encrypt_block(block));
                }
            }
            CipherMode::CBC => {
                let mut prev_block = self.iv()?.to_vec();
                for block in padded.chunks(block_size) {
                    let encrypted = self.algorithm.encrypt_block(&xor_bytes(block, &prev_block));
                    result.extend_from_slice(&encrypted);
                    prev_block = encrypted;
                }
            }
        }

        Ok(result)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        let block_size = self.block_size();
        let needs_block = matches!(self.padding, PaddingMode::PKCS7);
        if data.len() % block_size != 0 || (needs_block && data.is_empty()) {
            return Err(CipherError::InvalidDataLength {
                block_size,
                actual: data.len(),
            });
        }

        let mut result = Vec::with_capacity(data.len());

        match self.mode {
            CipherMode::ECB => {
                for block in data.chunks(block_size) {
                    result.extend(self.algorithm.decrypt_block(block));
                }
            }
            CipherMode::CBC => {
                let mut prev_block = self.iv()?;
                for block in data.chunks(block_size) {
                    let decrypted = self.algorithm.decrypt_block(block);
                    result.extend(xor_bytes(&decrypted, prev_block));
                    prev_block = block;
                }
            }
        }

        remove_padding(result, block_size, self.padding)
    }

    fn iv(&self) -> Result<&[u8], CipherError> {
        self.iv.as_deref().ok_or(CipherError::MissingIv)
    }
}
