//! Boundary adapter between marshaled byte payloads and the cipher engines.

use crate::config::CryptConfig;
use crate::error::NativeError;
use rijndael::rijndael::key_schedule::rounds_for_key;
use rijndael::{compute_output_length, crypt_with_key};
use symmetric_cipher::crypto::des::{DES_KEY_SIZE, des_crypt as des_engine};
use symmetric_cipher::{CipherError, CryptMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherEngine {
    /// DES, one independent 8-byte block at a time.
    Des,
    /// AES-128/192/256 in CBC mode with PKCS#7 padding.
    Aes,
}

/// Validates a request, runs the selected engine and hands back an owned
/// output buffer. Holds configuration only, so one adapter can serve any
/// number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CipherAdapter {
    config: CryptConfig,
}

impl CipherAdapter {
    pub fn new(config: CryptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CryptConfig {
        &self.config
    }

    /// `iv` is required for AES and ignored for DES.
    pub fn encrypt_decrypt(
        &self,
        engine: CipherEngine,
        src: &[u8],
        key: &[u8],
        mode: CryptMode,
        iv: Option<&[u8]>,
    ) -> Result<Vec<u8>, NativeError> {
        match engine {
            CipherEngine::Des => self.des(src, key, mode),
            CipherEngine::Aes => self.aes(src, key, mode, iv.ok_or(CipherError::MissingIv)?),
        }
    }

    fn des(&self, src: &[u8], key: &[u8], mode: CryptMode) -> Result<Vec<u8>, NativeError> {
        if key.len() != DES_KEY_SIZE {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "DES",
                expected: "8",
                actual: key.len(),
            }
            .into());
        }

        Ok(des_engine(src, key, mode, self.config.des_padding)?)
    }

    fn aes(&self, src: &[u8], key: &[u8], mode: CryptMode, iv: &[u8]) -> Result<Vec<u8>, NativeError> {
        if rounds_for_key(key.len()).is_none() {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "AES",
                expected: "16, 24 or 32",
                actual: key.len(),
            }
            .into());
        }

        let out_len = compute_output_length(src.len(), mode);
        if out_len == 0 {
            return Err(NativeError::EmptyOutput);
        }

        let mut out = vec![0u8; out_len];
        let written = crypt_with_key(src, &mut out, mode, key, iv)?;
        out.truncate(written);
        Ok(out)
    }
}

fn parse_mode(mode: i32) -> Option<CryptMode> {
    match CryptMode::try_from(mode) {
        Ok(mode) => Some(mode),
        Err(err) => {
            log::warn!("Rejected crypt request: {}", err);
            None
        }
    }
}

fn boundary_result(engine: CipherEngine, result: Result<Vec<u8>, NativeError>) -> Option<Vec<u8>> {
    match result {
        Ok(out) => Some(out),
        Err(err) => {
            log::warn!("{:?} crypt failed ({:?}): {}", engine, err.kind(), err);
            None
        }
    }
}

/// DES over a whole payload with the default configuration. `mode` is `0`
/// for encryption and `1` for decryption; every failure is logged and
/// reported as `None`.
pub fn des_crypt(src: &[u8], key: &[u8], mode: i32) -> Option<Vec<u8>> {
    let mode = parse_mode(mode)?;
    boundary_result(
        CipherEngine::Des,
        CipherAdapter::default().encrypt_decrypt(CipherEngine::Des, src, key, mode, None),
    )
}

/// AES-CBC over a whole payload. Same contract as [`des_crypt`].
pub fn aes_crypt(src: &[u8], key: &[u8], mode: i32, iv: &[u8]) -> Option<Vec<u8>> {
    let mode = parse_mode(mode)?;
    boundary_result(
        CipherEngine::Aes,
        CipherAdapter::default().encrypt_decrypt(CipherEngine::Aes, src, key, mode, Some(iv)),
    )
}
