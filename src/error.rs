use symmetric_cipher::CipherError;
use thiserror::Error;

/// Coarse classification of a [`NativeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller broke the calling contract: bad key or IV, unknown mode,
    /// null pointer.
    ContractViolation,
    /// The process environment could not provide a resource.
    Environment,
    /// Input data failed an integrity check: bad padding, misaligned
    /// ciphertext, malformed hex or UTF-8.
    DataIntegrity,
}

#[derive(Debug, Error)]
pub enum NativeError {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("null pointer passed for {0}")]
    NullPointer(&'static str),

    #[error("computed output length is zero")]
    EmptyOutput,

    #[error("system random source failed: {0}")]
    RandomSource(String),

    #[error("no execution context available for the current thread")]
    ContextUnavailable,

    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl NativeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NativeError::Cipher(err) => match err {
                CipherError::InvalidPadding | CipherError::InvalidDataLength { .. } => {
                    ErrorKind::DataIntegrity
                }
                CipherError::InvalidKeyLength { .. }
                | CipherError::InvalidIvLength { .. }
                | CipherError::MissingIv
                | CipherError::OutputTooSmall { .. }
                | CipherError::UnsupportedMode(_) => ErrorKind::ContractViolation,
            },
            NativeError::Hex(_) | NativeError::InvalidUtf8(_) => ErrorKind::DataIntegrity,
            NativeError::NullPointer(_) | NativeError::EmptyOutput => ErrorKind::ContractViolation,
            NativeError::RandomSource(_) | NativeError::ContextUnavailable => ErrorKind::Environment,
        }
    }

    /// Stable negative code used across the C ABI. `0` is reserved for success.
    pub fn code(&self) -> i32 {
        match self {
            NativeError::Cipher(err) => match err {
                CipherError::InvalidKeyLength { .. } => -1,
                CipherError::InvalidIvLength { .. } => -2,
                CipherError::MissingIv => -3,
                CipherError::InvalidDataLength { .. } => -4,
                CipherError::InvalidPadding => -5,
                CipherError::OutputTooSmall { .. } => -6,
                CipherError::UnsupportedMode(_) => -7,
            },
            NativeError::Hex(_) => -8,
            NativeError::NullPointer(_) => -9,
            NativeError::EmptyOutput => -10,
            NativeError::RandomSource(_) => -11,
            NativeError::ContextUnavailable => -12,
            NativeError::InvalidUtf8(_) => -13,
        }
    }
}
