use thiserror::Error;

/// Failures reported by the block cipher engines and `CipherContext`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("{algorithm} key must be {expected} bytes, got {actual}")]
    InvalidKeyLength {
        algorithm: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("IV must be {expected} bytes, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    #[error("IV is required for CBC mode")]
    MissingIv,

    #[error("input length {actual} is not a valid multiple of the {block_size}-byte block")]
    InvalidDataLength { block_size: usize, actual: usize },

    #[error("padding check failed")]
    InvalidPadding,

    #[error("output buffer holds {actual} bytes, {required} required")]
    OutputTooSmall { required: usize, actual: usize },

    #[error("unsupported crypt mode {0}")]
    UnsupportedMode(i32),
}
