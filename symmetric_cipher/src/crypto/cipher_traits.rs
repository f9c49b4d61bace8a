use crate::crypto::cipher_error::CipherError;

pub trait CipherAlgorithm {
    fn encrypt(&self, block: &[u8]) -> Vec<u8>;
    fn decrypt(&self, block: &[u8]) -> Vec<u8>;
}

pub trait SymmetricCipher: CipherAlgorithm {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError>;
}

/// A keyed block transform usable by `CipherContext`.
///
/// `encrypt_block` / `decrypt_block` are only called with slices of exactly
/// `block_size()` bytes.
pub trait BlockCipher: SymmetricCipher {
    fn block_size(&self) -> usize;

    fn encrypt_block(&self, block: &[u8]) -> Vec<u8> {
        self.encrypt(block)
    }

    fn decrypt_block(&self, block: &[u8]) -> Vec<u8> {
        self.decrypt(block)
    }
}
