use crate::crypto::cipher_context::CipherContext;
use crate::crypto::cipher_error::CipherError;
use crate::crypto::cipher_traits::{BlockCipher, CipherAlgorithm, SymmetricCipher};
use crate::crypto::cipher_types::{CipherMode, CryptMode, PaddingMode};
use crate::crypto::des_key_expansion::DesKeyExpansion;
use crate::crypto::des_tables::{FP, IP};
use crate::crypto::des_transformation::DesTransformation;
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::feistel_network::FeistelNetwork;
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::permute;
use std::sync::Arc;

pub const DES_BLOCK_SIZE: usize = 8;
pub const DES_KEY_SIZE: usize = 8;

pub struct DES {
    feistel_network: FeistelNetwork,
    key_expansion: Arc<dyn KeyExpansion + Send + Sync>,
    round_key: Vec<Vec<u8>>,
}

impl DES {
    pub fn new(
        key_expansion: Arc<dyn KeyExpansion + Send + Sync>,
        transformation: Arc<dyn EncryptionTransformation + Send + Sync>,
    ) -> Self {
        let feistel_network = FeistelNetwork::new(16, transformation);

        DES {
            feistel_network,
            key_expansion,
            round_key: Vec::new(),
        }
    }

    /// Standard DES with its schedule derived from `key`.
    pub fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        let mut des = DES::new(Arc::new(DesKeyExpansion), Arc::new(DesTransformation));
        des.set_key(key)?;
        Ok(des)
    }

    pub fn encrypt(&self, block: &[u8]) -> Vec<u8> {
        let permuted = permute(block, &IP);
        let result = self
            .feistel_network
            .encrypt_with_round_keys(&permuted, &self.round_key);
        permute(&result, &FP)
    }

    pub fn decrypt(&self, block: &[u8]) -> Vec<u8> {
        let permuted = permute(block, &IP);
        let result = self
            .feistel_network
            .decrypt_with_round_keys(&permuted, &self.round_key);
        permute(&result, &FP)
    }
}

impl CipherAlgorithm for DES {
    fn encrypt(&self, block: &[u8]) -> Vec<u8> {
        DES::encrypt(self, block)
    }
    fn decrypt(&self, block: &[u8]) -> Vec<u8> {
        DES::decrypt(self, block)
    }
}

impl SymmetricCipher for DES {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        if key.len() != DES_KEY_SIZE {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "DES",
                expected: "8",
                actual: key.len(),
            });
        }
        self.round_key = self.key_expansion.generate_round_keys(key);
        Ok(())
    }
}

impl BlockCipher for DES {
    fn block_size(&self) -> usize {
        DES_BLOCK_SIZE
    }
}

/// Transforms a whole message with DES in ECB mode.
///
/// The key schedule is rebuilt on every call and dropped on return. The final
/// short block is completed according to `padding`; with `PaddingMode::PKCS7`
/// decryption rejects input that is empty, not block aligned, or carries a
/// malformed pad.
pub fn des_crypt(
    src: &[u8],
    key: &[u8],
    mode: CryptMode,
    padding: PaddingMode,
) -> Result<Vec<u8>, CipherError> {
    let des = DES::with_key(key)?;
    let context = CipherContext::new(Box::new(des), CipherMode::ECB, padding, None)?;
    context.crypt(src, mode)
}
