use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::utils::xor_bytes;
use std::sync::Arc;

/// Balanced Feistel network with the DES output convention: the halves are
/// swapped after the last round, so decryption is the same walk with the
/// round keys in reverse order.
pub struct FeistelNetwork {
    num_round: usize,
    transformation: Arc<dyn EncryptionTransformation + Send + Sync>,
}

impl FeistelNetwork {
    pub fn new(
        num_round: usize,
        transformation: Arc<dyn EncryptionTransformation + Send + Sync>,
    ) -> Self {
        Self {
            num_round,
            transformation,
        }
    }

    pub fn num_round(&self) -> usize {
        self.num_round
    }

    pub fn encrypt_with_round_keys(&self, block: &[u8], round_keys: &[Vec<u8>]) -> Vec<u8> {
        self.run(block, round_keys[..self.num_round].iter())
    }

    pub fn decrypt_with_round_keys(&self, block: &[u8], round_keys: &[Vec<u8>]) -> Vec<u8> {
        self.run(block, round_keys[..self.num_round].iter().rev())
    }

    fn run<'k>(&self, block: &[u8], round_keys: impl Iterator<Item = &'k Vec<u8>>) -> Vec<u8> {
        assert_eq!(block.len() % 2, 0, "Block size must be even");

        let (left, right) = block.split_at(block.len() / 2);
        let mut left = left.to_vec();
        let mut right = right.to_vec();

        for round_key in round_keys {
            let feistel_out = self.transformation.transform(&right, round_key);
            let new_right = xor_bytes(&left, &feistel_out);
            left = right;
            right = new_right;
        }

        [right, left].concat()
    }
}
