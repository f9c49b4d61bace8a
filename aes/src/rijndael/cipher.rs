use crate::gf::arithmetic::{gf_mul, xtime};
use crate::rijndael::key_schedule::{AesKeyExpansion, rounds_for_key};
use crate::rijndael::sbox::{inv_sbox, sbox};
use std::sync::Arc;
use symmetric_cipher::crypto::cipher_error::CipherError;
use symmetric_cipher::crypto::cipher_traits::{BlockCipher, CipherAlgorithm, SymmetricCipher};
use symmetric_cipher::crypto::key_expansion::KeyExpansion;

pub const BLOCK_SIZE: usize = 16;

/// Column-major: `state[c][r]` is byte `4 * c + r` of the block.
type State = [[u8; 4]; 4];

fn block_to_state(block: &[u8]) -> State {
    let mut s = [[0u8; 4]; 4];
    for (c, column) in s.iter_mut().enumerate() {
        column.copy_from_slice(&block[c * 4..c * 4 + 4]);
    }
    s
}

fn state_to_block(s: &State) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    for (c, column) in s.iter().enumerate() {
        out[c * 4..c * 4 + 4].copy_from_slice(column);
    }
    out
}

fn add_round_key(state: &mut State, round_key: &[u8]) {
    for (c, column) in state.iter_mut().enumerate() {
        for (r, byte) in column.iter_mut().enumerate() {
            *byte ^= round_key[c * 4 + r];
        }
    }
}

fn sub_bytes(state: &mut State) {
    for byte in state.iter_mut().flatten() {
        *byte = sbox(*byte);
    }
}

fn inv_sub_bytes(state: &mut State) {
    for byte in state.iter_mut().flatten() {
        *byte = inv_sbox(*byte);
    }
}

fn shift_rows(state: &mut State) {
    for r in 1..4 {
        let row = [state[0][r], state[1][r], state[2][r], state[3][r]];
        for c in 0..4 {
            state[c][r] = row[(c + r) % 4];
        }
    }
}

fn inv_shift_rows(state: &mut State) {
    for r in 1..4 {
        let row = [state[0][r], state[1][r], state[2][r], state[3][r]];
        for c in 0..4 {
            state[c][r] = row[(c + 4 - r) % 4];
        }
    }
}

fn mix_columns(state: &mut State) {
    for col in state.iter_mut() {
        let a = *col;
        let all = a[0] ^ a[1] ^ a[2] ^ a[3];
        // 2a ^ 3b ^ c ^ d == a ^ all ^ xtime(a ^ b)
        col[0] = a[0] ^ all ^ xtime(a[0] ^ a[1]);
        col[1] = a[1] ^ all ^ xtime(a[1] ^ a[2]);
        col[2] = a[2] ^ all ^ xtime(a[2] ^ a[3]);
        col[3] = a[3] ^ all ^ xtime(a[3] ^ a[0]);
    }
}

fn inv_mix_columns(state: &mut State) {
    for col in state.iter_mut() {
        let a = *col;
        col[0] = gf_mul(a[0], 0x0e) ^ gf_mul(a[1], 0x0b) ^ gf_mul(a[2], 0x0d) ^ gf_mul(a[3], 0x09);
        col[1] = gf_mul(a[0], 0x09) ^ gf_mul(a[1], 0x0e) ^ gf_mul(a[2], 0x0b) ^ gf_mul(a[3], 0x0d);
        col[2] = gf_mul(a[0], 0x0d) ^ gf_mul(a[1], 0x09) ^ gf_mul(a[2], 0x0e) ^ gf_mul(a[3], 0x0b);
        col[3] = gf_mul(a[0], 0x0b) ^ gf_mul(a[1], 0x0d) ^ gf_mul(a[2], 0x09) ^ gf_mul(a[3], 0x0e);
    }
}

/// Encrypts one 16-byte block with an expanded key schedule.
pub fn aes_encrypt_block(block: &[u8; BLOCK_SIZE], round_keys: &[Vec<u8>]) -> [u8; BLOCK_SIZE] {
    let mut state = block_to_state(block);
    let nr = round_keys.len() - 1;

    add_round_key(&mut state, &round_keys[0]);
    for round_key in &round_keys[1..nr] {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_key);
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[nr]);

    state_to_block(&state)
}

pub fn aes_decrypt_block(block: &[u8; BLOCK_SIZE], round_keys: &[Vec<u8>]) -> [u8; BLOCK_SIZE] {
    let mut state = block_to_state(block);
    let nr = round_keys.len() - 1;

    add_round_key(&mut state, &round_keys[nr]);
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    for round_key in round_keys[1..nr].iter().rev() {
        add_round_key(&mut state, round_key);
        inv_mix_columns(&mut state);
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
    }
    add_round_key(&mut state, &round_keys[0]);

    state_to_block(&state)
}

/// AES-128/192/256 on single blocks; the key size picks the round count.
pub struct Rijndael {
    key_expansion: Arc<dyn KeyExpansion + Send + Sync>,
    round_keys: Vec<Vec<u8>>,
}

impl Rijndael {
    pub fn new(key_expansion: Arc<dyn KeyExpansion + Send + Sync>) -> Self {
        Self {
            key_expansion,
            round_keys: Vec::new(),
        }
    }

    pub fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        let mut cipher = Self::new(Arc::new(AesKeyExpansion));
        cipher.set_key(key)?;
        Ok(cipher)
    }

    /// Number of rounds of the current schedule, 0 before a key is set.
    pub fn rounds(&self) -> usize {
        self.round_keys.len().saturating_sub(1)
    }

    fn to_block(data: &[u8]) -> [u8; BLOCK_SIZE] {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(&data[..BLOCK_SIZE]);
        block
    }
}

impl CipherAlgorithm for Rijndael {
    fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        data.chunks_exact(BLOCK_SIZE)
            .flat_map(|chunk| aes_encrypt_block(&Self::to_block(chunk), &self.round_keys))
            .collect()
    }

    fn decrypt(&self, data: &[u8]) -> Vec<u8> {
        data.chunks_exact(BLOCK_SIZE)
            .flat_map(|chunk| aes_decrypt_block(&Self::to_block(chunk), &self.round_keys))
            .collect()
    }
}

impl SymmetricCipher for Rijndael {
    fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        if rounds_for_key(key.len()).is_none() {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "AES",
                expected: "16, 24 or 32",
                actual: key.len(),
            });
        }
        self.round_keys = self.key_expansion.generate_round_keys(key);
        Ok(())
    }
}

impl BlockCipher for Rijndael {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}
