use crate::crypto::des_tables::{E, P, S_BOXES};
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::utils::{Bits, bits_to_bytes, bytes_to_bits, permute, xor_bytes};

/// The DES round function `f(R, K)`.
pub struct DesTransformation;

fn sbox_lookup(box_index: usize, six_bits: &[bool]) -> u8 {
    // outer bits select the row, inner four the column
    let row = ((six_bits[0] as usize) << 1) | six_bits[5] as usize;
    let col = six_bits[1..5]
        .iter()
        .fold(0usize, |acc, &bit| (acc << 1) | bit as usize);
    S_BOXES[box_index][row * 16 + col]
}

impl EncryptionTransformation for DesTransformation {
    fn transform(&self, r_block: &[u8], round_key: &[u8]) -> Vec<u8> {
        // 1. Expansion 32 -> 48
        let expanded = permute(r_block, &E);

        // 2. Key mixing
        let mixed = bytes_to_bits(&xor_bytes(&expanded, round_key));

        // 3. S-boxes 48 -> 32
        let mut substituted = Bits::with_capacity(32);
        for box_i in 0..8 {
            let six_bits: Vec<bool> = mixed[box_i * 6..box_i * 6 + 6]
                .iter()
                .by_vals()
                .collect();
            let s_val = sbox_lookup(box_i, &six_bits);
            for shift in (0..4).rev() {
                substituted.push((s_val >> shift) & 1 == 1);
            }
        }

        // 4. P-permutation
        permute(&bits_to_bytes(&substituted), &P)
    }
}
