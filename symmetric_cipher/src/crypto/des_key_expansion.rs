use crate::crypto::des_tables::{PC1, PC2, SHIFT_BITS};
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::{Bits, bits_to_bytes, bytes_to_bits, permute, permute_bits};

pub struct DesKeyExpansion;

impl KeyExpansion for DesKeyExpansion {
    /// Produces sixteen 6-byte subkeys. `key` must be 8 bytes.
    fn generate_round_keys(&self, key: &[u8]) -> Vec<Vec<u8>> {
        debug_assert_eq!(key.len(), 8, "DES key must be 8 bytes");

        // PC-1 drops the parity bits: 64 -> 56
        let permuted = permute(key, &PC1);
        let bits = bytes_to_bits(&permuted);

        let mut c: Bits = bits[..28].to_bitvec();
        let mut d: Bits = bits[28..56].to_bitvec();

        let mut round_keys = Vec::with_capacity(SHIFT_BITS.len());
        for &shift in &SHIFT_BITS {
            c.rotate_left(shift);
            d.rotate_left(shift);

            let mut cd = Bits::with_capacity(56);
            cd.extend_from_bitslice(c.as_bitslice());
            cd.extend_from_bitslice(d.as_bitslice());

            let subkey = permute_bits(&cd, &PC2);
            round_keys.push(bits_to_bytes(&subkey));
        }

        round_keys
    }
}
