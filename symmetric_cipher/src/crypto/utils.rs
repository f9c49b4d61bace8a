use crate::crypto::cipher_error::CipherError;
use crate::crypto::cipher_types::PaddingMode;
use bitvec::prelude::*;

/// Bit string in transmission order: bit 0 is the MSB of the first byte.
pub type Bits = BitVec<u8, Msb0>;

/// Builds a new bit string by picking `bits` in the order of the 1-based
/// positions in `p_block`.
pub fn permute_bits(bits: &BitSlice<u8, Msb0>, p_block: &[usize]) -> Bits {
    let mut permuted_bits = Bits::with_capacity(p_block.len());
    for &pos in p_block {
        permuted_bits.push(bits[pos - 1]);
    }
    permuted_bits
}

pub fn permute(data: &[u8], p_block: &[usize]) -> Vec<u8> {
    bits_to_bytes(&permute_bits(data.view_bits::<Msb0>(), p_block))
}

pub fn bytes_to_bits(input: &[u8]) -> Bits {
    input.view_bits::<Msb0>().to_bitvec()
}

/// Packs bits MSB-first; a trailing partial byte is filled with zero bits.
pub fn bits_to_bytes(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));

    for chunk in bits.chunks(8) {
        let mut byte = 0;
        for (i, bit) in chunk.iter().enumerate() {
            if *bit {
                byte |= 1 << (7 - i);
            }
        }
        bytes.push(byte);
    }
    bytes
}

pub fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

/// Length of `len` bytes of plaintext once padded.
pub fn padded_len(len: usize, block_size: usize, padding: PaddingMode) -> usize {
    match padding {
        PaddingMode::PKCS7 => (len / block_size + 1) * block_size,
        PaddingMode::Zeros => len.div_ceil(block_size) * block_size,
    }
}

pub fn apply_padding(mut data: Vec<u8>, block_size: usize, padding: PaddingMode) -> Vec<u8> {
    let target = padded_len(data.len(), block_size, padding);

    match padding {
        PaddingMode::Zeros => data.resize(target, 0),
        PaddingMode::PKCS7 => {
            let padding_length = target - data.len();
            data.resize(target, padding_length as u8);
        }
    }
    data
}

/// Strips padding from decrypted data. PKCS#7 is validated strictly: every
/// pad byte must equal the pad length and the length must be in
/// `1..=block_size`.
pub fn remove_padding(
    mut data: Vec<u8>,
    block_size: usize,
    padding: PaddingMode,
) -> Result<Vec<u8>, CipherError> {
    match padding {
        PaddingMode::Zeros => {
            let floor = data.len().saturating_sub(block_size);
            while data.len() > floor && data.last() == Some(&0u8) {
                data.pop();
            }
            Ok(data)
        }
        PaddingMode::PKCS7 => {
            let last_byte = *data.last().ok_or(CipherError::InvalidPadding)?;
            let pad_len = last_byte as usize;
            if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
                return Err(CipherError::InvalidPadding);
            }
            if !data[data.len() - pad_len..].iter().all(|&b| b == last_byte) {
                return Err(CipherError::InvalidPadding);
            }
            data.truncate(data.len() - pad_len);
            Ok(data)
        }
    }
}
