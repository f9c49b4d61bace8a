use crate::gf::arithmetic::gf_inv;

/// b'_i = b_i ^ b_(i+4) ^ b_(i+5) ^ b_(i+6) ^ b_(i+7) ^ c_i with c = 0x63,
/// written as rotations of the whole byte.
const fn affine(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ 0x63
}

const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = affine(gf_inv(i as u8));
        i += 1;
    }
    table
}

const fn build_inv_sbox(sbox: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[sbox[i] as usize] = i as u8;
        i += 1;
    }
    table
}

pub static SBOX: [u8; 256] = build_sbox();
pub static INV_SBOX: [u8; 256] = build_inv_sbox(&build_sbox());

/// AES S-box: x -> x^-1 in GF(2^8), then the affine map.
pub fn sbox(x: u8) -> u8 {
    SBOX[x as usize]
}

pub fn inv_sbox(x: u8) -> u8 {
    INV_SBOX[x as usize]
}
