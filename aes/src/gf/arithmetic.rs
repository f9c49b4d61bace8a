//! Arithmetic in GF(2^8) modulo the AES polynomial x^8 + x^4 + x^3 + x + 1.
//!
//! Elements are bytes, bit `i` holding the coefficient of x^i. Everything is
//! `const fn` so the S-box tables can be built at compile time.

/// x^8 + x^4 + x^3 + x + 1
pub const AES_MODULUS: u16 = 0x11B;

/// Addition and subtraction are both XOR.
pub const fn gf_add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiplication by x, reduced modulo `AES_MODULUS`.
pub const fn xtime(a: u8) -> u8 {
    let shifted = a << 1;
    if a & 0x80 != 0 {
        shifted ^ (AES_MODULUS & 0xFF) as u8
    } else {
        shifted
    }
}

/// Shift-and-add multiplication.
pub const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

/// Square-and-multiply exponentiation.
pub const fn gf_pow(base: u8, mut exp: u32) -> u8 {
    let mut result = 1u8;
    let mut base = base;
    while exp > 0 {
        if exp & 1 != 0 {
            result = gf_mul(result, base);
        }
        base = gf_mul(base, base);
        exp >>= 1;
    }
    result
}

/// Multiplicative inverse as a^254 (the group has order 255). Maps 0 to 0,
/// which is the convention the S-box needs.
pub const fn gf_inv(a: u8) -> u8 {
    gf_pow(a, 254)
}
