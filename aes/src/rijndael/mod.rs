pub mod cipher;
pub mod crypt;
pub mod key_schedule;
pub mod sbox;

pub use crypt::{AES_BLOCK_SIZE, compute_output_length, crypt_with_key};
