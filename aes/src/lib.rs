pub mod gf;
pub mod rijndael;

pub use rijndael::{AES_BLOCK_SIZE, compute_output_length, crypt_with_key};
