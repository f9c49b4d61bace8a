pub mod crypto;

pub use crypto::cipher_context::*;
pub use crypto::cipher_error::CipherError;
pub use crypto::cipher_traits::*;
pub use crypto::cipher_types::*;
