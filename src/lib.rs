//! Native support layer for the HTTP DNS client: per-call DES/AES payload
//! encryption, dual-stack network probing and execution-context management
//! for native threads that call back into the managed runtime.

pub mod bridge;
pub mod config;
pub mod crypt;
pub mod error;
pub mod ffi;
pub mod logging;
pub mod network_stack;
pub mod runtime;
pub mod suite;

#[cfg(feature = "java_ffi")]
pub mod jni_bridge;

pub use config::{CryptConfig, NativeConfig, ProbeConfig, RuntimeConfig};
pub use crypt::{CipherAdapter, CipherEngine, aes_crypt, des_crypt};
pub use error::{ErrorKind, NativeError};
pub use network_stack::NetworkStack;
pub use symmetric_cipher::{CipherError, CryptMode, PaddingMode};
