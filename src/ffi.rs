//! C ABI over the cipher adapter and the network probe.
//!
//! Every function returns `0` on success or a negative
//! [`NativeError::code`]. Output buffers are allocated here and must be
//! released with [`httpdns_buffer_free`] exactly once.

use crate::crypt::{CipherAdapter, CipherEngine};
use crate::error::NativeError;
use crate::network_stack;
use std::ffi::c_int;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;
use symmetric_cipher::CryptMode;

/// Code returned when a panic was caught at the boundary.
pub const PANIC_CODE: c_int = -100;

/// Owned byte buffer handed to C callers.
#[repr(C)]
#[derive(Debug)]
pub struct ByteBuffer {
    pub data: *mut u8,
    pub len: usize,
}

impl ByteBuffer {
    pub fn empty() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
        }
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let boxed = bytes.into_boxed_slice();
        let len = boxed.len();
        let data = Box::into_raw(boxed) as *mut u8;
        Self { data, len }
    }

    /// # Safety
    /// `self` must come from [`ByteBuffer::from_vec`] and not have been
    /// released before.
    pub unsafe fn into_vec(self) -> Vec<u8> {
        if self.data.is_null() {
            return Vec::new();
        }
        let slice = ptr::slice_from_raw_parts_mut(self.data, self.len);
        unsafe { Box::from_raw(slice) }.into_vec()
    }
}

/// # Safety
/// A non-null `ptr` must be valid for `len` bytes for the duration of the call.
unsafe fn input<'a>(ptr: *const u8, len: usize, name: &'static str) -> Result<&'a [u8], NativeError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(NativeError::NullPointer(name));
    }
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

fn finish(op: &str, out: *mut ByteBuffer, result: std::thread::Result<Result<Vec<u8>, NativeError>>) -> c_int {
    match result {
        Ok(Ok(bytes)) => {
            // SAFETY: checked non-null by the caller of `finish`
            unsafe { out.write(ByteBuffer::from_vec(bytes)) };
            0
        }
        Ok(Err(err)) => {
            log::warn!("{} failed: {}", op, err);
            err.code()
        }
        Err(_) => {
            log::warn!("{}: panic caught at the C boundary", op);
            PANIC_CODE
        }
    }
}

/// DES over `src` with an 8-byte key. `mode` is `0` to encrypt, `1` to
/// decrypt. On success `*out` receives the result.
///
/// # Safety
/// Non-null input pointers must be valid for their lengths; `out` must be
/// valid for a write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn httpdns_des_crypt(
    src: *const u8,
    src_len: usize,
    key: *const u8,
    key_len: usize,
    mode: c_int,
    out: *mut ByteBuffer,
) -> c_int {
    if out.is_null() {
        return NativeError::NullPointer("out").code();
    }
    unsafe { out.write(ByteBuffer::empty()) };

    let result = catch_unwind(AssertUnwindSafe(|| {
        let src = unsafe { input(src, src_len, "src") }?;
        let key = unsafe { input(key, key_len, "key") }?;
        let mode = CryptMode::try_from(mode)?;
        CipherAdapter::default().encrypt_decrypt(CipherEngine::Des, src, key, mode, None)
    }));
    finish("httpdns_des_crypt", out, result)
}

/// AES-CBC over `src` with a 16, 24 or 32-byte key and a 16-byte IV.
///
/// # Safety
/// Same requirements as [`httpdns_des_crypt`], plus `iv` valid for `iv_len`.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn httpdns_aes_crypt(
    src: *const u8,
    src_len: usize,
    key: *const u8,
    key_len: usize,
    mode: c_int,
    iv: *const u8,
    iv_len: usize,
    out: *mut ByteBuffer,
) -> c_int {
    if out.is_null() {
        return NativeError::NullPointer("out").code();
    }
    unsafe { out.write(ByteBuffer::empty()) };

    let result = catch_unwind(AssertUnwindSafe(|| {
        let src = unsafe { input(src, src_len, "src") }?;
        let key = unsafe { input(key, key_len, "key") }?;
        let iv = unsafe { input(iv, iv_len, "iv") }?;
        let mode = CryptMode::try_from(mode)?;
        CipherAdapter::default().encrypt_decrypt(CipherEngine::Aes, src, key, mode, Some(iv))
    }));
    finish("httpdns_aes_crypt", out, result)
}

/// Releases a buffer returned by this library. A buffer with a null `data`
/// is ignored.
///
/// # Safety
/// `buffer` must come from this library and must not be released twice.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn httpdns_buffer_free(buffer: ByteBuffer) {
    drop(unsafe { buffer.into_vec() });
}

/// Bitmask of routable IP families: bit 0 IPv4, bit 1 IPv6.
#[unsafe(no_mangle)]
pub extern "C" fn httpdns_get_network_stack() -> c_int {
    catch_unwind(network_stack::probe)
        .map(|stack| stack.bits())
        .unwrap_or(0)
}
