//! Process-wide slot for the host engine's message callback.

use std::ffi::{CString, c_char, c_int};
use std::sync::{PoisonError, RwLock};

/// Receives a NUL-terminated JSON string and returns a host-defined status.
pub type BridgeCallback = unsafe extern "C" fn(json: *const c_char) -> c_int;

/// Returned by [`send_to_bridge`] when nothing was delivered.
pub const NOT_DELIVERED: i32 = -1;

static BRIDGE: RwLock<Option<BridgeCallback>> = RwLock::new(None);

/// Installs `callback`, replacing any previous one. `None` clears the slot.
pub fn register_callback_bridge(callback: Option<BridgeCallback>) {
    *BRIDGE.write().unwrap_or_else(PoisonError::into_inner) = callback;
    log::debug!("Callback bridge {}", if callback.is_some() { "registered" } else { "cleared" });
}

pub fn callback_bridge() -> Option<BridgeCallback> {
    *BRIDGE.read().unwrap_or_else(PoisonError::into_inner)
}

/// Forwards `json` to the registered callback and returns its status, or
/// [`NOT_DELIVERED`] when no callback is registered or `json` contains a NUL.
pub fn send_to_bridge(json: &str) -> i32 {
    let Some(callback) = callback_bridge() else {
        log::debug!("No callback bridge registered, dropping message");
        return NOT_DELIVERED;
    };

    let message = match CString::new(json) {
        Ok(message) => message,
        Err(err) => {
            log::warn!("Bridge message has an interior NUL at {}", err.nul_position());
            return NOT_DELIVERED;
        }
    };

    // SAFETY: the host registered `callback` for exactly this signature and
    // `message` outlives the call.
    unsafe { callback(message.as_ptr()) }
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "C" fn HTTPDNSSetBridge(bridge: Option<BridgeCallback>) {
    register_callback_bridge(bridge);
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "C" fn HTTPDNSGetBridge() -> Option<BridgeCallback> {
    callback_bridge()
}
