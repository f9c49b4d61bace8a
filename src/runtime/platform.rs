/// Android API level from `ro.build.version.sdk`, `0` when unavailable.
#[cfg(target_os = "android")]
pub fn os_version() -> i32 {
    use std::ffi::{CStr, c_char, c_int};

    // PROP_VALUE_MAX
    const VALUE_MAX: usize = 92;

    unsafe extern "C" {
        fn __system_property_get(name: *const c_char, value: *mut c_char) -> c_int;
    }

    let mut value = [0 as c_char; VALUE_MAX];
    let len = unsafe { __system_property_get(c"ro.build.version.sdk".as_ptr(), value.as_mut_ptr()) };
    if len <= 0 {
        log::warn!("Failed to read ro.build.version.sdk");
        return 0;
    }

    let value = unsafe { CStr::from_ptr(value.as_ptr()) };
    value
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

#[cfg(not(target_os = "android"))]
pub fn os_version() -> i32 {
    0
}
