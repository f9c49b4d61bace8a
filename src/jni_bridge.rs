//! JNI entry points for `com.tencent.msdk.dns.base.jni.Jni`.
//!
//! None of the natives throw: failures are logged and surface as `null` or
//! `-1` on the Java side.

use crate::bridge;
use crate::crypt::{aes_crypt, des_crypt};
use crate::logging;
use crate::network_stack;
use crate::runtime::{self, EnvHandle, EnvStatus, ManagedRuntime};
use jni::JNIEnv;
use jni::objects::{JByteArray, JClass, JObject, JString};
use jni::sys::{self, JNI_EDETACHED, JNI_OK, JNI_TRUE, JNI_VERSION_1_6, jint};
use std::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;
use std::sync::Arc;

/// [`ManagedRuntime`] backed by the JNI invocation interface of a `JavaVM`.
pub struct JavaVmRuntime {
    vm: *mut sys::JavaVM,
}

// SAFETY: the invocation interface may be used from any thread.
unsafe impl Send for JavaVmRuntime {}
unsafe impl Sync for JavaVmRuntime {}

impl JavaVmRuntime {
    /// # Safety
    /// `vm` must point to a live `JavaVM` that outlives the returned value.
    pub unsafe fn from_raw(vm: *mut sys::JavaVM) -> Option<Self> {
        if vm.is_null() { None } else { Some(Self { vm }) }
    }

    fn invoke(&self) -> &sys::JNIInvokeInterface_ {
        // SAFETY: `vm` is non-null and points to a live JavaVM
        unsafe { &**self.vm }
    }
}

impl ManagedRuntime for JavaVmRuntime {
    fn get_env(&self, version: i32) -> EnvStatus {
        let Some(get_env) = self.invoke().GetEnv else {
            return EnvStatus::Failed(sys::JNI_ERR);
        };

        let mut env: *mut c_void = ptr::null_mut();
        let status = unsafe { get_env(self.vm, &mut env, version) };
        match status {
            JNI_OK => EnvHandle::from_ptr(env).map_or(EnvStatus::Failed(status), EnvStatus::Attached),
            JNI_EDETACHED => EnvStatus::Detached,
            other => EnvStatus::Failed(other),
        }
    }

    fn attach_current_thread(&self) -> Result<EnvHandle, i32> {
        let attach = self.invoke().AttachCurrentThread.ok_or(sys::JNI_ERR)?;

        let mut env: *mut c_void = ptr::null_mut();
        let status = unsafe { attach(self.vm, &mut env, ptr::null_mut()) };
        if status != JNI_OK {
            return Err(status);
        }
        EnvHandle::from_ptr(env).ok_or(sys::JNI_ERR)
    }

    fn detach_current_thread(&self) {
        if let Some(detach) = self.invoke().DetachCurrentThread {
            unsafe { detach(self.vm) };
        }
    }

    fn clear_pending_exception(&self, env: EnvHandle) -> bool {
        let env: *mut sys::JNIEnv = env.as_ptr();
        // SAFETY: the handle came from GetEnv / AttachCurrentThread on this thread
        let functions = unsafe { &**env };
        let (Some(check), Some(describe), Some(clear)) =
            (functions.ExceptionCheck, functions.ExceptionDescribe, functions.ExceptionClear)
        else {
            return false;
        };

        unsafe {
            if check(env) != JNI_TRUE {
                return false;
            }
            describe(env);
            clear(env);
        }
        true
    }
}

/// # Safety
/// Called by the VM with a valid `JavaVM` pointer.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "system" fn JNI_OnLoad(vm: *mut sys::JavaVM, _reserved: *mut c_void) -> jint {
    logging::init_logger();

    match unsafe { JavaVmRuntime::from_raw(vm) } {
        Some(vm_runtime) => {
            runtime::initialize(Arc::new(vm_runtime), JNI_VERSION_1_6);
        }
        None => log::warn!("JNI_OnLoad called without a JavaVM"),
    }
    JNI_VERSION_1_6
}

fn null_array<'local>() -> JByteArray<'local> {
    JObject::null().into()
}

/// Runs a native body, turning a panic into `fallback` so it never unwinds
/// into the VM.
fn guarded<T>(name: &str, fallback: impl FnOnce() -> T, body: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(_) => {
            log::warn!("{}: panic caught at the JNI boundary", name);
            fallback()
        }
    }
}

fn read_bytes(env: &mut JNIEnv, array: &JByteArray, name: &str) -> Option<Vec<u8>> {
    if array.is_null() {
        log::warn!("{} is null", name);
        return None;
    }
    match env.convert_byte_array(array) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            log::warn!("Failed to read {}: {}", name, err);
            clear_exception(env);
            None
        }
    }
}

fn read_string(env: &mut JNIEnv, string: &JString, name: &str) -> Option<String> {
    if string.is_null() {
        log::warn!("{} is null", name);
        return None;
    }
    match env.get_string(string) {
        Ok(value) => Some(value.into()),
        Err(err) => {
            log::warn!("Failed to read {}: {}", name, err);
            clear_exception(env);
            None
        }
    }
}

fn clear_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

fn to_java<'local>(env: &mut JNIEnv<'local>, result: Option<Vec<u8>>) -> JByteArray<'local> {
    let Some(bytes) = result else {
        return null_array();
    };
    match env.byte_array_from_slice(&bytes) {
        Ok(array) => array,
        Err(err) => {
            log::warn!("Failed to allocate result array: {}", err);
            clear_exception(env);
            null_array()
        }
    }
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_tencent_msdk_dns_base_jni_Jni_getNetworkStack(_env: JNIEnv, _class: JClass) -> jint {
    guarded("getNetworkStack", || 0, || network_stack::probe().bits())
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_tencent_msdk_dns_base_jni_Jni_desCrypt<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    src: JByteArray<'local>,
    key: JString<'local>,
    mode: jint,
) -> JByteArray<'local> {
    guarded("desCrypt", null_array, || {
        let result = read_bytes(&mut env, &src, "src").and_then(|src| {
            let key = read_string(&mut env, &key, "key")?;
            des_crypt(&src, key.as_bytes(), mode)
        });
        to_java(&mut env, result)
    })
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_tencent_msdk_dns_base_jni_Jni_aesCrypt<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    src: JByteArray<'local>,
    key: JString<'local>,
    mode: jint,
    iv: JByteArray<'local>,
) -> JByteArray<'local> {
    guarded("aesCrypt", null_array, || {
        let result = read_bytes(&mut env, &src, "src").and_then(|src| {
            let key = read_string(&mut env, &key, "key")?;
            let iv = read_bytes(&mut env, &iv, "iv")?;
            aes_crypt(&src, key.as_bytes(), mode, &iv)
        });
        to_java(&mut env, result)
    })
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_tencent_msdk_dns_base_jni_Jni_sendToUnity<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    message: JString<'local>,
) -> jint {
    guarded("sendToUnity", || bridge::NOT_DELIVERED, || {
        if message.is_null() {
            return bridge::send_to_bridge("");
        }
        match read_string(&mut env, &message, "bridge message") {
            Some(message) => bridge::send_to_bridge(&message),
            None => bridge::NOT_DELIVERED,
        }
    })
}
