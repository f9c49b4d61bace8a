//! Execution-context registry.
//!
//! Native threads that need to call into the managed runtime ask the registry
//! for a handle. Threads the runtime does not know yet are attached on
//! demand and detached automatically when they exit. The runtime itself is
//! reached through [`ManagedRuntime`], so the registry has no dependency on
//! a particular VM.

mod platform;
mod thread_slot;

use crate::config::{DEFAULT_DETACH_OS_THRESHOLD, RuntimeConfig};
use crate::error::NativeError;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use thread_slot::AttachedThread;

pub use platform::os_version as platform_os_version;

/// Opaque, non-null per-thread handle to the managed runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvHandle(NonZeroUsize);

impl EnvHandle {
    pub fn new(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    pub fn from_ptr<T>(ptr: *mut T) -> Option<Self> {
        Self::new(ptr as usize)
    }

    pub fn as_ptr<T>(self) -> *mut T {
        self.0.get() as *mut T
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Answer of [`ManagedRuntime::get_env`] for the calling thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvStatus {
    Attached(EnvHandle),
    Detached,
    /// Any other runtime status code.
    Failed(i32),
}

/// The managed runtime seen from native code. Every method acts on the
/// calling thread.
pub trait ManagedRuntime: Send + Sync {
    fn get_env(&self, version: i32) -> EnvStatus;

    fn attach_current_thread(&self) -> Result<EnvHandle, i32>;

    /// Called from thread-local destructors: must not panic and must not
    /// touch other thread-local state.
    fn detach_current_thread(&self);

    /// Clears a pending managed exception, returning whether there was one.
    fn clear_pending_exception(&self, _env: EnvHandle) -> bool {
        false
    }
}

#[derive(Clone)]
struct RuntimeState {
    runtime: Arc<dyn ManagedRuntime>,
    version: i32,
    generation: u64,
}

static STATE: RwLock<Option<RuntimeState>> = RwLock::new(None);
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);
static OS_VERSION: AtomicI32 = AtomicI32::new(0);
static DETACH_THRESHOLD: AtomicI32 = AtomicI32::new(DEFAULT_DETACH_OS_THRESHOLD);

fn snapshot() -> Option<RuntimeState> {
    STATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Registers the process-wide runtime. First caller wins; later calls only
/// refresh the cached OS version. Returns whether this call installed the
/// runtime.
pub fn initialize(runtime: Arc<dyn ManagedRuntime>, interface_version: i32) -> bool {
    initialize_with(runtime, interface_version, &RuntimeConfig::default())
}

pub fn initialize_with(
    runtime: Arc<dyn ManagedRuntime>,
    interface_version: i32,
    config: &RuntimeConfig,
) -> bool {
    let os_version = config.os_version.unwrap_or_else(platform::os_version);
    OS_VERSION.store(os_version, Ordering::SeqCst);

    let mut state = STATE.write().unwrap_or_else(PoisonError::into_inner);
    if state.is_some() {
        log::debug!("Runtime already registered, refreshed OS version to {}", os_version);
        return false;
    }

    DETACH_THRESHOLD.store(config.detach_os_threshold, Ordering::SeqCst);
    *state = Some(RuntimeState {
        runtime,
        version: interface_version,
        generation: NEXT_GENERATION.fetch_add(1, Ordering::SeqCst),
    });
    log::info!(
        "Runtime registered: interface version {:#x}, OS version {}",
        interface_version,
        os_version
    );
    true
}

fn context_for(state: &RuntimeState) -> Option<EnvHandle> {
    if let Some(handle) = thread_slot::cached(state.generation) {
        return Some(handle);
    }

    match state.runtime.get_env(state.version) {
        EnvStatus::Attached(handle) => Some(handle),
        EnvStatus::Detached => match state.runtime.attach_current_thread() {
            Ok(handle) => {
                let stored = thread_slot::store(AttachedThread::new(
                    state.runtime.clone(),
                    handle,
                    state.generation,
                ));
                if !stored {
                    log::warn!("Thread is exiting, attached handle was not cached");
                    return None;
                }
                log::debug!("Attached thread {:?} to the runtime", std::thread::current().id());
                Some(handle)
            }
            Err(code) => {
                log::warn!("Failed to attach current thread: status {}", code);
                None
            }
        },
        EnvStatus::Failed(code) => {
            log::warn!("Failed to get env for current thread: status {}", code);
            None
        }
    }
}

/// Handle usable on the calling thread, attaching it if necessary.
pub fn get_context() -> Option<EnvHandle> {
    let Some(state) = snapshot() else {
        log::warn!("No managed runtime registered");
        return None;
    };
    context_for(&state)
}

/// Detaches the calling thread now instead of at thread exit.
///
/// Only threads the registry attached are detached. Skipped when the OS
/// version is unknown or at or above the configured threshold, where the
/// thread-exit destructor does the work.
pub fn release_context() -> bool {
    let os_version = OS_VERSION.load(Ordering::SeqCst);
    let threshold = DETACH_THRESHOLD.load(Ordering::SeqCst);
    if os_version == 0 || os_version >= threshold {
        log::debug!("Skipping explicit detach on OS version {}", os_version);
        return false;
    }

    match thread_slot::take() {
        Some(entry) => {
            drop(entry);
            log::debug!("Detached thread {:?} from the runtime", std::thread::current().id());
            true
        }
        None => false,
    }
}

/// Runs `f` with the calling thread's handle.
///
/// Pending managed exceptions are cleared first. A missing handle or an
/// error from `f` is logged and `default` returned.
pub fn with_context<T, F>(default: T, f: F) -> T
where
    F: FnOnce(EnvHandle) -> Result<T, NativeError>,
{
    let Some(state) = snapshot() else {
        log::warn!("{}", NativeError::ContextUnavailable);
        return default;
    };
    let Some(env) = context_for(&state) else {
        log::warn!("{}", NativeError::ContextUnavailable);
        return default;
    };

    if state.runtime.clear_pending_exception(env) {
        log::debug!("Cleared pending managed exception");
    }

    match f(env) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Managed callback failed: {}", err);
            default
        }
    }
}

/// Forgets the registered runtime. Handles cached by other threads belong to
/// an older generation and are detached on their next use or at thread exit.
pub fn reset() {
    let previous = STATE.write().unwrap_or_else(PoisonError::into_inner).take();
    OS_VERSION.store(0, Ordering::SeqCst);
    DETACH_THRESHOLD.store(DEFAULT_DETACH_OS_THRESHOLD, Ordering::SeqCst);

    // this thread's cached entry can go right away
    drop(thread_slot::take());

    if previous.is_some() {
        log::info!("Runtime registry reset");
    }
}

pub fn is_initialized() -> bool {
    snapshot().is_some()
}

pub fn interface_version() -> Option<i32> {
    snapshot().map(|state| state.version)
}

/// Cached OS version, `0` when unknown or not yet initialized.
pub fn os_version() -> i32 {
    OS_VERSION.load(Ordering::SeqCst)
}
