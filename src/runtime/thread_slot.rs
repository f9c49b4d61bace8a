use super::{EnvHandle, ManagedRuntime};
use std::cell::RefCell;
use std::sync::Arc;

/// A thread this registry attached. Dropping it detaches the thread.
pub(crate) struct AttachedThread {
    runtime: Arc<dyn ManagedRuntime>,
    handle: EnvHandle,
    generation: u64,
}

impl AttachedThread {
    pub(crate) fn new(runtime: Arc<dyn ManagedRuntime>, handle: EnvHandle, generation: u64) -> Self {
        Self {
            runtime,
            handle,
            generation,
        }
    }
}

impl Drop for AttachedThread {
    fn drop(&mut self) {
        // may run during TLS teardown: no logging, no other thread locals
        self.runtime.clear_pending_exception(self.handle);
        self.runtime.detach_current_thread();
    }
}

thread_local! {
    static SLOT: RefCell<Option<AttachedThread>> = const { RefCell::new(None) };
}

/// Handle cached for `generation`. An entry from another generation is
/// detached and dropped.
pub(crate) fn cached(generation: u64) -> Option<EnvHandle> {
    SLOT.try_with(|slot| {
        let current = slot
            .borrow()
            .as_ref()
            .map(|entry| (entry.generation, entry.handle));

        match current {
            Some((cached_generation, handle)) if cached_generation == generation => Some(handle),
            Some(_) => {
                let stale = slot.borrow_mut().take();
                drop(stale);
                None
            }
            None => None,
        }
    })
    .ok()
    .flatten()
}

/// Caches `entry` for the calling thread. Returns `false` when thread-local
/// storage is already being torn down; `entry` is then dropped immediately.
pub(crate) fn store(entry: AttachedThread) -> bool {
    let mut entry = Some(entry);
    let stored = SLOT
        .try_with(|slot| {
            let previous = slot.borrow_mut().replace(entry.take()?);
            drop(previous);
            Some(())
        })
        .ok()
        .flatten()
        .is_some();
    drop(entry);
    stored
}

pub(crate) fn take() -> Option<AttachedThread> {
    SLOT.try_with(|slot| slot.borrow_mut().take()).ok().flatten()
}
