use httpdns_native::RuntimeConfig;
use httpdns_native::error::NativeError;
use httpdns_native::runtime::{self, EnvHandle, EnvStatus, ManagedRuntime};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex, MutexGuard, PoisonError};
use std::thread;

const VERSION: i32 = 0x0001_0006;

// the registry is process-wide, so tests touching it run one at a time
static TEST_LOCK: Mutex<()> = Mutex::new(());

static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(1);

thread_local! {
    static MOCK_ENV: Cell<Option<EnvHandle>> = const { Cell::new(None) };
}

#[derive(Default)]
struct MockRuntime {
    get_env_calls: AtomicUsize,
    attaches: AtomicUsize,
    detaches: AtomicUsize,
    fail_attach: bool,
    pending_exception: AtomicBool,
    pending_at_detach: AtomicBool,
}

impl MockRuntime {
    fn failing() -> Self {
        Self {
            fail_attach: true,
            ..Self::default()
        }
    }

    fn attaches(&self) -> usize {
        self.attaches.load(Ordering::SeqCst)
    }

    fn detaches(&self) -> usize {
        self.detaches.load(Ordering::SeqCst)
    }
}

impl ManagedRuntime for MockRuntime {
    fn get_env(&self, _version: i32) -> EnvStatus {
        self.get_env_calls.fetch_add(1, Ordering::SeqCst);
        MOCK_ENV
            .with(|env| env.get())
            .map_or(EnvStatus::Detached, EnvStatus::Attached)
    }

    fn attach_current_thread(&self) -> Result<EnvHandle, i32> {
        if self.fail_attach {
            return Err(-1);
        }
        let handle = EnvHandle::new(NEXT_HANDLE.fetch_add(1, Ordering::SeqCst)).unwrap();
        MOCK_ENV.with(|env| env.set(Some(handle)));
        self.attaches.fetch_add(1, Ordering::SeqCst);
        Ok(handle)
    }

    fn detach_current_thread(&self) {
        if self.pending_exception.load(Ordering::SeqCst) {
            self.pending_at_detach.store(true, Ordering::SeqCst);
        }
        self.detaches.fetch_add(1, Ordering::SeqCst);
        let _ = MOCK_ENV.try_with(|env| env.set(None));
    }

    fn clear_pending_exception(&self, _env: EnvHandle) -> bool {
        self.pending_exception.swap(false, Ordering::SeqCst)
    }
}

fn lock() -> MutexGuard<'static, ()> {
    let guard = TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    runtime::reset();
    guard
}

fn install(mock: MockRuntime, config: RuntimeConfig) -> Arc<MockRuntime> {
    let mock = Arc::new(mock);
    assert!(runtime::initialize_with(mock.clone(), VERSION, &config));
    mock
}

fn config_with_os(os_version: i32) -> RuntimeConfig {
    RuntimeConfig {
        os_version: Some(os_version),
        ..RuntimeConfig::default()
    }
}

#[test]
fn test_no_runtime_means_no_context() {
    let _guard = lock();

    assert!(!runtime::is_initialized());
    assert_eq!(runtime::interface_version(), None);
    assert_eq!(runtime::get_context(), None);
    assert!(!runtime::release_context());
}

#[test]
fn test_first_initialize_wins_and_refreshes_os_version() {
    let _guard = lock();

    let first = install(MockRuntime::default(), config_with_os(21));
    assert_eq!(runtime::os_version(), 21);

    let second = Arc::new(MockRuntime::default());
    assert!(!runtime::initialize_with(second.clone(), 0x0001_0008, &config_with_os(23)));

    assert!(runtime::is_initialized());
    assert_eq!(runtime::interface_version(), Some(VERSION));
    assert_eq!(runtime::os_version(), 23);

    thread::spawn(|| runtime::get_context()).join().unwrap();
    assert_eq!(first.attaches(), 1);
    assert_eq!(second.attaches(), 0);
}

#[test]
fn test_context_is_reused_within_a_thread_and_detached_at_exit() {
    let _guard = lock();
    let mock = install(MockRuntime::default(), RuntimeConfig::default());

    let observer = mock.clone();
    thread::spawn(move || {
        let first = runtime::get_context().unwrap();
        let second = runtime::get_context().unwrap();
        assert_eq!(first, second);
        assert_eq!(observer.attaches(), 1);
        assert_eq!(observer.get_env_calls.load(Ordering::SeqCst), 1);
        assert_eq!(observer.detaches(), 0);
    })
    .join()
    .unwrap();

    assert_eq!(mock.detaches(), 1);
}

#[test]
fn test_each_thread_attaches_independently() {
    let _guard = lock();
    let mock = install(MockRuntime::default(), RuntimeConfig::default());

    let handles: Vec<EnvHandle> = (0..4)
        .map(|_| thread::spawn(|| runtime::get_context().unwrap()))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for (i, a) in handles.iter().enumerate() {
        for b in &handles[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(mock.attaches(), 4);
    assert_eq!(mock.detaches(), 4);
}

#[test]
fn test_second_thread_leaves_first_handle_in_place() {
    let _guard = lock();
    let mock = install(MockRuntime::default(), RuntimeConfig::default());

    let first_attached = Arc::new(Barrier::new(2));
    let second_attached = Arc::new(Barrier::new(2));

    let first = {
        let first_attached = first_attached.clone();
        let second_attached = second_attached.clone();
        thread::spawn(move || {
            let before = runtime::get_context().unwrap();
            first_attached.wait();
            second_attached.wait();
            let after = runtime::get_context().unwrap();
            (before, after)
        })
    };

    first_attached.wait();
    let other = thread::spawn(|| runtime::get_context().unwrap())
        .join()
        .unwrap();
    second_attached.wait();
    let (before, after) = first.join().unwrap();

    assert_eq!(before, after);
    assert_ne!(before, other);
    assert_eq!(mock.attaches(), 2);
    assert_eq!(mock.detaches(), 2);
}

#[test]
fn test_pending_exception_is_cleared_before_detach() {
    let _guard = lock();
    let mock = install(MockRuntime::default(), config_with_os(21));

    let observer = mock.clone();
    thread::spawn(move || {
        runtime::get_context().unwrap();
        observer.pending_exception.store(true, Ordering::SeqCst);
    })
    .join()
    .unwrap();

    assert_eq!(mock.detaches(), 1);
    assert!(!mock.pending_exception.load(Ordering::SeqCst));
    assert!(!mock.pending_at_detach.load(Ordering::SeqCst));

    let observer = mock.clone();
    thread::spawn(move || {
        runtime::get_context().unwrap();
        observer.pending_exception.store(true, Ordering::SeqCst);
        assert!(runtime::release_context());
    })
    .join()
    .unwrap();

    assert_eq!(mock.detaches(), 2);
    assert!(!mock.pending_at_detach.load(Ordering::SeqCst));
}

#[test]
fn test_thread_attached_elsewhere_is_left_alone() {
    let _guard = lock();
    let mock = install(MockRuntime::default(), config_with_os(21));

    thread::spawn(|| {
        let existing = EnvHandle::new(usize::MAX).unwrap();
        MOCK_ENV.with(|env| env.set(Some(existing)));

        assert_eq!(runtime::get_context(), Some(existing));
        assert!(!runtime::release_context());
    })
    .join()
    .unwrap();

    assert_eq!(mock.attaches(), 0);
    assert_eq!(mock.detaches(), 0);
}

#[test]
fn test_attach_failure_yields_none() {
    let _guard = lock();
    let mock = install(MockRuntime::failing(), RuntimeConfig::default());

    thread::spawn(|| assert_eq!(runtime::get_context(), None))
        .join()
        .unwrap();

    assert_eq!(mock.attaches(), 0);
    assert_eq!(mock.detaches(), 0);
}

#[test]
fn test_release_detaches_below_threshold() {
    let _guard = lock();
    let mock = install(MockRuntime::default(), config_with_os(25));

    let observer = mock.clone();
    thread::spawn(move || {
        runtime::get_context().unwrap();
        assert!(runtime::release_context());
        assert_eq!(observer.detaches(), 1);
        assert!(!runtime::release_context());
    })
    .join()
    .unwrap();

    // nothing left to detach at thread exit
    assert_eq!(mock.detaches(), 1);
}

#[test]
fn test_release_is_skipped_at_threshold_and_unknown_version() {
    for os_version in [0, 26, 33] {
        let _guard = lock();
        let mock = install(MockRuntime::default(), config_with_os(os_version));

        let observer = mock.clone();
        thread::spawn(move || {
            runtime::get_context().unwrap();
            assert!(!runtime::release_context());
            assert_eq!(observer.detaches(), 0);
        })
        .join()
        .unwrap();

        assert_eq!(mock.detaches(), 1, "thread exit detaches on OS {os_version}");
    }
}

#[test]
fn test_custom_detach_threshold() {
    let _guard = lock();
    let config = RuntimeConfig {
        detach_os_threshold: 30,
        os_version: Some(28),
    };
    install(MockRuntime::default(), config);

    thread::spawn(|| {
        runtime::get_context().unwrap();
        assert!(runtime::release_context());
    })
    .join()
    .unwrap();
}

#[test]
fn test_with_context_runs_callback_and_clears_exceptions() {
    let _guard = lock();
    let mock = install(MockRuntime::default(), RuntimeConfig::default());
    mock.pending_exception.store(true, Ordering::SeqCst);

    let observer = mock.clone();
    thread::spawn(move || {
        let value = runtime::with_context(0usize, |env| Ok(env.get()));
        assert_ne!(value, 0);
        assert!(!observer.pending_exception.load(Ordering::SeqCst));

        let failed = runtime::with_context(7, |_| Err(NativeError::ContextUnavailable));
        assert_eq!(failed, 7);
    })
    .join()
    .unwrap();
}

#[test]
fn test_with_context_returns_default_without_runtime() {
    let _guard = lock();

    let called = Cell::new(false);
    let value = runtime::with_context("default", |_| {
        called.set(true);
        Ok("called")
    });
    assert_eq!(value, "default");
    assert!(!called.get());
}

#[test]
fn test_reset_drops_stale_handles_on_next_use() {
    let _guard = lock();
    let old = install(MockRuntime::default(), RuntimeConfig::default());

    let attached = Arc::new(Barrier::new(2));
    let reinstalled = Arc::new(Barrier::new(2));

    let worker = {
        let attached = attached.clone();
        let reinstalled = reinstalled.clone();
        thread::spawn(move || {
            let before = runtime::get_context().unwrap();
            attached.wait();
            reinstalled.wait();
            let after = runtime::get_context().unwrap();
            assert_ne!(before, after);
        })
    };

    attached.wait();
    runtime::reset();
    assert!(!runtime::is_initialized());
    let new = install(MockRuntime::default(), RuntimeConfig::default());
    reinstalled.wait();
    worker.join().unwrap();

    assert_eq!(old.attaches(), 1);
    assert_eq!(old.detaches(), 1);
    assert_eq!(new.attaches(), 1);
    assert_eq!(new.detaches(), 1);
}
