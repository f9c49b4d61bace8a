use env_logger::{Builder, Env};

/// Installs `env_logger` as the `log` backend.
///
/// `RUST_LOG` is honoured and defaults to `info`. Safe to call more than once:
/// later calls, or a logger installed by the host, win silently.
pub fn init_logger() {
    let installed = Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        log::debug!("Logger initialized");
    }
}
