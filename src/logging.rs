use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber for the binaries. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests, embedding) is harmless.
    let _ = fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).try_init();
}
