use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

/// Initializes the global tracing subscriber, honouring `RUST_LOG`.
///
/// Logs go to stderr so they never interleave with command output.
pub fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
