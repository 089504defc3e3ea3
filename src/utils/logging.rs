use tracing_subscriber::EnvFilter;

/// Install the stderr diagnostics subscriber.
/// `RUST_LOG` wins; otherwise `warn`, or `debug` when `--debug` is set.
pub(crate) fn init_tracing(debug: bool) {
    let fallback = if debug { "dojo=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
