use tracing_subscriber::EnvFilter;

/** \brief Filter used when `RUST_LOG` is unset. */
pub const DEFAULT_FILTER: &str = "info,lumi_core_sdk=debug,tower_http=info";

/**
 * \brief Installs the global tracing subscriber. Logs go to stderr; `RUST_LOG` overrides the default filter.
 */
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
