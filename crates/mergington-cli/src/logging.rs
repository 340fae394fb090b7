//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

const FALLBACK_FILTER: &str = "info";

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over the configured filter. Records emitted through the
/// `log` facade are captured as well. A configured filter that does not
/// parse is replaced by `info` and reported once the subscriber is up.
pub fn init(configured: &str) {
    let (filter, rejected) = select_filter(EnvFilter::try_from_default_env().ok(), configured);
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    if let Some(error) = rejected {
        tracing::warn!(
            filter = configured,
            %error,
            "ignoring invalid logging.filter, using {FALLBACK_FILTER}"
        );
    }
}

/// Pick the filter to install; the error is set when `configured` was
/// consulted and rejected.
fn select_filter(
    from_env: Option<EnvFilter>,
    configured: &str,
) -> (EnvFilter, Option<ParseError>) {
    if let Some(filter) = from_env {
        return (filter, None);
    }
    match EnvFilter::try_new(configured) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(FALLBACK_FILTER), Some(e)),
    }
}
