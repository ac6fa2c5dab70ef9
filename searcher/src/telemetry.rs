//! Tracing setup for applications embedding the searcher.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. With `json`
/// set, events are emitted as JSON lines. Calling this when a subscriber is
/// already installed leaves the existing one in place.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false);
        init_tracing(true);
    }
}
