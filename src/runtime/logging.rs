use std::io;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

const LOG_ENV: &str = "AUDIOSHELF_LOG";

/// Install the global subscriber. `AUDIOSHELF_LOG` wins over the configured
/// level; an unparsable directive falls back to `info`.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
