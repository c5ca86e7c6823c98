use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BLOBVIEW_LOG";

/// Install the global subscriber. Output goes to stderr so stdout only
/// carries rendered views.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests, embedding hosts).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .try_init();
}
