//! Logging setup for the CLI.
//!
//! Events go to stderr and to `log.txt` in the working directory. The level
//! comes from `RUST_LOG`, falling back to `info` (`debug` with `--verbose`).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Log file written next to the report.
pub const LOG_FILE: &str = "log.txt";

/// Install the global subscriber.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
