//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout to command
//! output. `RUST_LOG` wins when set; otherwise the level comes from the
//! number of `-v` flags.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors produced while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),
}

/// Maps a `-v` count onto a level name.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the filter used when `RUST_LOG` is unset.
///
/// The crate logs at the requested level, everything else at `warn`.
pub fn default_filter(verbosity: u8) -> String {
    let level = level_for_verbosity(verbosity);
    format!("warn,targetscope={}", level)
}

/// Installs the global subscriber.
pub fn init(verbosity: u8) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(verbosity, "Logger initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(3), "trace");
        assert_eq!(level_for_verbosity(u8::MAX), "trace");
    }

    #[test]
    fn test_default_filter_parses() {
        for verbosity in 0..4 {
            let directives = default_filter(verbosity);
            assert!(EnvFilter::try_new(&directives).is_ok(), "{}", directives);
        }
    }
}
