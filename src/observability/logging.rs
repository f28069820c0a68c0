//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Resolve the level from `RUST_LOG`, `-v` flags and configuration
//!
//! # Design Decisions
//! - Logs go to stderr so command output on stdout stays pipeable
//! - `RUST_LOG` wins over everything else when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used when `RUST_LOG` is unset.
///
/// Each `-v` raises the configured level by one step.
pub fn default_directive(configured: &str, verbosity: u8) -> String {
    let level = match verbosity {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("edumeta_cli={level},warn")
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_logging(configured: &str, verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(configured, verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_raises_level() {
        assert_eq!(default_directive("warn", 0), "edumeta_cli=warn,warn");
        assert_eq!(default_directive("warn", 2), "edumeta_cli=debug,warn");
        assert_eq!(default_directive("error", 9), "edumeta_cli=trace,warn");
    }

    #[test]
    fn test_directive_parses() {
        assert!(EnvFilter::try_new(default_directive("info", 1)).is_ok());
    }
}
