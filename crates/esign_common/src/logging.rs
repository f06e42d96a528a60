//! Logging utilities for the e-signature workspace.
//!
//! Every crate logs through `tracing`; the binary installs the subscriber
//! once via [`init`] or [`init_with_level`].

use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use esign_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honoured; the `esign` directive is added on top
/// so every workspace crate logs at `level` at least.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("esign={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // try_init: a global subscriber may already be installed (tests).
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log an error that is deliberately not propagated, at the WARN level.
pub fn log_swallowed<E: std::fmt::Display>(error: E, context: &str) {
    warn!("{} (ignored): {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init();
        init_with_level(Level::DEBUG);
    }
}
