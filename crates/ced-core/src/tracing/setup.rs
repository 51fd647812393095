//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::constants::{DEFAULT_LOG_LEVEL, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize logging with `ced=info` as the fallback filter.
///
/// Reads the `CED_LOG` environment variable for per-module log levels.
/// Format: `CED_LOG=ced_scm=debug,ced_estimate=info`
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    install(DEFAULT_LOG_LEVEL, LogFormat::Text);
}

/// Initialize logging, falling back to `ced=<default_level>` when `CED_LOG`
/// is unset or invalid. A `default_level` that is itself invalid falls back
/// to `ced=info`.
pub fn init_tracing_with(default_level: &str) {
    install(default_level, LogFormat::Text);
}

/// Initialize logging from the `[observability]` config section.
pub fn init_tracing_from(config: &ObservabilityConfig) {
    install(&config.log_level, config.log_format);
}

fn install(default_level: &str, format: LogFormat) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_new(fallback_directive(default_level)))
            .unwrap_or_else(|_| EnvFilter::new(fallback_directive(DEFAULT_LOG_LEVEL)));
        let registry = tracing_subscriber::registry().with(filter);

        // A host application may already own the global subscriber.
        let _ = match format {
            LogFormat::Text => registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(false)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init(),
        };
    });
}

fn fallback_directive(level: &str) -> String {
    format!("ced={level},ced_core={level},ced_scm={level},ced_estimate={level}")
}
