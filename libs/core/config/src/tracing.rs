use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter for development builds when `RUST_LOG` is unset.
const DEVELOPMENT_FILTER: &str = "debug,domain_tasks=trace,domain_users=trace,sea_orm=info,sqlx=warn";

/// Default filter for production builds when `RUST_LOG` is unset.
const PRODUCTION_FILTER: &str = "info,sea_orm=warn,sqlx=warn";

/// Builds the filter used by [`init_tracing`].
///
/// `RUST_LOG` always wins; otherwise the environment picks between
/// [`DEVELOPMENT_FILTER`] and [`PRODUCTION_FILTER`].
pub fn env_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new(PRODUCTION_FILTER)
        } else {
            EnvFilter::new(DEVELOPMENT_FILTER)
        }
    })
}

/// Initialize tracing with environment-aware configuration and error span capture.
///
/// - **Production** (`APP_ENV=production`): JSON events flattened for log
///   aggregation, module targets hidden.
/// - **Development** (default): pretty, human-readable output.
///
/// Both install `tracing_error::ErrorLayer` so span traces are available when
/// a service error is reported.
///
/// Safe to call more than once: a second call leaves the first subscriber in
/// place (common in tests).
pub fn init_tracing(environment: &Environment) {
    let filter = env_filter(environment);

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => {
            info!(environment = ?environment, "Tracing initialized");
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }
}
