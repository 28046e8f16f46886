//! # HealthChain Telemetry
//!
//! Logging and metrics for the vault runtime.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with an `EnvFilter`, human-readable or JSON
//! - **Metrics**: Prometheus counters and an action-duration histogram in a
//!   process-wide registry, exported in text format
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hc_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HC_SERVICE_NAME` | `healthchain` | Service name in log records |
//! | `HC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `HC_JSON_LOGS` | `false` | Emit JSON log lines |
//! | `HC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, ACCESS_GRANTS_RECORDED,
    ACTIONS_REJECTED, ACTION_DURATION, DOCUMENTS_REGISTERED, DOCUMENTS_VERIFIED,
    PROOFS_GENERATED, UPSTREAM_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and register metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Initialize metrics first (synchronous, idempotent)
    let metrics_handle = register_metrics()?;
    init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "[telemetry] Initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "[telemetry] Shutting down");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
