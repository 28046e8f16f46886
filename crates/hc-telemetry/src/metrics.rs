//! Prometheus metrics for the vault runtime.
//!
//! All metrics follow the naming convention: `hc_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // DOCUMENT REGISTRY (Subsystem 1)
    // =========================================================================

    /// Documents uploaded and registered
    pub static ref DOCUMENTS_REGISTERED: Counter = Counter::new(
        "hc_registry_documents_registered_total",
        "Total number of documents registered after upload"
    ).expect("metric creation failed");

    /// Documents verified, by path
    pub static ref DOCUMENTS_VERIFIED: CounterVec = CounterVec::new(
        Opts::new("hc_registry_documents_verified_total", "Total documents verified"),
        &["path"]  // path: on_chain/local
    ).expect("metric creation failed");

    // =========================================================================
    // ACCESS LEDGER (Subsystem 2)
    // =========================================================================

    /// Batched access grants recorded
    pub static ref ACCESS_GRANTS_RECORDED: Counter = Counter::new(
        "hc_ledger_grants_recorded_total",
        "Total access grants recorded in the ledger"
    ).expect("metric creation failed");

    // =========================================================================
    // CLAIM PROOFS (Subsystem 3)
    // =========================================================================

    /// Proofs generated, by claim
    pub static ref PROOFS_GENERATED: CounterVec = CounterVec::new(
        Opts::new("hc_proofs_generated_total", "Total claim proofs generated"),
        &["claim"]
    ).expect("metric creation failed");

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Actions refused locally, by action
    pub static ref ACTIONS_REJECTED: CounterVec = CounterVec::new(
        Opts::new("hc_session_actions_rejected_total", "Actions refused before completion"),
        &["action"]
    ).expect("metric creation failed");

    /// Upstream failures, by collaborator
    pub static ref UPSTREAM_FAILURES: CounterVec = CounterVec::new(
        Opts::new("hc_session_upstream_failures_total", "External collaborator failures"),
        &["service"]  // service: wallet/contract/content store/proof generator
    ).expect("metric creation failed");

    /// Wall time per session action
    pub static ref ACTION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "hc_session_action_duration_seconds",
            "Time spent in a session action, including external calls"
        ).buckets(exponential_buckets(0.001, 2.0, 14).expect("bucket layout")),
        &["action"]
    ).expect("metric creation failed");
}

/// Handle to the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already-registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Registry
        Box::new(DOCUMENTS_REGISTERED.clone()),
        Box::new(DOCUMENTS_VERIFIED.clone()),
        // Ledger
        Box::new(ACCESS_GRANTS_RECORDED.clone()),
        // Proofs
        Box::new(PROOFS_GENERATED.clone()),
        // Session
        Box::new(ACTIONS_REJECTED.clone()),
        Box::new(UPSTREAM_FAILURES.clone()),
        Box::new(ACTION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Start a timer for one label of `ACTION_DURATION`.
    pub fn action(action: &str) -> Self {
        Self::new(&ACTION_DURATION.with_label_values(&[action]))
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
