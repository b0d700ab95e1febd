//! Metrics for configuration checks.
//!
//! Provides Prometheus counters for check outcomes and deprecated field usage.

use prometheus::{IntCounterVec, Opts, Registry};

/// Metrics collector for configuration checks.
#[derive(Clone)]
pub struct CheckMetrics {
    /// Registry for all metrics
    registry: Registry,

    /// Counter for checks by outcome
    pub checks_total: IntCounterVec,

    /// Counter for populated deprecated fields by path
    pub deprecated_fields_total: IntCounterVec,

    /// Counter for fields with an unsupported shape by path
    pub unsupported_fields_total: IntCounterVec,
}

impl CheckMetrics {
    /// Create a new metrics collector with the given prefix.
    pub fn new(prefix: &str) -> Self {
        let registry = Registry::new();

        let checks_total = IntCounterVec::new(
            Opts::new(
                format!("{}_checks_total", prefix),
                "Total number of configuration checks by result",
            ),
            &["result"],
        )
        .expect("Failed to create checks_total metric");

        let deprecated_fields_total = IntCounterVec::new(
            Opts::new(
                format!("{}_deprecated_fields_total", prefix),
                "Total number of populated deprecated fields found",
            ),
            &["path"],
        )
        .expect("Failed to create deprecated_fields_total metric");

        let unsupported_fields_total = IntCounterVec::new(
            Opts::new(
                format!("{}_unsupported_fields_total", prefix),
                "Total number of fields with a shape the checker does not recognize",
            ),
            &["path"],
        )
        .expect("Failed to create unsupported_fields_total metric");

        registry
            .register(Box::new(checks_total.clone()))
            .expect("Failed to register checks_total");
        registry
            .register(Box::new(deprecated_fields_total.clone()))
            .expect("Failed to register deprecated_fields_total");
        registry
            .register(Box::new(unsupported_fields_total.clone()))
            .expect("Failed to register unsupported_fields_total");

        Self {
            registry,
            checks_total,
            deprecated_fields_total,
            unsupported_fields_total,
        }
    }

    /// Record the outcome of a check.
    pub fn record_check(&self, result: &str) {
        self.checks_total.with_label_values(&[result]).inc();
    }

    /// Record a populated deprecated field.
    pub fn record_deprecated(&self, path: &str) {
        self.deprecated_fields_total.with_label_values(&[path]).inc();
    }

    /// Record a field with an unsupported shape.
    pub fn record_unsupported(&self, path: &str) {
        self.unsupported_fields_total
            .with_label_values(&[path])
            .inc();
    }

    /// Get the Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode metrics in Prometheus text format.
    pub fn encode(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::warn!(error = %e, "Failed to encode metrics");
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Default for CheckMetrics {
    fn default() -> Self {
        Self::new("goreleaser_deprecation_check")
    }
}
