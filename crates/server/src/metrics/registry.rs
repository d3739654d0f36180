use lazy_static::lazy_static;
use prometheus::proto::MetricFamily;
use prometheus::{
    Counter, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::RwLock;
use thiserror::Error;

lazy_static! {
    static ref METRICS: RwLock<Option<Metrics>> = RwLock::new(None);
}

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Metrics not initialized")]
    NotInitialized,

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Metrics output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Every collector exposed by the service, registered under one prefix.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub http_requests: Counter,
    pub http_request_success: Counter,
    pub http_request_error: Counter,
    pub request_duration_seconds: HistogramVec,
    pub response_size_bytes: HistogramVec,
    pub remote_state_reads: IntCounterVec,
    pub remote_state_outputs: Histogram,
}

impl Metrics {
    fn new(prefix: &str) -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some(prefix.to_string()), None)?;

        let http_requests = Counter::new("http_requests", "Total number of HTTP requests")?;
        let http_request_success =
            Counter::new("http_request_success", "Number of successful HTTP requests")?;
        let http_request_error =
            Counter::new("http_request_error", "Number of HTTP request errors")?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "request_duration_seconds",
                "Duration of HTTP requests in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
            &["method", "route", "status_code"],
        )?;

        let response_size_bytes = HistogramVec::new(
            HistogramOpts::new("response_size_bytes", "Size of HTTP responses in bytes").buckets(
                vec![
                    100.0, 500.0, 1000.0, 5000.0, 10000.0, 50000.0, 100000.0, 500000.0,
                    1000000.0, 5000000.0,
                ],
            ),
            &["method", "route", "status_code"],
        )?;

        let remote_state_reads = IntCounterVec::new(
            Opts::new(
                "remote_state_reads",
                "Remote state reads by outcome",
            ),
            &["outcome"],
        )?;

        let remote_state_outputs = Histogram::with_opts(
            HistogramOpts::new(
                "remote_state_outputs",
                "Number of outputs returned by a successful remote state read",
            )
            .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 250.0]),
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(http_request_success.clone()))?;
        registry.register(Box::new(http_request_error.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(response_size_bytes.clone()))?;
        registry.register(Box::new(remote_state_reads.clone()))?;
        registry.register(Box::new(remote_state_outputs.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            http_request_success,
            http_request_error,
            request_duration_seconds,
            response_size_bytes,
            remote_state_reads,
            remote_state_outputs,
        })
    }
}

/// Create and register all collectors. Later calls keep the first registry.
pub fn init(prefix: &str) -> Result<(), MetricsError> {
    let mut slot = METRICS.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.is_none() {
        *slot = Some(Metrics::new(prefix)?);
    }
    Ok(())
}

pub fn is_initialized() -> bool {
    METRICS
        .read()
        .map(|slot| slot.is_some())
        .unwrap_or(false)
}

/// Run `record` against the collectors. Does nothing when metrics are disabled.
pub fn with_metrics(record: impl FnOnce(&Metrics)) {
    if let Ok(slot) = METRICS.read()
        && let Some(metrics) = slot.as_ref()
    {
        record(metrics);
    }
}

/// Record the outcome of one remote state read.
pub fn record_remote_state_read(outcome: &str, outputs: Option<usize>) {
    with_metrics(|metrics| {
        metrics.remote_state_reads.with_label_values(&[outcome]).inc();
        if let Some(outputs) = outputs {
            metrics.remote_state_outputs.observe(outputs as f64);
        }
    });
}

pub fn gather_metric_families() -> Result<Vec<MetricFamily>, MetricsError> {
    let slot = METRICS.read().map_err(|_| MetricsError::NotInitialized)?;
    let metrics = slot.as_ref().ok_or(MetricsError::NotInitialized)?;
    Ok(metrics.registry.gather())
}

/// Gather all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, MetricsError> {
    let metric_families = gather_metric_families()?;
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
