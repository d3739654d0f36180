pub mod middleware;
pub mod registry;

pub use middleware::metrics_middleware;
pub use registry::{
    Metrics, MetricsError, gather_metric_families, gather_metrics, init, is_initialized,
    record_remote_state_read, with_metrics,
};
