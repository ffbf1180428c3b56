pub mod metrics;

pub use metrics::{CaptureMetrics, MetricsSnapshot};
