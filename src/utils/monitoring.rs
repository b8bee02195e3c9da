use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use tracing::debug;

use crate::error::AppError;
use crate::models::Rating;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref RATINGS_CALCULATED: IntCounterVec = IntCounterVec::new(
        Opts::new("ratings_calculated_total", "Total ratings calculated, by grade"),
        &["rating"]
    ).expect("metric can be created");

    pub static ref RATING_TOTAL_SCORE: Histogram = Histogram::with_opts(
        HistogramOpts::new("rating_total_score", "Distribution of composite rating scores")
            .buckets(vec![40.0, 50.0, 60.0, 70.0, 75.0, 80.0, 85.0, 90.0, 95.0, 100.0])
    ).expect("metric can be created");

    pub static ref VALIDATION_FAILURES: IntCounter = IntCounter::new(
        "rating_validation_failures_total",
        "Total rating requests rejected at the validation boundary"
    ).expect("metric can be created");

    pub static ref DOMAIN_WARNINGS: IntCounterVec = IntCounterVec::new(
        Opts::new("rating_domain_warnings_total", "Inputs outside their expected range, by field"),
        &["field"]
    ).expect("metric can be created");
}

/// Register all rating metrics with [`REGISTRY`]. Safe to call more than once.
pub fn init_metrics() -> Result<(), AppError> {
    register(Box::new(RATINGS_CALCULATED.clone()))?;
    register(Box::new(RATING_TOTAL_SCORE.clone()))?;
    register(Box::new(VALIDATION_FAILURES.clone()))?;
    register(Box::new(DOMAIN_WARNINGS.clone()))?;
    Ok(())
}

fn register(collector: Box<dyn prometheus::core::Collector>) -> Result<(), AppError> {
    match REGISTRY.register(collector) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub fn record_rating(rating: Rating, total_score: i64) {
    RATINGS_CALCULATED.with_label_values(&[rating.as_str()]).inc();
    RATING_TOTAL_SCORE.observe(total_score as f64);
}

pub fn record_validation_failure() {
    VALIDATION_FAILURES.inc();
}

pub fn record_domain_warning(field: &str) {
    DOMAIN_WARNINGS.with_label_values(&[field]).inc();
}

/// Render the registry in the Prometheus text exposition format.
pub fn export_metrics() -> Result<String, AppError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    debug!(families = metric_families.len(), "Exported metrics");

    String::from_utf8(buffer)
        .map_err(|e| AppError::InternalError(format!("Metrics are not valid UTF-8: {}", e)))
}
