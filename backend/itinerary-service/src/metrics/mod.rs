//! Prometheus metrics for itinerary-service.
//!
//! Exposes request collectors and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

lazy_static! {
    /// Prediction requests segmented by outcome (success, missing_input, failure).
    pub static ref PREDICTION_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "prediction_requests_total",
        "Total prediction requests segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register prediction_requests_total");

    /// Descriptions classified per successful request.
    pub static ref PREDICTION_BATCH_SIZE: Histogram = register_histogram!(
        "prediction_batch_size",
        "Number of descriptions classified per request",
        vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]
    )
    .expect("failed to register prediction_batch_size");

    /// Itinerary requests segmented by outcome (success, missing_input, failure).
    pub static ref ITINERARY_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "itinerary_requests_total",
        "Total itinerary requests segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register itinerary_requests_total");

    /// Entries produced per generated itinerary.
    pub static ref ITINERARY_ENTRIES: Histogram = register_histogram!(
        "itinerary_entries",
        "Number of entries per generated itinerary",
        vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0]
    )
    .expect("failed to register itinerary_entries");
}

/// Label value for a handler result.
pub fn outcome<T>(result: &crate::error::Result<T>) -> &'static str {
    use crate::error::AppError;

    match result {
        Ok(_) => "success",
        Err(AppError::MissingInput(_)) => "missing_input",
        Err(_) => "failure",
    }
}

/// `GET /metrics`: prediction and itinerary request counters plus batch and
/// entry-count histograms, in the Prometheus text exposition format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
