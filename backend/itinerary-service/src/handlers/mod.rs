/// HTTP handlers for itinerary-service
///
/// - `GET /` liveness message
/// - `POST /predict` classify attraction descriptions
/// - `POST /generate-itinerary` schedule attractions
/// - `GET /metrics` Prometheus exposition
pub mod health;
pub mod itinerary;
pub mod predict;

use crate::error::{AppError, MISSING_ITINERARY_INPUT, NO_DESCRIPTIONS};
use crate::metrics::{self, ITINERARY_REQUESTS_TOTAL, PREDICTION_REQUESTS_TOTAL};
use actix_web::error::JsonPayloadError;
use actix_web::web;
use prometheus::IntCounterVec;

pub use health::home;
pub use itinerary::generate_itinerary;
pub use predict::predict_category;

/// Register every route. Callers provide `web::Data<PredictionService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/metrics", web::get().to(metrics::serve_metrics))
        .service(
            web::resource("/predict")
                .app_data(json_config(NO_DESCRIPTIONS, &PREDICTION_REQUESTS_TOTAL))
                .route(web::post().to(predict_category)),
        )
        .service(
            web::resource("/generate-itinerary")
                .app_data(json_config(MISSING_ITINERARY_INPUT, &ITINERARY_REQUESTS_TOTAL))
                .route(web::post().to(generate_itinerary)),
        );
}

/// Bodies that are not JSON or carry wrong-typed fields count as missing input.
fn json_config(message: &'static str, requests: &'static IntCounterVec) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, req| match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            requests.with_label_values(&["failure"]).inc();
            err.into()
        }
        _ => {
            tracing::warn!(path = %req.path(), error = %err, "Rejected request body");
            requests.with_label_values(&["missing_input"]).inc();
            AppError::MissingInput(message).into()
        }
    })
}
