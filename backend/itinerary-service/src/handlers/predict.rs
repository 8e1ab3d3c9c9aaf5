/// Prediction handler - classifies attraction descriptions
use crate::error::Result;
use crate::metrics::{self, PREDICTION_BATCH_SIZE, PREDICTION_REQUESTS_TOTAL};
use crate::models::{PredictRequest, PredictResponse};
use crate::services::PredictionService;
use actix_web::{web, HttpResponse};

pub async fn predict_category(
    service: web::Data<PredictionService>,
    req: web::Json<PredictRequest>,
) -> Result<HttpResponse> {
    let descriptions = req.into_inner().descriptions.unwrap_or_default();

    let result = service.predict(&descriptions);
    PREDICTION_REQUESTS_TOTAL
        .with_label_values(&[metrics::outcome(&result)])
        .inc();

    let predictions = result?;
    PREDICTION_BATCH_SIZE.observe(predictions.len() as f64);

    Ok(HttpResponse::Ok().json(PredictResponse { predictions }))
}
