use crate::models::HealthResponse;
use actix_web::HttpResponse;

/// Liveness message, served whenever the process is up.
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        message: "Backend is running!",
    })
}
