/// Itinerary handler - schedules attractions from user preferences
use crate::error::Result;
use crate::metrics::{self, ITINERARY_ENTRIES, ITINERARY_REQUESTS_TOTAL};
use crate::models::{GenerateItineraryRequest, ItineraryResponse};
use crate::services::itinerary;
use actix_web::{web, HttpResponse};

pub async fn generate_itinerary(req: web::Json<GenerateItineraryRequest>) -> Result<HttpResponse> {
    let result = itinerary::generate_for(req.into_inner());
    ITINERARY_REQUESTS_TOTAL
        .with_label_values(&[metrics::outcome(&result)])
        .inc();

    let entries = result?;
    ITINERARY_ENTRIES.observe(entries.len() as f64);

    Ok(HttpResponse::Ok().json(ItineraryResponse { itinerary: entries }))
}
