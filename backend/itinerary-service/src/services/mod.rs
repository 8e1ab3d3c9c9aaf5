//! Business logic behind the HTTP handlers.

pub mod itinerary;
pub mod prediction;

pub use prediction::PredictionService;
