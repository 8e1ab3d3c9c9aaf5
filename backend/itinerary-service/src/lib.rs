pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{Attraction, ItineraryEntry, Preferences};
pub use services::PredictionService;
