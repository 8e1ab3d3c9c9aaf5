use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use text_classifier::ArtifactPair;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use itinerary_service::config::Config;
use itinerary_service::handlers;
use itinerary_service::services::PredictionService;

fn init_tracing(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,itinerary_service=debug".into());

    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);

    tracing::info!("Starting itinerary-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = %config.app_env,
        host = %config.host,
        port = config.port,
        "Configuration loaded"
    );

    // Artifacts are required: without them the service does not start
    let artifacts = ArtifactPair::load(&config.vectorizer_path, &config.classifier_path)
        .map_err(|e| {
            tracing::error!("Failed to load classification artifacts: {}", e);
            e
        })
        .context("Failed to load classification artifacts")?;
    tracing::info!(n_features = artifacts.n_features(), "Classification artifacts loaded");

    let prediction_service = web::Data::new(PredictionService::new(Arc::new(artifacts)));
    let http_config = config.clone();

    let mut server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in http_config.allowed_origins() {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(prediction_service.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    tracing::info!("Starting HTTP server on {}:{}", config.host, config.port);

    server
        .bind((config.host.as_str(), config.port))
        .context("Failed to bind HTTP server")?
        .run()
        .await
        .context("HTTP server error")
}
