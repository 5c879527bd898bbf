// src/bin/api_server.rs

use anyhow::Context;
use axum::http::HeaderValue;
use std::sync::Arc;
use stayfinder::infra::assistant::{AssistantModel, DisabledAssistant, GeminiAssistant};
use stayfinder::infra::geocoding::{DisabledGeocoder, Geocoder, MapboxGeocoder};
use stayfinder::infra::payment::{HttpPaymentGateway, InstantApproval, PaymentGateway};
use stayfinder::infra::telemetry::init_tracing;
use stayfinder::{transport, Config, MarketStore, MemoryStore, PgStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    // --- Store ---
    let store: Arc<dyn MarketStore> = match config.database_url.as_deref() {
        Some(url) => {
            tracing::info!("connecting to Postgres");
            Arc::new(PgStore::connect(url).await?)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store (data is lost on exit)");
            Arc::new(MemoryStore::new())
        }
    };

    // --- Collaborators ---
    let geocoder: Arc<dyn Geocoder> = match config.mapbox_token.clone() {
        Some(token) => Arc::new(MapboxGeocoder::new(token)),
        None => {
            tracing::info!("MAPBOX_TOKEN not set, listing maps are disabled");
            Arc::new(DisabledGeocoder)
        }
    };
    let payments: Arc<dyn PaymentGateway> = match config.payment_capture_url.clone() {
        Some(url) => Arc::new(HttpPaymentGateway::new(url)),
        None => {
            tracing::warn!("PAYMENT_CAPTURE_URL not set, every payment is approved locally");
            Arc::new(InstantApproval)
        }
    };

    let assistant: Arc<dyn AssistantModel> = match config.gemini_api_key.clone() {
        Some(key) => Arc::new(GeminiAssistant::new(key).with_model(config.gemini_model.clone())),
        None => {
            tracing::info!("GEMINI_API_KEY not set, the trip assistant is disabled");
            Arc::new(DisabledAssistant)
        }
    };

    let app_state = transport::http::AppState::new(
        store.clone(),
        geocoder,
        payments,
        assistant,
        config.currency.clone(),
    );

    // --- API Server ---
    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("CORS_ORIGIN is not a valid origin: {}", origin))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(
        addr = %config.bind_addr,
        store = store.backend_name(),
        currency = %config.currency,
        "API server listening (Swagger UI at /swagger-ui)"
    );

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
