//! AgroTrack V2 portal server.
//!
//! axum application over the PostgreSQL contact store: static pages, the
//! contacts API, the cosmetic login echo, Swagger UI, request logging and
//! best-effort seed population at startup.

use agrotrack::infra::config;
use agrotrack::seed;
use agrotrack::storage::PgContactStore;
use agrotrack::transport::http::error::AppError;
use agrotrack::transport::http::{create_router, middleware, ApiDoc, AppState};
use axum::handler::HandlerWithoutStateExt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Seed band: the store is topped up to the floor at startup but never past
/// the ceiling.
const SEED_FLOOR: u64 = 20;
const SEED_CEILING: u64 = 100;

async fn handle_404() -> AppError {
    AppError::NotFound
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The pool connects lazily so a down database degrades the API instead of
    // preventing startup, matching the portal's historical behavior.
    let store = PgContactStore::connect_lazy(&config::database_url())?;
    match store.test_connection().await {
        Ok(()) => {
            tracing::info!("database connection established");
            if let Err(e) = store.ensure_schema().await {
                tracing::warn!(error = %e, "could not ensure the contactos schema");
            } else {
                seed::ensure_minimum_population(&store, SEED_FLOOR, SEED_CEILING).await;
                tracing::info!(
                    floor = SEED_FLOOR,
                    ceiling = SEED_CEILING,
                    "contact seed data ready"
                );
            }
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "database unreachable; starting anyway, the contacts API will fail until it returns"
            );
        }
    }

    let state = AppState::new(Arc::new(store));
    let public_dir = PathBuf::from(config::public_dir());

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Extension-less page aliases kept from V1.
        .route_service("/contacto", ServeFile::new(public_dir.join("contacto.html")))
        .route_service("/login", ServeFile::new(public_dir.join("login.html")))
        .fallback_service(
            ServeDir::new(&public_dir).not_found_service(handle_404.into_service()),
        )
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::log_requests));

    let port = config::server_port();
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "AgroTrack V2 listening");
    tracing::info!("health check at /health, contacts API at /api/contactos, docs at /swagger-ui");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutdown signal received");
    })
    .await?;

    Ok(())
}
