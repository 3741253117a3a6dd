// Wedding RSVP API server
// Decision: Storage is opened before any route is registered; failure to open it is fatal

use anyhow::{Context, Result};
use axum::http::{header, Method};
use axum::Router;
use rsvp_api::api;
use rsvp_api::config::{DatabaseLocation, ServerConfig};
use rsvp_api::openapi::ApiDoc;
use rsvp_storage::Database;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading RUST_LOG or any server setting
    let dotenv_path = dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rsvp_api=debug,rsvp_storage=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("rsvp-api starting...");
    if let Some(path) = dotenv_path {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let config = ServerConfig::from_env();

    // Initialize database
    let db = match &config.database {
        DatabaseLocation::Path(path) => Database::open(path).await,
        DatabaseLocation::Url(url) => Database::from_url(url).await,
    };
    let db = db.map_err(|e| {
        tracing::error!(location = %config.database, "Failed to open database: {:#}", e);
        e
    })
    .with_context(|| format!("Failed to open database at {}", config.database))?;
    tracing::info!(location = %config.database, "Database ready");

    let app = api::router(Arc::new(db))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let app = with_cors(app, &config);

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start HTTP server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down");
    Ok(())
}

/// Add a CORS layer only if origins are configured
fn with_cors(app: Router, config: &ServerConfig) -> Router {
    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        return app;
    }

    tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    app.layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderValue, Request},
    };
    use tower::ServiceExt;

    fn test_routes() -> Router {
        Router::new().route("/rsvp", axum::routing::post(|| async { "ok" }))
    }

    #[tokio::test]
    async fn test_cors_disabled_by_default() {
        let app = with_cors(test_routes(), &ServerConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/rsvp")
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let config = ServerConfig {
            cors_origins: vec!["https://example.com".parse().unwrap()],
            ..Default::default()
        };
        let app = with_cors(test_routes(), &config);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/rsvp")
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://example.com"))
        );
    }
}
