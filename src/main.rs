mod routes;
mod controllers;
mod api_docs;
mod shared_state;
mod config;

use std::net::SocketAddr;
use axum::{Router, routing::get, response::Html};
use crate::routes::estimate_routes::api_routes;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;
use crate::api_docs::ApiDoc;
use crate::shared_state::AppState;
use crate::config::Config;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "verbose_log")]
const DEFAULT_LOG_FILTER: &str = "debug,tower_http=debug";
#[cfg(not(feature = "verbose_log"))]
const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    // 1. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config.json: {}", e);
            return;
        }
    };
    info!(dataset = %config.dataset.path.display(), "configuration loaded");

    // 2. Initialize shared state
    let state = AppState::new(&config);

    // 3. Warm the table cache. A missing dataset is not fatal: requests report it
    //    until the file appears.
    match state.table().await {
        Ok(table) => info!(locations = table.locations().len(), "radiation dataset ready"),
        Err(e) => warn!("radiation dataset not available yet: {}", e),
    }

    // 4. Start Axum HTTP server
    let app = Router::new()
        .nest("/api", api_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
    {
        error!("HTTP server error: {}", e);
    }
}
