//! HTTP server: JSON API, admin gate and optional static UI

pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::MarkdownRenderer;
use crate::Cms;

/// Server state
pub struct ServerState {
    pub cms: Cms,
    pub renderer: MarkdownRenderer,
}

pub type SharedState = Arc<ServerState>;

/// Build the application router
pub fn router(cms: Cms) -> Router {
    let public_dir = cms.config.server.public_dir.clone();
    let state = Arc::new(ServerState {
        cms,
        renderer: MarkdownRenderer::new(),
    });

    let app = Router::new()
        .route(
            "/api/articles",
            get(routes::articles::list_or_get).post(routes::articles::update),
        )
        .route("/api/articles/create", post(routes::articles::create))
        .route(
            "/api/resources",
            get(routes::resources::list).post(routes::resources::save),
        )
        .route(
            "/api/categories",
            get(routes::categories::list)
                .post(routes::categories::add)
                .put(routes::categories::replace)
                .delete(routes::categories::remove),
        )
        .route("/api/login", post(routes::session::login))
        .route("/api/logout", post(routes::session::logout))
        .route("/api/check-auth", get(routes::session::check_auth))
        .route("/api/posts", get(routes::posts::list))
        .route("/api/posts/:slug", get(routes::posts::show))
        .route("/health", get(routes::health::health_handler));

    let app = match public_dir {
        Some(dir) => {
            tracing::debug!("Serving static files from {:?}", dir);
            app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        }
        None => app.fallback(not_found),
    };

    app.layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::admin_gate,
    ))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Start the HTTP server
pub async fn start(cms: Cms, ip: &str, port: u16) -> Result<()> {
    let app = router(cms);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
