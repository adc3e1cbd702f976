//! # HTTP Server for Avatars
//!
//! Serves rendered avatars as PNG over HTTP, so pages can point `<img>` tags
//! straight at an input string.
//!
//! ## Usage
//!
//! ```bash
//! mosaico serve --listen 0.0.0.0:8080
//! curl -o alice.png 'http://localhost:8080/avatar/alice.png?size=256&fg_shape=circle'
//! ```
//!
//! ## Routes
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /avatar/:input` | PNG avatar (optional `.png` suffix) |
//! | `GET /api/shapes` | Preset shape names |
//! | `GET /health` | Liveness probe |

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{Router, http::Method, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::MosaicoError;
use state::AppState;

/// Build the application router.
pub fn router(config: ServerConfig) -> Router {
    let app_state = Arc::new(AppState::new(config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/shapes", get(handlers::shapes::list))
        .route("/avatar/:input", get(handlers::avatar::render))
        .layer(cors)
        .with_state(app_state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use mosaico::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), mosaico::error::MosaicoError> {
/// serve(ServerConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), MosaicoError> {
    let listen_addr = config.listen_addr.clone();
    log::info!(
        "mosaico HTTP server listening on {} (max size {}, max grid {})",
        listen_addr,
        config.max_size,
        config.max_grid
    );

    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| MosaicoError::Server(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| MosaicoError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
