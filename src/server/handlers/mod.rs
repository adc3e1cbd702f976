//! HTTP handlers for the server.

pub mod avatar;
pub mod shapes;

/// GET /health - Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
