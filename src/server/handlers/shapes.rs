//! Shape preset handlers.

use axum::Json;

use crate::shapes;

/// GET /api/shapes - List preset shape names.
pub async fn list() -> Json<Vec<&'static str>> {
    Json(shapes::SHAPES.to_vec())
}
