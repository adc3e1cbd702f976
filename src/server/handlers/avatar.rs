//! Avatar rendering handler.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    avatar::{self, AvatarOption},
    color,
    digest::{DigestEncoding, HashAlgorithm},
    export, shapes,
};

use super::super::state::{AppState, ServerConfig};

/// Query parameters for the avatar endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AvatarQuery {
    pub size: Option<u32>,
    pub grid: Option<u32>,
    pub bg: Option<String>,
    pub fg: Option<String>,
    pub fg_shape: Option<String>,
    pub bg_shape: Option<String>,
    #[serde(default)]
    pub transparent: bool,
    pub hash: Option<HashAlgorithm>,
    /// Index the hex digest's ASCII codes instead of raw bytes.
    #[serde(default)]
    pub legacy: bool,
}

impl AvatarQuery {
    /// Convert to ordered options, rejecting unparseable values.
    fn to_options(&self) -> Result<Vec<AvatarOption>, String> {
        let mut options = Vec::new();

        if let Some(size) = self.size {
            options.push(AvatarOption::Size(size));
        }
        if let Some(grid) = self.grid {
            options.push(AvatarOption::GridSize(grid));
        }
        if let Some(bg) = &self.bg {
            options.push(AvatarOption::BgColor(
                color::parse_color(bg).map_err(|e| e.to_string())?,
            ));
        }
        if let Some(fg) = &self.fg {
            options.push(AvatarOption::FgColor(
                color::parse_color(fg).map_err(|e| e.to_string())?,
            ));
        }
        if let Some(name) = &self.fg_shape {
            options.push(AvatarOption::FgShape(Some(preset(name)?)));
        }
        if let Some(name) = &self.bg_shape {
            options.push(AvatarOption::BgShape(Some(preset(name)?)));
        }
        options.push(AvatarOption::Transparency(self.transparent));
        if let Some(hash) = self.hash {
            options.push(AvatarOption::Hash(hash));
        }
        if self.legacy {
            options.push(AvatarOption::Encoding(DigestEncoding::HexAscii));
        }

        Ok(options)
    }

    /// Reject sizes and grids above the server's limits.
    fn check_limits(&self, config: &ServerConfig) -> Result<(), String> {
        if let Some(size) = self.size
            && size > config.max_size
        {
            return Err(format!(
                "Size {} exceeds the server max of {}",
                size, config.max_size
            ));
        }
        if let Some(grid) = self.grid
            && grid > config.max_grid
        {
            return Err(format!(
                "Grid {} exceeds the server max of {}",
                grid, config.max_grid
            ));
        }
        Ok(())
    }
}

fn preset(name: &str) -> Result<crate::render::shape::ShapeMask, String> {
    shapes::by_name(name).ok_or_else(|| format!("Unknown shape '{}'", name))
}

/// GET /avatar/:input - Render an avatar as PNG.
pub async fn render(
    State(state): State<Arc<AppState>>,
    Path(input): Path<String>,
    Query(query): Query<AvatarQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    query
        .check_limits(&state.config)
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let options = query
        .to_options()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let input = input
        .strip_suffix(".png")
        .map(str::to_string)
        .unwrap_or(input);

    // Run CPU-bound rendering in a blocking task to avoid starving the tokio runtime
    let png_bytes = tokio::task::spawn_blocking(move || {
        let canvas = avatar::make(&input, options);
        export::encode_png(&canvas)
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Task error: {}", e)))?
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_only_sets_transparency() {
        let options = AvatarQuery::default().to_options().unwrap();
        assert_eq!(options, vec![AvatarOption::Transparency(false)]);
    }

    #[test]
    fn test_legacy_and_hash() {
        let query = AvatarQuery {
            hash: Some(HashAlgorithm::Sha256),
            legacy: true,
            ..Default::default()
        };
        let options = query.to_options().unwrap();
        assert!(options.contains(&AvatarOption::Hash(HashAlgorithm::Sha256)));
        assert!(options.contains(&AvatarOption::Encoding(DigestEncoding::HexAscii)));
    }

    #[test]
    fn test_limits() {
        let config = ServerConfig::default();
        let within = AvatarQuery {
            size: Some(config.max_size),
            grid: Some(config.max_grid),
            ..Default::default()
        };
        assert!(within.check_limits(&config).is_ok());

        let huge_grid = AvatarQuery {
            grid: Some(70_000),
            ..Default::default()
        };
        assert!(huge_grid.check_limits(&config).unwrap_err().contains("Grid 70000"));

        let huge_size = AvatarQuery {
            size: Some(config.max_size + 1),
            ..Default::default()
        };
        assert!(huge_size.check_limits(&config).unwrap_err().contains("Size"));
    }

    #[test]
    fn test_bad_colour_is_rejected() {
        let query = AvatarQuery {
            fg: Some("#12".to_string()),
            ..Default::default()
        };
        assert!(query.to_options().unwrap_err().contains("#12"));
    }
}
