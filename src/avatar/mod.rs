//! # Avatar Engine
//!
//! Drives a full render: resolve options, derive the digest once, resolve
//! colours once, compose the symmetric grid, then paint every cell.
//!
//! ```text
//! input ──► Digest ──► Palette
//!             │
//!             └──► Grid ──► Rasterizer (bg layer, fg layer) ──► Canvas
//! ```
//!
//! ## Usage
//!
//! ```
//! use mosaico::avatar::{self, AvatarOption};
//! use mosaico::color::Rgba;
//!
//! let canvas = avatar::make(
//!     "EmberNexus23",
//!     [
//!         AvatarOption::Size(128),
//!         AvatarOption::BgColor(Rgba([255, 0, 0, 255])),
//!     ],
//! );
//! assert_eq!(canvas.dimensions(), (128, 128));
//! ```
//!
//! Every call is independent: no shared state, no I/O, and the returned
//! canvas is owned by the caller.

mod options;

pub use options::{AvatarDefaults, AvatarOption, Options, OptionsFile, ShapeSource};

use crate::color;
use crate::digest::Digest;
use crate::render::canvas::{Canvas, Layer, Rasterizer};
use crate::render::pattern::{self, Grid};

/// Render `input` with the standard defaults adjusted by `options`, applied
/// in order.
pub fn make(input: &str, options: impl IntoIterator<Item = AvatarOption>) -> Canvas {
    render(input, &Options::default().apply_all(options))
}

/// Render `input` with fully resolved options.
pub fn render(input: &str, options: &Options) -> Canvas {
    let digest = Digest::derive(input, options.hash, options.encoding);
    let palette = color::resolve(
        &digest,
        options.bg_color,
        options.fg_color,
        options.defaults.bg_color,
    );
    log::debug!(
        "rendering {}x{} avatar, grid {}, digest {}",
        options.size,
        options.size,
        options.grid_size,
        digest.to_hex()
    );

    let grid_size = options.grid_size;
    let grid = Grid::compose(&digest, grid_size);

    let mut bg = Layer::new(palette.bg, options.bg_shape.clone());
    let mut fg = Layer::new(palette.fg, options.fg_shape.clone());
    let mut raster = Rasterizer::new(options.size, grid_size, options.layout);

    for y in 0..grid_size {
        for x in 0..pattern::independent_columns(grid_size) {
            let on = grid.is_on(x, y);
            raster.paint_cell(x, y, on, options.transparency, &mut bg, &mut fg);

            let mirror = pattern::mirror_column(x, grid_size);
            if mirror != x {
                raster.paint_cell(mirror, y, on, options.transparency, &mut bg, &mut fg);
            }
        }
    }

    raster.into_canvas()
}

impl Options {
    /// Render `input` with these options.
    pub fn render(&self, input: &str) -> Canvas {
        render(input, self)
    }
}
