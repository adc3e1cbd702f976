//! # Rendering Module
//!
//! The pieces a render is assembled from, leaves first.
//!
//! ## Modules
//!
//! - [`pattern`]: on/off decision per grid cell, mirror symmetry
//! - [`shape`]: binary stamp masks, nearest-neighbour scaling, stamping
//! - [`canvas`]: pixel buffer, block layout, layered cell painting
//!
//! ## Usage Example
//!
//! ```
//! use mosaico::digest::{Digest, DigestEncoding, HashAlgorithm};
//! use mosaico::render::canvas::{BlockLayout, Layer, Rasterizer};
//! use mosaico::render::pattern::Grid;
//! use mosaico::color::Rgba;
//!
//! let digest = Digest::derive("hello", HashAlgorithm::Md5, DigestEncoding::Raw);
//! let grid = Grid::compose(&digest, 8);
//!
//! let mut bg = Layer::new(Rgba([240, 240, 240, 255]), None);
//! let mut fg = Layer::new(Rgba([20, 20, 20, 255]), None);
//! let mut raster = Rasterizer::new(64, 8, BlockLayout::Rounded);
//! for y in 0..8 {
//!     for x in 0..8 {
//!         raster.paint_cell(x, y, grid.is_on(x, y), false, &mut bg, &mut fg);
//!     }
//! }
//! let canvas = raster.into_canvas();
//! assert_eq!(canvas.dimensions(), (64, 64));
//! ```

pub mod canvas;
pub mod pattern;
pub mod shape;
