//! # Canvas Rasterization
//!
//! Maps grid cells onto pixel blocks and paints them.
//!
//! ## Block Layout
//!
//! ```text
//! Rounded:  block i covers [round(i * size / grid), round((i + 1) * size / grid))
//! Uniform:  block i covers [i * cell, i * cell + cell), cell = size / grid,
//!           last block extended to the canvas edge
//! ```
//!
//! Rounded edges are shared between neighbours, so blocks never overlap and
//! never leave a seam regardless of divisibility. Uniform is a cheaper
//! layout that only matches rounded output when `size % grid == 0`.
//!
//! ## Layers
//!
//! Each cell is painted in up to two passes:
//!
//! 1. the background layer, when the cell is off or transparency is on
//! 2. the foreground layer, when the cell is on
//!
//! A layer is a colour plus an optional [`ShapeMask`]. Without a mask the
//! whole block is filled; with one, the mask is scaled to the block width
//! and stamped, leaving 0-valued pixels untouched.

use std::collections::HashMap;
use std::ops::Range;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use super::shape::{self, ShapeMask};

/// The pixel buffer produced by a render.
pub type Canvas = RgbaImage;

/// Allocate a fully transparent `size × size` canvas.
pub fn allocate(size: u32) -> Canvas {
    RgbaImage::new(size, size)
}

/// How grid cells are mapped onto pixel blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockLayout {
    /// Truncated cell size; the remainder goes to the last row/column.
    Uniform,
    /// Rounded boundaries, gap-free for any size.
    #[default]
    Rounded,
}

impl BlockLayout {
    /// Pixel range covered by block `index` along one axis.
    pub fn span(self, index: u32, size: u32, grid_size: u32) -> Range<u32> {
        let range = match self {
            BlockLayout::Uniform => {
                let cell = size / grid_size;
                let start = index * cell;
                let end = if index + 1 >= grid_size {
                    size
                } else {
                    start + cell
                };
                start..end
            }
            BlockLayout::Rounded => {
                rounded_edge(index, size, grid_size)..rounded_edge(index + 1, size, grid_size)
            }
        };
        range.start.min(size)..range.end.min(size)
    }

    /// Pixel block for grid cell `(x, y)`.
    pub fn block(self, x: u32, y: u32, size: u32, grid_size: u32) -> Block {
        let cols = self.span(x, size, grid_size);
        let rows = self.span(y, size, grid_size);
        Block {
            x: cols.start,
            y: rows.start,
            width: cols.end - cols.start,
            height: rows.end - rows.start,
        }
    }
}

/// `round(index * size / grid_size)`, half up, in integer arithmetic.
#[inline]
fn rounded_edge(index: u32, size: u32, grid_size: u32) -> u32 {
    let (i, s, g) = (index as u64, size as u64, grid_size as u64);
    ((2 * i * s + g) / (2 * g)) as u32
}

/// A rectangle of pixels belonging to one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Fill `block` with `color`, clamped to the canvas.
pub fn fill_block(canvas: &mut Canvas, block: Block, color: Rgba<u8>) {
    let (cw, ch) = canvas.dimensions();
    let x_end = (block.x + block.width).min(cw);
    let y_end = (block.y + block.height).min(ch);
    for py in block.y..y_end {
        for px in block.x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

/// One paint layer: a colour and an optional stamp.
///
/// Scaled masks are cached per block width for the lifetime of the layer,
/// which is a single render.
#[derive(Debug, Clone)]
pub struct Layer {
    color: Rgba<u8>,
    shape: Option<ShapeMask>,
    scaled: HashMap<u32, Option<ShapeMask>>,
}

impl Layer {
    pub fn new(color: Rgba<u8>, shape: Option<ShapeMask>) -> Self {
        Self {
            color,
            shape,
            scaled: HashMap::new(),
        }
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn is_shaped(&self) -> bool {
        self.shape.is_some()
    }

    /// Paint this layer into `block`: a stamp if a mask is configured,
    /// otherwise a solid fill.
    pub fn paint(&mut self, canvas: &mut Canvas, block: Block) {
        let mask = self.shape.as_ref();
        let scaled = self
            .scaled
            .entry(block.width)
            .or_insert_with(|| shape::scale(mask, block.width));

        match scaled {
            Some(stencil) => shape::stamp(canvas, block.x, block.y, self.color, stencil),
            None => fill_block(canvas, block, self.color),
        }
    }
}

/// Owns the canvas for one render and paints grid cells into it.
#[derive(Debug)]
pub struct Rasterizer {
    canvas: Canvas,
    size: u32,
    grid_size: u32,
    layout: BlockLayout,
}

impl Rasterizer {
    pub fn new(size: u32, grid_size: u32, layout: BlockLayout) -> Self {
        Self {
            canvas: allocate(size),
            size,
            grid_size: grid_size.max(1),
            layout,
        }
    }

    /// Pixel block for grid cell `(x, y)`.
    pub fn block(&self, x: u32, y: u32) -> Block {
        self.layout.block(x, y, self.size, self.grid_size)
    }

    /// Paint cell `(x, y)` with the layer order described in the module docs.
    pub fn paint_cell(
        &mut self,
        x: u32,
        y: u32,
        on: bool,
        transparency: bool,
        bg: &mut Layer,
        fg: &mut Layer,
    ) {
        let block = self.block(x, y);
        if !on || transparency {
            bg.paint(&mut self.canvas, block);
        }
        if on {
            fg.paint(&mut self.canvas, block);
        }
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn spans(layout: BlockLayout, size: u32, grid: u32) -> Vec<Range<u32>> {
        (0..grid).map(|i| layout.span(i, size, grid)).collect()
    }

    #[test]
    fn test_layouts_agree_when_divisible() {
        assert_eq!(
            spans(BlockLayout::Uniform, 64, 8),
            spans(BlockLayout::Rounded, 64, 8)
        );
        assert_eq!(BlockLayout::Rounded.span(3, 64, 8), 24..32);
    }

    #[test]
    fn test_square_stamp_follows_block_width() {
        // Cell (1, 0) at 100/8 is 12 wide and 13 tall, so a square stamp
        // covers 12 rows and leaves the last one untouched.
        let square = crate::shapes::by_name("square");
        let mut bg = Layer::new(BLUE, None);
        let mut fg = Layer::new(RED, square);
        let mut raster = Rasterizer::new(100, 8, BlockLayout::Rounded);
        assert_eq!(
            raster.block(1, 0),
            Block {
                x: 13,
                y: 0,
                width: 12,
                height: 13
            }
        );

        raster.paint_cell(1, 0, true, false, &mut bg, &mut fg);
        let canvas = raster.into_canvas();
        assert_eq!(*canvas.get_pixel(13, 11), RED);
        assert_eq!(*canvas.get_pixel(24, 11), RED);
        assert_eq!(*canvas.get_pixel(13, 12), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_rounded_is_gap_free() {
        for (size, grid) in [(100, 8), (65, 9), (64, 10), (300, 17), (97, 13)] {
            let spans = spans(BlockLayout::Rounded, size, grid);
            assert_eq!(spans[0].start, 0);
            assert_eq!(spans.last().unwrap().end, size);
            for pair in spans.windows(2) {
                assert_eq!(pair[0].end, pair[1].start, "seam at size {} grid {}", size, grid);
            }
            for span in &spans {
                let width = span.end - span.start;
                assert!(width == size / grid || width == size / grid + 1);
            }
        }
    }

    #[test]
    fn test_rounded_boundaries() {
        // 100 / 8 = 12.5 -> edges round half up
        let spans = spans(BlockLayout::Rounded, 100, 8);
        assert_eq!(spans[0], 0..13);
        assert_eq!(spans[1], 13..25);
        assert_eq!(spans[7], 88..100);
    }

    #[test]
    fn test_uniform_last_block_absorbs_remainder() {
        let spans = spans(BlockLayout::Uniform, 100, 8);
        assert_eq!(spans[0], 0..12);
        assert_eq!(spans[6], 72..84);
        assert_eq!(spans[7], 84..100);
    }

    #[test]
    fn test_fill_block() {
        let mut canvas = allocate(8);
        fill_block(
            &mut canvas,
            Block {
                x: 6,
                y: 6,
                width: 4,
                height: 4,
            },
            RED,
        );
        assert_eq!(*canvas.get_pixel(7, 7), RED);
        assert_eq!(*canvas.get_pixel(5, 5), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_off_cell_paints_background() {
        let mut raster = Rasterizer::new(64, 8, BlockLayout::Rounded);
        let mut bg = Layer::new(RED, None);
        let mut fg = Layer::new(BLUE, None);
        raster.paint_cell(0, 0, false, false, &mut bg, &mut fg);
        raster.paint_cell(1, 0, true, false, &mut bg, &mut fg);
        let canvas = raster.into_canvas();
        assert_eq!(*canvas.get_pixel(3, 3), RED);
        assert_eq!(*canvas.get_pixel(11, 3), BLUE);
        assert_eq!(*canvas.get_pixel(20, 3), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_shaped_foreground_without_transparency_leaves_holes() {
        let mut raster = Rasterizer::new(64, 8, BlockLayout::Rounded);
        let mask = ShapeMask::from_rows(&[[1, 0], [0, 1]]);
        let mut bg = Layer::new(RED, None);
        let mut fg = Layer::new(BLUE, mask);
        raster.paint_cell(0, 0, true, false, &mut bg, &mut fg);
        let canvas = raster.into_canvas();
        assert_eq!(*canvas.get_pixel(0, 0), BLUE);
        assert_eq!(*canvas.get_pixel(7, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_shaped_foreground_with_transparency_shows_background() {
        let mut raster = Rasterizer::new(64, 8, BlockLayout::Rounded);
        let mask = ShapeMask::from_rows(&[[1, 0], [0, 1]]);
        let mut bg = Layer::new(RED, None);
        let mut fg = Layer::new(BLUE, mask);
        raster.paint_cell(0, 0, true, true, &mut bg, &mut fg);
        let canvas = raster.into_canvas();
        assert_eq!(*canvas.get_pixel(0, 0), BLUE);
        assert_eq!(*canvas.get_pixel(7, 0), RED);
        assert_eq!(*canvas.get_pixel(0, 7), RED);
        assert_eq!(*canvas.get_pixel(7, 7), BLUE);
    }

    #[test]
    fn test_layer_caches_scaled_masks() {
        let mut layer = Layer::new(RED, ShapeMask::from_rows(&[[1]]));
        let mut canvas = allocate(100);
        for x in 0..8 {
            let block = BlockLayout::Rounded.block(x, 0, 100, 8);
            layer.paint(&mut canvas, block);
        }
        // 100 / 8 produces blocks of 12 and 13 pixels only
        assert_eq!(layer.scaled.len(), 2);
        assert!(canvas.enumerate_pixels().filter(|(_, y, _)| *y < 12).all(|(_, _, p)| *p == RED));
    }
}
