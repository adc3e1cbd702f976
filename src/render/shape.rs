//! # Shape Stamps
//!
//! A [`ShapeMask`] is a binary stencil that replaces the solid block of a
//! cell. Pixels where the mask is 1 are painted; pixels where it is 0 are
//! left untouched, so whatever was painted earlier (e.g. the background
//! layer) stays visible.
//!
//! ## Scaling
//!
//! Masks are rescaled to the pixel width of a cell with nearest-neighbour
//! sampling only. Masks are binary, so any blending filter would produce
//! coverage values this model cannot represent.
//!
//! ```text
//! scale   = target_width / width
//! height' = round(height * scale)
//! src(x, y) = (floor(x / scale), floor(y / scale))
//! ```
//!
//! Sampling is done with integer arithmetic (`x * width / target_width`),
//! which is exactly `floor(x / scale)` without float error.

use image::Rgba;

use super::canvas::Canvas;

/// Rectangular binary stencil for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ShapeMask {
    /// Build a mask from rows of integers, nonzero meaning "paint".
    ///
    /// Returns `None` for empty or ragged input. Callers treat that the same
    /// as an absent mask and fall back to solid blocks.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Option<Self> {
        let width = rows.first()?.as_ref().len();
        if width == 0 || rows.iter().any(|row| row.as_ref().len() != width) {
            log::debug!("ignoring empty or non-rectangular shape mask");
            return None;
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().map(|&v| v != 0))
            .collect();

        Some(Self {
            width: width as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    /// Build a `width × height` mask from a predicate.
    ///
    /// Zero dimensions are bumped to 1 so the mask is never empty.
    pub fn from_fn(width: u32, height: u32, paint: impl Fn(u32, u32) -> bool) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(paint(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Parse a textual mask: one row per non-blank line, `0` and `1` digits,
    /// any other characters (spaces, commas) ignored.
    ///
    /// ```
    /// use mosaico::render::shape::ShapeMask;
    ///
    /// let mask = ShapeMask::parse("010\n111\n010").unwrap();
    /// assert_eq!((mask.width(), mask.height()), (3, 3));
    /// assert!(mask.get(1, 0));
    /// assert!(!mask.get(0, 0));
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let rows: Vec<Vec<i32>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .filter_map(|c| match c {
                        '0' => Some(0),
                        '1' => Some(1),
                        _ => None,
                    })
                    .collect::<Vec<i32>>()
            })
            .filter(|row| !row.is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` is painted. Out-of-range coordinates are not.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Number of painted cells.
    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Rescale `mask` to `target_width` pixels with nearest-neighbour sampling.
///
/// Returns `None` when the mask is absent (or the target has no width); the
/// rasterizer reads that as "paint a solid block".
pub fn scale(mask: Option<&ShapeMask>, target_width: u32) -> Option<ShapeMask> {
    let mask = mask?;
    if target_width == 0 {
        return None;
    }

    let (w, h) = (mask.width as u64, mask.height as u64);
    let tw = target_width as u64;
    // round(h * tw / w), half away from zero
    let target_height = ((2 * h * tw + w) / (2 * w)) as u32;

    Some(ShapeMask::from_fn(target_width, target_height, |x, y| {
        let sx = (x as u64 * w / tw).min(w - 1) as u32;
        let sy = (y as u64 * w / tw).min(h - 1) as u32;
        mask.get(sx, sy)
    }))
}

/// Paint `color` at every nonzero mask pixel, offset by `(origin_x, origin_y)`.
///
/// Zero pixels are left untouched. Writes outside the canvas are dropped.
pub fn stamp(canvas: &mut Canvas, origin_x: u32, origin_y: u32, color: Rgba<u8>, mask: &ShapeMask) {
    let (cw, ch) = canvas.dimensions();
    for y in 0..mask.height {
        let py = origin_y + y;
        if py >= ch {
            break;
        }
        for x in 0..mask.width {
            let px = origin_x + x;
            if px >= cw {
                break;
            }
            if mask.get(x, y) {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::allocate;

    fn checker() -> ShapeMask {
        ShapeMask::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(ShapeMask::from_rows(&[vec![1, 0], vec![1]]).is_none());
        assert!(ShapeMask::from_rows::<Vec<i32>>(&[]).is_none());
        assert!(ShapeMask::from_rows(&[Vec::<i32>::new()]).is_none());
    }

    #[test]
    fn test_from_rows_nonzero_paints() {
        let mask = ShapeMask::from_rows(&[[0, 2, -1]]).unwrap();
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(mask.get(2, 0));
        assert_eq!(mask.painted(), 2);
    }

    #[test]
    fn test_scale_absent() {
        assert_eq!(scale(None, 32), None);
    }

    #[test]
    fn test_scale_zero_width() {
        assert_eq!(scale(Some(&checker()), 0), None);
    }

    #[test]
    fn test_scale_up_nearest_neighbour() {
        let scaled = scale(Some(&checker()), 4).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (4, 4));
        let expected = ShapeMask::from_rows(&[
            [1, 1, 0, 0],
            [1, 1, 0, 0],
            [0, 0, 1, 1],
            [0, 0, 1, 1],
        ])
        .unwrap();
        assert_eq!(scaled, expected);
    }

    #[test]
    fn test_scale_down() {
        let mask = ShapeMask::from_fn(4, 4, |x, _| x < 2);
        let scaled = scale(Some(&mask), 2).unwrap();
        assert_eq!(scaled, ShapeMask::from_rows(&[[1, 0], [1, 0]]).unwrap());
    }

    #[test]
    fn test_scale_non_square_height_rounds() {
        // 3 wide, 2 tall scaled to 8: height = round(2 * 8 / 3) = round(5.33) = 5
        let mask = ShapeMask::from_rows(&[[1, 0, 1], [0, 1, 0]]).unwrap();
        let scaled = scale(Some(&mask), 8).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (8, 5));
        // 2 wide, 1 tall scaled to 5: height = round(2.5) = 3
        let mask = ShapeMask::from_rows(&[[1, 1]]).unwrap();
        let scaled = scale(Some(&mask), 5).unwrap();
        assert_eq!(scaled.height(), 3);
        assert_eq!(scaled.painted(), 15);
    }

    #[test]
    fn test_stamp_leaves_zero_pixels() {
        let mut canvas = allocate(4);
        let background = Rgba([9, 9, 9, 255]);
        for p in canvas.pixels_mut() {
            *p = background;
        }
        let red = Rgba([255, 0, 0, 255]);
        stamp(&mut canvas, 2, 2, red, &checker());
        assert_eq!(*canvas.get_pixel(2, 2), red);
        assert_eq!(*canvas.get_pixel(3, 3), red);
        assert_eq!(*canvas.get_pixel(3, 2), background);
        assert_eq!(*canvas.get_pixel(2, 3), background);
        assert_eq!(*canvas.get_pixel(0, 0), background);
    }

    #[test]
    fn test_stamp_clips_to_canvas() {
        let mut canvas = allocate(3);
        let solid = ShapeMask::from_fn(4, 4, |_, _| true);
        stamp(&mut canvas, 1, 1, Rgba([1, 2, 3, 255]), &solid);
        assert_eq!(*canvas.get_pixel(2, 2), Rgba([1, 2, 3, 255]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_parse_ignores_separators() {
        let mask = ShapeMask::parse("1, 0, 1\n\n0, 1, 0\n").unwrap();
        assert_eq!((mask.width(), mask.height()), (3, 2));
        assert!(mask.get(2, 0));
        assert!(mask.get(1, 1));
        assert!(ShapeMask::parse("10\n1").is_none());
        assert!(ShapeMask::parse("").is_none());
    }
}
