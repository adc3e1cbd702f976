//! # Pattern Composition
//!
//! Decides which grid cells are "on" (foreground) and which are "off".
//!
//! ## Bit Selection
//!
//! ```text
//! on(x, y) = (unit[y] >> (x mod 8)) & 1 == 1
//! ```
//!
//! Each row consumes one entropy unit, which supplies eight independent
//! columns. Wider half-grids reuse the same bits cyclically.
//!
//! ## Symmetry
//!
//! Only the left half (plus the centre column for odd grids) is decided.
//! Cell `(size - 1 - x, y)` always mirrors cell `(x, y)`:
//!
//! ```text
//! grid 8:  0 1 2 3 | 3 2 1 0
//! grid 9:  0 1 2 3 [4] 3 2 1 0
//! ```

use crate::digest::Digest;

/// On/off state of cell `(x, y)` on the decided half of the grid.
#[inline]
pub fn is_on(digest: &Digest, x: u32, y: u32) -> bool {
    (digest.unit(y as usize) >> (x % 8)) & 1 == 1
}

/// Number of independently decided columns: the left half, plus the centre
/// column when `grid_size` is odd.
#[inline]
pub fn independent_columns(grid_size: u32) -> u32 {
    grid_size.div_ceil(2)
}

/// Column mirrored onto `x`.
#[inline]
pub fn mirror_column(x: u32, grid_size: u32) -> u32 {
    grid_size - 1 - x
}

/// A fully resolved, mirror-symmetric grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Decide every cell once and mirror it onto the right half.
    pub fn compose(digest: &Digest, grid_size: u32) -> Self {
        let n = grid_size as usize;
        let mut cells = vec![false; n * n];

        for y in 0..grid_size {
            for x in 0..independent_columns(grid_size) {
                let on = is_on(digest, x, y);
                let row = y as usize * n;
                cells[row + x as usize] = on;
                cells[row + mirror_column(x, grid_size) as usize] = on;
            }
        }

        Self {
            size: grid_size,
            cells,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// State of cell `(x, y)`. Out-of-range cells are off.
    pub fn is_on(&self, x: u32, y: u32) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.cells[y as usize * self.size as usize + x as usize]
    }

    /// Number of "on" cells.
    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }

    /// Text rendering, `#` for on and `.` for off, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.size as usize + 1) * self.size as usize);
        for y in 0..self.size {
            for x in 0..self.size {
                out.push(if self.is_on(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{DigestEncoding, HashAlgorithm};

    fn digest(input: &str) -> Digest {
        Digest::derive(input, HashAlgorithm::Md5, DigestEncoding::Raw)
    }

    #[test]
    fn test_is_on_bit_selection() {
        // md5("") starts with 0xd4 = 0b1101_0100
        let d = digest("");
        let expected = [false, false, true, false, true, false, true, true];
        for (x, want) in expected.iter().enumerate() {
            assert_eq!(is_on(&d, x as u32, 0), *want, "bit {}", x);
        }
    }

    #[test]
    fn test_bits_reused_past_eight_columns() {
        let d = digest("wide");
        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(is_on(&d, x, y), is_on(&d, x + 8, y));
            }
        }
    }

    #[test]
    fn test_independent_columns() {
        assert_eq!(independent_columns(8), 4);
        assert_eq!(independent_columns(9), 5);
        assert_eq!(independent_columns(10), 5);
    }

    #[test]
    fn test_grid_symmetric() {
        for grid_size in [8, 9, 12, 17, 24] {
            let grid = Grid::compose(&digest("symmetry"), grid_size);
            for y in 0..grid_size {
                for x in 0..grid_size {
                    assert_eq!(
                        grid.is_on(x, y),
                        grid.is_on(mirror_column(x, grid_size), y),
                        "grid {} cell ({}, {})",
                        grid_size,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_grid_odd_centre_column() {
        let d = digest("centre");
        let grid = Grid::compose(&d, 9);
        for y in 0..9 {
            assert_eq!(grid.is_on(4, y), is_on(&d, 4, y));
        }
    }

    #[test]
    fn test_grid_matches_composer() {
        let d = digest("left half");
        let grid = Grid::compose(&d, 8);
        for y in 0..8 {
            for x in 0..4 {
                assert_eq!(grid.is_on(x, y), is_on(&d, x, y));
            }
        }
    }

    #[test]
    fn test_to_ascii_shape() {
        let grid = Grid::compose(&digest("ascii"), 8);
        let ascii = grid.to_ascii();
        let lines: Vec<&str> = ascii.lines().collect();
        assert_eq!(lines.len(), 8);
        for line in lines {
            assert_eq!(line.len(), 8);
            let reversed: String = line.chars().rev().collect();
            assert_eq!(line, reversed);
        }
        assert_eq!(ascii.matches('#').count(), grid.count_on());
    }
}
