//! # Shape Presets
//!
//! Built-in stamp masks, usable wherever a custom [`ShapeMask`] is accepted.
//! Every preset is a 16×16 mask that gets rescaled to the cell size at
//! render time.
//!
//! ## Adding a New Preset
//!
//! 1. Write a `fn(u32, u32) -> bool` predicate below
//! 2. Add its name to [`SHAPES`] and a match arm to [`by_name`]

use crate::render::shape::ShapeMask;

/// Resolution of every preset mask.
pub const PRESET_SIZE: u32 = 16;

/// All available presets, in display order.
///
/// Presets are square, and a stamp is scaled to its block's width, so even
/// `square` leaves a one-pixel strip uncovered at the bottom of a block
/// that is taller than it is wide. That only happens when the size is not
/// a multiple of the grid; leave the foreground shape unset for seamless
/// solid blocks.
pub const SHAPES: &[&str] = &[
    "square", "circle", "diamond", "ring", "dot", "triangle", "cross",
];

/// Get a preset mask by name (case-insensitive).
pub fn by_name(name: &str) -> Option<ShapeMask> {
    let paint: fn(u32, u32) -> bool = match name.to_lowercase().as_str() {
        "square" | "block" => |_, _| true,
        "circle" => circle,
        "diamond" => diamond,
        "ring" => ring,
        "dot" => dot,
        "triangle" => triangle,
        "cross" | "plus" => cross,
        _ => return None,
    };
    Some(ShapeMask::from_fn(PRESET_SIZE, PRESET_SIZE, paint))
}

/// Squared distance from the mask centre, in doubled coordinates so the
/// centre of a 16-wide mask (7.5, 7.5) stays integral.
#[inline]
fn dist2(x: u32, y: u32) -> i32 {
    let dx = 2 * x as i32 + 1 - PRESET_SIZE as i32;
    let dy = 2 * y as i32 + 1 - PRESET_SIZE as i32;
    dx * dx + dy * dy
}

fn circle(x: u32, y: u32) -> bool {
    dist2(x, y) <= 16 * 16
}

fn ring(x: u32, y: u32) -> bool {
    let d = dist2(x, y);
    (10 * 10..=16 * 16).contains(&d)
}

fn dot(x: u32, y: u32) -> bool {
    dist2(x, y) <= 8 * 8
}

fn diamond(x: u32, y: u32) -> bool {
    let dx = (2 * x as i32 + 1 - PRESET_SIZE as i32).abs();
    let dy = (2 * y as i32 + 1 - PRESET_SIZE as i32).abs();
    dx + dy <= PRESET_SIZE as i32
}

fn triangle(x: u32, y: u32) -> bool {
    // Apex at the top centre, base along the bottom row
    let dx = (2 * x as i32 + 1 - PRESET_SIZE as i32).abs();
    dx <= y as i32 + 1
}

fn cross(x: u32, y: u32) -> bool {
    let band = PRESET_SIZE / 4..PRESET_SIZE - PRESET_SIZE / 4;
    let arm = PRESET_SIZE * 3 / 8..PRESET_SIZE - PRESET_SIZE * 3 / 8;
    (band.contains(&x) && arm.contains(&y)) || (band.contains(&y) && arm.contains(&x))
}
