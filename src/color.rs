//! # Colour Resolution
//!
//! Picks the background and foreground colours for a render.
//!
//! An override counts as "set" only when it differs from the RGBA zero value.
//! A transparent-black override (`{0,0,0,0}`) is therefore indistinguishable
//! from no override at all and falls back to the default. This collision is
//! intentional and pinned by tests.

pub use image::Rgba;

use crate::digest::Digest;
use crate::error::MosaicoError;

/// Light gray used when no background is configured.
pub const DEFAULT_BG_COLOR: Rgba<u8> = Rgba([240, 240, 240, 255]);

/// The zero value, meaning "not configured".
pub const UNSET: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Resolved colours for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgba<u8>,
    pub fg: Rgba<u8>,
}

/// Whether `color` is an explicit override.
#[inline]
pub fn is_set(color: Rgba<u8>) -> bool {
    color != UNSET
}

/// Foreground derived from the first three entropy units, fully opaque.
pub fn derive_foreground(digest: &Digest) -> Rgba<u8> {
    let [r, g, b] = digest.rgb();
    Rgba([r, g, b, 255])
}

/// Resolve configured colours against their defaults.
pub fn resolve(
    digest: &Digest,
    configured_bg: Rgba<u8>,
    configured_fg: Rgba<u8>,
    default_bg: Rgba<u8>,
) -> Palette {
    let bg = if is_set(configured_bg) {
        configured_bg
    } else {
        default_bg
    };
    let fg = if is_set(configured_fg) {
        configured_fg
    } else {
        derive_foreground(digest)
    };
    Palette { bg, fg }
}

/// Parse a colour string.
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` (the `#` is optional) and
/// decimal `r,g,b` or `r,g,b,a`. Alpha defaults to 255.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, MosaicoError> {
    let s = s.trim();
    let invalid = || MosaicoError::Config(format!("Invalid colour '{}'", s));

    if s.contains(',') {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        return match parts.as_slice() {
            [r, g, b] => Ok(Rgba([*r, *g, *b, 255])),
            [r, g, b, a] => Ok(Rgba([*r, *g, *b, *a])),
            _ => Err(invalid()),
        };
    }

    let digits = s.strip_prefix('#').unwrap_or(s);
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return Err(invalid()),
    };
    let bytes = hex::decode(&expanded).map_err(|_| invalid())?;
    match bytes.as_slice() {
        [r, g, b] => Ok(Rgba([*r, *g, *b, 255])),
        [r, g, b, a] => Ok(Rgba([*r, *g, *b, *a])),
        _ => Err(invalid()),
    }
}
