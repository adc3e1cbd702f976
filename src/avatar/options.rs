//! # Avatar Options
//!
//! Configuration for one render, built from [`AvatarDefaults`] and then
//! adjusted by setters applied in order (later setters win).
//!
//! Setters never fail. A value below the configured minimum is ignored and
//! the previous value is kept:
//!
//! | Field | Default | Accepted |
//! |-------|---------|----------|
//! | `size` | 64 | `>= 64` |
//! | `grid_size` | 8 | `>= 8` |
//!
//! Colours use `{0,0,0,0}` as "not set" (see [`crate::color`]).

use serde::Deserialize;

use crate::color::{self, DEFAULT_BG_COLOR, Rgba, UNSET};
use crate::digest::{DigestEncoding, HashAlgorithm};
use crate::error::MosaicoError;
use crate::render::canvas::BlockLayout;
use crate::render::shape::ShapeMask;
use crate::shapes;

/// Named defaults and lower bounds for [`Options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarDefaults {
    /// Canvas edge length in pixels
    pub size: u32,
    /// Cells per grid edge
    pub grid_size: u32,
    /// Smallest accepted canvas size
    pub min_size: u32,
    /// Smallest accepted grid size
    pub min_grid_size: u32,
    /// Background used when none is configured
    pub bg_color: Rgba<u8>,
}

impl AvatarDefaults {
    pub const STANDARD: AvatarDefaults = AvatarDefaults {
        size: 64,
        grid_size: 8,
        min_size: 64,
        min_grid_size: 8,
        bg_color: DEFAULT_BG_COLOR,
    };
}

impl Default for AvatarDefaults {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Resolved render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub(crate) defaults: AvatarDefaults,
    pub(crate) size: u32,
    pub(crate) grid_size: u32,
    pub(crate) bg_color: Rgba<u8>,
    pub(crate) fg_color: Rgba<u8>,
    pub(crate) fg_shape: Option<ShapeMask>,
    pub(crate) bg_shape: Option<ShapeMask>,
    pub(crate) transparency: bool,
    pub(crate) layout: BlockLayout,
    pub(crate) hash: HashAlgorithm,
    pub(crate) encoding: DigestEncoding,
}

/// One ordered configuration step, for [`crate::avatar::make`].
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarOption {
    Size(u32),
    GridSize(u32),
    BgColor(Rgba<u8>),
    FgColor(Rgba<u8>),
    FgShape(Option<ShapeMask>),
    BgShape(Option<ShapeMask>),
    Transparency(bool),
    Layout(BlockLayout),
    Hash(HashAlgorithm),
    Encoding(DigestEncoding),
}

impl Default for Options {
    fn default() -> Self {
        Self::new(AvatarDefaults::STANDARD)
    }
}

impl Options {
    pub fn new(defaults: AvatarDefaults) -> Self {
        Self {
            defaults,
            size: defaults.size,
            grid_size: defaults.grid_size,
            bg_color: UNSET,
            fg_color: UNSET,
            fg_shape: None,
            bg_shape: None,
            transparency: false,
            layout: BlockLayout::default(),
            hash: HashAlgorithm::default(),
            encoding: DigestEncoding::default(),
        }
    }

    /// Canvas size; values below the minimum are ignored.
    pub fn with_size(mut self, size: u32) -> Self {
        if size >= self.defaults.min_size {
            self.size = size;
        } else {
            log::debug!(
                "ignoring size {} (minimum {}), keeping {}",
                size,
                self.defaults.min_size,
                self.size
            );
        }
        self
    }

    /// Grid resolution; values below the minimum are ignored. The minimum
    /// itself is accepted.
    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        if grid_size >= self.defaults.min_grid_size {
            self.grid_size = grid_size;
        } else {
            log::debug!(
                "ignoring grid size {} (minimum {}), keeping {}",
                grid_size,
                self.defaults.min_grid_size,
                self.grid_size
            );
        }
        self
    }

    pub fn with_bg_color(mut self, color: Rgba<u8>) -> Self {
        self.bg_color = color;
        self
    }

    pub fn with_fg_color(mut self, color: Rgba<u8>) -> Self {
        self.fg_color = color;
        self
    }

    /// Foreground stamp; `None` restores solid blocks.
    pub fn with_fg_shape(mut self, shape: Option<ShapeMask>) -> Self {
        self.fg_shape = shape;
        self
    }

    /// Background stamp; `None` restores solid blocks.
    pub fn with_bg_shape(mut self, shape: Option<ShapeMask>) -> Self {
        self.bg_shape = shape;
        self
    }

    pub fn with_transparency(mut self, transparency: bool) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_layout(mut self, layout: BlockLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn with_encoding(mut self, encoding: DigestEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Apply one configuration step.
    pub fn apply(self, option: AvatarOption) -> Self {
        match option {
            AvatarOption::Size(size) => self.with_size(size),
            AvatarOption::GridSize(grid_size) => self.with_grid_size(grid_size),
            AvatarOption::BgColor(color) => self.with_bg_color(color),
            AvatarOption::FgColor(color) => self.with_fg_color(color),
            AvatarOption::FgShape(shape) => self.with_fg_shape(shape),
            AvatarOption::BgShape(shape) => self.with_bg_shape(shape),
            AvatarOption::Transparency(on) => self.with_transparency(on),
            AvatarOption::Layout(layout) => self.with_layout(layout),
            AvatarOption::Hash(hash) => self.with_hash(hash),
            AvatarOption::Encoding(encoding) => self.with_encoding(encoding),
        }
    }

    /// Apply steps in order.
    pub fn apply_all(self, options: impl IntoIterator<Item = AvatarOption>) -> Self {
        options.into_iter().fold(self, Options::apply)
    }

    /// Parse a JSON option file and apply it on top of the standard defaults.
    ///
    /// ```
    /// use mosaico::avatar::Options;
    ///
    /// let options = Options::from_json(r#"{ "size": 128, "fg_shape": "circle" }"#).unwrap();
    /// assert_eq!(options.size(), 128);
    /// assert!(options.fg_shape().is_some());
    /// ```
    pub fn from_json(text: &str) -> Result<Self, MosaicoError> {
        let file: OptionsFile = serde_json::from_str(text)
            .map_err(|e| MosaicoError::Config(format!("Invalid options JSON: {}", e)))?;
        Ok(Options::default().apply_all(file.into_options()?))
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Configured background, `UNSET` when the default applies.
    pub fn bg_color(&self) -> Rgba<u8> {
        self.bg_color
    }

    /// Configured foreground, `UNSET` when it is derived from the digest.
    pub fn fg_color(&self) -> Rgba<u8> {
        self.fg_color
    }

    pub fn fg_shape(&self) -> Option<&ShapeMask> {
        self.fg_shape.as_ref()
    }

    pub fn bg_shape(&self) -> Option<&ShapeMask> {
        self.bg_shape.as_ref()
    }

    pub fn transparency(&self) -> bool {
        self.transparency
    }

    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn encoding(&self) -> DigestEncoding {
        self.encoding
    }

    pub fn defaults(&self) -> &AvatarDefaults {
        &self.defaults
    }
}

/// A shape given either as a preset name or an explicit mask.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ShapeSource {
    Preset(String),
    Mask(Vec<Vec<i32>>),
}

impl ShapeSource {
    /// Resolve to a mask. Unknown presets are an error; ragged masks fall
    /// back to solid blocks.
    pub fn resolve(&self) -> Result<Option<ShapeMask>, MosaicoError> {
        match self {
            ShapeSource::Preset(name) => shapes::by_name(name)
                .map(Some)
                .ok_or_else(|| MosaicoError::Config(format!("Unknown shape '{}'", name))),
            ShapeSource::Mask(rows) => Ok(ShapeMask::from_rows(rows)),
        }
    }
}

/// On-disk option file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsFile {
    pub size: Option<u32>,
    pub grid_size: Option<u32>,
    pub bg_color: Option<String>,
    pub fg_color: Option<String>,
    pub fg_shape: Option<ShapeSource>,
    pub bg_shape: Option<ShapeSource>,
    pub transparency: Option<bool>,
    pub layout: Option<BlockLayout>,
    pub hash: Option<HashAlgorithm>,
    pub encoding: Option<DigestEncoding>,
}

impl OptionsFile {
    /// Convert to ordered configuration steps.
    pub fn into_options(self) -> Result<Vec<AvatarOption>, MosaicoError> {
        let mut options = Vec::new();
        if let Some(size) = self.size {
            options.push(AvatarOption::Size(size));
        }
        if let Some(grid_size) = self.grid_size {
            options.push(AvatarOption::GridSize(grid_size));
        }
        if let Some(bg) = &self.bg_color {
            options.push(AvatarOption::BgColor(color::parse_color(bg)?));
        }
        if let Some(fg) = &self.fg_color {
            options.push(AvatarOption::FgColor(color::parse_color(fg)?));
        }
        if let Some(shape) = &self.fg_shape {
            options.push(AvatarOption::FgShape(shape.resolve()?));
        }
        if let Some(shape) = &self.bg_shape {
            options.push(AvatarOption::BgShape(shape.resolve()?));
        }
        if let Some(on) = self.transparency {
            options.push(AvatarOption::Transparency(on));
        }
        if let Some(layout) = self.layout {
            options.push(AvatarOption::Layout(layout));
        }
        if let Some(hash) = self.hash {
            options.push(AvatarOption::Hash(hash));
        }
        if let Some(encoding) = self.encoding {
            options.push(AvatarOption::Encoding(encoding));
        }
        Ok(options)
    }
}
