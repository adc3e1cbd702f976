//! # Mosaico - Deterministic Identicon Avatars
//!
//! Mosaico renders a small, left-right symmetric pixel avatar from any
//! string. The same input always yields the same image, so it works as a
//! default picture for user accounts without storing any assets.
//!
//! - **Digest**: MD5 or SHA-256 of the input, exposed as entropy units
//! - **Pattern**: one unit per row, one bit per column, mirrored
//! - **Shapes**: optional binary stamps instead of solid blocks
//! - **Transparency**: background painted beneath shaped foregrounds
//!
//! ## Quick Start
//!
//! ```
//! use mosaico::{avatar::{self, AvatarOption}, export, shapes};
//!
//! let canvas = avatar::make(
//!     "someone@example.com",
//!     [
//!         AvatarOption::Size(256),
//!         AvatarOption::GridSize(10),
//!         AvatarOption::FgShape(shapes::by_name("circle")),
//!         AvatarOption::Transparency(true),
//!     ],
//! );
//! assert_eq!(canvas.dimensions(), (256, 256));
//!
//! let png = export::encode_png(&canvas)?;
//! assert!(!png.is_empty());
//! # Ok::<(), mosaico::error::MosaicoError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`avatar`] | Options and the render entry points |
//! | [`digest`] | Input hashing and entropy units |
//! | [`color`] | Default and override colour resolution |
//! | [`render`] | Pattern, shape stamping and canvas rasterization |
//! | [`shapes`] | Built-in stamp presets |
//! | [`export`] | PNG encoding and saving |
//! | [`server`] | HTTP endpoint |
//! | [`error`] | Error types |

pub mod avatar;
pub mod color;
pub mod digest;
pub mod error;
pub mod export;
pub mod render;
pub mod server;
pub mod shapes;

// Re-exports for convenience
pub use avatar::{AvatarOption, Options, make};
pub use error::MosaicoError;
pub use render::canvas::Canvas;
