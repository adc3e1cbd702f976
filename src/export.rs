//! # Image Export
//!
//! Hands finished canvases to the `image` crate's encoders. This is the only
//! fallible step after rendering; a failure here never touches the canvas.

use std::io::{Cursor, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use crate::error::MosaicoError;
use crate::render::canvas::Canvas;

/// Encode `canvas` into an in-memory buffer of the given format.
pub fn encode(canvas: &Canvas, format: ImageFormat) -> Result<Vec<u8>, MosaicoError> {
    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), format)?;
    Ok(bytes)
}

/// Encode `canvas` as PNG.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, MosaicoError> {
    encode(canvas, ImageFormat::Png)
}

/// Stream `canvas` as PNG into any writer.
pub fn write_png<W: Write>(canvas: &Canvas, writer: W) -> Result<(), MosaicoError> {
    PngEncoder::new(writer).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

/// Save `canvas` to `path`, choosing the format from the extension.
pub fn save(canvas: &Canvas, path: &Path) -> Result<(), MosaicoError> {
    canvas.save(path)?;
    Ok(())
}
