//! Rendering of composite images to PNG.
//!
//! The display collaborator of the pipeline: takes ownership of the final
//! (row, col, band) composite with values in [0,1] and produces encoded PNG
//! bytes for the caller to write wherever it wants. NaN samples (masked
//! nodata) render as black.

use std::io::Cursor;

use image::{ImageOutputFormat, RgbImage};
use thiserror::Error;
use tracing::debug;

use compositor::CompositeImage;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Error types for rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Composite has zero-sized dimensions: {width}x{height}")]
    EmptyComposite { width: usize, height: usize },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Render a composite to PNG bytes.
pub fn render_png(composite: CompositeImage) -> RenderResult<Vec<u8>> {
    let (width, height) = (composite.width, composite.height);
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyComposite { width, height });
    }

    let rgb = to_rgb8(&composite);
    let image = RgbImage::from_raw(width as u32, height as u32, rgb)
        .expect("pixel buffer length matches composite dimensions");

    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageOutputFormat::Png)?;

    debug!(width, height, bytes = bytes.get_ref().len(), "encoded composite PNG");
    Ok(bytes.into_inner())
}

/// Quantize [0,1] float samples to 8-bit, mapping NaN to 0.
fn to_rgb8(composite: &CompositeImage) -> Vec<u8> {
    composite
        .pixels()
        .iter()
        .map(|&v| {
            if v.is_nan() {
                0
            } else {
                (v.clamp(0.0, 1.0) * 255.0).round() as u8
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compositor::{compose_rgb, RgbMapping};
    use raster_common::{CrsCode, GridSpec, Raster};

    fn composite_2x2() -> CompositeImage {
        let grid = GridSpec::new(2, 2, 1.0, -1.0, 0.5, 1.5);
        let a = Raster::new(grid, CrsCode::Epsg(4326), vec![0.0, 0.5, 1.0, f32::NAN]);
        let b = Raster::new(grid, CrsCode::Epsg(4326), vec![1.0, 1.0, 0.0, 0.0]);
        compose_rgb(&a, &b, &RgbMapping::parse("a0b").unwrap())
    }

    #[test]
    fn test_quantization_and_nan_handling() {
        let rgb = to_rgb8(&composite_2x2());
        // pixel 0: a=0.0, empty, b=1.0
        assert_eq!(&rgb[0..3], &[0, 0, 255]);
        // pixel 1: a=0.5 -> 128
        assert_eq!(rgb[3], 128);
        // pixel 3: NaN renders black
        assert_eq!(rgb[9], 0);
    }

    #[test]
    fn test_png_signature() {
        let bytes = render_png(composite_2x2()).unwrap();
        assert_eq!(&bytes[0..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }
}
